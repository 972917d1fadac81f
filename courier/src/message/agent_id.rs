/*
 * Copyright (c) 2024. Govcraft
 *
 * Licensed under either of
 *   * Apache License, Version 2.0 (the "License");
 *     you may not use this file except in compliance with the License.
 *     You may obtain a copy of the License at http://www.apache.org/licenses/LICENSE-2.0
 *   * MIT license: http://opensource.org/licenses/MIT
 *
 * Unless required by applicable law or agreed to in writing, software
 * distributed under the License is distributed on an "AS IS" BASIS,
 * WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
 * See the applicable License for the specific language governing permissions and
 * limitations under that License.
 */

use std::fmt;

use serde::{Deserialize, Serialize};

/// Field value that matches any name or category.
pub const WILDCARD_FIELD: &str = "";

/// The fully qualified identity of a single agent.
///
/// This is the only shape a mailbox can be owned by. Both fields are fixed at
/// construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PersonalId {
    name: String,
    category: String,
}

impl PersonalId {
    /// Creates a personal id from a name and a category.
    pub fn new(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            category: category.into(),
        }
    }

    /// The agent's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The agent's category.
    #[must_use]
    pub fn category(&self) -> &str {
        &self.category
    }
}

impl fmt::Display for PersonalId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.name, self.category)
    }
}

/// An agent address, used either as an identity or as a query pattern.
///
/// The variants are ordered by specificity. `Wildcard` and `Category` only
/// ever appear as patterns: they address groups of agents, never a mailbox.
///
/// The derived `PartialEq` is exact structural identity. Address *matching*
/// is a different, one-directional relation; use [`AgentId::matches`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AgentId {
    /// Matches every agent.
    Wildcard,
    /// Every agent of the given category.
    Category(String),
    /// A single agent.
    Personal(PersonalId),
}

impl AgentId {
    /// Shorthand for `AgentId::Category(category.into())`.
    pub fn category_of(category: impl Into<String>) -> Self {
        Self::Category(category.into())
    }

    /// Shorthand for `AgentId::Personal(PersonalId::new(name, category))`.
    pub fn personal(name: impl Into<String>, category: impl Into<String>) -> Self {
        Self::Personal(PersonalId::new(name, category))
    }

    /// The name field; empty for `Wildcard` and `Category`.
    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::Personal(id) => id.name(),
            Self::Wildcard | Self::Category(_) => WILDCARD_FIELD,
        }
    }

    /// The category field; empty for `Wildcard`.
    #[must_use]
    pub fn category(&self) -> &str {
        match self {
            Self::Personal(id) => id.category(),
            Self::Category(category) => category,
            Self::Wildcard => WILDCARD_FIELD,
        }
    }

    /// Tests `pattern` against `self`, with `self` in the owner role.
    ///
    /// See [`matches`] for the rules.
    #[must_use]
    pub fn matches(&self, pattern: &AgentId) -> bool {
        matches(self, pattern)
    }
}

impl Default for AgentId {
    fn default() -> Self {
        Self::Wildcard
    }
}

impl From<PersonalId> for AgentId {
    fn from(id: PersonalId) -> Self {
        Self::Personal(id)
    }
}

impl From<&PersonalId> for AgentId {
    fn from(id: &PersonalId) -> Self {
        Self::Personal(id.clone())
    }
}

impl fmt::Display for AgentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Wildcard => f.write_str("Generic Agent"),
            Self::Category(category) => write!(f, "( , {category})"),
            Self::Personal(id) => id.fmt(f),
        }
    }
}

/// Address matching: does `pattern` select `owner`?
///
/// The owner's shape picks the rule:
///
/// * `Wildcard` accepts every pattern.
/// * `Category(c)` accepts a pattern whose category is `c` or empty.
/// * `Personal(n, c)` accepts a pattern whose name is `n` or empty *and* whose
///   category is `c` or empty.
///
/// The relation is neither symmetric nor transitive. The directory calls it
/// with the registered mailbox owner on the left and the sender's address on
/// the right; a mailbox read calls it with the reader's filter on the left and
/// the pending message's sender on the right.
#[must_use]
pub fn matches(owner: &AgentId, pattern: &AgentId) -> bool {
    let field_matches = |expected: &str, actual: &str| actual == expected || actual == WILDCARD_FIELD;
    match owner {
        AgentId::Wildcard => true,
        AgentId::Category(category) => field_matches(category, pattern.category()),
        AgentId::Personal(id) => {
            field_matches(id.name(), pattern.name())
                && field_matches(id.category(), pattern.category())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn a_cat1() -> AgentId {
        AgentId::personal("A", "cat1")
    }

    #[test]
    fn personal_owner_accepts_its_category() {
        assert!(matches(&a_cat1(), &AgentId::category_of("cat1")));
        assert!(!matches(&a_cat1(), &AgentId::category_of("cat2")));
    }

    #[test]
    fn personal_owner_accepts_wildcard_name() {
        assert!(matches(&a_cat1(), &AgentId::personal("", "cat1")));
        assert!(matches(&a_cat1(), &AgentId::personal("A", "")));
        assert!(!matches(&a_cat1(), &AgentId::personal("B", "cat1")));
        assert!(!matches(&a_cat1(), &AgentId::personal("A", "cat2")));
    }

    #[test]
    fn personal_owner_accepts_generic_pattern() {
        assert!(matches(&a_cat1(), &AgentId::Wildcard));
        assert!(matches(&a_cat1(), &AgentId::category_of("")));
    }

    #[test]
    fn wildcard_owner_accepts_anything() {
        for pattern in [
            AgentId::Wildcard,
            AgentId::category_of("x"),
            AgentId::personal("n", "c"),
        ] {
            assert!(matches(&AgentId::Wildcard, &pattern));
        }
    }

    #[test]
    fn category_owner_ignores_pattern_name() {
        let owner = AgentId::category_of("Auctioneer");
        assert!(matches(&owner, &AgentId::personal("Y", "Auctioneer")));
        assert!(matches(&owner, &AgentId::personal("Y", "")));
        assert!(!matches(&owner, &AgentId::personal("Y", "Cliente")));
    }

    #[test]
    fn matching_is_not_symmetric() {
        let named = a_cat1();
        let unnamed = AgentId::personal("", "cat1");
        assert!(matches(&named, &unnamed));
        assert!(!matches(&unnamed, &named));

        // An empty owner category is literal, only a pattern field wildcards.
        assert!(!matches(&AgentId::category_of(""), &AgentId::category_of("cat2")));
        assert!(matches(&AgentId::category_of("cat2"), &AgentId::category_of("")));
    }

    #[test]
    fn display_forms() {
        assert_eq!(AgentId::Wildcard.to_string(), "Generic Agent");
        assert_eq!(AgentId::category_of("Time Provider").to_string(), "( , Time Provider)");
        assert_eq!(a_cat1().to_string(), "(A, cat1)");
    }
}
