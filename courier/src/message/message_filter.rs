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

use crate::message::{matches, AgentId, Message, Performative, PersonalId};

/// Selection criteria for reading from a mailbox.
///
/// An unset field accepts anything. The sender criterion is applied with
/// [`matches`] in the owner role, so a `Category` filter accepts any sender of
/// that category.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MessageFilter {
    sender: Option<AgentId>,
    performative: Option<Performative>,
}

impl MessageFilter {
    /// A filter accepting every message.
    #[must_use]
    pub const fn any() -> Self {
        Self {
            sender: None,
            performative: None,
        }
    }

    /// Only messages whose sender is selected by `sender`.
    #[must_use]
    pub fn from_sender(sender: impl Into<AgentId>) -> Self {
        Self::any().sender(sender)
    }

    /// Only messages with the given performative.
    #[must_use]
    pub const fn of(performative: Performative) -> Self {
        Self {
            sender: None,
            performative: Some(performative),
        }
    }

    /// Restricts the sender.
    #[must_use]
    pub fn sender(mut self, sender: impl Into<AgentId>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Restricts the performative.
    #[must_use]
    pub const fn performative(mut self, performative: Performative) -> Self {
        self.performative = Some(performative);
        self
    }

    /// Whether `message` satisfies every set criterion.
    #[must_use]
    pub fn accepts(&self, message: &Message) -> bool {
        let sender_ok = self
            .sender
            .as_ref()
            .map_or(true, |filter| matches(filter, message.sender()));
        let performative_ok = self
            .performative
            .map_or(true, |p| p == message.performative());
        sender_ok && performative_ok
    }
}

impl From<AgentId> for MessageFilter {
    fn from(sender: AgentId) -> Self {
        Self::from_sender(sender)
    }
}

impl From<&PersonalId> for MessageFilter {
    fn from(sender: &PersonalId) -> Self {
        Self::from_sender(sender)
    }
}

impl From<Performative> for MessageFilter {
    fn from(performative: Performative) -> Self {
        Self::of(performative)
    }
}

impl fmt::Display for MessageFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sender = self.sender.clone().unwrap_or_default();
        match self.performative {
            Some(p) => write!(f, "{p} from {sender}"),
            None => write!(f, "any from {sender}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn from_x(performative: Performative) -> Message {
        Message::new(
            PersonalId::new("X", "Cliente"),
            AgentId::category_of("Auctioneer"),
            performative,
            "",
        )
    }

    #[test]
    fn empty_filter_accepts_everything() {
        assert!(MessageFilter::any().accepts(&from_x(Performative::Unknown)));
    }

    #[test]
    fn sender_filter_uses_owner_role() {
        let message = from_x(Performative::Request);
        assert!(MessageFilter::from_sender(AgentId::category_of("Cliente")).accepts(&message));
        assert!(MessageFilter::from_sender(PersonalId::new("X", "Cliente")).accepts(&message));
        assert!(!MessageFilter::from_sender(PersonalId::new("Z", "Cliente")).accepts(&message));
        assert!(!MessageFilter::from_sender(AgentId::category_of("Auctioneer")).accepts(&message));
    }

    #[test]
    fn both_criteria_must_hold() {
        let filter = MessageFilter::from_sender(AgentId::category_of("Cliente")).performative(Performative::Inform);
        assert!(filter.accepts(&from_x(Performative::Inform)));
        assert!(!filter.accepts(&from_x(Performative::Request)));
    }
}
