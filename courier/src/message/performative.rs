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

/// The speech act a message performs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Performative {
    /// Fallback when the act is not known.
    #[default]
    Unknown,
    /// Ask the receiver to perform an action.
    Request,
    /// Tell the receiver something is true.
    Inform,
    /// Decline a request.
    Refuse,
    /// Ask whether a proposition holds.
    QueryIf,
    /// Ask for the object a reference denotes.
    QueryRef,
    /// Accept a request.
    Agree,
    /// Report that an attempted action failed.
    Failure,
    /// The received message could not be understood.
    NotUnderstood,
    /// Solicit proposals.
    CallForProposal,
    /// Submit a proposal.
    Proposal,
}

impl Performative {
    /// The upper-case wire name, e.g. `QUERY_IF`.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Request => "REQUEST",
            Self::Inform => "INFORM",
            Self::Refuse => "REFUSE",
            Self::QueryIf => "QUERY_IF",
            Self::QueryRef => "QUERY_REF",
            Self::Agree => "AGREE",
            Self::Failure => "FAILURE",
            Self::NotUnderstood => "NOT_UNDERSTOOD",
            Self::CallForProposal => "CALL_FOR_PROPOSAL",
            Self::Proposal => "PROPOSAL",
        }
    }
}

impl fmt::Display for Performative {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
