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

use thiserror::Error;

use crate::message::{AgentId, PersonalId};

/// Errors produced by mailboxes, the directory, and the agent runtime.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum CourierError {
    /// A required value was missing or out of range.
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// The target mailbox already holds `capacity` messages.
    #[error("mailbox of {owner} is full ({capacity} messages)")]
    MailboxFull {
        /// Owner of the mailbox that rejected the write.
        owner: PersonalId,
        /// The mailbox's capacity bound.
        capacity: usize,
    },

    /// A non-blocking read or lookup found no message matching the filter.
    #[error("no message matching the filter")]
    MessageNotFound,

    /// A mailbox with this owner is already registered.
    #[error("agent {0} is already registered")]
    DuplicateAgent(PersonalId),

    /// No mailbox with this exact owner is registered.
    #[error("agent {0} is not registered")]
    AgentNotFound(AgentId),

    /// The remote boundary could not be reached (stopped server, lost connection, bad address).
    #[error("remote service unavailable: {0}")]
    RemoteUnavailable(String),

    /// A blocking operation was aborted by cooperative cancellation.
    #[error("operation cancelled")]
    Cancelled,

    /// The agent has no directory handle yet; `init` has not succeeded.
    #[error("agent is not initialized")]
    Uninitialized,

    /// Behaviours can only be started from within a Tokio runtime.
    #[error("no Tokio runtime is available to run behaviours")]
    NoRuntime,

    /// Registration or unregistration with the directory failed during agent lifecycle.
    #[error("directory error: {0}")]
    Directory(#[source] Box<CourierError>),
}

impl CourierError {
    /// Wraps `cause` as a [`CourierError::Directory`] failure.
    pub(crate) fn directory(cause: CourierError) -> Self {
        Self::Directory(Box::new(cause))
    }

    /// Returns `true` for [`CourierError::Cancelled`].
    #[must_use]
    pub const fn is_cancelled(&self) -> bool {
        matches!(self, Self::Cancelled)
    }
}

/// Result alias used throughout the crate.
pub type Result<T, E = CourierError> = std::result::Result<T, E>;
