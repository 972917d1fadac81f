//! Agent addressing and the messages agents exchange.
//!
//! # Key Components
//!
//! *   [`AgentId`] / [`PersonalId`]: agent addresses and identities, with the
//!     one-directional [`matches`] predicate used for routing and filtering.
//! *   [`Message`]: the immutable envelope of sender, receiver, [`Performative`],
//!     text content and optional [`Payload`].
//! *   [`MessageFilter`]: sender/performative criteria for mailbox reads.

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

// --- Public Re-exports ---
pub use agent_id::{matches, AgentId, PersonalId, WILDCARD_FIELD};
pub use agent_message::{Message, MessageBuilder};
pub use message_filter::MessageFilter;
pub use payload::Payload;
pub use performative::Performative;

// --- Submodules ---

/// Defines [`AgentId`], [`PersonalId`] and [`matches`].
mod agent_id;
/// Defines [`Message`] and [`MessageBuilder`].
mod agent_message;
/// Defines [`MessageFilter`].
mod message_filter;
/// Defines the [`Payload`] trait.
mod payload;
/// Defines [`Performative`].
mod performative;
