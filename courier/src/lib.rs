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

#![forbid(unsafe_code)]
#![forbid(missing_docs)]

//! # Courier
//!
//! A small agent messaging runtime on Tokio. Agents exchange messages through
//! bounded per-agent mailboxes and find each other through a shared directory
//! that resolves address patterns.
//!
//! ## Key Concepts
//!
//! - **Addresses (`AgentId`)**: `Wildcard`, `Category` or `Personal`. A
//!   one-directional `matches` predicate lets a sender reach "every agent of
//!   category C" and lets a reader select messages by sender.
//! - **Mailboxes (`Mailbox`)**: bounded FIFO queues with filtered, blocking,
//!   cancellable reads.
//! - **Directory (`DirectoryService`)**: registers mailboxes and resolves
//!   address patterns to them. A `DirectoryServer` publishes a registry in
//!   the process-wide `naming` table where agents look it up.
//! - **Agents and behaviours (`Agent`, `Behaviour`)**: each behaviour runs on
//!   its own task through `setup`, `action` and `dispose`, and is stopped
//!   cooperatively with `done`.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use courier::prelude::*;
//!
//! struct Greeter;
//!
//! #[async_trait]
//! impl Behaviour for Greeter {
//!     async fn action(&mut self, ctx: &BehaviourContext) -> Result<()> {
//!         let hello = ctx.receive(&MessageFilter::of(Performative::Request)).await?;
//!         ctx.send(hello.reply(Performative::Inform, "hi")).await
//!     }
//! }
//!
//! let server = DirectoryServer::from_config(&CONFIG);
//! server.start();
//!
//! let mut agent = Agent::new(PersonalId::new("greeter", "Greeters"));
//! agent.add_behaviour(BehaviourKind::RunUntilDone, Greeter);
//! agent.init().await?;
//! agent.start()?;
//! ```

/// Shared runtime components: mailbox, directory, configuration, errors.
pub(crate) mod common;

/// Agents and behaviours.
pub(crate) mod agent;

/// Addresses, messages and filters.
pub(crate) mod message;

/// Core traits.
pub(crate) mod traits;

/// A prelude module for conveniently importing the most commonly used items.
pub mod prelude {
    // External crate re-exports
    pub use async_trait::async_trait;
    pub use tokio_util::sync::CancellationToken;

    // Core types
    pub use crate::agent::{Agent, AgentHandle, BehaviourContext, BehaviourHandle, BehaviourKind, BehaviourState};
    pub use crate::common::config::{DirectoryConfig, LimitsConfig, TimeoutConfig};
    pub use crate::common::naming;
    pub use crate::common::{
        CourierConfig, CourierError, Directory, DirectoryAddress, DirectoryRef, DirectoryServer, ListenerId,
        Mailbox, MailboxHandle, RemoteDirectory, Result, CONFIG,
    };
    pub use crate::message::{
        matches, AgentId, Message, MessageBuilder, MessageFilter, Payload, Performative, PersonalId, WILDCARD_FIELD,
    };
    pub use crate::traits::{Behaviour, DirectoryService, LogListener, MailboxEndpoint};
}
