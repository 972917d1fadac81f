//! Agents and the behaviours that run on their behalf.
//!
//! # Key Components
//!
//! *   [`Agent`]: owns a mailbox and a set of behaviours; registers with a
//!     directory on `init`, spawns behaviours on `start`, and tears down on
//!     `destroy`.
//! *   [`AgentHandle`]: cloneable access to an agent's messaging, held by
//!     behaviours in place of the agent itself.
//! *   [`BehaviourContext`]: what a running behaviour sees; its blocking
//!     operations end with `Cancelled` once the behaviour is done.
//! *   [`BehaviourHandle`], [`BehaviourKind`], [`BehaviourState`]: lifecycle
//!     observation and control.

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

pub use agent_handle::AgentHandle;
pub use agent_runtime::Agent;
pub use behaviour_context::{BehaviourContext, BehaviourHandle, BehaviourKind, BehaviourState};

/// Defines [`AgentHandle`].
mod agent_handle;
/// Defines [`Agent`].
mod agent_runtime;
/// Defines the behaviour lifecycle types and [`BehaviourContext`].
mod behaviour_context;
/// Drives a single behaviour task.
mod behaviour_runner;
