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
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::trace;

use crate::agent::AgentHandle;
use crate::common::{CourierError, Result};
use crate::message::{Message, MessageFilter, PersonalId};

/// How often a behaviour's `action` runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BehaviourKind {
    /// `action` runs exactly once.
    RunOnce,
    /// `action` runs repeatedly until the behaviour is marked done.
    RunUntilDone,
}

/// Lifecycle position of a behaviour. `Done` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum BehaviourState {
    /// Added but not yet spawned.
    #[default]
    NotStarted,
    /// Spawned and not yet finished.
    Running,
    /// Finished or stopped.
    Done,
}

impl fmt::Display for BehaviourState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotStarted => f.write_str("not started"),
            Self::Running => f.write_str("running"),
            Self::Done => f.write_str("done"),
        }
    }
}

/// State shared between a running behaviour, its context and its handles.
#[derive(Debug)]
pub(crate) struct BehaviourControl {
    name: String,
    kind: BehaviourKind,
    state: Mutex<BehaviourState>,
    token: CancellationToken,
}

impl BehaviourControl {
    pub(crate) fn new(name: String, kind: BehaviourKind) -> Self {
        Self {
            name,
            kind,
            state: Mutex::new(BehaviourState::NotStarted),
            token: CancellationToken::new(),
        }
    }

    pub(crate) fn name(&self) -> &str {
        &self.name
    }

    pub(crate) const fn kind(&self) -> BehaviourKind {
        self.kind
    }

    pub(crate) fn state(&self) -> BehaviourState {
        *self.state.lock()
    }

    pub(crate) fn is_done(&self) -> bool {
        self.state() == BehaviourState::Done
    }

    /// Moves `NotStarted` to `Running`. Returns `false` from any other state.
    pub(crate) fn mark_running(&self) -> bool {
        let mut state = self.state.lock();
        if *state == BehaviourState::NotStarted {
            *state = BehaviourState::Running;
            true
        } else {
            false
        }
    }

    /// Marks the behaviour done and fires its token, aborting any wait in progress.
    pub(crate) fn done(&self) {
        *self.state.lock() = BehaviourState::Done;
        self.token.cancel();
    }

    pub(crate) fn token(&self) -> &CancellationToken {
        &self.token
    }
}

/// External view of one behaviour, returned by
/// [`Agent::add_behaviour`](crate::agent::Agent::add_behaviour).
#[derive(Debug, Clone)]
pub struct BehaviourHandle {
    control: Arc<BehaviourControl>,
}

impl BehaviourHandle {
    pub(crate) const fn new(control: Arc<BehaviourControl>) -> Self {
        Self { control }
    }

    /// The behaviour's type name, used in log lines.
    #[must_use]
    pub fn name(&self) -> &str {
        self.control.name()
    }

    /// How often the behaviour's `action` runs.
    #[must_use]
    pub fn kind(&self) -> BehaviourKind {
        self.control.kind()
    }

    /// The behaviour's current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BehaviourState {
        self.control.state()
    }

    /// Whether the behaviour has reached [`BehaviourState::Done`].
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.control.is_done()
    }

    /// Stops the behaviour. A blocked receive or sleep returns
    /// [`CourierError::Cancelled`]; a behaviour not yet started never will be.
    pub fn done(&self) {
        self.control.done();
    }
}

/// What a running [`Behaviour`](crate::traits::Behaviour) sees of its agent.
///
/// Blocking operations on the context observe the behaviour's cancellation:
/// once the behaviour is done they return [`CourierError::Cancelled`], which
/// the behaviour should propagate.
#[derive(Debug, Clone)]
pub struct BehaviourContext {
    agent: AgentHandle,
    control: Arc<BehaviourControl>,
}

impl BehaviourContext {
    pub(crate) const fn new(agent: AgentHandle, control: Arc<BehaviourControl>) -> Self {
        Self { agent, control }
    }

    /// The owning agent.
    #[must_use]
    pub const fn agent(&self) -> &AgentHandle {
        &self.agent
    }

    /// The owning agent's id.
    #[must_use]
    pub fn id(&self) -> &PersonalId {
        self.agent.id()
    }

    /// This behaviour's type name.
    #[must_use]
    pub fn name(&self) -> &str {
        self.control.name()
    }

    /// How often this behaviour's `action` runs.
    #[must_use]
    pub fn kind(&self) -> BehaviourKind {
        self.control.kind()
    }

    /// This behaviour's current lifecycle state.
    #[must_use]
    pub fn state(&self) -> BehaviourState {
        self.control.state()
    }

    /// Whether this behaviour has been marked done.
    #[must_use]
    pub fn is_done(&self) -> bool {
        self.control.is_done()
    }

    /// Marks this behaviour done. A `RunUntilDone` behaviour stops after the
    /// current `action` returns.
    pub fn done(&self) {
        trace!("{} marked done", self.control.name());
        self.control.done();
    }

    /// The token fired when this behaviour is done, for custom waits.
    #[must_use]
    pub fn cancellation_token(&self) -> CancellationToken {
        self.control.token().clone()
    }

    /// Sends `message` through the agent's directory.
    ///
    /// # Errors
    ///
    /// See [`AgentHandle::send`].
    pub async fn send(&self, message: Message) -> Result<()> {
        self.agent.send(message).await
    }

    /// Waits for the oldest message accepted by `filter`.
    ///
    /// # Errors
    ///
    /// [`CourierError::Cancelled`] once the behaviour is done.
    pub async fn receive(&self, filter: &MessageFilter) -> Result<Message> {
        self.agent.receive(filter, self.control.token()).await
    }

    /// Takes the oldest message accepted by `filter` without waiting.
    ///
    /// # Errors
    ///
    /// [`CourierError::MessageNotFound`] if nothing pending matches.
    pub fn try_receive(&self, filter: &MessageFilter) -> Result<Message> {
        self.agent.try_receive(filter)
    }

    /// Whether a message accepted by `filter` is pending. Never waits.
    #[must_use]
    pub fn has_message(&self, filter: &MessageFilter) -> bool {
        self.agent.has_message(filter)
    }

    /// Pauses for `duration`.
    ///
    /// # Errors
    ///
    /// [`CourierError::Cancelled`] if the behaviour is done before the pause ends.
    pub async fn sleep(&self, duration: Duration) -> Result<()> {
        let token = self.control.token();
        if token.is_cancelled() {
            return Err(CourierError::Cancelled);
        }
        tokio::select! {
            biased;
            () = token.cancelled() => Err(CourierError::Cancelled),
            () = tokio::time::sleep(duration) => Ok(()),
        }
    }
}
