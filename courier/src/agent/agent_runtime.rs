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

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio_util::sync::CancellationToken;
use tokio_util::task::TaskTracker;
use tracing::{debug, instrument, trace, warn};

use crate::agent::behaviour_context::BehaviourControl;
use crate::agent::behaviour_runner::run_behaviour;
use crate::agent::{AgentHandle, BehaviourContext, BehaviourHandle, BehaviourKind, BehaviourState};
use crate::common::{naming, CourierConfig, CourierError, DirectoryRef, ListenerId, Mailbox, Result, CONFIG};
use crate::message::{Message, MessageFilter, PersonalId};
use crate::traits::{Behaviour, LogListener};

/// An agent: one mailbox, a directory registration, and the behaviours that
/// act on its behalf.
///
/// Typical use is `add_behaviour` → `init` → `start`, then `destroy` and
/// `join` to shut down. Each started behaviour runs on its own Tokio task.
#[derive(Debug)]
pub struct Agent {
    handle: AgentHandle,
    behaviours: Vec<BehaviourSlot>,
    tracker: TaskTracker,
    config: CourierConfig,
}

struct BehaviourSlot {
    control: Arc<BehaviourControl>,
    // Taken when the behaviour is spawned.
    behaviour: Option<Box<dyn Behaviour>>,
}

impl std::fmt::Debug for BehaviourSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BehaviourSlot")
            .field("name", &self.control.name())
            .field("state", &self.control.state())
            .finish()
    }
}

impl Agent {
    /// Creates an agent using the process-wide [`CONFIG`].
    #[must_use]
    pub fn new(id: PersonalId) -> Self {
        Self::with_mailbox(Mailbox::new(id), CONFIG.clone())
    }

    /// Creates an agent with an explicit configuration.
    ///
    /// # Errors
    ///
    /// [`CourierError::InvalidArgument`] if the configured mailbox capacity is zero.
    pub fn with_config(id: PersonalId, config: CourierConfig) -> Result<Self> {
        let mailbox = Mailbox::with_capacity(id, config.limits.mailbox_capacity)?;
        Ok(Self::with_mailbox(mailbox, config))
    }

    /// Creates an agent around an existing mailbox. The agent's id is the mailbox owner.
    #[must_use]
    pub fn with_mailbox(mailbox: Mailbox, config: CourierConfig) -> Self {
        Self {
            handle: AgentHandle::new(mailbox),
            behaviours: Vec::new(),
            tracker: TaskTracker::new(),
            config,
        }
    }

    /// The agent's identity.
    #[must_use]
    pub fn id(&self) -> &PersonalId {
        self.handle.id()
    }

    /// A cloneable handle for sending and receiving on this agent's behalf.
    #[must_use]
    pub fn handle(&self) -> AgentHandle {
        self.handle.clone()
    }

    /// The agent's own mailbox.
    #[must_use]
    pub fn mailbox(&self) -> &Arc<Mailbox> {
        self.handle.mailbox()
    }

    /// Adds a behaviour in the `NotStarted` state. It runs on the next [`start`](Self::start).
    pub fn add_behaviour<B: Behaviour>(&mut self, kind: BehaviourKind, behaviour: B) -> BehaviourHandle {
        let name = std::any::type_name::<B>()
            .rsplit("::")
            .next()
            .unwrap_or("behaviour")
            .to_string();
        let control = Arc::new(BehaviourControl::new(name, kind));
        self.behaviours.push(BehaviourSlot {
            control: Arc::clone(&control),
            behaviour: Some(Box::new(behaviour)),
        });
        BehaviourHandle::new(control)
    }

    /// Handles to every behaviour, in the order they were added.
    #[must_use]
    pub fn behaviours(&self) -> Vec<BehaviourHandle> {
        self.behaviours
            .iter()
            .map(|slot| BehaviourHandle::new(Arc::clone(&slot.control)))
            .collect()
    }

    /// Current state of every behaviour, in the order they were added.
    #[must_use]
    pub fn behaviour_states(&self) -> Vec<BehaviourState> {
        self.behaviours.iter().map(|slot| slot.control.state()).collect()
    }

    /// Registers the mailbox with the directory published at the configured address.
    ///
    /// # Errors
    ///
    /// [`CourierError::Directory`] wrapping the lookup or registration failure.
    #[instrument(skip(self), fields(agent = %self.id()))]
    pub async fn init(&self) -> Result<()> {
        let address = self.config.directory_address();
        let directory = naming::lookup(&address).map_err(CourierError::directory)?;
        self.init_with(Arc::new(directory)).await
    }

    /// Registers the mailbox with `directory`.
    ///
    /// # Errors
    ///
    /// [`CourierError::Directory`] wrapping the registration failure.
    #[instrument(skip(self, directory), fields(agent = %self.id()))]
    pub async fn init_with(&self, directory: DirectoryRef) -> Result<()> {
        directory
            .register(self.handle.mailbox().clone())
            .await
            .map_err(CourierError::directory)?;
        self.handle.set_directory(Some(directory));
        self.handle.notify(&format!("INIT agent {}", self.id()));
        Ok(())
    }

    /// Whether `init` has succeeded and `destroy` has not.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.handle.is_initialized()
    }

    /// Spawns every behaviour still `NotStarted`. Already running or finished
    /// behaviours are left alone.
    ///
    /// # Errors
    ///
    /// [`CourierError::NoRuntime`] when called outside a Tokio runtime; no
    /// behaviour changes state in that case.
    #[instrument(skip(self), fields(agent = %self.id()))]
    pub fn start(&mut self) -> Result<()> {
        let runtime = Handle::try_current().map_err(|_| CourierError::NoRuntime)?;
        for slot in &mut self.behaviours {
            if !slot.control.mark_running() {
                continue;
            }
            let Some(behaviour) = slot.behaviour.take() else {
                continue;
            };
            let ctx = BehaviourContext::new(self.handle.clone(), Arc::clone(&slot.control));
            trace!("spawning {}", slot.control.name());
            self.tracker.spawn_on(run_behaviour(behaviour, ctx), &runtime);
        }
        Ok(())
    }

    /// See [`AgentHandle::send`].
    ///
    /// # Errors
    ///
    /// [`CourierError::Uninitialized`] before `init`, a directory failure, or
    /// the first delivery failure.
    pub async fn send(&self, message: Message) -> Result<()> {
        self.handle.send(message).await
    }

    /// See [`AgentHandle::receive`].
    ///
    /// # Errors
    ///
    /// [`CourierError::Cancelled`] if `cancel` fires first.
    pub async fn receive(&self, filter: &MessageFilter, cancel: &CancellationToken) -> Result<Message> {
        self.handle.receive(filter, cancel).await
    }

    /// See [`AgentHandle::try_receive`].
    ///
    /// # Errors
    ///
    /// [`CourierError::MessageNotFound`] if nothing pending matches.
    pub fn try_receive(&self, filter: &MessageFilter) -> Result<Message> {
        self.handle.try_receive(filter)
    }

    /// Whether a message accepted by `filter` is pending.
    #[must_use]
    pub fn has_message(&self, filter: &MessageFilter) -> bool {
        self.handle.has_message(filter)
    }

    /// Unregisters from the directory and stops every behaviour not already done.
    ///
    /// Behaviours are stopped even when unregistration fails.
    ///
    /// # Errors
    ///
    /// [`CourierError::Uninitialized`] before `init`, otherwise
    /// [`CourierError::Directory`] wrapping the unregistration failure.
    #[instrument(skip(self), fields(agent = %self.id()))]
    pub async fn destroy(&self) -> Result<()> {
        let directory = self.handle.directory()?;
        let unregistered = directory
            .unregister(self.id())
            .await
            .map_err(CourierError::directory);

        for slot in &self.behaviours {
            if !slot.control.is_done() {
                debug!("stopping {}", slot.control.name());
                slot.control.done();
            }
        }

        match unregistered {
            Ok(()) => {
                self.handle.set_directory(None);
                self.handle.notify(&format!("DESTROY agent {}", self.id()));
                Ok(())
            }
            Err(err) => {
                warn!("unregistration failed: {}", err);
                Err(err)
            }
        }
    }

    /// Waits for every spawned behaviour task to finish, up to the configured
    /// shutdown timeout. Returns `false` if the timeout elapsed first.
    #[instrument(skip(self), fields(agent = %self.id()))]
    pub async fn join(&self) -> bool {
        self.tracker.close();
        let timeout = self.config.agent_shutdown_timeout();
        let finished = tokio::time::timeout(timeout, self.tracker.wait()).await.is_ok();
        self.tracker.reopen();
        if !finished {
            warn!("behaviours still running after {:?}", timeout);
        }
        finished
    }

    /// Subscribes `listener` to this agent's lines.
    pub fn add_listener(&self, listener: Arc<dyn LogListener>) -> ListenerId {
        self.handle.add_listener(listener)
    }

    /// Removes a subscription. Returns `false` if it was not present.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.handle.remove_listener(id)
    }
}
