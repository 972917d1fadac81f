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

use parking_lot::RwLock;
use static_assertions::assert_impl_all;
use tokio_util::sync::CancellationToken;
use tracing::{instrument, trace, warn};

use crate::common::{CourierError, DirectoryRef, ListenerId, LogListeners, Mailbox, Result};
use crate::message::{Message, MessageFilter, PersonalId};
use crate::traits::LogListener;

/// A cheap, cloneable reference to an agent's messaging state.
///
/// Behaviours hold one of these instead of the [`Agent`](crate::agent::Agent)
/// itself: it reaches the agent's mailbox and directory without owning the
/// agent's behaviours.
#[derive(Debug, Clone)]
pub struct AgentHandle {
    inner: Arc<AgentShared>,
}

#[derive(Debug)]
struct AgentShared {
    id: PersonalId,
    mailbox: Arc<Mailbox>,
    directory: RwLock<Option<DirectoryRef>>,
    listeners: LogListeners,
}

impl AgentHandle {
    pub(crate) fn new(mailbox: Mailbox) -> Self {
        Self {
            inner: Arc::new(AgentShared {
                id: mailbox.owner().clone(),
                mailbox: Arc::new(mailbox),
                directory: RwLock::new(None),
                listeners: LogListeners::default(),
            }),
        }
    }

    /// The agent's identity.
    #[must_use]
    pub fn id(&self) -> &PersonalId {
        &self.inner.id
    }

    /// The agent's own mailbox.
    #[must_use]
    pub fn mailbox(&self) -> &Arc<Mailbox> {
        &self.inner.mailbox
    }

    /// Whether the agent has registered with a directory.
    #[must_use]
    pub fn is_initialized(&self) -> bool {
        self.inner.directory.read().is_some()
    }

    pub(crate) fn directory(&self) -> Result<DirectoryRef> {
        self.inner
            .directory
            .read()
            .clone()
            .ok_or(CourierError::Uninitialized)
    }

    pub(crate) fn set_directory(&self, directory: Option<DirectoryRef>) {
        *self.inner.directory.write() = directory;
    }

    pub(crate) fn notify(&self, line: &str) {
        self.inner.listeners.notify(line);
    }

    /// Delivers `message` to every mailbox its receiver address selects.
    ///
    /// Delivery is attempted on every matching mailbox even if an earlier one
    /// fails; the first failure is returned once all attempts are made. A
    /// receiver that matches nothing is not an error.
    ///
    /// # Errors
    ///
    /// [`CourierError::Uninitialized`] before `init`, whatever the directory
    /// reports for the lookup, or the first delivery failure.
    #[instrument(skip(self, message), fields(agent = %self.inner.id, receiver = %message.receiver()))]
    pub async fn send(&self, message: Message) -> Result<()> {
        let directory = self.directory()?;
        let mailboxes = directory.resolve(message.receiver()).await?;
        trace!("{} recipient(s)", mailboxes.len());

        let mut first_failure = None;
        for mailbox in mailboxes {
            if let Err(err) = mailbox.deliver(message.clone()).await {
                warn!("delivery to {} failed: {}", mailbox.owner(), err);
                first_failure.get_or_insert(err);
            }
        }

        self.notify(&format!(
            "SEND message {} to {}",
            message.performative(),
            message.receiver()
        ));
        first_failure.map_or(Ok(()), Err)
    }

    /// Takes the oldest message accepted by `filter`, waiting until one arrives
    /// or `cancel` fires.
    ///
    /// # Errors
    ///
    /// [`CourierError::Cancelled`] if `cancel` fires first.
    pub async fn receive(&self, filter: &MessageFilter, cancel: &CancellationToken) -> Result<Message> {
        let message = self.inner.mailbox.read_blocking(filter, cancel).await?;
        self.log_receive(&message);
        Ok(message)
    }

    /// Takes the oldest message accepted by `filter` without waiting.
    ///
    /// # Errors
    ///
    /// [`CourierError::MessageNotFound`] if nothing pending matches.
    pub fn try_receive(&self, filter: &MessageFilter) -> Result<Message> {
        let message = self.inner.mailbox.try_read(filter)?;
        self.log_receive(&message);
        Ok(message)
    }

    /// Whether a message accepted by `filter` is pending.
    #[must_use]
    pub fn has_message(&self, filter: &MessageFilter) -> bool {
        self.inner.mailbox.has_match(filter)
    }

    fn log_receive(&self, message: &Message) {
        self.notify(&format!(
            "RECEIVE message {} from {}",
            message.performative(),
            message.sender()
        ));
    }

    /// Subscribes `listener` to this agent's send, receive and lifecycle lines.
    pub fn add_listener(&self, listener: Arc<dyn LogListener>) -> ListenerId {
        self.inner.listeners.add(listener)
    }

    /// Removes a subscription. Returns `false` if it was not present.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.inner.listeners.remove(id)
    }
}

assert_impl_all!(AgentHandle: Send, Sync, Clone);
