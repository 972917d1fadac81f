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

use async_trait::async_trait;
use parking_lot::Mutex;
use tracing::{debug, instrument, warn};

use crate::common::log_listeners::LogListeners;
use crate::common::{CourierError, ListenerId, MailboxHandle, Result};
use crate::message::{matches, AgentId, PersonalId};
use crate::traits::{DirectoryService, LogListener};

/// The in-process agent registry.
///
/// Holds one [`MailboxHandle`] per live agent, in registration order. Every
/// operation runs under a single lock, so a `resolve` never observes a
/// half-applied registration.
#[derive(Debug, Default)]
pub struct Directory {
    entries: Mutex<Vec<MailboxHandle>>,
    listeners: LogListeners,
}

impl Directory {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of registered mailboxes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.lock().len()
    }

    /// `true` when nothing is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.lock().is_empty()
    }

    /// Owners of every registered mailbox, in registration order.
    #[must_use]
    pub fn registered_ids(&self) -> Vec<PersonalId> {
        self.entries
            .lock()
            .iter()
            .map(|handle| handle.owner().clone())
            .collect()
    }

    /// Whether a mailbox owned by exactly `id` is registered.
    #[must_use]
    pub fn contains(&self, id: &PersonalId) -> bool {
        self.entries.lock().iter().any(|handle| handle.owner() == id)
    }

    /// Subscribes `listener` to registry events.
    pub fn add_listener(&self, listener: Arc<dyn LogListener>) -> ListenerId {
        self.listeners.add(listener)
    }

    /// Removes a subscription. Returns `false` if it was not present.
    pub fn remove_listener(&self, id: ListenerId) -> bool {
        self.listeners.remove(id)
    }
}

#[async_trait]
impl DirectoryService for Directory {
    #[instrument(skip_all, fields(owner = %handle.owner()))]
    async fn register(&self, handle: MailboxHandle) -> Result<()> {
        let owner = handle.owner().clone();
        {
            let mut entries = self.entries.lock();
            if entries.iter().any(|existing| existing.owner() == &owner) {
                warn!("mailbox for {} already registered", owner);
                return Err(CourierError::DuplicateAgent(owner));
            }
            entries.push(handle);
        }
        self.listeners
            .notify(&format!("Registered mailbox for {owner}"));
        Ok(())
    }

    #[instrument(skip(self), fields(id = %id))]
    async fn unregister(&self, id: &PersonalId) -> Result<()> {
        let removed = {
            let mut entries = self.entries.lock();
            entries
                .iter()
                .position(|handle| handle.owner() == id)
                .map(|index| entries.remove(index))
        };
        match removed {
            Some(_) => {
                self.listeners.notify(&format!("Removed mailbox for {id}"));
                Ok(())
            }
            None => {
                debug!("no mailbox registered for {}", id);
                Err(CourierError::AgentNotFound(id.into()))
            }
        }
    }

    #[instrument(skip(self), fields(pattern = %pattern))]
    async fn resolve(&self, pattern: &AgentId) -> Result<Vec<MailboxHandle>> {
        self.listeners
            .notify(&format!("Requested mailboxes for {pattern}"));
        let found: Vec<MailboxHandle> = self
            .entries
            .lock()
            .iter()
            .filter(|handle| matches(&AgentId::from(handle.owner()), pattern))
            .cloned()
            .collect();
        debug!("{} mailbox(es) match", found.len());
        Ok(found)
    }
}
