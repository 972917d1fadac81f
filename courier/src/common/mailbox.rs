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

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;
use static_assertions::assert_impl_all;
use tokio::sync::Notify;
use tokio_util::sync::CancellationToken;
use tracing::{instrument, trace};

use crate::common::config::CONFIG;
use crate::common::{CourierError, Result};
use crate::message::{Message, MessageFilter, PersonalId};
use crate::traits::MailboxEndpoint;

/// A bounded queue of pending messages belonging to one agent.
///
/// Messages are kept in arrival order. Reads remove the *oldest* message
/// accepted by a [`MessageFilter`] and leave the rest in place, so any single
/// filter observes FIFO delivery.
///
/// Waiting readers are woken together on every write and every successful
/// read; each re-checks its own filter. When several waiters would accept the
/// same message, whichever re-checks first takes it.
#[derive(Debug)]
pub struct Mailbox {
    owner: PersonalId,
    capacity: usize,
    queue: Mutex<VecDeque<Message>>,
    changed: Notify,
}

impl Mailbox {
    /// Creates a mailbox with the configured default capacity.
    #[must_use]
    pub fn new(owner: PersonalId) -> Self {
        Self::build(owner, CONFIG.limits.mailbox_capacity.max(1))
    }

    /// Creates a mailbox holding at most `capacity` messages.
    ///
    /// # Errors
    ///
    /// [`CourierError::InvalidArgument`] if `capacity` is zero.
    pub fn with_capacity(owner: PersonalId, capacity: usize) -> Result<Self> {
        if capacity == 0 {
            return Err(CourierError::InvalidArgument(
                "mailbox capacity must be positive".to_string(),
            ));
        }
        Ok(Self::build(owner, capacity))
    }

    fn build(owner: PersonalId, capacity: usize) -> Self {
        Self {
            owner,
            capacity,
            queue: Mutex::new(VecDeque::with_capacity(capacity)),
            changed: Notify::new(),
        }
    }

    /// The owning agent.
    #[must_use]
    pub const fn owner(&self) -> &PersonalId {
        &self.owner
    }

    /// Maximum number of pending messages.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity
    }

    /// Number of pending messages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.queue.lock().len()
    }

    /// `true` when no message is pending.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.queue.lock().is_empty()
    }

    /// `true` when a write would be rejected.
    #[must_use]
    pub fn is_full(&self) -> bool {
        self.queue.lock().len() >= self.capacity
    }

    /// Appends `message` and wakes every waiting reader.
    ///
    /// # Errors
    ///
    /// [`CourierError::MailboxFull`] if the mailbox already holds `capacity` messages.
    pub fn write(&self, message: Message) -> Result<()> {
        {
            let mut queue = self.queue.lock();
            if queue.len() >= self.capacity {
                return Err(CourierError::MailboxFull {
                    owner: self.owner.clone(),
                    capacity: self.capacity,
                });
            }
            trace!(
                "{} <- {} from {}",
                self.owner,
                message.performative(),
                message.sender()
            );
            queue.push_back(message);
        }
        self.changed.notify_waiters();
        Ok(())
    }

    /// Whether a message accepted by `filter` is pending. Never blocks.
    #[must_use]
    pub fn has_match(&self, filter: &MessageFilter) -> bool {
        self.queue.lock().iter().any(|m| filter.accepts(m))
    }

    /// Removes the oldest message accepted by `filter` without waiting.
    ///
    /// # Errors
    ///
    /// [`CourierError::MessageNotFound`] if nothing pending matches.
    pub fn try_read(&self, filter: &MessageFilter) -> Result<Message> {
        self.take_first(filter).ok_or(CourierError::MessageNotFound)
    }

    /// Removes the oldest message accepted by `filter`, waiting until one arrives.
    ///
    /// There is no timeout: the wait ends only when a match is taken or
    /// `cancel` fires. An already-cancelled token returns immediately without
    /// consuming anything.
    ///
    /// # Errors
    ///
    /// [`CourierError::Cancelled`] if `cancel` fires first.
    #[instrument(skip(self, cancel), fields(owner = %self.owner, filter = %filter))]
    pub async fn read_blocking(
        &self,
        filter: &MessageFilter,
        cancel: &CancellationToken,
    ) -> Result<Message> {
        loop {
            if cancel.is_cancelled() {
                return Err(CourierError::Cancelled);
            }

            // Register interest before checking so a write landing between
            // the check and the await still wakes us.
            let notified = self.changed.notified();
            tokio::pin!(notified);
            notified.as_mut().enable();

            if let Some(message) = self.take_first(filter) {
                return Ok(message);
            }

            trace!("waiting");
            tokio::select! {
                biased;
                () = cancel.cancelled() => {
                    trace!("wait cancelled");
                    return Err(CourierError::Cancelled);
                }
                () = &mut notified => {}
            }
        }
    }

    fn take_first(&self, filter: &MessageFilter) -> Option<Message> {
        let taken = {
            let mut queue = self.queue.lock();
            queue
                .iter()
                .position(|m| filter.accepts(m))
                .and_then(|index| queue.remove(index))
        };
        if taken.is_some() {
            self.changed.notify_waiters();
        }
        taken
    }
}

#[async_trait]
impl MailboxEndpoint for Mailbox {
    fn owner(&self) -> &PersonalId {
        &self.owner
    }

    async fn deliver(&self, message: Message) -> Result<()> {
        self.write(message)
    }
}

assert_impl_all!(Mailbox: Send, Sync);

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::time::Duration;

    use super::*;
    use crate::message::{AgentId, Performative};

    fn owner() -> PersonalId {
        PersonalId::new("Y", "Auctioneer")
    }

    fn from(name: &str, performative: Performative, content: &str) -> Message {
        Message::new(
            PersonalId::new(name, "Cliente"),
            owner(),
            performative,
            content,
        )
    }

    #[test]
    fn zero_capacity_is_rejected() {
        assert!(matches!(
            Mailbox::with_capacity(owner(), 0),
            Err(CourierError::InvalidArgument(_))
        ));
    }

    #[test]
    fn capacity_is_enforced_for_every_bound() {
        for k in 1..=12 {
            let mailbox = Mailbox::with_capacity(owner(), k).unwrap();
            for i in 0..k {
                mailbox
                    .write(from("X", Performative::Inform, &i.to_string()))
                    .unwrap();
            }
            assert!(mailbox.is_full());
            let err = mailbox
                .write(from("X", Performative::Inform, "overflow"))
                .unwrap_err();
            assert_eq!(
                err,
                CourierError::MailboxFull {
                    owner: owner(),
                    capacity: k
                }
            );

            mailbox.try_read(&MessageFilter::any()).unwrap();
            mailbox
                .write(from("X", Performative::Inform, "fits again"))
                .unwrap();
            assert_eq!(mailbox.len(), k);
        }
    }

    #[test]
    fn reads_take_oldest_match_and_keep_the_rest_in_order() {
        let mailbox = Mailbox::with_capacity(owner(), 10).unwrap();
        mailbox.write(from("A", Performative::Request, "a1")).unwrap();
        mailbox.write(from("B", Performative::Request, "b1")).unwrap();
        mailbox.write(from("A", Performative::Inform, "a2")).unwrap();
        mailbox.write(from("B", Performative::Inform, "b2")).unwrap();

        let b = MessageFilter::from_sender(PersonalId::new("B", "Cliente"));
        assert_eq!(mailbox.try_read(&b).unwrap().content(), "b1");
        assert_eq!(mailbox.try_read(&b).unwrap().content(), "b2");
        assert_eq!(mailbox.try_read(&b).unwrap_err(), CourierError::MessageNotFound);

        let rest: Vec<String> = std::iter::from_fn(|| mailbox.try_read(&MessageFilter::any()).ok())
            .map(|m| m.content().to_string())
            .collect();
        assert_eq!(rest, vec!["a1", "a2"]);
    }

    #[test]
    fn has_match_does_not_consume() {
        let mailbox = Mailbox::with_capacity(owner(), 2).unwrap();
        mailbox.write(from("A", Performative::Request, "a1")).unwrap();

        let filter = MessageFilter::from_sender(AgentId::category_of("Cliente"))
            .performative(Performative::Request);
        assert!(mailbox.has_match(&filter));
        assert!(mailbox.has_match(&filter));
        assert!(!mailbox.has_match(&MessageFilter::of(Performative::Inform)));
        assert_eq!(mailbox.len(), 1);
    }

    #[tokio::test]
    async fn blocked_reader_wakes_on_write() {
        let mailbox = Arc::new(Mailbox::with_capacity(owner(), 4).unwrap());
        let cancel = CancellationToken::new();

        let reader = {
            let mailbox = Arc::clone(&mailbox);
            let cancel = cancel.clone();
            tokio::spawn(async move {
                mailbox
                    .read_blocking(&MessageFilter::of(Performative::Inform), &cancel)
                    .await
            })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        mailbox.write(from("A", Performative::Request, "ignored")).unwrap();
        mailbox.write(from("A", Performative::Inform, "wanted")).unwrap();

        let message = tokio::time::timeout(Duration::from_secs(2), reader)
            .await
            .expect("reader did not wake")
            .unwrap()
            .unwrap();
        assert_eq!(message.content(), "wanted");
        assert_eq!(mailbox.len(), 1);
    }

    #[tokio::test]
    async fn cancellation_aborts_wait() {
        let mailbox = Arc::new(Mailbox::with_capacity(owner(), 4).unwrap());
        let cancel = CancellationToken::new();

        let reader = {
            let mailbox = Arc::clone(&mailbox);
            let cancel = cancel.clone();
            tokio::spawn(async move { mailbox.read_blocking(&MessageFilter::any(), &cancel).await })
        };

        tokio::time::sleep(Duration::from_millis(20)).await;
        cancel.cancel();

        let result = tokio::time::timeout(Duration::from_secs(2), reader)
            .await
            .expect("reader ignored cancellation")
            .unwrap();
        assert_eq!(result.unwrap_err(), CourierError::Cancelled);
    }

    #[tokio::test]
    async fn cancelled_reader_leaves_pending_messages() {
        let mailbox = Mailbox::with_capacity(owner(), 4).unwrap();
        mailbox.write(from("A", Performative::Inform, "keep")).unwrap();
        let cancel = CancellationToken::new();
        cancel.cancel();

        let result = mailbox.read_blocking(&MessageFilter::any(), &cancel).await;
        assert_eq!(result.unwrap_err(), CourierError::Cancelled);
        assert_eq!(mailbox.len(), 1);
    }
}
