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

use static_assertions::assert_impl_all;

use crate::common::{CourierError, Result};
use crate::message::{AgentId, Payload, Performative};

/// A message exchanged between agents.
///
/// Messages are immutable: all fields are set at construction and only read
/// afterwards. Cloning is cheap apart from the content string and payload.
#[derive(Debug, Clone)]
pub struct Message {
    sender: AgentId,
    receiver: AgentId,
    performative: Performative,
    content: String,
    payload: Option<Box<dyn Payload>>,
}

impl Message {
    /// Creates a message without a payload.
    pub fn new(
        sender: impl Into<AgentId>,
        receiver: impl Into<AgentId>,
        performative: Performative,
        content: impl Into<String>,
    ) -> Self {
        Self {
            sender: sender.into(),
            receiver: receiver.into(),
            performative,
            content: content.into(),
            payload: None,
        }
    }

    /// Starts a [`MessageBuilder`].
    #[must_use]
    pub fn builder() -> MessageBuilder {
        MessageBuilder::default()
    }

    /// Returns this message with `payload` attached, replacing any previous one.
    #[must_use]
    pub fn with_payload<P: Payload>(mut self, payload: P) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    /// Who sent the message.
    #[must_use]
    pub const fn sender(&self) -> &AgentId {
        &self.sender
    }

    /// The address the message was sent to; may be a group pattern.
    #[must_use]
    pub const fn receiver(&self) -> &AgentId {
        &self.receiver
    }

    /// The message's speech act.
    #[must_use]
    pub const fn performative(&self) -> Performative {
        self.performative
    }

    /// The text body.
    #[must_use]
    pub fn content(&self) -> &str {
        &self.content
    }

    /// The attached payload, if any.
    #[must_use]
    pub fn payload(&self) -> Option<&dyn Payload> {
        self.payload.as_deref()
    }

    /// The attached payload downcast to `T`, or `None` if absent or of another type.
    #[must_use]
    pub fn payload_as<T: 'static>(&self) -> Option<&T> {
        self.payload().and_then(|p| p.as_any().downcast_ref::<T>())
    }

    /// Builds a reply: sender and receiver swapped, no payload.
    #[must_use]
    pub fn reply(&self, performative: Performative, content: impl Into<String>) -> Self {
        Self::new(self.receiver.clone(), self.sender.clone(), performative, content)
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Performative: {}\nSender: {}\nReceiver: {}\nContent:\n{}",
            self.performative, self.sender, self.receiver, self.content
        )?;
        if let Some(payload) = &self.payload {
            write!(f, "\nPayload:\n{payload:?}")?;
        }
        Ok(())
    }
}

assert_impl_all!(Message: Send, Sync, Clone);

/// Step-by-step construction of a [`Message`].
///
/// Sender, receiver and performative are required; `build` rejects a builder
/// missing any of them with [`CourierError::InvalidArgument`].
#[derive(Debug, Default)]
pub struct MessageBuilder {
    sender: Option<AgentId>,
    receiver: Option<AgentId>,
    performative: Option<Performative>,
    content: String,
    payload: Option<Box<dyn Payload>>,
}

impl MessageBuilder {
    /// Sets the sender.
    #[must_use]
    pub fn sender(mut self, sender: impl Into<AgentId>) -> Self {
        self.sender = Some(sender.into());
        self
    }

    /// Sets the receiver address.
    #[must_use]
    pub fn receiver(mut self, receiver: impl Into<AgentId>) -> Self {
        self.receiver = Some(receiver.into());
        self
    }

    /// Sets the performative.
    #[must_use]
    pub const fn performative(mut self, performative: Performative) -> Self {
        self.performative = Some(performative);
        self
    }

    /// Sets the text body.
    #[must_use]
    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Attaches a payload.
    #[must_use]
    pub fn payload<P: Payload>(mut self, payload: P) -> Self {
        self.payload = Some(Box::new(payload));
        self
    }

    /// Finishes the message.
    ///
    /// # Errors
    ///
    /// [`CourierError::InvalidArgument`] if sender, receiver or performative was never set.
    pub fn build(self) -> Result<Message> {
        let missing = |field: &str| CourierError::InvalidArgument(format!("message {field} is required"));
        Ok(Message {
            sender: self.sender.ok_or_else(|| missing("sender"))?,
            receiver: self.receiver.ok_or_else(|| missing("receiver"))?,
            performative: self.performative.ok_or_else(|| missing("performative"))?,
            content: self.content,
            payload: self.payload,
        })
    }
}
