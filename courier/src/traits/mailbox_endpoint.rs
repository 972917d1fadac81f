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
use std::fmt::Debug;

use async_trait::async_trait;

use crate::common::Result;
use crate::message::{Message, PersonalId};

/// The remotely callable side of a mailbox.
///
/// Other agents only ever deliver into a mailbox; reading and probing stay
/// local to the owning agent and live on [`Mailbox`](crate::common::Mailbox)
/// itself.
#[async_trait]
pub trait MailboxEndpoint: Debug + Send + Sync {
    /// The agent this mailbox belongs to.
    fn owner(&self) -> &PersonalId;

    /// Appends `message` to the mailbox.
    ///
    /// # Errors
    ///
    /// [`MailboxFull`](crate::common::CourierError::MailboxFull) when the
    /// mailbox is at capacity, or
    /// [`RemoteUnavailable`](crate::common::CourierError::RemoteUnavailable)
    /// when the endpoint cannot be reached.
    async fn deliver(&self, message: Message) -> Result<()>;
}
