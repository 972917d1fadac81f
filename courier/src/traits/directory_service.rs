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

use crate::common::{MailboxHandle, Result};
use crate::message::{AgentId, PersonalId};

/// The directory boundary agents talk to.
///
/// Every operation is atomic with respect to the others. Implementations that
/// cross a process boundary report transport failure as
/// [`RemoteUnavailable`](crate::common::CourierError::RemoteUnavailable),
/// never as an empty result.
#[async_trait]
pub trait DirectoryService: Debug + Send + Sync {
    /// Adds a mailbox under its owner's id.
    ///
    /// # Errors
    ///
    /// [`DuplicateAgent`](crate::common::CourierError::DuplicateAgent) if a
    /// mailbox with the same owner is already registered.
    async fn register(&self, mailbox: MailboxHandle) -> Result<()>;

    /// Removes the mailbox owned by exactly `id`.
    ///
    /// # Errors
    ///
    /// [`AgentNotFound`](crate::common::CourierError::AgentNotFound) if no
    /// such mailbox is registered.
    async fn unregister(&self, id: &PersonalId) -> Result<()>;

    /// Every registered mailbox whose owner `pattern` selects, in registration order.
    async fn resolve(&self, pattern: &AgentId) -> Result<Vec<MailboxHandle>>;
}
