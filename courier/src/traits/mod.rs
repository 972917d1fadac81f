//! Core traits defining the seams of the Courier runtime.
//!
//! *   [`MailboxEndpoint`]: the deliver-only view of a mailbox other agents see.
//! *   [`DirectoryService`]: register/unregister/resolve, local or behind the naming layer.
//! *   [`Behaviour`]: user logic with a setup, action, dispose lifecycle.
//! *   [`LogListener`]: callback for monitor lines.

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

pub use behaviour::Behaviour;
pub use directory_service::DirectoryService;
pub use log_listener::LogListener;
pub use mailbox_endpoint::MailboxEndpoint;

mod behaviour;
mod directory_service;
mod log_listener;
mod mailbox_endpoint;
