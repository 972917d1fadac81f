//! Runtime building blocks shared by agents and the directory.
//!
//! # Key Re-exported Components:
//!
//! *   [`Mailbox`]: the bounded, selectively blocking per-agent queue.
//! *   [`Directory`]: the in-process registry of live mailboxes.
//! *   [`DirectoryServer`]: publishes a `Directory` in the [`naming`] table.
//! *   [`CourierError`] and [`Result`]: the crate's error vocabulary.
//! *   [`CourierConfig`]: file-backed settings, with the process-wide [`CONFIG`].

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

// --- Public Re-exports ---
pub use config::{CourierConfig, CONFIG};
pub use directory::Directory;
pub use directory_server::DirectoryServer;
pub use error::{CourierError, Result};
pub use log_listeners::ListenerId;
pub use mailbox::Mailbox;
pub use naming::{DirectoryAddress, RemoteDirectory};
pub use types::*;

// --- Crate-Internal Re-exports ---
pub(crate) use log_listeners::LogListeners;

// --- Submodules ---

/// Defines common type aliases.
mod types;

/// Defines the configuration system.
pub mod config;
/// Defines the in-process registry.
mod directory;
/// Defines the administrative wrapper that publishes a registry.
mod directory_server;
/// Defines [`CourierError`].
mod error;
/// Defines the listener fan-out used by monitors.
mod log_listeners;
/// Defines [`Mailbox`].
mod mailbox;
/// Process-wide directory naming table.
pub mod naming;
