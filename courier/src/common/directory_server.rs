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

use tracing::instrument;

use crate::common::config::CourierConfig;
use crate::common::log_listeners::LogListeners;
use crate::common::{naming, CourierError, Directory, DirectoryAddress, ListenerId, Result};
use crate::traits::LogListener;

/// Publishes a [`Directory`] in the naming table so agents can reach it.
///
/// The registry outlives `start`/`stop` cycles: stopping only unpublishes it,
/// and registrations made before a stop are still there after the next start.
#[derive(Debug)]
pub struct DirectoryServer {
    address: DirectoryAddress,
    directory: Arc<Directory>,
    listeners: LogListeners,
}

impl DirectoryServer {
    /// A server for a fresh, empty registry at `address`.
    #[must_use]
    pub fn new(address: DirectoryAddress) -> Self {
        Self::with_directory(address, Arc::new(Directory::new()))
    }

    /// A server at the address named by `config`.
    #[must_use]
    pub fn from_config(config: &CourierConfig) -> Self {
        Self::new(config.directory_address())
    }

    /// A server publishing an existing registry.
    #[must_use]
    pub fn with_directory(address: DirectoryAddress, directory: Arc<Directory>) -> Self {
        Self {
            address,
            directory,
            listeners: LogListeners::default(),
        }
    }

    /// Where this server publishes its registry.
    #[must_use]
    pub const fn address(&self) -> &DirectoryAddress {
        &self.address
    }

    /// The published registry, for local inspection.
    #[must_use]
    pub fn directory(&self) -> &Arc<Directory> {
        &self.directory
    }

    /// Whether something is currently bound at this server's address.
    #[must_use]
    pub fn is_running(&self) -> bool {
        naming::is_bound(&self.address)
    }

    /// Binds the registry at this server's address. Starting twice rebinds.
    #[instrument(skip(self), fields(address = %self.address))]
    pub fn start(&self) {
        naming::bind(&self.address, self.directory.clone());
        self.listeners
            .notify(&format!("Bound directory at {}", self.address));
    }

    /// Removes the binding. Agents holding a stub start failing with
    /// [`CourierError::RemoteUnavailable`].
    ///
    /// # Errors
    ///
    /// [`CourierError::RemoteUnavailable`] if the server was not running.
    #[instrument(skip(self), fields(address = %self.address))]
    pub fn stop(&self) -> Result<()> {
        if naming::unbind(&self.address) {
            self.listeners
                .notify(&format!("Unbound directory at {}", self.address));
            Ok(())
        } else {
            let err = CourierError::RemoteUnavailable(format!(
                "no directory bound at {}",
                self.address
            ));
            self.listeners.notify(&format!("Error: {err}"));
            Err(err)
        }
    }

    /// Subscribes `listener` to server events and to the registry's events.
    pub fn add_listener(&self, listener: Arc<dyn LogListener>) -> (ListenerId, ListenerId) {
        (
            self.listeners.add(Arc::clone(&listener)),
            self.directory.add_listener(listener),
        )
    }

    /// Removes a subscription made with [`add_listener`](Self::add_listener).
    pub fn remove_listener(&self, (server, directory): (ListenerId, ListenerId)) -> bool {
        let server_removed = self.listeners.remove(server);
        let directory_removed = self.directory.remove_listener(directory);
        server_removed || directory_removed
    }
}
