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

//! The process-wide naming table through which agents reach a directory.
//!
//! A [`DirectoryServer`](crate::common::DirectoryServer) binds its registry
//! under a [`DirectoryAddress`]; agents obtain a [`RemoteDirectory`] stub with
//! [`lookup`]. The stub holds only the address and re-resolves the binding on
//! every call, so stopping the server surfaces as
//! [`CourierError::RemoteUnavailable`] at the next operation.

use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use dashmap::DashMap;
use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::common::{CourierError, DirectoryRef, MailboxHandle, Result};
use crate::message::{AgentId, PersonalId};
use crate::traits::DirectoryService;

const SCHEME: &str = "courier://";

lazy_static! {
    static ref BINDINGS: DashMap<DirectoryAddress, DirectoryRef> = DashMap::new();
}

/// Where a directory is published: `courier://host:port/name`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DirectoryAddress {
    host: String,
    port: u16,
    name: String,
}

impl DirectoryAddress {
    /// Creates an address from its parts.
    pub fn new(host: impl Into<String>, port: u16, name: impl Into<String>) -> Self {
        Self {
            host: host.into(),
            port,
            name: name.into(),
        }
    }

    /// Host part.
    #[must_use]
    pub fn host(&self) -> &str {
        &self.host
    }

    /// Port part.
    #[must_use]
    pub const fn port(&self) -> u16 {
        self.port
    }

    /// The name the directory is bound under.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl fmt::Display for DirectoryAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{SCHEME}{}:{}/{}", self.host, self.port, self.name)
    }
}

impl FromStr for DirectoryAddress {
    type Err = CourierError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || CourierError::InvalidArgument(format!("malformed directory address: {s}"));
        let rest = s.strip_prefix(SCHEME).ok_or_else(invalid)?;
        let (authority, name) = rest.split_once('/').ok_or_else(invalid)?;
        let (host, port) = authority.rsplit_once(':').ok_or_else(invalid)?;
        let port = port.parse::<u16>().map_err(|_| invalid())?;
        if host.is_empty() || name.is_empty() {
            return Err(invalid());
        }
        Ok(Self::new(host, port, name))
    }
}

/// Publishes `directory` at `address`, replacing any previous binding.
pub fn bind(address: &DirectoryAddress, directory: DirectoryRef) {
    if BINDINGS.insert(address.clone(), directory).is_some() {
        debug!("rebound {}", address);
    } else {
        debug!("bound {}", address);
    }
}

/// Removes the binding at `address`. Returns `false` if nothing was bound.
pub fn unbind(address: &DirectoryAddress) -> bool {
    BINDINGS.remove(address).is_some()
}

/// Whether a directory is currently published at `address`.
#[must_use]
pub fn is_bound(address: &DirectoryAddress) -> bool {
    BINDINGS.contains_key(address)
}

/// Obtains a client stub for the directory published at `address`.
///
/// # Errors
///
/// [`CourierError::RemoteUnavailable`] if nothing is bound there.
pub fn lookup(address: &DirectoryAddress) -> Result<RemoteDirectory> {
    if is_bound(address) {
        Ok(RemoteDirectory {
            address: address.clone(),
        })
    } else {
        Err(unavailable(address))
    }
}

fn unavailable(address: &DirectoryAddress) -> CourierError {
    CourierError::RemoteUnavailable(format!("no directory bound at {address}"))
}

/// Client-side stub for a published directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteDirectory {
    address: DirectoryAddress,
}

impl RemoteDirectory {
    /// The address this stub talks to.
    #[must_use]
    pub const fn address(&self) -> &DirectoryAddress {
        &self.address
    }

    fn connect(&self) -> Result<DirectoryRef> {
        // Clone out of the map so no shard lock is held across an await.
        let directory = BINDINGS
            .get(&self.address)
            .map(|entry| entry.value().clone())
            .ok_or_else(|| unavailable(&self.address))?;
        trace!("connected to {}", self.address);
        Ok(directory)
    }
}

#[async_trait]
impl DirectoryService for RemoteDirectory {
    async fn register(&self, handle: MailboxHandle) -> Result<()> {
        self.connect()?.register(handle).await
    }

    async fn unregister(&self, id: &PersonalId) -> Result<()> {
        self.connect()?.unregister(id).await
    }

    async fn resolve(&self, pattern: &AgentId) -> Result<Vec<MailboxHandle>> {
        self.connect()?.resolve(pattern).await
    }
}
