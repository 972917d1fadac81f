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

use std::path::Path;
use std::time::Duration;

use lazy_static::lazy_static;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::common::DirectoryAddress;

/// Configuration for the Courier runtime.
///
/// Loaded from `$XDG_CONFIG_HOME/courier/config.toml`. Every section and
/// field is optional; anything omitted keeps its default.
///
/// ```toml
/// [directory]
/// host = "127.0.0.1"
/// port = 1099
/// name = "courier.directory"
///
/// [limits]
/// mailbox_capacity = 10
///
/// [timeouts]
/// agent_shutdown_timeout_ms = 10000
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourierConfig {
    /// Where agents look for the directory service.
    pub directory: DirectoryConfig,
    /// Capacity limits.
    pub limits: LimitsConfig,
    /// Timeout configuration.
    pub timeouts: TimeoutConfig,
}

/// Location of the directory service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    /// Host the directory is bound on.
    pub host: String,
    /// Port the directory is bound on.
    pub port: u16,
    /// Name the directory is bound under.
    pub name: String,
}

/// Limits and capacity configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    /// Default number of pending messages a mailbox accepts.
    pub mailbox_capacity: usize,
}

/// Timeout configuration. All values are in milliseconds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// How long [`Agent::join`](crate::agent::Agent::join) waits for behaviour tasks to finish.
    pub agent_shutdown_timeout_ms: u64,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 1099,
            name: "courier.directory".to_string(),
        }
    }
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            mailbox_capacity: 10,
        }
    }
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            agent_shutdown_timeout_ms: 10_000,
        }
    }
}

impl CourierConfig {
    /// The configured directory location.
    #[must_use]
    pub fn directory_address(&self) -> DirectoryAddress {
        DirectoryAddress::new(
            self.directory.host.clone(),
            self.directory.port,
            self.directory.name.clone(),
        )
    }

    /// Agent shutdown timeout as a [`Duration`].
    #[must_use]
    pub const fn agent_shutdown_timeout(&self) -> Duration {
        Duration::from_millis(self.timeouts.agent_shutdown_timeout_ms)
    }

    /// Loads configuration from XDG-compliant locations.
    ///
    /// Looks for `courier/config.toml` under the XDG config directories. A
    /// missing file yields the defaults; an unreadable or malformed file is
    /// logged and also yields the defaults.
    #[must_use]
    pub fn load() -> Self {
        let xdg_dirs = match xdg::BaseDirectories::with_prefix("courier") {
            Ok(dirs) => dirs,
            Err(e) => {
                error!("Failed to initialize XDG directories: {}", e);
                return Self::default();
            }
        };

        xdg_dirs.find_config_file("config.toml").map_or_else(
            || {
                info!("No configuration file found, using defaults");
                Self::default()
            },
            |path| Self::load_from(&path),
        )
    }

    /// Loads configuration from an explicit file, falling back to defaults on error.
    #[must_use]
    pub fn load_from(path: &Path) -> Self {
        info!("Loading configuration from: {}", path.display());
        match std::fs::read_to_string(path) {
            Ok(config_str) => match toml::from_str::<Self>(&config_str) {
                Ok(config) => {
                    info!("Successfully loaded configuration");
                    config
                }
                Err(e) => {
                    error!("Failed to parse configuration file {}: {}", path.display(), e);
                    Self::default()
                }
            },
            Err(e) => {
                error!("Failed to read configuration file {}: {}", path.display(), e);
                Self::default()
            }
        }
    }
}

lazy_static! {
    /// Process-wide configuration, loaded on first use.
    pub static ref CONFIG: CourierConfig = CourierConfig::load();
}
