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

use parking_lot::Mutex;

use courier::prelude::*;

pub mod behaviours;
pub mod payloads;

/// Starts a directory server under a name private to the calling test and
/// returns it with a config pointing agents at it.
pub fn start_directory(name: &str) -> (DirectoryServer, CourierConfig) {
    let mut config = CourierConfig::default();
    config.directory.name = format!("tests.{name}");
    let server = DirectoryServer::from_config(&config);
    server.start();
    (server, config)
}

/// Builds an agent bound to `config`'s directory.
pub fn agent(config: &CourierConfig, name: &str, category: &str) -> anyhow::Result<Agent> {
    Ok(Agent::with_config(PersonalId::new(name, category), config.clone())?)
}

/// Collects every line a [`LogListener`] receives.
#[derive(Clone, Default)]
pub struct LineRecorder {
    lines: Arc<Mutex<Vec<String>>>,
}

impl LineRecorder {
    pub fn listener(&self) -> Arc<dyn LogListener> {
        let lines = Arc::clone(&self.lines);
        Arc::new(move |line: &str| lines.lock().push(line.to_string()))
    }

    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    pub fn count_starting_with(&self, prefix: &str) -> usize {
        self.lines.lock().iter().filter(|line| line.starts_with(prefix)).count()
    }
}
