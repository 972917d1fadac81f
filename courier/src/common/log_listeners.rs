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
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use parking_lot::RwLock;
use tracing::info;

use crate::traits::LogListener;

/// Identifies a subscription so it can be removed later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ListenerId(u64);

/// A set of [`LogListener`]s sharing one event stream.
///
/// Clones share the same subscriber list.
#[derive(Clone, Default)]
pub(crate) struct LogListeners {
    listeners: Arc<RwLock<Vec<(ListenerId, Arc<dyn LogListener>)>>>,
    next_id: Arc<AtomicU64>,
}

impl LogListeners {
    pub(crate) fn add(&self, listener: Arc<dyn LogListener>) -> ListenerId {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        self.listeners.write().push((id, listener));
        id
    }

    pub(crate) fn remove(&self, id: ListenerId) -> bool {
        let mut listeners = self.listeners.write();
        let before = listeners.len();
        listeners.retain(|(existing, _)| *existing != id);
        listeners.len() != before
    }

    /// Logs `line` and hands it to every subscriber.
    pub(crate) fn notify(&self, line: &str) {
        info!("{}", line);
        // Snapshot so a listener may (un)subscribe from inside its callback.
        let snapshot: Vec<Arc<dyn LogListener>> = self
            .listeners
            .read()
            .iter()
            .map(|(_, listener)| Arc::clone(listener))
            .collect();
        for listener in snapshot {
            listener.on_log_message(line);
        }
    }
}

impl fmt::Debug for LogListeners {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LogListeners")
            .field("subscribed", &self.listeners.read().len())
            .finish()
    }
}
