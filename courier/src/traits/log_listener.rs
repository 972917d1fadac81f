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
/// Receives one line of text per notable runtime event.
///
/// Monitors (consoles, test recorders) subscribe through `add_listener` on an
/// [`Agent`](crate::agent::Agent), a [`Directory`](crate::common::Directory) or
/// a [`DirectoryServer`](crate::common::DirectoryServer). Listeners are called
/// synchronously on the thread that caused the event and should return quickly.
///
/// Any `Fn(&str) + Send + Sync` closure is a listener.
pub trait LogListener: Send + Sync {
    /// Called with a human-readable description of the event.
    fn on_log_message(&self, message: &str);
}

impl<F> LogListener for F
where
    F: Fn(&str) + Send + Sync,
{
    fn on_log_message(&self, message: &str) {
        self(message);
    }
}
