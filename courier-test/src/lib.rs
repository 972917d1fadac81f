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

//! Test support for Courier.
//!
//! Provides the [`courier_test`](prelude::courier_test) attribute, which runs an
//! `async fn` test on its own multi-threaded Tokio runtime, and
//! [`initialize_tracing`], which installs a file-backed subscriber once per
//! test binary.

use std::cell::RefCell;
use std::sync::{Arc, Once};

use parking_lot::Mutex;

use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::fmt::format::FmtSpan;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

static INIT: Once = Once::new();
static PANIC_HOOK: Once = Once::new();

thread_local! {
    static PANIC_RECORD: RefCell<Option<Arc<PanicRecord>>> = const { RefCell::new(None) };
}

/// Where the latest panic seen by a test happened.
///
/// Only threads that called [`PanicRecord::watch_current_thread`] report
/// into a record, so concurrent tests never see each other's panics.
#[doc(hidden)]
#[derive(Debug)]
pub struct PanicRecord {
    test: &'static str,
    location: Mutex<Option<String>>,
}

impl PanicRecord {
    /// Creates an empty record for the test called `test`.
    pub fn new(test: &'static str) -> Arc<Self> {
        Arc::new(Self {
            test,
            location: Mutex::new(None),
        })
    }

    /// Routes panics raised on the calling thread into this record.
    pub fn watch_current_thread(self: &Arc<Self>) {
        PANIC_HOOK.call_once(|| {
            let previous = std::panic::take_hook();
            std::panic::set_hook(Box::new(move |info| {
                let location = info
                    .location()
                    .map(|l| format!("{}:{}:{}", l.file(), l.line(), l.column()));
                let _ = PANIC_RECORD.try_with(|record| {
                    if let Some(record) = record.borrow().as_ref() {
                        tracing::error!(
                            "panic in {} at {}",
                            record.test,
                            location.as_deref().unwrap_or("unknown location")
                        );
                        *record.location.lock() = location;
                    }
                });
                previous(info);
            }));
        });
        PANIC_RECORD.with(|record| *record.borrow_mut() = Some(Arc::clone(self)));
    }

    /// Takes the recorded location, if any panic was seen.
    pub fn take(&self) -> Option<String> {
        self.location.lock().take()
    }
}

/// Installs the global tracing subscriber used by Courier tests.
///
/// Output goes to `logs/courier_tests.txt` through a non-blocking writer. The
/// filter defaults to `trace` and can be overridden with `RUST_LOG`. Safe to
/// call any number of times; only the first call has an effect.
pub fn initialize_tracing() {
    INIT.call_once(|| {
        if std::fs::create_dir_all("logs").is_err() {
            return;
        }

        let file_appender = RollingFileAppender::new(Rotation::NEVER, "logs", "courier_tests.txt");
        let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);
        // The writer must outlive every test in the binary.
        Box::leak(Box::new(guard));

        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("trace"));

        let subscriber = FmtSubscriber::builder()
            .with_span_events(FmtSpan::NONE)
            .compact()
            .with_line_number(true)
            .without_time()
            .with_target(true)
            .with_env_filter(filter)
            .with_writer(non_blocking)
            .finish();

        // Another harness may already own the global subscriber.
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
}

/// Re-exports used by code generated by `#[courier_test]`. Not public API.
#[doc(hidden)]
pub mod __private {
    pub use crate::PanicRecord;
    pub use tokio;
    pub use tracing;
}

/// Convenient imports for test modules.
pub mod prelude {
    pub use courier_test_macro::courier_test;

    pub use crate::initialize_tracing;
}
