// Copyright 2024 FastLabs Developers
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Handle;

use crate::Error;
use crate::Logger;
use crate::record::Level;
use crate::record::Metadata;

// Targets whose records are dropped: the appenders' own HTTP stack logs through `log` while an
// entry is being delivered.
const IGNORED_TARGETS: &[&str] = &["botlog", "reqwest", "hyper", "hyper_util", "h2", "rustls"];

fn level_from_log(level: log::Level) -> Option<Level> {
    match level {
        log::Level::Error => Some(Level::Error),
        log::Level::Warn => Some(Level::Warn),
        log::Level::Info => Some(Level::Info),
        log::Level::Debug | log::Level::Trace => None,
    }
}

fn level_to_log(level: Level) -> log::LevelFilter {
    match level {
        Level::Info => log::LevelFilter::Info,
        Level::Warn => log::LevelFilter::Warn,
        Level::Error => log::LevelFilter::Error,
    }
}

fn is_ignored(target: &str) -> bool {
    IGNORED_TARGETS.iter().any(|ignored| {
        target
            .strip_prefix(ignored)
            .is_some_and(|rest| rest.is_empty() || rest.starts_with("::"))
    })
}

/// A [`log::Log`] implementation that forwards records from the `log` crate to a [`Logger`].
///
/// `Error`, `Warn` and `Info` records become entries of the matching [`Level`]; `Debug` and
/// `Trace` records are dropped. Key-values become metadata, with every value rendered as a string.
///
/// `log::Log::log` is synchronous, so each accepted record is dispatched on a task spawned onto a
/// tokio runtime. The call returns before the appenders settle.
#[derive(Debug, Clone)]
pub struct LogBridge {
    logger: Arc<Logger>,
    handle: Handle,
}

impl LogBridge {
    /// Create a bridge that spawns dispatches onto the current tokio runtime.
    ///
    /// # Errors
    ///
    /// Return a configuration error if called outside of a tokio runtime.
    pub fn new(logger: Arc<Logger>) -> Result<Self, Error> {
        let handle = Handle::try_current().map_err(|err| {
            Error::configuration("log bridge must be created inside a tokio runtime")
                .with_source(err)
        })?;
        Ok(Self::with_handle(logger, handle))
    }

    /// Create a bridge that spawns dispatches onto the given runtime.
    pub fn with_handle(logger: Arc<Logger>, handle: Handle) -> Self {
        Self { logger, handle }
    }
}

struct KvCollector<'a> {
    kvs: &'a mut Metadata,
}

impl<'kvs> log::kv::VisitSource<'kvs> for KvCollector<'_> {
    fn visit_pair(
        &mut self,
        key: log::kv::Key<'kvs>,
        value: log::kv::Value<'kvs>,
    ) -> Result<(), log::kv::Error> {
        self.kvs
            .insert(key.to_string(), Value::String(value.to_string()));
        Ok(())
    }
}

impl log::Log for LogBridge {
    fn enabled(&self, metadata: &log::Metadata) -> bool {
        !is_ignored(metadata.target())
            && level_from_log(metadata.level()).is_some_and(|level| self.logger.enabled(level))
    }

    fn log(&self, record: &log::Record) {
        if !log::Log::enabled(self, record.metadata()) {
            return;
        }
        let Some(level) = level_from_log(record.level()) else {
            return;
        };

        let mut kvs = Metadata::new();
        let mut visitor = KvCollector { kvs: &mut kvs };
        // the collector itself never fails
        let _ = record.key_values().visit(&mut visitor);
        let metadata = (!kvs.is_empty()).then_some(kvs);

        let message = record.args().to_string();
        let logger = self.logger.clone();
        self.handle.spawn(async move {
            logger.log(level, message, metadata).await;
        });
    }

    fn flush(&self) {}
}

/// Set up the log crate global logger.
///
/// This function calls [`log::set_boxed_logger`] with the bridge, so all logs from the log crate
/// will be forwarded to the bridged [`Logger`]. The global maximum level is set to the logger's
/// level.
///
/// # Errors
///
/// Return an error if the log crate global logger has already been set.
///
/// # Examples
///
/// ```
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// use std::sync::Arc;
///
/// use botlog::append;
/// use botlog::bridge::LogBridge;
///
/// let logger = botlog::builder().append(append::Stderr::default()).build().unwrap();
/// let bridge = LogBridge::new(Arc::new(logger)).unwrap();
/// if let Err(err) = botlog::bridge::try_setup_log_crate(bridge) {
///     eprintln!("failed to setup log crate: {err}");
/// }
/// # });
/// ```
pub fn try_setup_log_crate(bridge: LogBridge) -> Result<(), log::SetLoggerError> {
    let max_level = level_to_log(bridge.logger.level());
    log::set_boxed_logger(Box::new(bridge))?;
    log::set_max_level(max_level);
    Ok(())
}

/// Set up the log crate global logger.
///
/// # Panics
///
/// Panic if the log crate global logger has already been set.
pub fn setup_log_crate(bridge: LogBridge) {
    try_setup_log_crate(bridge).expect(
        "botlog::bridge::setup_log_crate must be called before the log crate global logger initialized",
    )
}
