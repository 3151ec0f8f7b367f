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

use std::any::Any;
use std::panic::AssertUnwindSafe;

use futures::FutureExt;
use futures::future::join_all;

use crate::Append;
use crate::Error;
use crate::Trap;
use crate::record::Entry;
use crate::record::Level;
use crate::record::Metadata;
use crate::trap::DefaultTrap;

/// A logger facade that dispatches log entries to one or more appenders.
///
/// Entries below the logger's level are dropped before they are built. Every other entry is
/// handed to all appenders concurrently, and the logging call returns once each of them has
/// settled. A failing appender never affects the caller or its siblings: its error (or panic) is
/// reported to the logger's [`Trap`].
///
/// # Examples
///
/// ```
/// # tokio::runtime::Runtime::new().unwrap().block_on(async {
/// use botlog::Level;
/// use botlog::Logger;
/// use botlog::append;
///
/// let logger = Logger::new(vec![append::Stdout::default().into()], Level::Info).unwrap();
///
/// logger.info("User logged in", None).await;
/// logger
///     .error(
///         "Payment failed",
///         Some(botlog::record::to_metadata(&serde_json::json!({ "order_id": 456 }))),
///     )
///     .await;
/// # });
/// ```
#[derive(Debug)]
pub struct Logger {
    appends: Vec<Box<dyn Append>>,
    level: Level,
    trap: Box<dyn Trap>,
}

impl Logger {
    /// Create a new [`Logger`] that reports appender failures to [`DefaultTrap`].
    ///
    /// # Errors
    ///
    /// Return a configuration error if `appends` is empty.
    pub fn new(appends: Vec<Box<dyn Append>>, level: Level) -> Result<Self, Error> {
        Self::with_trap(appends, level, Box::new(DefaultTrap::default()))
    }

    pub(super) fn with_trap(
        appends: Vec<Box<dyn Append>>,
        level: Level,
        trap: Box<dyn Trap>,
    ) -> Result<Self, Error> {
        if appends.is_empty() {
            return Err(Error::configuration("at least one appender required")
                .with_context("field", "appends"));
        }

        Ok(Self {
            appends,
            level,
            trap,
        })
    }

    /// The minimum level of entries this logger dispatches.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Whether an entry at `level` would be dispatched.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.level
    }

    /// Log a message at [`Level::Info`].
    pub async fn info(&self, message: impl Into<String>, metadata: Option<Metadata>) {
        self.log(Level::Info, message, metadata).await
    }

    /// Log a message at [`Level::Warn`].
    pub async fn warn(&self, message: impl Into<String>, metadata: Option<Metadata>) {
        self.log(Level::Warn, message, metadata).await
    }

    /// Log a message at [`Level::Error`].
    pub async fn error(&self, message: impl Into<String>, metadata: Option<Metadata>) {
        self.log(Level::Error, message, metadata).await
    }

    /// Log a message at the given level.
    ///
    /// Returns once every appender has settled.
    pub async fn log(&self, level: Level, message: impl Into<String>, metadata: Option<Metadata>) {
        if !self.enabled(level) {
            return;
        }

        let entry = Entry::new(level, message, metadata);
        self.dispatch(&entry).await;
    }

    async fn dispatch(&self, entry: &Entry) {
        let outcomes = join_all(
            self.appends
                .iter()
                .map(|append| settle(append.as_ref(), entry)),
        )
        .await;

        for err in outcomes.into_iter().filter_map(Result::err) {
            self.trap.trap(&err);
        }
    }
}

async fn settle(append: &dyn Append, entry: &Entry) -> Result<(), Error> {
    let outcome = AssertUnwindSafe(async move { append.append(entry).await })
        .catch_unwind()
        .await;

    match outcome {
        Ok(result) => result,
        Err(payload) => Err(Error::delivery("appender panicked")
            .with_context("appender", format!("{append:?}"))
            .with_context("panic", panic_message(payload.as_ref()))),
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(message) = payload.downcast_ref::<&'static str>() {
        message
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message
    } else {
        "Box<dyn Any>"
    }
}
