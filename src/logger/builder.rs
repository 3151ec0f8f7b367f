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

use crate::Append;
use crate::Error;
use crate::Logger;
use crate::Trap;
use crate::record::Level;
use crate::trap::DefaultTrap;

/// Create a new empty [`LoggerBuilder`] instance for configuring a [`Logger`].
///
/// # Examples
///
/// ```
/// use botlog::append;
///
/// let logger = botlog::builder()
///     .append(append::Stderr::default())
///     .build()
///     .unwrap();
/// ```
pub fn builder() -> LoggerBuilder {
    LoggerBuilder {
        appends: vec![],
        level: Level::default(),
        trap: Box::new(DefaultTrap::default()),
    }
}

/// A builder for configuring a [`Logger`].
///
/// # Examples
///
/// ```
/// use botlog::Level;
/// use botlog::append;
///
/// let logger = botlog::builder()
///     .level(Level::Warn)
///     .append(append::Stdout::default())
///     .append(append::Stderr::default())
///     .build()
///     .unwrap();
/// ```
#[must_use = "call `build` to construct a logger instance"]
#[derive(Debug)]
pub struct LoggerBuilder {
    appends: Vec<Box<dyn Append>>,
    level: Level,
    trap: Box<dyn Trap>,
}

impl LoggerBuilder {
    /// Register a new appender with the [`LoggerBuilder`].
    ///
    /// Appenders are called in registration order, but they settle in any order.
    pub fn append(mut self, append: impl Into<Box<dyn Append>>) -> Self {
        self.appends.push(append.into());
        self
    }

    /// Set the minimum level of entries to dispatch. Default to [`Level::Info`].
    pub fn level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Set the trap that receives errors and panics from appenders. Default to [`DefaultTrap`].
    pub fn trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Build the [`Logger`].
    ///
    /// # Errors
    ///
    /// Return a configuration error if no appender has been registered.
    ///
    /// # Examples
    ///
    /// ```
    /// assert!(botlog::builder().build().is_err());
    /// ```
    pub fn build(self) -> Result<Logger, Error> {
        Logger::with_trap(self.appends, self.level, self.trap)
    }
}
