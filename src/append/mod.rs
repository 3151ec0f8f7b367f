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

//! Dispatch log entries to various targets.

use std::fmt;

use async_trait::async_trait;

use crate::Error;
use crate::record::Entry;

mod stdio;
#[cfg(feature = "append-telegram")]
pub mod telegram;

pub use self::stdio::Stderr;
pub use self::stdio::Stdout;
#[cfg(feature = "append-telegram")]
pub use self::telegram::Telegram;

/// An appender that can deliver log entries.
///
/// The [`Logger`](crate::Logger) calls `append` on every appender concurrently and waits for all
/// of them to settle. An `Err` (or a panic) from one appender is reported to the logger's
/// [`Trap`](crate::Trap) and never reaches the caller or the sibling appenders.
///
/// Implementations must tolerate concurrent calls.
#[async_trait]
pub trait Append: fmt::Debug + Send + Sync + 'static {
    /// Deliver a log entry to the append target.
    async fn append(&self, entry: &Entry) -> Result<(), Error>;
}

impl<T: Append> From<T> for Box<dyn Append> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}
