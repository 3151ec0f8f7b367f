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

//! Botlog is a small logging facade that fans structured log entries out to one or more
//! appenders, including a Telegram bot.
//!
//! # Overview
//!
//! A [`Logger`] holds a non-empty list of [`Append`] implementations and a minimum [`Level`].
//! Entries below that level are dropped before they are built. Every other entry is handed to
//! all appenders concurrently, and the logging call returns once each of them has settled.
//!
//! Logging never fails the caller. An appender that returns an error, or panics, is reported to
//! a [`Trap`] and its siblings still get the entry. The [`Telegram`](append::Telegram) appender
//! goes further: it reports its own delivery failures to its trap and always resolves.
//!
//! # Examples
//!
//! ```no_run
//! # async fn run() -> Result<(), botlog::Error> {
//! use botlog::Level;
//! use botlog::append;
//! use botlog::record::to_metadata;
//!
//! let logger = botlog::builder()
//!     .level(Level::Warn)
//!     .append(append::Telegram::from_env()?)
//!     .append(append::Stderr::default())
//!     .build()?;
//!
//! logger.info("dropped, below the threshold", None).await;
//! logger
//!     .error(
//!         "Payment processing failed",
//!         Some(to_metadata(&serde_json::json!({ "orderId": "ORD-12345", "amount": 99.99 }))),
//!     )
//!     .await;
//! # Ok(())
//! # }
//! ```

#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod append;
#[cfg(feature = "bridge-log")]
pub mod bridge;
pub mod layout;
pub mod record;
pub mod trap;

mod error;
mod logger;

pub use self::append::Append;
pub use self::error::Error;
pub use self::error::ErrorKind;
pub use self::layout::Layout;
pub use self::logger::*;
pub use self::record::Entry;
pub use self::record::Level;
pub use self::record::Metadata;
pub use self::trap::Trap;
