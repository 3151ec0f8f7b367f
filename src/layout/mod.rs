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

//! Layouts for formatting log entries.

use std::fmt;

use jiff::Timestamp;

use crate::record::Entry;

mod html;
mod text;

pub use self::html::HtmlLayout;
pub use self::text::TextLayout;

/// A layout for formatting log entries.
///
/// Formatting never fails: a layout that cannot render part of an entry substitutes a
/// placeholder for it.
pub trait Layout: fmt::Debug + Send + Sync + 'static {
    /// Formats a log entry.
    fn format(&self, entry: &Entry) -> String;
}

impl<T: Layout> From<T> for Box<dyn Layout> {
    fn from(value: T) -> Self {
        Box::new(value)
    }
}

// ISO-8601 in UTC with millisecond precision, e.g. `2024-01-15T10:30:00.000Z`.
fn format_timestamp(timestamp: Timestamp) -> String {
    format!("{timestamp:.3}")
}
