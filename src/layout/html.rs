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

use crate::Layout;
use crate::layout::format_timestamp;
use crate::record::Entry;
use crate::record::Level;

/// A layout that formats log entries as chat messages with HTML markup.
///
/// Output format:
///
/// ```text
/// 🔴 ERROR | Payment processing failed
///
/// <pre>{
///   "amount": 99.99,
///   "orderId": "ORD-12345"
/// }</pre>
///
/// <i>2024-01-15T10:30:00.000Z</i>
/// ```
///
/// The metadata block is omitted when the entry has no metadata. Metadata is HTML-escaped; the
/// message is not, so callers may put their own markup in it.
///
/// # Examples
///
/// ```
/// use botlog::layout::HtmlLayout;
///
/// let layout = HtmlLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct HtmlLayout {}

impl Layout for HtmlLayout {
    fn format(&self, entry: &Entry) -> String {
        let level = entry.level();
        let mut text = format!("{} {level} | {}", glyph(level), entry.message());

        if let Some(metadata) = entry.metadata() {
            let json = serde_json::to_string_pretty(metadata)
                .unwrap_or_else(|err| format!("<unserializable metadata: {err}>"));
            text.push_str("\n\n<pre>");
            text.push_str(&escape_html(&json));
            text.push_str("</pre>");
        }

        text.push_str("\n\n<i>");
        text.push_str(&format_timestamp(entry.timestamp()));
        text.push_str("</i>");
        text
    }
}

fn glyph(level: Level) -> &'static str {
    match level {
        Level::Info => "🔵",
        Level::Warn => "🟡",
        Level::Error => "🔴",
    }
}

// `&` goes first so the entities produced by the other two are left alone.
fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
}
