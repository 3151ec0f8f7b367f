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

use serde_json::Value;

use crate::Layout;
use crate::layout::format_timestamp;
use crate::record::Entry;

/// A layout that formats log entries as a single line of plain text.
///
/// Output format:
///
/// ```text
/// 2024-01-15T10:30:00.000Z ERROR Payment processing failed amount=99.99 orderId=ORD-12345
/// 2024-01-15T10:30:00.000Z  WARN Disk almost full
/// 2024-01-15T10:30:00.000Z  INFO User logged in user_id=123
/// ```
///
/// # Examples
///
/// ```
/// use botlog::layout::TextLayout;
///
/// let text_layout = TextLayout::default();
/// ```
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct TextLayout {}

impl Layout for TextLayout {
    fn format(&self, entry: &Entry) -> String {
        let time = format_timestamp(entry.timestamp());
        let level = entry.level();
        let message = entry.message();
        let mut text = format!("{time} {level:>5} {message}");

        for (key, value) in entry.metadata().into_iter().flatten() {
            text.push(' ');
            text.push_str(key);
            text.push('=');
            match value {
                Value::String(s) => text.push_str(s),
                other => text.push_str(&other.to_string()),
            }
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::record::EntryBuilder;
    use crate::record::Level;
    use crate::record::to_metadata;

    #[test]
    fn test_format() {
        let entry = EntryBuilder::default()
            .level(Level::Warn)
            .message("Disk almost full")
            .metadata(Some(to_metadata(&json!({ "free": "2%", "mount": ["/", "/var"] }))))
            .timestamp("2024-01-15T10:30:00Z".parse().unwrap())
            .build();

        assert_eq!(
            TextLayout::default().format(&entry),
            r#"2024-01-15T10:30:00.000Z  WARN Disk almost full free=2% mount=["/","/var"]"#
        );
    }
}
