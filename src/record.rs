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

//! Log entries and levels.

use std::fmt;
use std::str::FromStr;

use jiff::Timestamp;
use serde::Serialize;
use serde_json::Map;
use serde_json::Value;

use crate::Error;

/// Structured key-values attached to an [`Entry`].
pub type Metadata = Map<String, Value>;

/// The severity of an entry.
///
/// Levels are ordered from the least to the most severe: `Info < Warn < Error`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub enum Level {
    /// Informational entries.
    #[default]
    Info,
    /// Something unexpected happened, but the application keeps going.
    Warn,
    /// Something failed.
    Error,
}

impl Level {
    /// The priority used for threshold comparison.
    pub fn priority(self) -> u8 {
        match self {
            Level::Info => 0,
            Level::Warn => 1,
            Level::Error => 2,
        }
    }

    /// The upper-case name of the level.
    pub fn as_str(self) -> &'static str {
        match self {
            Level::Info => "INFO",
            Level::Warn => "WARN",
            Level::Error => "ERROR",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for Level {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "info" => Ok(Level::Info),
            "warn" | "warning" => Ok(Level::Warn),
            "error" => Ok(Level::Error),
            _ => Err(Error::configuration("unknown log level").with_context("level", s)),
        }
    }
}

/// A single log entry, passed by reference to every appender.
#[derive(Clone, Debug)]
pub struct Entry {
    level: Level,
    message: String,
    metadata: Option<Metadata>,
    timestamp: Timestamp,
}

impl Entry {
    /// Create an entry observed now.
    pub fn new(level: Level, message: impl Into<String>, metadata: Option<Metadata>) -> Self {
        EntryBuilder::default()
            .level(level)
            .message(message)
            .metadata(metadata)
            .build()
    }

    /// The severity of the entry.
    pub fn level(&self) -> Level {
        self.level
    }

    /// The message body.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The attached metadata, if any.
    ///
    /// An empty map is reported as absent.
    pub fn metadata(&self) -> Option<&Metadata> {
        self.metadata.as_ref().filter(|m| !m.is_empty())
    }

    /// The time the entry was created.
    pub fn timestamp(&self) -> Timestamp {
        self.timestamp
    }
}

/// Builder for [`Entry`].
#[derive(Debug)]
pub struct EntryBuilder {
    entry: Entry,
}

impl Default for EntryBuilder {
    fn default() -> Self {
        EntryBuilder {
            entry: Entry {
                level: Level::Info,
                message: String::new(),
                metadata: None,
                timestamp: Timestamp::now(),
            },
        }
    }
}

impl EntryBuilder {
    /// Set [`level`](Entry::level).
    pub fn level(mut self, level: Level) -> Self {
        self.entry.level = level;
        self
    }

    /// Set [`message`](Entry::message).
    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.entry.message = message.into();
        self
    }

    /// Set [`metadata`](Entry::metadata).
    pub fn metadata(mut self, metadata: Option<Metadata>) -> Self {
        self.entry.metadata = metadata;
        self
    }

    /// Set [`timestamp`](Entry::timestamp).
    pub fn timestamp(mut self, timestamp: Timestamp) -> Self {
        self.entry.timestamp = timestamp;
        self
    }

    /// Invoke the builder and return an `Entry`.
    pub fn build(self) -> Entry {
        self.entry
    }
}

/// Convert any serializable value into [`Metadata`].
///
/// This never fails. A value that serializes to a JSON object becomes the map itself; any other
/// value is stored under the `value` key; a value that cannot be serialized is replaced by a
/// placeholder string under the `metadata` key.
///
/// # Examples
///
/// ```
/// use botlog::record::to_metadata;
///
/// let metadata = to_metadata(&serde_json::json!({ "order_id": "ORD-12345" }));
/// assert_eq!(metadata["order_id"], "ORD-12345");
/// ```
pub fn to_metadata<T: Serialize + ?Sized>(value: &T) -> Metadata {
    match serde_json::to_value(value) {
        Ok(Value::Object(map)) => map,
        Ok(value) => {
            let mut map = Map::new();
            map.insert("value".to_string(), value);
            map
        }
        Err(err) => {
            let mut map = Map::new();
            map.insert(
                "metadata".to_string(),
                Value::String(format!("<unserializable: {err}>")),
            );
            map
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use serde::Serializer;

    use super::*;

    #[test]
    fn test_level_order() {
        assert!(Level::Info < Level::Warn);
        assert!(Level::Warn < Level::Error);
        assert_eq!(Level::default(), Level::Info);
        assert_eq!(
            [Level::Info, Level::Warn, Level::Error].map(Level::priority),
            [0, 1, 2]
        );
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("info".parse::<Level>().unwrap(), Level::Info);
        assert_eq!(" WARN ".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("warning".parse::<Level>().unwrap(), Level::Warn);
        assert_eq!("Error".parse::<Level>().unwrap(), Level::Error);

        let err = "debug".parse::<Level>().unwrap_err();
        assert_eq!(err.kind(), crate::ErrorKind::Configuration);
        assert_eq!(err.context("level"), Some("debug"));
    }

    #[test]
    fn test_empty_metadata_is_absent() {
        let entry = Entry::new(Level::Warn, "hello", Some(Metadata::new()));
        assert!(entry.metadata().is_none());
        assert_eq!(entry.level(), Level::Warn);
        assert_eq!(entry.message(), "hello");
    }

    #[test]
    fn test_to_metadata() {
        let map = HashMap::from([("user_id", 42)]);
        assert_eq!(to_metadata(&map)["user_id"], 42);

        let scalar = to_metadata(&"just a string");
        assert_eq!(scalar["value"], "just a string");
    }

    #[test]
    fn test_to_metadata_fails_closed() {
        struct Unserializable;

        impl Serialize for Unserializable {
            fn serialize<S: Serializer>(&self, _: S) -> Result<S::Ok, S::Error> {
                Err(serde::ser::Error::custom("cyclic reference"))
            }
        }

        let metadata = to_metadata(&Unserializable);
        assert_eq!(metadata["metadata"], "<unserializable: cyclic reference>");
    }
}
