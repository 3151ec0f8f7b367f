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
use std::sync::Mutex;
use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::time::Duration;

use async_trait::async_trait;
use botlog::Append;
use botlog::Entry;
use botlog::Error;
use botlog::ErrorKind;
use botlog::Level;
use botlog::Logger;
use botlog::Trap;
use botlog::record::to_metadata;
use serde_json::json;
use tokio::sync::Barrier;

#[derive(Debug, Default, Clone)]
struct Recording {
    entries: Arc<Mutex<Vec<Entry>>>,
}

impl Recording {
    fn count(&self) -> usize {
        self.entries.lock().unwrap().len()
    }
}

#[async_trait]
impl Append for Recording {
    async fn append(&self, entry: &Entry) -> Result<(), Error> {
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
struct Failing {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Append for Failing {
    async fn append(&self, _: &Entry) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(Error::delivery("destination unreachable"))
    }
}

#[derive(Debug, Default, Clone)]
struct Panicking {
    calls: Arc<AtomicUsize>,
}

#[async_trait]
impl Append for Panicking {
    async fn append(&self, _: &Entry) -> Result<(), Error> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        panic!("appender exploded");
    }
}

// Settles only once every sibling sharing the barrier has been polled.
#[derive(Debug, Clone)]
struct Rendezvous {
    barrier: Arc<Barrier>,
}

#[async_trait]
impl Append for Rendezvous {
    async fn append(&self, _: &Entry) -> Result<(), Error> {
        self.barrier.wait().await;
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
struct CaptureTrap {
    errors: Arc<Mutex<Vec<String>>>,
}

impl CaptureTrap {
    fn errors(&self) -> Vec<String> {
        self.errors.lock().unwrap().clone()
    }
}

impl Trap for CaptureTrap {
    fn trap(&self, err: &Error) {
        self.errors.lock().unwrap().push(err.to_string());
    }
}

const LEVELS: [Level; 3] = [Level::Info, Level::Warn, Level::Error];

#[test]
fn test_empty_appenders_rejected() {
    let err = Logger::new(vec![], Level::Info).unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
    assert_eq!(err.message(), "at least one appender required");

    let err = botlog::builder().level(Level::Error).build().unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);

    let logger = botlog::builder()
        .append(Recording::default())
        .build()
        .unwrap();
    assert_eq!(logger.level(), Level::Info);
}

#[tokio::test]
async fn test_threshold() {
    for threshold in LEVELS {
        for level in LEVELS {
            let first = Recording::default();
            let second = Recording::default();
            let logger = botlog::builder()
                .level(threshold)
                .append(first.clone())
                .append(second.clone())
                .build()
                .unwrap();

            logger.log(level, "hello", None).await;

            let expected = usize::from(level >= threshold);
            assert_eq!(first.count(), expected, "{level} against {threshold}");
            assert_eq!(second.count(), expected, "{level} against {threshold}");
            assert_eq!(logger.enabled(level), level >= threshold);
        }
    }
}

#[tokio::test]
async fn test_level_shortcuts() {
    let recording = Recording::default();
    let logger = Logger::new(vec![recording.clone().into()], Level::Info).unwrap();

    logger.info("info", None).await;
    logger.warn("warn", None).await;
    logger
        .error("error", Some(to_metadata(&json!({ "order_id": 456 }))))
        .await;

    let entries = recording.entries.lock().unwrap();
    let levels = entries.iter().map(Entry::level).collect::<Vec<_>>();
    assert_eq!(levels, LEVELS);
    assert_eq!(entries[2].message(), "error");
    assert_eq!(entries[2].metadata().unwrap()["order_id"], 456);
    assert!(entries[0].metadata().is_none());
}

#[tokio::test]
async fn test_every_appender_sees_the_same_entry() {
    let first = Recording::default();
    let second = Recording::default();
    let logger = botlog::builder()
        .append(first.clone())
        .append(second.clone())
        .build()
        .unwrap();

    logger.warn("disk almost full", None).await;

    let first = first.entries.lock().unwrap();
    let second = second.entries.lock().unwrap();
    assert_eq!(first[0].timestamp(), second[0].timestamp());
    assert_eq!(first[0].message(), second[0].message());
}

#[tokio::test]
async fn test_failing_appender_is_isolated() {
    let trap = CaptureTrap::default();
    let failing = Failing::default();
    let recording = Recording::default();
    let logger = botlog::builder()
        .append(failing.clone())
        .append(recording.clone())
        .trap(trap.clone())
        .build()
        .unwrap();

    logger.error("Payment processing failed", None).await;

    assert_eq!(failing.calls.load(Ordering::SeqCst), 1);
    assert_eq!(recording.count(), 1);

    let errors = trap.errors();
    assert_eq!(errors.len(), 1);
    assert!(errors[0].contains("destination unreachable"), "{errors:?}");
}

#[tokio::test]
async fn test_panicking_appender_is_isolated() {
    let trap = CaptureTrap::default();
    let panicking = Panicking::default();
    let recording = Recording::default();
    let logger = botlog::builder()
        .append(recording.clone())
        .append(panicking.clone())
        .trap(trap.clone())
        .build()
        .unwrap();

    logger.info("still delivered", None).await;
    logger.info("and again", None).await;

    assert_eq!(panicking.calls.load(Ordering::SeqCst), 2);
    assert_eq!(recording.count(), 2);

    let errors = trap.errors();
    assert_eq!(errors.len(), 2);
    assert!(errors[0].contains("appender panicked"), "{errors:?}");
    assert!(errors[0].contains("appender exploded"), "{errors:?}");
}

#[tokio::test]
async fn test_appenders_run_concurrently() {
    // a sequential fan-out would wait on the first barrier forever
    let barrier = Arc::new(Barrier::new(3));
    let logger = botlog::builder()
        .append(Rendezvous {
            barrier: barrier.clone(),
        })
        .append(Rendezvous {
            barrier: barrier.clone(),
        })
        .append(Rendezvous { barrier })
        .build()
        .unwrap();

    tokio::time::timeout(Duration::from_secs(5), logger.info("hello", None))
        .await
        .expect("appenders must be driven concurrently");
}
