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

//! Send a few entries to a Telegram chat.
//!
//! ```shell
//! TELEGRAM_BOT_TOKEN=... TELEGRAM_CHAT_ID=... cargo run --example telegram
//! ```
//!
//! Set `BOTLOG_LEVEL` to `warn` or `error` to raise the threshold.

use botlog::Level;
use botlog::append;
use botlog::record::to_metadata;
use serde_json::json;

#[tokio::main]
async fn main() -> Result<(), botlog::Error> {
    let level = match std::env::var("BOTLOG_LEVEL") {
        Ok(level) => level.parse()?,
        Err(_) => Level::Info,
    };

    let logger = botlog::builder()
        .level(level)
        .append(append::Telegram::from_env()?)
        .append(append::Stdout::default())
        .build()?;

    logger
        .info(
            "🚀 botlog demo started",
            Some(to_metadata(&json!({
                "version": env!("CARGO_PKG_VERSION"),
                "environment": "development",
            }))),
        )
        .await;

    logger
        .warn(
            "Resource usage is high",
            Some(to_metadata(&json!({ "memory": "85%", "cpu": "60%" }))),
        )
        .await;

    logger
        .error(
            "Database connection refused",
            Some(to_metadata(&json!({
                "code": "ERR_CONNECTION_REFUSED",
                "host": "db.example.com",
                "port": 5432,
            }))),
        )
        .await;

    Ok(())
}
