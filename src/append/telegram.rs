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

//! Appender for the Telegram Bot API.

use std::convert::Infallible;
use std::env;
use std::fmt;
use std::str::FromStr;

use async_trait::async_trait;
use serde::Serialize;

use crate::Error;
use crate::Layout;
use crate::Trap;
use crate::append::Append;
use crate::layout::HtmlLayout;
use crate::record::Entry;
use crate::trap::DefaultTrap;

/// The default Bot API server.
pub const DEFAULT_API_URL: &str = "https://api.telegram.org";

/// The environment variable [`Telegram::from_env`] reads the bot token from.
pub const TOKEN_ENV: &str = "TELEGRAM_BOT_TOKEN";

/// The environment variable [`Telegram::from_env`] reads the chat id from.
pub const CHAT_ID_ENV: &str = "TELEGRAM_CHAT_ID";

/// The chat a [`Telegram`] appender posts to.
///
/// Either a numeric id (users, groups, and channels alike) or a public `@channelusername`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(untagged)]
pub enum ChatId {
    /// A numeric chat id. Group and channel ids are negative.
    Id(i64),
    /// A textual chat id, sent to the API verbatim.
    Name(String),
}

impl ChatId {
    fn is_empty(&self) -> bool {
        match self {
            ChatId::Id(_) => false,
            ChatId::Name(name) => name.is_empty(),
        }
    }
}

impl fmt::Display for ChatId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChatId::Id(id) => write!(f, "{id}"),
            ChatId::Name(name) => f.write_str(name),
        }
    }
}

impl From<i64> for ChatId {
    fn from(id: i64) -> Self {
        ChatId::Id(id)
    }
}

impl From<i32> for ChatId {
    fn from(id: i32) -> Self {
        ChatId::Id(id.into())
    }
}

impl From<String> for ChatId {
    fn from(name: String) -> Self {
        ChatId::Name(name)
    }
}

impl From<&str> for ChatId {
    fn from(name: &str) -> Self {
        ChatId::Name(name.to_string())
    }
}

/// Integers become [`ChatId::Id`]; everything else is kept as [`ChatId::Name`].
impl FromStr for ChatId {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(match s.parse::<i64>() {
            Ok(id) => ChatId::Id(id),
            Err(_) => ChatId::Name(s.to_string()),
        })
    }
}

/// How the Bot API parses the message text.
///
/// See <https://core.telegram.org/bots/api#formatting-options>.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
pub enum ParseMode {
    /// HTML markup.
    #[default]
    #[serde(rename = "HTML")]
    Html,
    /// Legacy Markdown.
    Markdown,
    /// Markdown, version 2.
    MarkdownV2,
}

#[derive(Debug, Serialize)]
struct SendMessage<'a> {
    chat_id: &'a ChatId,
    text: &'a str,
    parse_mode: ParseMode,
    disable_web_page_preview: bool,
}

/// An appender that posts log entries to a Telegram chat through a bot.
///
/// Delivery failures never reach the caller. A transport error or a non-success response is
/// reported to the appender's [`Trap`] (default [`DefaultTrap`]) and the entry is dropped.
///
/// # Examples
///
/// ```
/// use botlog::append::Telegram;
/// use botlog::append::telegram::ParseMode;
///
/// let telegram = Telegram::new("123456:bot-token", -1001234567890_i64)
///     .unwrap()
///     .with_parse_mode(ParseMode::Html)
///     .with_disable_web_page_preview(true);
/// ```
pub struct Telegram {
    token: String,
    endpoint: String,
    chat_id: ChatId,
    parse_mode: ParseMode,
    disable_web_page_preview: bool,
    layout: Box<dyn Layout>,
    trap: Box<dyn Trap>,
    client: reqwest::Client,
}

impl fmt::Debug for Telegram {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // the endpoint embeds the token
        f.debug_struct("Telegram")
            .field("token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("parse_mode", &self.parse_mode)
            .field("disable_web_page_preview", &self.disable_web_page_preview)
            .field("layout", &self.layout)
            .field("trap", &self.trap)
            .finish_non_exhaustive()
    }
}

impl Telegram {
    /// Create a new `Telegram` appender.
    ///
    /// # Errors
    ///
    /// Return a configuration error naming the field if `token` or `chat_id` is empty, or if the
    /// HTTP client cannot be initialized.
    pub fn new(token: impl Into<String>, chat_id: impl Into<ChatId>) -> Result<Self, Error> {
        let token = token.into();
        if token.is_empty() {
            return Err(Error::configuration("token is required").with_context("field", "token"));
        }

        let chat_id = chat_id.into();
        if chat_id.is_empty() {
            return Err(
                Error::configuration("chat_id is required").with_context("field", "chat_id")
            );
        }

        let client = reqwest::Client::builder().build().map_err(|err| {
            Error::configuration("failed to initialize http client").with_source(err)
        })?;

        Ok(Self {
            endpoint: endpoint(DEFAULT_API_URL, &token),
            token,
            chat_id,
            parse_mode: ParseMode::default(),
            disable_web_page_preview: true,
            layout: Box::new(HtmlLayout::default()),
            trap: Box::new(DefaultTrap::default()),
            client,
        })
    }

    /// Create a new `Telegram` appender from the [`TOKEN_ENV`] and [`CHAT_ID_ENV`] environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Return a configuration error if a variable is unset, not unicode, or empty.
    pub fn from_env() -> Result<Self, Error> {
        Self::from_env_vars(TOKEN_ENV, CHAT_ID_ENV)
    }

    /// Create a new `Telegram` appender from the named environment variables.
    ///
    /// A chat id that parses as an integer is sent as a number.
    ///
    /// # Errors
    ///
    /// Return a configuration error if a variable is unset, not unicode, or empty.
    pub fn from_env_vars(token_var: &str, chat_id_var: &str) -> Result<Self, Error> {
        let token = read_env(token_var)?;
        let chat_id = match read_env(chat_id_var)?.parse::<ChatId>() {
            Ok(chat_id) => chat_id,
            Err(never) => match never {},
        };
        Self::new(token, chat_id)
    }

    /// Set the parse mode. Default to [`ParseMode::Html`].
    pub fn with_parse_mode(mut self, parse_mode: ParseMode) -> Self {
        self.parse_mode = parse_mode;
        self
    }

    /// Set whether link previews are disabled. Default to `true`.
    pub fn with_disable_web_page_preview(mut self, disable: bool) -> Self {
        self.disable_web_page_preview = disable;
        self
    }

    /// Set the layout that renders the message text. Default to [`HtmlLayout`].
    pub fn with_layout(mut self, layout: impl Into<Box<dyn Layout>>) -> Self {
        self.layout = layout.into();
        self
    }

    /// Set the trap that receives delivery failures. Default to [`DefaultTrap`].
    pub fn with_trap(mut self, trap: impl Into<Box<dyn Trap>>) -> Self {
        self.trap = trap.into();
        self
    }

    /// Set the HTTP client used to call the Bot API.
    pub fn with_client(mut self, client: reqwest::Client) -> Self {
        self.client = client;
        self
    }

    /// Set the Bot API server, e.g. a self-hosted one. Default to [`DEFAULT_API_URL`].
    pub fn with_api_url(mut self, api_url: impl AsRef<str>) -> Self {
        self.endpoint = endpoint(api_url.as_ref(), &self.token);
        self
    }

    async fn send(&self, entry: &Entry) -> Result<(), Error> {
        let text = self.layout.format(entry);
        let message = SendMessage {
            chat_id: &self.chat_id,
            text: &text,
            parse_mode: self.parse_mode,
            disable_web_page_preview: self.disable_web_page_preview,
        };

        let response = self
            .client
            .post(&self.endpoint)
            .json(&message)
            .send()
            .await
            .map_err(|err| {
                Error::delivery("failed to send message to telegram")
                    .with_context("chat_id", &self.chat_id)
                    .with_source(err.without_url())
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(Error::delivery("telegram api responded with an error")
                .with_context("chat_id", &self.chat_id)
                .with_context("status", status.as_u16())
                .with_context("body", body));
        }

        Ok(())
    }
}

#[async_trait]
impl Append for Telegram {
    async fn append(&self, entry: &Entry) -> Result<(), Error> {
        if let Err(err) = self.send(entry).await {
            self.trap.trap(&err);
        }
        Ok(())
    }
}

fn endpoint(api_url: &str, token: &str) -> String {
    format!("{}/bot{token}/sendMessage", api_url.trim_end_matches('/'))
}

fn read_env(name: &str) -> Result<String, Error> {
    env::var(name).map_err(|err| {
        Error::configuration("failed to read environment variable")
            .with_context("variable", name)
            .with_source(err)
    })
}
