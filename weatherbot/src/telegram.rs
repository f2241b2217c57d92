//! Minimal Telegram Bot API client: long polling and text replies.

use anyhow::{Context, Result, anyhow};
use reqwest::Client;
use serde::{Deserialize, Serialize, de::DeserializeOwned};
use std::time::Duration;
use tracing::debug;
use weatherbot_core::{RenderedMessage, config::TelegramSettings};

/// Extra time allowed on top of the long-poll timeout before the HTTP request gives up.
const POLL_GRACE_SECS: u64 = 10;

#[derive(Debug, Clone, Deserialize)]
pub struct Update {
    pub update_id: i64,
    pub message: Option<Message>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Message {
    pub chat: Chat,
    pub from: Option<User>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct Chat {
    pub id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct User {
    pub id: i64,
    pub username: Option<String>,
}

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
struct ApiResponse<T> {
    ok: bool,
    result: Option<T>,
    description: Option<String>,
}

#[derive(Debug, Serialize)]
struct SendMessageRequest<'a> {
    chat_id: i64,
    text: &'a str,
}

#[derive(Debug, Clone)]
pub struct TelegramClient {
    http: Client,
    /// `{base_url}/bot{token}`
    api_url: String,
    poll_timeout_secs: u64,
}

impl TelegramClient {
    pub fn new(token: &str, settings: &TelegramSettings) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(settings.poll_timeout_secs + POLL_GRACE_SECS))
            .build()
            .context("Failed to build Telegram HTTP client")?;

        Ok(Self {
            http,
            api_url: format!("{}/bot{}", settings.base_url.trim_end_matches('/'), token),
            poll_timeout_secs: settings.poll_timeout_secs,
        })
    }

    /// Identity of the bot behind the token.
    pub async fn get_me(&self) -> Result<User> {
        let res = self
            .http
            .get(format!("{}/getMe", self.api_url))
            .send()
            .await
            .context("Failed to send getMe request to Telegram")?;

        Self::parse(res, "getMe").await
    }

    /// Wait for new updates, starting at `offset` when given.
    pub async fn get_updates(&self, offset: Option<i64>) -> Result<Vec<Update>> {
        let mut query = vec![
            ("timeout", self.poll_timeout_secs.to_string()),
            ("allowed_updates", r#"["message"]"#.to_string()),
        ];
        if let Some(offset) = offset {
            query.push(("offset", offset.to_string()));
        }

        let res = self
            .http
            .get(format!("{}/getUpdates", self.api_url))
            .query(&query)
            .send()
            .await
            .context("Failed to send getUpdates request to Telegram")?;

        Self::parse(res, "getUpdates").await
    }

    pub async fn send_message(&self, chat_id: i64, text: &str) -> Result<()> {
        let res = self
            .http
            .post(format!("{}/sendMessage", self.api_url))
            .json(&SendMessageRequest { chat_id, text })
            .send()
            .await
            .context("Failed to send sendMessage request to Telegram")?;

        let _: serde_json::Value = Self::parse(res, "sendMessage").await?;
        Ok(())
    }

    /// Send every chunk of `message` to `chat_id`, in order, stopping at the first failure.
    pub async fn deliver(&self, chat_id: i64, message: &RenderedMessage) -> Result<()> {
        for (i, chunk) in message.chunks.iter().enumerate() {
            self.send_message(chat_id, chunk).await.with_context(|| {
                format!("Failed to deliver chunk {} of {}", i + 1, message.chunks.len())
            })?;
        }
        debug!(chat_id, chunks = message.chunks.len(), "reply delivered");
        Ok(())
    }

    async fn parse<T: DeserializeOwned>(res: reqwest::Response, method: &str) -> Result<T> {
        let status = res.status();
        let body = res
            .text()
            .await
            .with_context(|| format!("Failed to read Telegram {method} response body"))?;

        let parsed: ApiResponse<T> = serde_json::from_str(&body).with_context(|| {
            format!("Failed to parse Telegram {method} response (status {status})")
        })?;

        if !parsed.ok {
            return Err(anyhow!(
                "Telegram {} failed with status {}: {}",
                method,
                status,
                parsed.description.unwrap_or_default(),
            ));
        }

        parsed
            .result
            .ok_or_else(|| anyhow!("Telegram {method} response has no result"))
    }
}
