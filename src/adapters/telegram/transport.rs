//! Telegram transport: delivers display payloads as Bot API messages.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, Secret};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::time::Duration;

use super::api::{ApiResponse, ReplyKeyboardMarkup, SendMessageRequest, SendPhotoRequest};
use crate::domain::conversation::DisplayPayload;
use crate::domain::foundation::ChatId;
use crate::ports::{ChatTransport, TransportError};

/// Configuration for the Telegram Bot API connection.
#[derive(Debug, Clone)]
pub struct TelegramConfig {
    /// Bot token from BotFather.
    token: Secret<String>,
    /// Base URL of the Bot API (default: https://api.telegram.org).
    pub base_url: String,
    /// Timeout for send requests.
    pub timeout: Duration,
    /// Long-poll wait passed to getUpdates, in seconds.
    pub poll_timeout_secs: u64,
}

impl TelegramConfig {
    /// Creates a configuration with the given bot token.
    pub fn new(token: impl Into<String>) -> Self {
        Self {
            token: Secret::new(token.into()),
            base_url: "https://api.telegram.org".to_string(),
            timeout: Duration::from_secs(30),
            poll_timeout_secs: 30,
        }
    }

    /// Sets the base URL.
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    /// Sets the send request timeout.
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Sets the long-poll wait.
    pub fn with_poll_timeout_secs(mut self, secs: u64) -> Self {
        self.poll_timeout_secs = secs;
        self
    }

    /// Builds the URL of a Bot API method.
    pub(crate) fn method_url(&self, method: &str) -> String {
        format!(
            "{}/bot{}/{}",
            self.base_url,
            self.token.expose_secret(),
            method
        )
    }
}

/// Sends text and photo messages through the Bot API.
pub struct TelegramTransport {
    config: TelegramConfig,
    client: Client,
}

impl TelegramTransport {
    /// Creates a transport with the given configuration.
    pub fn new(config: TelegramConfig) -> Self {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .expect("Failed to create HTTP client");

        Self { config, client }
    }

    async fn call<Req: Serialize, Res: DeserializeOwned + Default>(
        &self,
        method: &str,
        request: &Req,
    ) -> Result<Res, TransportError> {
        let response = self
            .client
            .post(self.config.method_url(method))
            .json(request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let envelope: ApiResponse<Res> = response
            .json()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        if !envelope.ok {
            return Err(TransportError::Api(
                envelope
                    .description
                    .unwrap_or_else(|| "no description".to_string()),
            ));
        }
        envelope
            .result
            .ok_or_else(|| TransportError::Api("ok response without result".to_string()))
    }
}

#[async_trait]
impl ChatTransport for TelegramTransport {
    async fn send(&self, chat: ChatId, payload: &DisplayPayload) -> Result<(), TransportError> {
        let reply_markup = payload
            .keyboard
            .as_deref()
            .map(ReplyKeyboardMarkup::from_rows);

        match &payload.photo_url {
            Some(photo_url) => {
                let request = SendPhotoRequest {
                    chat_id: chat.as_i64(),
                    photo: photo_url,
                    caption: &payload.text,
                    parse_mode: "HTML",
                    reply_markup,
                };
                let _: serde_json::Value = self.call("sendPhoto", &request).await?;
            }
            None => {
                let request = SendMessageRequest {
                    chat_id: chat.as_i64(),
                    text: &payload.text,
                    parse_mode: "HTML",
                    reply_markup,
                };
                let _: serde_json::Value = self.call("sendMessage", &request).await?;
            }
        }
        Ok(())
    }
}
