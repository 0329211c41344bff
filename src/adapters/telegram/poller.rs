//! Long-polling update source for the Bot API.

use reqwest::Client;
use std::time::Duration;
use tracing::debug;

use super::api::{ApiResponse, GetUpdatesRequest, Update};
use super::transport::TelegramConfig;
use crate::application::InboundEvent;
use crate::domain::foundation::ChatId;
use crate::ports::TransportError;

/// Extra slack on top of the long-poll wait so the HTTP client does not
/// cancel a request the server is still holding open.
const POLL_TIMEOUT_MARGIN: Duration = Duration::from_secs(10);

/// Pulls updates via `getUpdates` with an advancing offset and maps them to
/// inbound events.
pub struct UpdatePoller {
    config: TelegramConfig,
    client: Client,
    offset: i64,
}

impl UpdatePoller {
    /// Creates a poller with the given configuration.
    pub fn new(config: TelegramConfig) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.poll_timeout_secs) + POLL_TIMEOUT_MARGIN)
            .build()
            .expect("Failed to create HTTP client");

        Self {
            config,
            client,
            offset: 0,
        }
    }

    /// Waits for the next batch of updates and returns them as chat events.
    ///
    /// Updates without a text message are acknowledged and dropped. The
    /// offset advances even on such updates so they are never re-delivered.
    pub async fn next_batch(&mut self) -> Result<Vec<(ChatId, InboundEvent)>, TransportError> {
        let request = GetUpdatesRequest {
            offset: self.offset,
            timeout: self.config.poll_timeout_secs,
        };

        let response = self
            .client
            .post(self.config.method_url("getUpdates"))
            .json(&request)
            .send()
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;

        let envelope: ApiResponse<Vec<Update>> = response
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

        let updates = envelope.result.unwrap_or_default();
        let mut events = Vec::with_capacity(updates.len());

        for update in updates {
            self.offset = self.offset.max(update.update_id + 1);

            let Some(message) = update.message else {
                continue;
            };
            let Some(text) = message.text else {
                debug!(chat_id = message.chat.id, "Skipping non-text message");
                continue;
            };

            events.push((ChatId::new(message.chat.id), classify_text(&text)));
        }

        Ok(events)
    }
}

/// Maps a message text to an inbound event. `/start` and `/cancel` are
/// recognized as commands, with an optional `@botname` suffix; everything
/// else is passed through as plain text.
fn classify_text(text: &str) -> InboundEvent {
    let first_token = text.trim().split_whitespace().next().unwrap_or("");
    let command = first_token
        .split_once('@')
        .map_or(first_token, |(head, _)| head);

    match command {
        "/start" => InboundEvent::Start,
        "/cancel" => InboundEvent::Cancel,
        _ => InboundEvent::Text(text.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    mod classify_text_tests {
        use super::*;

        #[test]
        fn start_command_is_recognized() {
            assert!(matches!(classify_text("/start"), InboundEvent::Start));
        }

        #[test]
        fn cancel_command_is_recognized() {
            assert!(matches!(classify_text("/cancel"), InboundEvent::Cancel));
        }

        #[test]
        fn command_with_bot_suffix_is_recognized() {
            assert!(matches!(
                classify_text("/start@splash_bot"),
                InboundEvent::Start
            ));
        }

        #[test]
        fn command_with_surrounding_whitespace_is_recognized() {
            assert!(matches!(classify_text("  /cancel  "), InboundEvent::Cancel));
        }

        #[test]
        fn menu_label_passes_through_as_text() {
            match classify_text("Назад") {
                InboundEvent::Text(text) => assert_eq!(text, "Назад"),
                other => panic!("unexpected event: {other:?}"),
            }
        }

        #[test]
        fn unknown_command_passes_through_as_text() {
            assert!(matches!(classify_text("/help"), InboundEvent::Text(_)));
        }

        #[test]
        fn text_starting_with_start_word_is_not_a_command() {
            assert!(matches!(
                classify_text("/started yet?"),
                InboundEvent::Text(_)
            ));
        }
    }
}
