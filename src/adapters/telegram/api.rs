//! Telegram Bot API wire types.
//!
//! Only the subset this bot exchanges is modeled: incoming text updates and
//! outgoing text/photo messages with a reply keyboard.

use serde::{Deserialize, Serialize};

/// Envelope of every Bot API response.
#[derive(Debug, Deserialize)]
pub(crate) struct ApiResponse<T> {
    pub ok: bool,
    #[serde(default)]
    pub result: Option<T>,
    #[serde(default)]
    pub description: Option<String>,
}

/// One long-polled update.
#[derive(Debug, Deserialize)]
pub(crate) struct Update {
    pub update_id: i64,
    #[serde(default)]
    pub message: Option<IncomingMessage>,
}

/// An incoming chat message. Non-text messages carry `text: None` and are
/// skipped by the poller.
#[derive(Debug, Deserialize)]
pub(crate) struct IncomingMessage {
    pub chat: Chat,
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct Chat {
    pub id: i64,
}

#[derive(Debug, Serialize)]
pub(crate) struct GetUpdatesRequest {
    pub offset: i64,
    pub timeout: u64,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendMessageRequest<'a> {
    pub chat_id: i64,
    pub text: &'a str,
    pub parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyKeyboardMarkup>,
}

#[derive(Debug, Serialize)]
pub(crate) struct SendPhotoRequest<'a> {
    pub chat_id: i64,
    pub photo: &'a str,
    pub caption: &'a str,
    pub parse_mode: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_markup: Option<ReplyKeyboardMarkup>,
}

/// Reply keyboard built from rows of button labels.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct ReplyKeyboardMarkup {
    pub keyboard: Vec<Vec<KeyboardButton>>,
    pub resize_keyboard: bool,
    pub one_time_keyboard: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub(crate) struct KeyboardButton {
    pub text: String,
}

impl ReplyKeyboardMarkup {
    /// Builds a keyboard from display payload rows.
    pub fn from_rows(rows: &[Vec<String>]) -> Self {
        Self {
            keyboard: rows
                .iter()
                .map(|row| {
                    row.iter()
                        .map(|label| KeyboardButton {
                            text: label.clone(),
                        })
                        .collect()
                })
                .collect(),
            resize_keyboard: true,
            one_time_keyboard: true,
        }
    }
}
