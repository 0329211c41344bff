//! Telegram Bot API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Telegram Bot API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct TelegramSettings {
    /// Bot token from BotFather
    pub token: String,

    /// Bot API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Send request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Long-poll wait passed to getUpdates, in seconds
    #[serde(default = "default_poll_timeout")]
    pub poll_timeout_secs: u64,
}

impl TelegramSettings {
    /// Get send timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Telegram configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.token.is_empty() {
            return Err(ValidationError::MissingRequired("TELEGRAM__TOKEN"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl("telegram.base_url"));
        }
        if self.timeout_secs == 0 || self.poll_timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.telegram.org".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_poll_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings() -> TelegramSettings {
        TelegramSettings {
            token: "123:abc".to_string(),
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
            poll_timeout_secs: default_poll_timeout(),
        }
    }

    #[test]
    fn test_valid_settings() {
        assert!(settings().validate().is_ok());
    }

    #[test]
    fn test_empty_token_rejected() {
        let mut s = settings();
        s.token = String::new();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_bad_base_url_rejected() {
        let mut s = settings();
        s.base_url = "api.telegram.org".to_string();
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut s = settings();
        s.timeout_secs = 0;
        assert!(s.validate().is_err());
    }

    #[test]
    fn test_timeout_duration() {
        let mut s = settings();
        s.timeout_secs = 5;
        assert_eq!(s.timeout(), Duration::from_secs(5));
    }
}
