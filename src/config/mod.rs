//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment variables
//! using the `config` and `dotenvy` crates. Configuration is loaded with the
//! `SPLASHBOT_` prefix and nested values use double underscores as separators.
//!
//! # Example
//!
//! ```no_run
//! use splashbot::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//! ```

mod error;
mod logging;
mod storage;
mod telegram;
mod unsplash;

pub use error::{ConfigError, ValidationError};
pub use logging::LogSettings;
pub use storage::StorageSettings;
pub use telegram::TelegramSettings;
pub use unsplash::UnsplashSettings;

use serde::Deserialize;

/// Root application configuration
///
/// Load using [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    /// Telegram Bot API configuration (token, polling)
    pub telegram: TelegramSettings,

    /// Unsplash API configuration (access key, paging)
    pub unsplash: UnsplashSettings,

    /// Session storage configuration
    #[serde(default)]
    pub storage: StorageSettings,

    /// Logging configuration
    #[serde(default)]
    pub log: LogSettings,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `SPLASHBOT` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `SPLASHBOT__TELEGRAM__TOKEN=...` -> `telegram.token = ...`
    /// - `SPLASHBOT__UNSPLASH__ACCESS_KEY=...` -> `unsplash.access_key = ...`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or values
    /// cannot be parsed into the expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("SPLASHBOT")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.telegram.validate()?;
        self.unsplash.validate()?;
        self.storage.validate()?;
        Ok(())
    }
}
