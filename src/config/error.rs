//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Base URL must start with http:// or https://: {0}")]
    InvalidBaseUrl(&'static str),

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Collections page size must be between 1 and 30")]
    InvalidCollectionsPageSize,

    #[error("Session directory path is empty")]
    EmptySessionDir,
}
