//! Unsplash API configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Unsplash API configuration
#[derive(Debug, Clone, Deserialize)]
pub struct UnsplashSettings {
    /// Application access key
    pub access_key: String,

    /// API base URL
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Collections shown per menu page
    #[serde(default = "default_collections_page_size")]
    pub collections_page_size: u32,

    /// Remaining-requests threshold below which a warning is logged
    #[serde(default = "default_rate_limit_low_water")]
    pub rate_limit_low_water: u64,
}

impl UnsplashSettings {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Validate Unsplash configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.access_key.is_empty() {
            return Err(ValidationError::MissingRequired("UNSPLASH__ACCESS_KEY"));
        }
        if !self.base_url.starts_with("http://") && !self.base_url.starts_with("https://") {
            return Err(ValidationError::InvalidBaseUrl("unsplash.base_url"));
        }
        if self.timeout_secs == 0 {
            return Err(ValidationError::InvalidTimeout);
        }
        // The API caps per_page at 30.
        if self.collections_page_size == 0 || self.collections_page_size > 30 {
            return Err(ValidationError::InvalidCollectionsPageSize);
        }
        Ok(())
    }
}

fn default_base_url() -> String {
    "https://api.unsplash.com".to_string()
}

fn default_timeout() -> u64 {
    10
}

fn default_collections_page_size() -> u32 {
    10
}

fn default_rate_limit_low_water() -> u64 {
    10
}
