//! Session storage configuration

use serde::Deserialize;
use std::path::PathBuf;

use super::error::ValidationError;

/// Session storage configuration
#[derive(Debug, Clone, Deserialize)]
pub struct StorageSettings {
    /// Directory holding per-chat session files
    #[serde(default = "default_session_dir")]
    pub session_dir: PathBuf,
}

impl StorageSettings {
    /// Validate storage configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.session_dir.as_os_str().is_empty() {
            return Err(ValidationError::EmptySessionDir);
        }
        Ok(())
    }
}

impl Default for StorageSettings {
    fn default() -> Self {
        Self {
            session_dir: default_session_dir(),
        }
    }
}

fn default_session_dir() -> PathBuf {
    PathBuf::from("./sessions")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = StorageSettings::default();
        assert_eq!(settings.session_dir, PathBuf::from("./sessions"));
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_empty_dir_rejected() {
        let settings = StorageSettings {
            session_dir: PathBuf::new(),
        };
        assert!(settings.validate().is_err());
    }
}
