//! Logging configuration

use serde::Deserialize;

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LogSettings {
    /// Tracing env-filter directive, e.g. `splashbot=debug,info`
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}

fn default_filter() -> String {
    "splashbot=info,warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter() {
        assert_eq!(LogSettings::default().filter, "splashbot=info,warn");
    }
}
