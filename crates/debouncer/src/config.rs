//! Debouncer configuration
//!
//! Loaded from a TOML file such as:
//!
//! ```toml
//! wait_ms = 250
//! ```

use crate::error::ConfigError;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

/// Default quiet period in milliseconds
pub const DEFAULT_WAIT_MS: u64 = 500;

/// Largest accepted quiet period (1 hour)
pub const MAX_WAIT_MS: u64 = 60 * 60 * 1000;

/// Debouncer configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DebounceConfig {
    /// Quiet period before a round fires (default: 500ms)
    #[serde(default = "default_wait_ms")]
    pub wait_ms: u64,
}

fn default_wait_ms() -> u64 {
    DEFAULT_WAIT_MS
}

impl Default for DebounceConfig {
    fn default() -> Self {
        Self {
            wait_ms: DEFAULT_WAIT_MS,
        }
    }
}

impl DebounceConfig {
    /// Config with an explicit wait
    pub fn with_wait_ms(wait_ms: u64) -> Self {
        Self { wait_ms }
    }

    /// Load and validate a TOML config file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&contents)
    }

    /// Parse and validate TOML text; missing keys take their defaults
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(contents)?;
        config.validate()?;
        Ok(config)
    }

    /// Check values against their valid ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.wait_ms > MAX_WAIT_MS {
            return Err(ConfigError::OutOfRange {
                key: "wait_ms",
                value: self.wait_ms,
                max: MAX_WAIT_MS,
            });
        }
        Ok(())
    }

    /// Quiet period as a `Duration`
    pub fn wait(&self) -> Duration {
        Duration::from_millis(self.wait_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_defaults() {
        let config = DebounceConfig::default();

        assert_eq!(config.wait_ms, 500);
        assert_eq!(config.wait(), Duration::from_millis(500));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_empty_document_uses_defaults() {
        let config = DebounceConfig::from_toml_str("").unwrap();
        assert_eq!(config, DebounceConfig::default());
    }

    #[test]
    fn test_parse_wait() {
        let config = DebounceConfig::from_toml_str("wait_ms = 200\n").unwrap();
        assert_eq!(config.wait(), Duration::from_millis(200));
    }

    #[test]
    fn test_zero_wait_is_valid() {
        let config = DebounceConfig::from_toml_str("wait_ms = 0").unwrap();
        assert_eq!(config.wait(), Duration::ZERO);
    }

    #[test]
    fn test_out_of_range_rejected() {
        let err = DebounceConfig::from_toml_str("wait_ms = 3600001").unwrap_err();
        assert!(matches!(
            err,
            ConfigError::OutOfRange { key: "wait_ms", value: 3_600_001, .. }
        ));
    }

    #[test]
    fn test_unknown_key_rejected() {
        let err = DebounceConfig::from_toml_str("wait = 10").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_load_from_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("debounce.toml");
        fs::write(&path, "wait_ms = 750\n").unwrap();

        let config = DebounceConfig::load(&path).unwrap();
        assert_eq!(config, DebounceConfig::with_wait_ms(750));
    }

    #[test]
    fn test_load_missing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing.toml");

        let err = DebounceConfig::load(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
        assert!(err.to_string().contains("missing.toml"));
    }
}
