//! Error types

use crate::callback::Mode;
use std::path::PathBuf;
use thiserror::Error;

/// Errors returned by [`Debouncer`](crate::Debouncer) operations
///
/// A rejected call leaves the engine untouched; it stays usable afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DebounceError {
    /// The signal or callback shape does not match the configured mode
    #[error("mode mismatch: operation requires a {expected} callback, but a {found} callback is configured")]
    ModeMismatch {
        /// Mode the operation needs
        expected: Mode,
        /// Mode currently configured
        found: Mode,
    },
}

/// Errors raised while loading a [`DebounceConfig`](crate::DebounceConfig)
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file {path}: {source}", path = .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{key} = {value} is out of range (max {max})")]
    OutOfRange {
        key: &'static str,
        value: u64,
        max: u64,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_mismatch_message() {
        let err = DebounceError::ModeMismatch {
            expected: Mode::Payload,
            found: Mode::Simple,
        };

        assert_eq!(
            err.to_string(),
            "mode mismatch: operation requires a payload callback, but a simple callback is configured"
        );
    }

    #[test]
    fn test_out_of_range_message() {
        let err = ConfigError::OutOfRange {
            key: "wait_ms",
            value: 9_000_000,
            max: 3_600_000,
        };

        assert_eq!(err.to_string(), "wait_ms = 9000000 is out of range (max 3600000)");
    }
}
