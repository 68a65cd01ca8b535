//! Shared utilities for CLI commands

use anyhow::{Context, Result};
use debouncer::DebounceConfig;
use std::path::Path;
use std::time::Duration;

/// Build the effective config
///
/// Precedence: `--wait-ms` flag, then the `--config` file, then defaults.
pub fn resolve_config(wait_ms: Option<u64>, config_path: Option<&Path>) -> Result<DebounceConfig> {
    let mut config = match config_path {
        Some(path) => DebounceConfig::load(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => DebounceConfig::default(),
    };

    if let Some(wait_ms) = wait_ms {
        config.wait_ms = wait_ms;
        config.validate().context("Invalid --wait-ms")?;
    }

    Ok(config)
}

/// Format a wait as "250ms" or "1.5s"
pub fn format_wait(wait: Duration) -> String {
    let ms = wait.as_millis();
    if ms < 1000 {
        format!("{}ms", ms)
    } else if ms % 1000 == 0 {
        format!("{}s", ms / 1000)
    } else {
        format!("{:.1}s", wait.as_secs_f64())
    }
}
