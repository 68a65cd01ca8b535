//! Show the effective configuration

use crate::util;
use anyhow::{Context, Result};
use debouncer::config::MAX_WAIT_MS;
use debouncer::DebounceConfig;
use owo_colors::OwoColorize;
use std::path::Path;

pub fn run(config: &DebounceConfig, source: Option<&Path>, as_toml: bool) -> Result<()> {
    if as_toml {
        print!("{}", render_toml(config)?);
        return Ok(());
    }

    println!("{}", "Debounce Configuration".bold());
    match source {
        Some(path) => println!("{}: {}\n", "Location".dimmed(), path.display().dimmed()),
        None => println!("{}: {}\n", "Location".dimmed(), "(defaults)".dimmed()),
    }

    println!(
        "  {} = {} {}",
        "wait_ms".cyan(),
        config.wait_ms,
        format!("({})", util::format_wait(config.wait())).dimmed()
    );

    println!("\n{}", "Valid Ranges:".bold());
    println!("  wait_ms: 0-{}", MAX_WAIT_MS);

    Ok(())
}

fn render_toml(config: &DebounceConfig) -> Result<String> {
    toml::to_string(config).context("Failed to serialize config")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_toml_round_trips() {
        let config = DebounceConfig::with_wait_ms(125);
        let rendered = render_toml(&config).unwrap();

        assert_eq!(rendered.trim(), "wait_ms = 125");
        assert_eq!(DebounceConfig::from_toml_str(&rendered).unwrap(), config);
    }
}
