//! Debouncer CLI - dbn command

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod cmd;
mod logging;
mod util;

/// dbn - Collapse bursts of stdin lines into settled events
#[derive(Parser)]
#[command(name = "dbn")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Write logs to this file instead of stderr
    #[arg(long, global = true)]
    log_file: Option<PathBuf>,

    /// TOML config file (keys: wait_ms)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the last line of each burst once input has been quiet
    Lines {
        /// Quiet period in milliseconds (overrides the config file)
        #[arg(long)]
        wait_ms: Option<u64>,
    },
    /// Report how many lines each settled burst collapsed
    Count {
        /// Quiet period in milliseconds (overrides the config file)
        #[arg(long)]
        wait_ms: Option<u64>,
    },
    /// Show the effective configuration
    Config {
        /// Quiet period in milliseconds (overrides the config file)
        #[arg(long)]
        wait_ms: Option<u64>,

        /// Print as TOML instead of a summary
        #[arg(long)]
        toml: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = logging::init(cli.verbose, cli.log_file.as_deref())?;

    let config_path = cli.config.as_deref();
    match cli.command {
        Commands::Lines { wait_ms } => {
            let config = util::resolve_config(wait_ms, config_path)?;
            cmd::lines::run(&config).await
        }
        Commands::Count { wait_ms } => {
            let config = util::resolve_config(wait_ms, config_path)?;
            cmd::count::run(&config).await
        }
        Commands::Config { wait_ms, toml } => {
            let config = util::resolve_config(wait_ms, config_path)?;
            cmd::config::run(&config, config_path, toml)
        }
    }
}
