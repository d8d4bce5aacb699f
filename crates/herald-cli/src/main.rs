//! Herald CLI - demos for the in-process event dispatcher.
//!
//! `herald echo` runs the prompt loop driven by tick and quit events;
//! `herald lineage` prints the standard kind hierarchy.

#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(unreachable_pub)]
#![deny(clippy::unwrap_used)]
#![cfg_attr(test, allow(clippy::unwrap_used))]

use std::io::{self, BufReader};
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use herald_config::Config;
use herald_events::EventManager;
use herald_telemetry::{LogFormat, setup_logging};
use tracing::debug;

pub mod config_bridge;
pub mod echo;
pub mod lineage;

/// Herald - in-process event dispatch
#[derive(Parser)]
#[command(name = "herald")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Config file layered over `~/.herald/config.toml`
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level, overriding config and `HERALD_LOG`
    #[arg(long, global = true)]
    log_level: Option<String>,

    /// Log format: pretty, compact, json or full
    #[arg(long, global = true)]
    log_format: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Prompt for lines and echo them until a quit word
    Echo {
        /// Stop after this many ticks (0 for unlimited)
        #[arg(long)]
        max_ticks: Option<u64>,

        /// Prompt written before each read
        #[arg(long)]
        prompt: Option<String>,
    },

    /// Print the lineage of every standard event kind
    Lineage,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let resolved = Config::load(cli.config.as_deref()).context("failed to load configuration")?;
    let cfg = &resolved.config;

    // Set up logging from config, with flag overrides.
    let mut log_config = config_bridge::to_log_config(cfg);
    if let Some(level) = &cli.log_level {
        level.clone_into(&mut log_config.level);
    } else if cli.verbose {
        "debug".clone_into(&mut log_config.level);
    }
    if let Some(format) = &cli.log_format {
        log_config.format = format
            .parse::<LogFormat>()
            .context("invalid --log-format")?;
    }
    if let Err(e) = setup_logging(&log_config) {
        eprintln!("Failed to initialize logging: {e}");
    }

    for path in &resolved.loaded_files {
        debug!(path = %path.display(), "config layer");
    }

    match cli.command {
        Commands::Echo { max_ticks, prompt } => {
            let mut settings = config_bridge::to_echo_settings(cfg);
            if let Some(max_ticks) = max_ticks {
                settings.max_ticks = max_ticks;
            }
            if let Some(prompt) = prompt {
                settings.prompt = prompt;
            }

            let manager = Arc::new(EventManager::new(config_bridge::to_manager_config(cfg)?));
            let summary = echo::run(&manager, &settings, BufReader::new(io::stdin()), io::stdout())?;
            debug!(
                ticks = summary.ticks,
                reason = summary.quit_reason.as_deref().unwrap_or("tick limit"),
                "Echo session finished"
            );
        },
        Commands::Lineage => {
            for line in lineage::render() {
                println!("{line}");
            }
        },
    }

    Ok(())
}
