//! amerprice - American option pricing from the command line
//!
//! # Commands
//!
//! - `amerprice price` - Price the scenario with every engine and print the mean
//! - `amerprice table` - Print the holding-period × spot-move sensitivity table
//!
//! # Configuration
//!
//! `--config <FILE>` loads a TOML scenario; without it the built-in sample
//! scenario is used. `AMERPRICE_LOG_LEVEL` overrides the file's log level,
//! `--log-level` overrides both, and `RUST_LOG` wins over everything.

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod commands;
mod config;
mod error;
mod render;

pub use error::{CliError, Result};

/// American option multi-engine pricer
#[derive(Parser)]
#[command(name = "amerprice")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price the scenario and print the averaged option price
    Price,

    /// Print the sensitivity table
    Table,
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config::build_config(cli.config.as_deref(), cli.log_level.as_deref())?;
    init_tracing(config.log_level.as_filter_str());

    if cli.verbose {
        info!("Verbose mode enabled");
    }

    match cli.command {
        Commands::Price => commands::price::run(&config, cli.verbose),
        Commands::Table => commands::table::run(&config),
    }
}
