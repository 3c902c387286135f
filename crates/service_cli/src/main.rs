//! putdi - Command Line Operations for Knock-in Payoff Books
//!
//! # Commands
//!
//! - `putdi price --book <file> [--history <file>]` - Price every trade in a book
//! - `putdi schedule --book <file> --period-end <date>` - List barrier observation dates
//! - `putdi describe --book <file>` - Summarise each trade's terms
//! - `putdi check` - Validate the configuration
//!
//! # Architecture
//!
//! As part of the **S**ervice layer, this crate loads files, builds
//! payoffs through `pricer_models` and renders results; no pricing logic
//! lives here.

use std::path::{Path, PathBuf};

use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

mod book;
mod commands;
mod config;
mod error;
mod history;

pub use error::{CliError, Result};

use config::{CliConfig, OutputFormat, DEFAULT_CONFIG_PATH};

/// Knock-in payoff pricing CLI
#[derive(Parser)]
#[command(name = "putdi")]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Configuration file path
    #[arg(short, long, global = true, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Price a book of payoffs against live fixings
    Price {
        /// Path to the payoff book (JSON)
        #[arg(short, long)]
        book: PathBuf,

        /// Path to the fixing history (CSV: variable,date,value)
        #[arg(long)]
        history: Option<PathBuf>,

        /// Output format; defaults to the configured one
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// List barrier observation dates for each payoff
    Schedule {
        /// Path to the payoff book (JSON)
        #[arg(short, long)]
        book: PathBuf,

        /// Calculation period end date (YYYY-MM-DD)
        #[arg(short, long)]
        period_end: String,

        /// Output format; defaults to the configured one
        #[arg(short, long, value_enum)]
        format: Option<OutputFormat>,
    },

    /// Summarise the terms of each payoff
    Describe {
        /// Path to the payoff book (JSON)
        #[arg(short, long)]
        book: PathBuf,
    },

    /// Check configuration
    Check,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = CliConfig::load_or_default(&cli.config)?.with_env_override();
    if !matches!(cli.command, Commands::Check) {
        config.validate()?;
    }

    // Initialise tracing
    let level = if cli.verbose { "debug" } else { config.log_level.as_str() };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level)))
        .init();

    if cli.verbose {
        info!("Verbose mode enabled");
    }
    log_config_source(&cli.config);

    match cli.command {
        Commands::Price {
            book,
            history,
            format,
        } => commands::price::run(
            &book,
            history.as_deref(),
            format.unwrap_or(config.output_format),
            &config,
        ),
        Commands::Schedule {
            book,
            period_end,
            format,
        } => commands::schedule::run(
            &book,
            &period_end,
            format.unwrap_or(config.output_format),
            &config,
        ),
        Commands::Describe { book } => commands::describe::run(&book, &config),
        Commands::Check => commands::check::run(&config),
    }
}

fn log_config_source(path: &Path) {
    if path.exists() {
        info!(path = %path.display(), "Loaded configuration");
    } else {
        info!(path = %path.display(), "Configuration file not found, using defaults");
    }
}
