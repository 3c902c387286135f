//! CLI error types.

use pricer_models::payoffs::PayoffError;
use thiserror::Error;

use crate::config::ConfigError;

/// Errors surfaced by CLI commands.
#[derive(Error, Debug)]
pub enum CliError {
    /// An input file does not exist.
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// A command-line argument is invalid.
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Reading or writing failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// A payoff book is not valid JSON of the expected shape.
    #[error("Invalid payoff book: {0}")]
    Book(#[from] serde_json::Error),

    /// A fixing history file could not be read or written as CSV.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A fixing history row is malformed.
    #[error("Invalid fixing history at line {line}: {reason}")]
    History {
        /// One-based line number in the file
        line: u64,
        /// What is wrong with the row
        reason: String,
    },

    /// The configuration file is invalid.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A payoff could not be built.
    #[error(transparent)]
    Payoff(#[from] PayoffError),
}

/// Result alias for CLI commands.
pub type Result<T> = std::result::Result<T, CliError>;
