//! CLI configuration.
//!
//! Loaded from a TOML file with environment variable overrides:
//!
//! ```toml
//! log_level = "info"
//! output_format = "table"
//! default_notional = 1.0
//!
//! [sampling]
//! fine_period = 30
//! medium_period = 90
//! coarse_period = 180
//! ```

use std::fmt;
use std::path::Path;
use std::str::FromStr;

use pricer_models::payoffs::{PayoffConfig, PayoffError};
use pricer_models::schedules::SamplingSettings;
use serde::Deserialize;
use thiserror::Error;

/// Default configuration file name.
pub const DEFAULT_CONFIG_PATH: &str = "payoff.toml";

const VALID_LOG_LEVELS: [&str; 5] = ["trace", "debug", "info", "warn", "error"];

/// Output format for command results.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text table
    #[default]
    Table,
    /// JSON array
    Json,
    /// CSV with a header row
    Csv,
}

impl FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "table" => Ok(Self::Table),
            "json" => Ok(Self::Json),
            "csv" => Ok(Self::Csv),
            other => Err(format!(
                "Unknown format: {}. Supported: table, json, csv",
                other
            )),
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Table => "table",
            Self::Json => "json",
            Self::Csv => "csv",
        };
        f.write_str(name)
    }
}

/// CLI configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct CliConfig {
    /// Log level used when `RUST_LOG` is not set
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Output format used when `--format` is not given
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Notional for payoffs without an `amount`
    #[serde(default = "default_notional")]
    pub default_notional: f64,

    /// Observation sampling densities, checked by [`CliConfig::validate`]
    #[serde(default)]
    pub sampling: SamplingSettings,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_notional() -> f64 {
    1.0
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            output_format: OutputFormat::default(),
            default_notional: default_notional(),
            sampling: SamplingSettings::default(),
        }
    }
}

impl CliConfig {
    /// Load configuration from a TOML file
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;

        toml::from_str(&content).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// Load configuration from `path`, or defaults when the file is absent
    pub fn load_or_default(path: &Path) -> Result<Self, ConfigError> {
        if path.exists() {
            Self::load(path)
        } else {
            Ok(Self::default())
        }
    }

    /// Apply environment variable overrides
    pub fn with_env_override(mut self) -> Self {
        if let Ok(log_level) = std::env::var("PAYOFF_LOG_LEVEL") {
            self.log_level = log_level;
        }

        if let Ok(format) = std::env::var("PAYOFF_OUTPUT_FORMAT") {
            if let Ok(format) = format.parse() {
                self.output_format = format;
            }
        }

        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors = Vec::new();

        if !VALID_LOG_LEVELS.contains(&self.log_level.to_lowercase().as_str()) {
            errors.push(format!(
                "Invalid log_level '{}'. Valid values: {:?}",
                self.log_level, VALID_LOG_LEVELS
            ));
        }

        if let Err(e) = self.payoff_config() {
            errors.push(e.to_string());
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }

    /// Payoff construction context derived from this configuration
    pub fn payoff_config(&self) -> Result<PayoffConfig, PayoffError> {
        Ok(PayoffConfig::from_settings(
            self.sampling,
            self.default_notional,
        )?)
    }
}

/// Configuration error type
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// IO error reading config file
    #[error("IO error: {0}")]
    Io(String),
    /// Parse error in config file
    #[error("Parse error: {0}")]
    Parse(String),
    /// Validation error
    #[error("Validation errors: {}", .0.join("; "))]
    Validation(Vec<String>),
}
