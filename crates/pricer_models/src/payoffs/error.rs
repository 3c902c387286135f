//! Payoff error types.
//!
//! Field-level problems (an unparseable trigger, a missing date, mismatched
//! list lengths) are never errors: they produce a specification that
//! reports itself unpriceable through [`Unpriceable`]. Errors are kept for
//! input that cannot describe a payoff at all and for fixing store failures.

use crate::schedules::ScheduleError;
use pricer_core::market_data::FixingStoreError;
use pricer_core::types::{Date, PricingError};
use thiserror::Error;

/// Structural failures while reading a payoff schema.
///
/// # Examples
/// ```
/// use pricer_models::payoffs::SchemaError;
///
/// let err = SchemaError::UnknownType("autocall".to_string());
/// assert!(format!("{}", err).contains("autocall"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SchemaError {
    /// The text is not valid JSON.
    #[error("Invalid payoff JSON: {0}")]
    Json(String),

    /// The JSON value is not an object.
    #[error("Payoff schema must be a JSON object")]
    NotAnObject,

    /// The `type` field is missing or not a string.
    #[error("Payoff schema has no 'type' field")]
    MissingType,

    /// The `type` field names a payoff this library does not price.
    #[error("Unknown payoff type: {0}")]
    UnknownType(String),
}

impl From<serde_json::Error> for SchemaError {
    fn from(err: serde_json::Error) -> Self {
        SchemaError::Json(err.to_string())
    }
}

/// Invalid payoff configuration.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Observation sampling is misconfigured.
    #[error("Sampling configuration error: {0}")]
    Sampling(#[from] ScheduleError),

    /// Default notional is not a finite number.
    #[error("Invalid default notional: N = {0}")]
    InvalidNotional(f64),
}

/// Payoff construction failures.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum PayoffError {
    /// The schema could not be read.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Historical knock-in resolution failed to retrieve fixings.
    #[error("Knock-in resolution failed: {0}")]
    FixingStore(#[from] FixingStoreError),

    /// The supplied configuration is invalid.
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl From<PayoffError> for PricingError {
    fn from(err: PayoffError) -> Self {
        match err {
            PayoffError::Schema(SchemaError::UnknownType(t)) => {
                PricingError::UnsupportedPayoff(t)
            }
            PayoffError::FixingStore(e) => e.into(),
            other => PricingError::InvalidInput(other.to_string()),
        }
    }
}

/// Why a specification cannot be priced.
///
/// A specification carrying any of these conditions evaluates to the
/// undefined price on every call.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum Unpriceable {
    /// No underlying variables.
    #[error("no underlying variables")]
    NoVariables,

    /// A variable is listed more than once.
    #[error("variable {0} is listed more than once")]
    DuplicateVariable(String),

    /// Variable, trigger, and strike lists differ in length.
    #[error("{variables} variables but {triggers} triggers and {strikes} strikes")]
    LengthMismatch {
        /// Number of variables
        variables: usize,
        /// Number of trigger levels
        triggers: usize,
        /// Number of strike levels
        strikes: usize,
    },

    /// A trigger level is NaN or infinite.
    #[error("trigger for {0} is not a finite number")]
    NonFiniteTrigger(String),

    /// A strike level is NaN or infinite.
    #[error("strike for {0} is not a finite number")]
    NonFiniteStrike(String),

    /// Notional is NaN or infinite.
    #[error("notional is not a finite number")]
    NonFiniteNotional,

    /// Reference start or end date is absent.
    #[error("reference window is incomplete")]
    MissingReferenceWindow,

    /// Reference start falls after reference end.
    #[error("reference start {start} is after reference end {end}")]
    InvertedReferenceWindow {
        /// Reference start date
        start: Date,
        /// Reference end date
        end: Date,
    },
}
