//! Error types for structured error handling.
//!
//! This module provides:
//! - `PricingError`: Catch-all for pricing-layer failures
//! - `DateError`: Errors from date construction, parsing, and serial arithmetic

use std::fmt;
use thiserror::Error;

/// Categorised pricing errors.
///
/// Provides structured error handling for pricing operations with
/// descriptive context for each failure mode. Lower-level errors
/// (market data, schema, configuration) convert into this type.
///
/// # Examples
/// ```
/// use pricer_core::types::PricingError;
///
/// let err = PricingError::InvalidInput("trigger list is empty".to_string());
/// assert_eq!(format!("{}", err), "Invalid input: trigger list is empty");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PricingError {
    /// Invalid input data or parameters
    InvalidInput(String),

    /// Market data could not be retrieved
    MarketData(String),

    /// Payoff type not supported
    UnsupportedPayoff(String),
}

impl fmt::Display for PricingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PricingError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            PricingError::MarketData(msg) => write!(f, "Market data error: {}", msg),
            PricingError::UnsupportedPayoff(msg) => {
                write!(f, "Unsupported payoff: {}", msg)
            }
        }
    }
}

impl std::error::Error for PricingError {}

/// Date-related errors.
///
/// # Examples
/// ```
/// use pricer_core::types::DateError;
///
/// let err = DateError::InvalidDate { year: 2024, month: 2, day: 30 };
/// assert_eq!(format!("{}", err), "Invalid date: 2024-2-30");
/// ```
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DateError {
    /// Invalid date components (e.g., February 30th).
    #[error("Invalid date: {year}-{month}-{day}")]
    InvalidDate {
        /// Year component
        year: i32,
        /// Month component (1-12)
        month: u32,
        /// Day component (1-31)
        day: u32,
    },

    /// Failed to parse date string.
    #[error("Date parse error: {0}")]
    ParseError(String),

    /// Serial day number outside the representable calendar.
    #[error("Serial day number {0} is out of range")]
    SerialOutOfRange(i64),
}

impl From<DateError> for PricingError {
    fn from(err: DateError) -> Self {
        PricingError::InvalidInput(err.to_string())
    }
}
