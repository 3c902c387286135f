//! Market data error types.
//!
//! Errors raised by historical fixing lookups. A lookup for an unknown
//! variable is not an error (it yields an empty series); only genuine
//! retrieval failures surface here.

use crate::types::PricingError;
use thiserror::Error;

/// Historical fixing store failures.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::FixingStoreError;
///
/// let err = FixingStoreError::Unavailable("connection refused".to_string());
/// assert!(format!("{}", err).contains("connection refused"));
/// ```
#[derive(Error, Debug, Clone, PartialEq)]
pub enum FixingStoreError {
    /// The backing store could not be reached or read.
    #[error("Fixing store unavailable: {0}")]
    Unavailable(String),
}

impl From<FixingStoreError> for PricingError {
    fn from(err: FixingStoreError) -> Self {
        PricingError::MarketData(err.to_string())
    }
}
