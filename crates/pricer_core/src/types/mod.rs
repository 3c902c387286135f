//! Core date and error types.
//!
//! This module provides:
//! - `time`: `Date` with ISO 8601 parsing and serial day numbers
//! - `error`: Structured error types for pricing and date operations
//!
//! # Re-exports
//!
//! For convenience, commonly used types are re-exported at this module level:
//! - [`Date`] from `time`
//! - [`PricingError`], [`DateError`] from `error`

pub mod error;
pub mod time;

// Re-export commonly used types at module level
pub use error::{DateError, PricingError};
pub use time::Date;
