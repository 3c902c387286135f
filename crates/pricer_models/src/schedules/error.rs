//! Schedule generation error types.

use thiserror::Error;

/// Errors raised while configuring observation sampling.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ScheduleError {
    /// A sampling period of zero days.
    #[error("Sampling period '{name}' must be at least one day")]
    InvalidSamplingPeriod {
        /// Which period was rejected.
        name: &'static str,
    },

    /// The fine sampling horizon reaches further back than the medium one.
    #[error("Fine horizon {fine} days exceeds medium horizon {medium} days")]
    InvalidHorizon {
        /// Fine sampling horizon in days.
        fine: u32,
        /// Medium sampling horizon in days.
        medium: u32,
    },
}
