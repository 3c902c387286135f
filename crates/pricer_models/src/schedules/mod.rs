//! Observation schedule generation for barrier monitoring.
//!
//! This module provides:
//! - [`Period`]: A calculation period with start, end, and payment dates
//! - [`CalculationPeriod`]: The end-date contract consumed by schedule generation
//! - [`SamplingConfig`]: Fine/medium/coarse observation densities
//! - [`observation_dates`] and [`ObservationSchedule`]: Barrier observation dates
//!
//! # Examples
//!
//! ```
//! use pricer_models::schedules::{ObservationSchedule, Period, SamplingConfig};
//! use pricer_core::types::time::Date;
//!
//! let start = Date::from_ymd(2020, 1, 1).unwrap();
//! let end = Date::from_ymd(2020, 6, 1).unwrap();
//! let schedule = ObservationSchedule::new(Some(start), Some(end), SamplingConfig::default());
//!
//! let period = Period::with_payment_on_end(start, Date::from_ymd(2020, 6, 3).unwrap());
//! let dates = schedule.event_dates(&period);
//! assert_eq!(dates[0], start);
//! assert_eq!(*dates.last().unwrap(), end);
//! ```

mod error;
mod observation;
mod period;
mod sampling;

pub use error::ScheduleError;
pub use observation::{observation_dates, ObservationSchedule};
pub use period::{CalculationPeriod, Period};
pub use sampling::{
    SamplingConfig, SamplingSettings, DEFAULT_COARSE_PERIOD, DEFAULT_FINE_HORIZON,
    DEFAULT_FINE_PERIOD, DEFAULT_MEDIUM_HORIZON, DEFAULT_MEDIUM_PERIOD,
};
