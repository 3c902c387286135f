//! Sampling densities for barrier observation.

use super::error::ScheduleError;
use serde::{Deserialize, Serialize};

/// Default fine sampling period in days.
pub const DEFAULT_FINE_PERIOD: u32 = 30;
/// Default medium sampling period in days.
pub const DEFAULT_MEDIUM_PERIOD: u32 = 90;
/// Default coarse sampling period in days.
pub const DEFAULT_COARSE_PERIOD: u32 = 180;
/// Default look-back of fine sampling from the window end, in days.
pub const DEFAULT_FINE_HORIZON: u32 = 180;
/// Default look-back of medium sampling from the window end, in days.
pub const DEFAULT_MEDIUM_HORIZON: u32 = 360;

/// Observation sampling densities.
///
/// Dates within `fine_horizon` days of the window end are sampled every
/// `fine_period` days, dates within `medium_horizon` days every
/// `medium_period` days, and everything earlier every `coarse_period` days.
/// All periods are strictly positive.
///
/// # Examples
///
/// ```
/// use pricer_models::schedules::SamplingConfig;
///
/// let sampling = SamplingConfig::default();
/// assert_eq!(sampling.fine_period(), 30);
///
/// let weekly = SamplingConfig::new(7, 30, 90).unwrap();
/// assert_eq!(weekly.coarse_period(), 90);
///
/// assert!(SamplingConfig::new(0, 30, 90).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "SamplingSettings", into = "SamplingSettings")]
pub struct SamplingConfig {
    fine_period: u32,
    medium_period: u32,
    coarse_period: u32,
    fine_horizon: u32,
    medium_horizon: u32,
}

impl SamplingConfig {
    /// Creates a configuration with custom periods and default horizons.
    pub fn new(
        fine_period: u32,
        medium_period: u32,
        coarse_period: u32,
    ) -> Result<Self, ScheduleError> {
        Self::with_horizons(
            fine_period,
            medium_period,
            coarse_period,
            DEFAULT_FINE_HORIZON,
            DEFAULT_MEDIUM_HORIZON,
        )
    }

    /// Creates a fully custom configuration.
    pub fn with_horizons(
        fine_period: u32,
        medium_period: u32,
        coarse_period: u32,
        fine_horizon: u32,
        medium_horizon: u32,
    ) -> Result<Self, ScheduleError> {
        for (name, period) in [
            ("fine_period", fine_period),
            ("medium_period", medium_period),
            ("coarse_period", coarse_period),
        ] {
            if period == 0 {
                return Err(ScheduleError::InvalidSamplingPeriod { name });
            }
        }
        if fine_horizon > medium_horizon {
            return Err(ScheduleError::InvalidHorizon {
                fine: fine_horizon,
                medium: medium_horizon,
            });
        }
        Ok(Self {
            fine_period,
            medium_period,
            coarse_period,
            fine_horizon,
            medium_horizon,
        })
    }

    /// Fine sampling period in days.
    #[inline]
    pub fn fine_period(&self) -> u32 {
        self.fine_period
    }

    /// Medium sampling period in days.
    #[inline]
    pub fn medium_period(&self) -> u32 {
        self.medium_period
    }

    /// Coarse sampling period in days.
    #[inline]
    pub fn coarse_period(&self) -> u32 {
        self.coarse_period
    }

    /// Fine sampling look-back from the window end, in days.
    #[inline]
    pub fn fine_horizon(&self) -> u32 {
        self.fine_horizon
    }

    /// Medium sampling look-back from the window end, in days.
    #[inline]
    pub fn medium_horizon(&self) -> u32 {
        self.medium_horizon
    }
}

impl Default for SamplingConfig {
    fn default() -> Self {
        Self {
            fine_period: DEFAULT_FINE_PERIOD,
            medium_period: DEFAULT_MEDIUM_PERIOD,
            coarse_period: DEFAULT_COARSE_PERIOD,
            fine_horizon: DEFAULT_FINE_HORIZON,
            medium_horizon: DEFAULT_MEDIUM_HORIZON,
        }
    }
}

/// Unvalidated form of [`SamplingConfig`] as read from configuration files.
///
/// Missing fields take their defaults. Convert with
/// `SamplingConfig::try_from` to check the values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingSettings {
    /// Fine sampling period in days.
    pub fine_period: u32,
    /// Medium sampling period in days.
    pub medium_period: u32,
    /// Coarse sampling period in days.
    pub coarse_period: u32,
    /// Fine sampling look-back from the window end, in days.
    pub fine_horizon: u32,
    /// Medium sampling look-back from the window end, in days.
    pub medium_horizon: u32,
}

impl Default for SamplingSettings {
    fn default() -> Self {
        SamplingConfig::default().into()
    }
}

impl TryFrom<SamplingSettings> for SamplingConfig {
    type Error = ScheduleError;

    fn try_from(s: SamplingSettings) -> Result<Self, Self::Error> {
        SamplingConfig::with_horizons(
            s.fine_period,
            s.medium_period,
            s.coarse_period,
            s.fine_horizon,
            s.medium_horizon,
        )
    }
}

impl From<SamplingConfig> for SamplingSettings {
    fn from(c: SamplingConfig) -> Self {
        Self {
            fine_period: c.fine_period,
            medium_period: c.medium_period,
            coarse_period: c.coarse_period,
            fine_horizon: c.fine_horizon,
            medium_horizon: c.medium_horizon,
        }
    }
}
