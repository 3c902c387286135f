//! Payoff construction context.

use super::error::ConfigError;
use crate::schedules::{SamplingConfig, SamplingSettings};
use serde::{Deserialize, Serialize};

/// Explicit context handed to the payoff factory.
///
/// Carries everything construction needs beyond the schema itself, so no
/// process-wide state is consulted while building a payoff.
///
/// # Examples
///
/// ```
/// use pricer_models::payoffs::PayoffConfig;
///
/// let config: PayoffConfig = serde_json::from_str(
///     r#"{ "sampling": { "fine_period": 7 } }"#,
/// ).unwrap();
/// assert_eq!(config.sampling.fine_period(), 7);
/// assert_eq!(config.default_notional, 1.0);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayoffConfig {
    /// Observation sampling densities given to every constructed payoff.
    pub sampling: SamplingConfig,

    /// Notional used when the schema has no `amount` (1.0 = 100%).
    pub default_notional: f64,
}

impl Default for PayoffConfig {
    fn default() -> Self {
        Self {
            sampling: SamplingConfig::default(),
            default_notional: 1.0,
        }
    }
}

impl PayoffConfig {
    /// Builds a validated configuration from unchecked sampling settings.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Sampling`] when a sampling period is zero or the
    /// fine horizon exceeds the medium horizon, and
    /// [`ConfigError::InvalidNotional`] for a non-finite default notional.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::payoffs::{ConfigError, PayoffConfig};
    /// use pricer_models::schedules::SamplingSettings;
    ///
    /// let settings = SamplingSettings { coarse_period: 0, ..Default::default() };
    /// assert!(matches!(
    ///     PayoffConfig::from_settings(settings, 1.0),
    ///     Err(ConfigError::Sampling(_))
    /// ));
    /// ```
    pub fn from_settings(
        settings: SamplingSettings,
        default_notional: f64,
    ) -> Result<Self, ConfigError> {
        let config = Self {
            sampling: SamplingConfig::try_from(settings)?,
            default_notional,
        };
        config.validate()?;
        Ok(config)
    }

    /// Creates a configuration with custom sampling.
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Validates the configuration.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.default_notional.is_finite() {
            return Err(ConfigError::InvalidNotional(self.default_notional));
        }
        Ok(())
    }
}
