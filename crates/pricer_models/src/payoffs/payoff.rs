//! Payoff family enum.

use super::config::PayoffConfig;
use super::error::{PayoffError, SchemaError, Unpriceable};
use super::evaluator::PayoffEvaluator;
use super::interpreter::FixingMap;
use super::put_di_american::PutDiAmerican;
use super::schema::PayoffSchema;
use crate::schedules::CalculationPeriod;
use pricer_core::market_data::FixingStore;
use pricer_core::types::Date;
use serde_json::Value;
use std::fmt;

/// Declaratively specified payoff.
///
/// Dispatches on the schema `type` tag. Uses enum dispatch so that each
/// variant keeps its concrete evaluation path.
///
/// # Examples
///
/// ```
/// use pricer_models::payoffs::{Fixing, Payoff, PayoffConfig, PayoffEvaluator};
/// use pricer_core::market_data::InMemoryFixingStore;
///
/// let payoff = Payoff::from_json(
///     r#"{
///         "type": "putdiamerican",
///         "variable": ["A", "B"],
///         "trigger": [80, 40],
///         "strike": [100, 50],
///         "refstart": "2020-01-01",
///         "refend": "2020-06-01"
///     }"#,
///     &PayoffConfig::default(),
///     &InMemoryFixingStore::new(),
/// ).unwrap();
///
/// let fixing: Fixing = serde_json::from_str(r#"{"A": 120, "B": 30}"#).unwrap();
/// assert!((payoff.evaluate(Some(&fixing)) - 0.6).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub enum Payoff {
    /// Down-and-in put, worst-of across its variables.
    PutDiAmerican(PutDiAmerican),
}

impl Payoff {
    /// Parses JSON text and builds the payoff it describes.
    ///
    /// # Errors
    ///
    /// Structural schema failures, an unknown `type`, an invalid
    /// configuration, or a failing fixing store.
    pub fn from_json<S>(text: &str, config: &PayoffConfig, store: &S) -> Result<Self, PayoffError>
    where
        S: FixingStore + ?Sized,
    {
        let schema = PayoffSchema::from_json(text)?;
        Self::from_schema(&schema, config, store)
    }

    /// Builds a payoff from an already-parsed JSON value.
    pub fn from_value<S>(value: &Value, config: &PayoffConfig, store: &S) -> Result<Self, PayoffError>
    where
        S: FixingStore + ?Sized,
    {
        let schema = PayoffSchema::from_value(value)?;
        Self::from_schema(&schema, config, store)
    }

    /// Builds a payoff from a schema, selecting the family by `type`.
    ///
    /// The tag is matched case-insensitively.
    pub fn from_schema<S>(
        schema: &PayoffSchema,
        config: &PayoffConfig,
        store: &S,
    ) -> Result<Self, PayoffError>
    where
        S: FixingStore + ?Sized,
    {
        let tag = schema.payoff_type.to_ascii_lowercase();
        if tag == PutDiAmerican::PAYOFF_TYPE {
            PutDiAmerican::from_schema(schema, config, store).map(Payoff::PutDiAmerican)
        } else {
            Err(SchemaError::UnknownType(schema.payoff_type.clone()).into())
        }
    }

    /// Schema `type` tag of the payoff family.
    pub fn payoff_type(&self) -> &'static str {
        match self {
            Payoff::PutDiAmerican(_) => PutDiAmerican::PAYOFF_TYPE,
        }
    }

    /// Returns the underlying identifiers.
    pub fn variables(&self) -> &[String] {
        match self {
            Payoff::PutDiAmerican(p) => p.variables(),
        }
    }

    /// Returns the notional.
    pub fn notional(&self) -> f64 {
        match self {
            Payoff::PutDiAmerican(p) => p.notional(),
        }
    }

    /// Returns why the payoff cannot be priced, if it cannot.
    pub fn unpriceable_reason(&self) -> Option<Unpriceable> {
        match self {
            Payoff::PutDiAmerican(p) => p.unpriceable_reason(),
        }
    }

    /// Returns `true` if the payoff can be priced.
    pub fn is_priceable(&self) -> bool {
        self.unpriceable_reason().is_none()
    }

    /// Returns the barrier observation dates for a calculation period.
    pub fn event_dates<P: CalculationPeriod + ?Sized>(&self, period: &P) -> Vec<Date> {
        match self {
            Payoff::PutDiAmerican(p) => p.event_dates(period),
        }
    }

    /// Renders the payoff back to its schema.
    pub fn to_schema(&self) -> PayoffSchema {
        match self {
            Payoff::PutDiAmerican(p) => p.to_schema(),
        }
    }

    /// Renders the payoff as compact JSON.
    pub fn to_json(&self) -> String {
        self.to_schema().to_string()
    }

    /// Human-readable summary.
    pub fn describe(&self) -> String {
        match self {
            Payoff::PutDiAmerican(p) => p.describe(),
        }
    }
}

impl From<PutDiAmerican> for Payoff {
    fn from(payoff: PutDiAmerican) -> Self {
        Payoff::PutDiAmerican(payoff)
    }
}

impl fmt::Display for Payoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl PayoffEvaluator for Payoff {
    fn price_scalar(&self, fixing: f64) -> f64 {
        match self {
            Payoff::PutDiAmerican(p) => p.price_scalar(fixing),
        }
    }

    fn price_map(&self, fixing: &FixingMap) -> f64 {
        match self {
            Payoff::PutDiAmerican(p) => p.price_map(fixing),
        }
    }

    fn price_scalar_path(&self, path: &[f64]) -> f64 {
        match self {
            Payoff::PutDiAmerican(p) => p.price_scalar_path(path),
        }
    }

    fn price_map_path(&self, path: &[FixingMap]) -> f64 {
        match self {
            Payoff::PutDiAmerican(p) => p.price_map_path(path),
        }
    }
}
