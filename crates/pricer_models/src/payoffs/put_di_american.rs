//! Down-and-in put with continuous (American-style) barrier monitoring.
//!
//! The payoff redeems full notional unless some underlying has fixed at
//! or below its trigger, in which case it pays
//! `notional × min(1, worst_i(x_i / strike_i))`.

use super::config::PayoffConfig;
use super::error::{PayoffError, Unpriceable};
use super::evaluator::PayoffEvaluator;
use super::interpreter::{FixingInterpreter, FixingMap, MultiAssetInterpreter, ScalarInterpreter};
use super::schema::PayoffSchema;
use crate::schedules::{CalculationPeriod, ObservationSchedule, SamplingConfig};
use pricer_core::market_data::{FixingStore, FixingStoreError};
use pricer_core::types::Date;
use std::collections::HashSet;
use std::fmt;
use tracing::{debug, warn};

/// Knock-in put specification.
///
/// Immutable once built. Trigger and strike levels are matched to
/// variables by position. Malformed fields are kept as given so the
/// specification can still be displayed and serialised; such a
/// specification reports itself through [`PutDiAmerican::unpriceable_reason`]
/// and evaluates to the undefined price.
///
/// # Examples
///
/// ```
/// use pricer_models::payoffs::{FixingInterpreter, PutDiAmerican};
/// use pricer_core::types::Date;
///
/// let payoff = PutDiAmerican::new(
///     vec!["A".to_string()],
///     vec![80.0],
///     vec![100.0],
///     Some(Date::from_ymd(2020, 1, 1).unwrap()),
///     Some(Date::from_ymd(2020, 6, 1).unwrap()),
///     true,
///     1.0,
/// );
///
/// assert!(payoff.is_priceable());
/// assert!((payoff.scalar().price(&90.0) - 0.9).abs() < 1e-12);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct PutDiAmerican {
    variables: Vec<String>,
    triggers: Vec<f64>,
    strikes: Vec<f64>,
    ref_start: Option<Date>,
    ref_end: Option<Date>,
    knocked_in: bool,
    notional: f64,
    description: Option<String>,
    sampling: SamplingConfig,
}

impl PutDiAmerican {
    /// Schema `type` tag of this payoff family.
    pub const PAYOFF_TYPE: &'static str = "putdiamerican";

    /// Creates a specification from typed fields.
    ///
    /// `knocked_in` is taken as already resolved; use
    /// [`PutDiAmerican::from_schema`] to resolve it from history.
    pub fn new(
        variables: Vec<String>,
        triggers: Vec<f64>,
        strikes: Vec<f64>,
        ref_start: Option<Date>,
        ref_end: Option<Date>,
        knocked_in: bool,
        notional: f64,
    ) -> Self {
        Self {
            variables,
            triggers,
            strikes,
            ref_start,
            ref_end,
            knocked_in,
            notional,
            description: None,
            sampling: SamplingConfig::default(),
        }
    }

    /// Attaches a free-text description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the observation sampling densities.
    pub fn with_sampling(mut self, sampling: SamplingConfig) -> Self {
        self.sampling = sampling;
        self
    }

    /// Builds a specification from a parsed schema.
    ///
    /// When both reference dates are present the historical knock-in
    /// state is resolved through `store`; otherwise it starts as `false`
    /// and is left to live fixings. A missing `amount` falls back to the
    /// configured default notional.
    ///
    /// # Errors
    ///
    /// Returns `PayoffError::Config` for an invalid configuration and
    /// `PayoffError::FixingStore` when a historical lookup fails. A
    /// malformed schema is not an error.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::payoffs::{PayoffConfig, PayoffSchema, PutDiAmerican};
    /// use pricer_core::market_data::InMemoryFixingStore;
    /// use pricer_core::types::Date;
    ///
    /// let schema = PayoffSchema::from_json(r#"{
    ///     "type": "putdiamerican",
    ///     "variable": ["A"],
    ///     "trigger": [80],
    ///     "strike": [100],
    ///     "refstart": "2020-01-01",
    ///     "refend": "2020-06-01"
    /// }"#).unwrap();
    ///
    /// let mut store = InMemoryFixingStore::new();
    /// store.insert("A", Date::from_ymd(2020, 3, 1).unwrap(), 75.0);
    ///
    /// let payoff = PutDiAmerican::from_schema(&schema, &PayoffConfig::default(), &store).unwrap();
    /// assert!(payoff.is_knocked_in());
    /// ```
    pub fn from_schema<S>(
        schema: &PayoffSchema,
        config: &PayoffConfig,
        store: &S,
    ) -> Result<Self, PayoffError>
    where
        S: FixingStore + ?Sized,
    {
        config.validate()?;

        let knocked_in = match (schema.refstart, schema.refend) {
            (Some(start), Some(end)) => {
                resolve_knock_in(&schema.variables, &schema.triggers, start, end, store)?
            }
            _ => false,
        };

        let mut payoff = Self::new(
            schema.variables.clone(),
            schema.triggers.clone(),
            schema.strikes.clone(),
            schema.refstart,
            schema.refend,
            knocked_in,
            schema.amount.unwrap_or(config.default_notional),
        )
        .with_sampling(config.sampling);
        payoff.description = schema.description.clone();

        if let Some(reason) = payoff.unpriceable_reason() {
            warn!(payoff = %payoff.to_schema(), %reason, "Payoff cannot be priced");
        }
        Ok(payoff)
    }

    /// Returns the underlying identifiers.
    #[inline]
    pub fn variables(&self) -> &[String] {
        &self.variables
    }

    /// Returns the trigger levels in variable order.
    #[inline]
    pub fn triggers(&self) -> &[f64] {
        &self.triggers
    }

    /// Returns the strike levels in variable order.
    #[inline]
    pub fn strikes(&self) -> &[f64] {
        &self.strikes
    }

    /// Returns the trigger level of `variable`.
    pub fn trigger(&self, variable: &str) -> Option<f64> {
        self.position(variable)
            .and_then(|i| self.triggers.get(i).copied())
    }

    /// Returns the strike level of `variable`.
    pub fn strike(&self, variable: &str) -> Option<f64> {
        self.position(variable).and_then(|i| self.strikes.get(i).copied())
    }

    fn position(&self, variable: &str) -> Option<usize> {
        self.variables.iter().position(|v| v == variable)
    }

    /// Returns the reference window start.
    #[inline]
    pub fn ref_start(&self) -> Option<Date> {
        self.ref_start
    }

    /// Returns the reference window end.
    #[inline]
    pub fn ref_end(&self) -> Option<Date> {
        self.ref_end
    }

    /// Returns the knock-in state resolved from history.
    #[inline]
    pub fn is_knocked_in(&self) -> bool {
        self.knocked_in
    }

    /// Returns the notional.
    #[inline]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns the description, if any.
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    /// Returns the observation sampling densities.
    #[inline]
    pub fn sampling(&self) -> &SamplingConfig {
        &self.sampling
    }

    /// Returns the first reason this specification cannot be priced.
    pub fn unpriceable_reason(&self) -> Option<Unpriceable> {
        if self.variables.is_empty() {
            return Some(Unpriceable::NoVariables);
        }
        if self.triggers.len() != self.variables.len() || self.strikes.len() != self.variables.len()
        {
            return Some(Unpriceable::LengthMismatch {
                variables: self.variables.len(),
                triggers: self.triggers.len(),
                strikes: self.strikes.len(),
            });
        }

        let mut seen = HashSet::new();
        for variable in &self.variables {
            if !seen.insert(variable.as_str()) {
                return Some(Unpriceable::DuplicateVariable(variable.clone()));
            }
        }

        let levels = self.variables.iter().zip(self.triggers.iter().zip(&self.strikes));
        for (variable, (trigger, strike)) in levels {
            if !trigger.is_finite() {
                return Some(Unpriceable::NonFiniteTrigger(variable.clone()));
            }
            if !strike.is_finite() {
                return Some(Unpriceable::NonFiniteStrike(variable.clone()));
            }
        }

        if !self.notional.is_finite() {
            return Some(Unpriceable::NonFiniteNotional);
        }

        match (self.ref_start, self.ref_end) {
            (Some(start), Some(end)) if start > end => {
                Some(Unpriceable::InvertedReferenceWindow { start, end })
            }
            (Some(_), Some(_)) => None,
            _ => Some(Unpriceable::MissingReferenceWindow),
        }
    }

    /// Returns `true` if the specification can be priced.
    #[inline]
    pub fn is_priceable(&self) -> bool {
        self.unpriceable_reason().is_none()
    }

    /// Returns the barrier observation dates for a calculation period.
    ///
    /// An unpriceable specification is observed only on the period end.
    pub fn event_dates<P: CalculationPeriod + ?Sized>(&self, period: &P) -> Vec<Date> {
        if !self.is_priceable() {
            return vec![period.end_date()];
        }
        ObservationSchedule::new(self.ref_start, self.ref_end, self.sampling).event_dates(period)
    }

    /// Interpreter for bare-number fixings.
    pub fn scalar(&self) -> ScalarInterpreter<'_> {
        ScalarInterpreter::new(self)
    }

    /// Interpreter for variable-to-value fixings.
    pub fn multi_asset(&self) -> MultiAssetInterpreter<'_> {
        MultiAssetInterpreter::new(self)
    }

    /// Renders the specification back to its schema.
    pub fn to_schema(&self) -> PayoffSchema {
        PayoffSchema {
            payoff_type: Self::PAYOFF_TYPE.to_string(),
            variables: self.variables.clone(),
            triggers: self.triggers.clone(),
            strikes: self.strikes.clone(),
            refstart: self.ref_start,
            refend: self.ref_end,
            amount: Some(self.notional),
            description: self.description.clone(),
        }
    }

    /// Human-readable summary of triggers, variables and strikes.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::payoffs::PutDiAmerican;
    ///
    /// let payoff = PutDiAmerican::new(
    ///     vec!["A".to_string(), "B".to_string()],
    ///     vec![80.0, 40.0],
    ///     vec![100.0, 50.0],
    ///     None,
    ///     None,
    ///     false,
    ///     1.0,
    /// );
    /// let text = payoff.describe();
    /// assert!(text.contains("A <= 80"));
    /// assert!(text.contains("B / 50"));
    /// ```
    pub fn describe(&self) -> String {
        let triggers = join_levels(&self.variables, &self.triggers, "<=");
        let strikes = join_levels(&self.variables, &self.strikes, "/");
        let window = match (self.ref_start, self.ref_end) {
            (Some(start), Some(end)) => format!("{} to {}", start, end),
            (Some(start), None) => format!("from {}", start),
            (None, Some(end)) => format!("until {}", end),
            (None, None) => "not set".to_string(),
        };

        let mut text = format!(
            "Down-and-in put on {}\n  knock-in if any of: {}\n  knocked-in payout: {} x min(1, worst of {})\n  otherwise: {}\n  reference window: {}",
            self.variables.join(", "),
            triggers,
            self.notional,
            strikes,
            self.notional,
            window,
        );
        if self.knocked_in {
            text.push_str("\n  knocked in during reference window");
        }
        if let Some(reason) = self.unpriceable_reason() {
            text.push_str(&format!("\n  unpriceable: {}", reason));
        }
        text
    }
}

fn join_levels(variables: &[String], levels: &[f64], op: &str) -> String {
    variables
        .iter()
        .zip(levels)
        .map(|(variable, level)| format!("{} {} {}", variable, op, level))
        .collect::<Vec<_>>()
        .join(", ")
}

/// Queries history for every `(variable, trigger)` pair over `[start, end]`.
///
/// Every pair is looked up so that a failing store surfaces regardless of
/// what earlier series contained.
fn resolve_knock_in<S>(
    variables: &[String],
    triggers: &[f64],
    start: Date,
    end: Date,
    store: &S,
) -> Result<bool, FixingStoreError>
where
    S: FixingStore + ?Sized,
{
    let mut knocked_in = false;
    for (variable, trigger) in variables.iter().zip(triggers) {
        let series = store.lookup(variable, start, end)?;
        let breached = series.iter().any(|(_, value)| value <= trigger);
        debug!(
            variable = %variable,
            %start,
            %end,
            fixings = series.len(),
            trigger = *trigger,
            breached,
            "Resolved historical knock-in"
        );
        knocked_in |= breached;
    }
    Ok(knocked_in)
}

impl fmt::Display for PutDiAmerican {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.describe())
    }
}

impl PayoffEvaluator for PutDiAmerican {
    fn price_scalar(&self, fixing: f64) -> f64 {
        self.scalar().price(&fixing)
    }

    fn price_map(&self, fixing: &FixingMap) -> f64 {
        self.multi_asset().price(fixing)
    }

    fn price_scalar_path(&self, path: &[f64]) -> f64 {
        self.scalar().price_path(path)
    }

    fn price_map_path(&self, path: &[FixingMap]) -> f64 {
        self.multi_asset().price_path(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schedules::Period;
    use pricer_core::market_data::{HistoricalFixing, InMemoryFixingStore};
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn schema(json: &str) -> PayoffSchema {
        PayoffSchema::from_json(json).unwrap()
    }

    const SINGLE: &str = r#"{
        "type": "putdiamerican",
        "variable": ["A"],
        "trigger": [80],
        "strike": [100],
        "refstart": "2020-01-01",
        "refend": "2020-06-01"
    }"#;

    fn priceable() -> PutDiAmerican {
        PutDiAmerican::new(
            vec!["A".to_string(), "B".to_string()],
            vec![80.0, 40.0],
            vec![100.0, 50.0],
            Some(d(2020, 1, 1)),
            Some(d(2020, 6, 1)),
            false,
            1.0,
        )
    }

    struct CountingStore {
        calls: AtomicUsize,
    }

    impl FixingStore for CountingStore {
        fn lookup(
            &self,
            _variable: &str,
            _from: Date,
            _to: Date,
        ) -> Result<Vec<HistoricalFixing>, FixingStoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![(d(2020, 2, 1), 1.0)])
        }
    }

    struct FailingStore;

    impl FixingStore for FailingStore {
        fn lookup(
            &self,
            _variable: &str,
            _from: Date,
            _to: Date,
        ) -> Result<Vec<HistoricalFixing>, FixingStoreError> {
            Err(FixingStoreError::Unavailable("connection refused".to_string()))
        }
    }

    #[test]
    fn test_historical_breach_knocks_in() {
        let mut store = InMemoryFixingStore::new();
        store.insert("A", d(2020, 2, 1), 95.0);
        store.insert("A", d(2020, 3, 1), 75.0);
        let payoff =
            PutDiAmerican::from_schema(&schema(SINGLE), &PayoffConfig::default(), &store).unwrap();
        assert!(payoff.is_knocked_in());
    }

    #[test]
    fn test_breach_outside_window_is_ignored() {
        let mut store = InMemoryFixingStore::new();
        store.insert("A", d(2019, 12, 31), 10.0);
        store.insert("A", d(2020, 6, 2), 10.0);
        store.insert("A", d(2020, 6, 1), 80.5);
        let payoff =
            PutDiAmerican::from_schema(&schema(SINGLE), &PayoffConfig::default(), &store).unwrap();
        assert!(!payoff.is_knocked_in());
    }

    #[test]
    fn test_breach_on_trigger_is_inclusive() {
        let mut store = InMemoryFixingStore::new();
        store.insert("A", d(2020, 6, 1), 80.0);
        let payoff =
            PutDiAmerican::from_schema(&schema(SINGLE), &PayoffConfig::default(), &store).unwrap();
        assert!(payoff.is_knocked_in());
    }

    #[test]
    fn test_no_window_skips_history() {
        let store = CountingStore {
            calls: AtomicUsize::new(0),
        };
        let payoff = PutDiAmerican::from_schema(
            &schema(r#"{"type": "putdiamerican", "variable": ["A"], "trigger": [80], "strike": [100], "refstart": "2020-01-01"}"#),
            &PayoffConfig::default(),
            &store,
        )
        .unwrap();
        assert!(!payoff.is_knocked_in());
        assert_eq!(store.calls.load(Ordering::SeqCst), 0);
        assert_eq!(
            payoff.unpriceable_reason(),
            Some(Unpriceable::MissingReferenceWindow)
        );
    }

    #[test]
    fn test_every_variable_is_queried() {
        let store = CountingStore {
            calls: AtomicUsize::new(0),
        };
        let payoff = PutDiAmerican::from_schema(
            &schema(r#"{"type": "putdiamerican", "variable": ["A", "B", "C"], "trigger": [80, 40, 10], "strike": [100, 50, 20], "refstart": "2020-01-01", "refend": "2020-06-01"}"#),
            &PayoffConfig::default(),
            &store,
        )
        .unwrap();
        assert!(payoff.is_knocked_in());
        assert_eq!(store.calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_store_failure_is_fatal() {
        let result = PutDiAmerican::from_schema(&schema(SINGLE), &PayoffConfig::default(), &FailingStore);
        assert!(matches!(result, Err(PayoffError::FixingStore(_))));
    }

    #[test]
    fn test_invalid_config_is_rejected() {
        let config = PayoffConfig {
            default_notional: f64::NAN,
            ..Default::default()
        };
        let result =
            PutDiAmerican::from_schema(&schema(SINGLE), &config, &InMemoryFixingStore::new());
        assert!(matches!(result, Err(PayoffError::Config(_))));
    }

    #[test]
    fn test_default_notional_applies_only_without_amount() {
        let config = PayoffConfig {
            default_notional: 0.25,
            ..Default::default()
        };
        let store = InMemoryFixingStore::new();
        let implicit = PutDiAmerican::from_schema(&schema(SINGLE), &config, &store).unwrap();
        assert_eq!(implicit.notional(), 0.25);

        let explicit = PutDiAmerican::from_schema(
            &schema(r#"{"type": "putdiamerican", "variable": ["A"], "trigger": [80], "strike": [100], "refstart": "2020-01-01", "refend": "2020-06-01", "amount": 2.0}"#),
            &config,
            &store,
        )
        .unwrap();
        assert_eq!(explicit.notional(), 2.0);
    }

    #[test]
    fn test_level_lookup_by_variable() {
        let payoff = priceable();
        assert_eq!(payoff.trigger("B"), Some(40.0));
        assert_eq!(payoff.strike("A"), Some(100.0));
        assert_eq!(payoff.trigger("Z"), None);
    }

    #[test]
    fn test_unpriceable_reasons() {
        let base = priceable();

        let mut p = base.clone();
        p.variables.clear();
        assert_eq!(p.unpriceable_reason(), Some(Unpriceable::NoVariables));

        let mut p = base.clone();
        p.triggers.push(10.0);
        assert!(matches!(
            p.unpriceable_reason(),
            Some(Unpriceable::LengthMismatch { triggers: 3, .. })
        ));

        let mut p = base.clone();
        p.variables[1] = "A".to_string();
        assert_eq!(
            p.unpriceable_reason(),
            Some(Unpriceable::DuplicateVariable("A".to_string()))
        );

        let mut p = base.clone();
        p.triggers[1] = f64::NAN;
        assert_eq!(
            p.unpriceable_reason(),
            Some(Unpriceable::NonFiniteTrigger("B".to_string()))
        );

        let mut p = base.clone();
        p.strikes[0] = f64::INFINITY;
        assert_eq!(
            p.unpriceable_reason(),
            Some(Unpriceable::NonFiniteStrike("A".to_string()))
        );

        let mut p = base.clone();
        p.notional = f64::NAN;
        assert_eq!(p.unpriceable_reason(), Some(Unpriceable::NonFiniteNotional));

        let mut p = base.clone();
        p.ref_end = None;
        assert_eq!(
            p.unpriceable_reason(),
            Some(Unpriceable::MissingReferenceWindow)
        );

        let mut p = base;
        p.ref_start = Some(d(2020, 7, 1));
        assert_eq!(
            p.unpriceable_reason(),
            Some(Unpriceable::InvertedReferenceWindow {
                start: d(2020, 7, 1),
                end: d(2020, 6, 1),
            })
        );
    }

    #[test]
    fn test_event_dates() {
        let period = Period::with_payment_on_end(d(2020, 1, 1), d(2020, 6, 30));
        let payoff = priceable();
        let dates = payoff.event_dates(&period);
        assert_eq!(dates.first(), Some(&d(2020, 1, 1)));
        assert_eq!(dates.last(), Some(&d(2020, 6, 1)));

        let mut broken = payoff;
        broken.strikes[0] = f64::NAN;
        assert_eq!(broken.event_dates(&period), vec![d(2020, 6, 30)]);
    }

    #[test]
    fn test_to_schema_round_trip() {
        let payoff = priceable().with_description("basket note");
        let reparsed = PutDiAmerican::from_schema(
            &payoff.to_schema(),
            &PayoffConfig::default(),
            &InMemoryFixingStore::new(),
        )
        .unwrap();
        assert_eq!(reparsed, payoff);
    }

    #[test]
    fn test_describe_flags_unpriceable() {
        let mut payoff = priceable();
        payoff.triggers.pop();
        let text = payoff.describe();
        assert!(text.contains("unpriceable"));
        assert!(text.contains("reference window: 2020-01-01 to 2020-06-01"));
    }

    #[test]
    fn test_evaluator_dispatch() {
        let payoff = priceable();
        let fixing: FixingMap = [("A".to_string(), 70.0), ("B".to_string(), 45.0)]
            .into_iter()
            .collect();
        assert!((payoff.price_map(&fixing) - 0.7).abs() < 1e-12);
        assert!(payoff.price_scalar(70.0).is_nan());
    }
}
