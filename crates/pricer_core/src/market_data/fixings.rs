//! Historical fixing lookups.
//!
//! [`FixingStore`] is the narrow contract the payoff factory uses to
//! resolve knock-in events that already happened inside a reference
//! window. [`InMemoryFixingStore`] is a map-backed implementation used
//! for tests and for files loaded up front.

use std::collections::{BTreeMap, HashMap};

use super::error::FixingStoreError;
use crate::types::Date;

/// An observed `(date, value)` pair.
pub type HistoricalFixing = (Date, f64);

/// Source of historical fixings.
///
/// Implementations must return an empty series (not an error) when a
/// variable has no data, and reserve `Err` for genuine retrieval failures.
/// Lookups are inclusive at both ends and ordered by date.
///
/// # Examples
///
/// ```
/// use pricer_core::market_data::{FixingStore, InMemoryFixingStore};
/// use pricer_core::types::Date;
///
/// let mut store = InMemoryFixingStore::new();
/// store.insert("SPX", Date::from_ymd(2020, 3, 1).unwrap(), 2954.22);
///
/// let from = Date::from_ymd(2020, 1, 1).unwrap();
/// let to = Date::from_ymd(2020, 6, 1).unwrap();
/// assert_eq!(store.lookup("SPX", from, to).unwrap().len(), 1);
/// assert!(store.lookup("NKY", from, to).unwrap().is_empty());
/// ```
pub trait FixingStore: Send + Sync {
    /// Returns the observations of `variable` within `[from, to]`.
    fn lookup(&self, variable: &str, from: Date, to: Date)
        -> Result<Vec<HistoricalFixing>, FixingStoreError>;
}

impl<S: FixingStore + ?Sized> FixingStore for &S {
    fn lookup(
        &self,
        variable: &str,
        from: Date,
        to: Date,
    ) -> Result<Vec<HistoricalFixing>, FixingStoreError> {
        (**self).lookup(variable, from, to)
    }
}

/// Map-backed fixing store.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFixingStore {
    series: HashMap<String, BTreeMap<Date, f64>>,
}

impl InMemoryFixingStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Records one observation, replacing any previous value for that date.
    pub fn insert(&mut self, variable: impl Into<String>, date: Date, value: f64) {
        self.series
            .entry(variable.into())
            .or_default()
            .insert(date, value);
    }

    /// Records a batch of observations for one variable.
    pub fn extend<I>(&mut self, variable: impl Into<String>, fixings: I)
    where
        I: IntoIterator<Item = HistoricalFixing>,
    {
        self.series.entry(variable.into()).or_default().extend(fixings);
    }

    /// Total number of stored observations.
    pub fn len(&self) -> usize {
        self.series.values().map(BTreeMap::len).sum()
    }

    /// Returns whether the store holds no observations.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl FixingStore for InMemoryFixingStore {
    fn lookup(
        &self,
        variable: &str,
        from: Date,
        to: Date,
    ) -> Result<Vec<HistoricalFixing>, FixingStoreError> {
        if from > to {
            return Ok(Vec::new());
        }
        Ok(self
            .series
            .get(variable)
            .map(|s| s.range(from..=to).map(|(d, v)| (*d, *v)).collect())
            .unwrap_or_default())
    }
}
