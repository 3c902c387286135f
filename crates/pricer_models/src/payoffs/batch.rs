//! Batch evaluation.
//!
//! Items are priced independently: an undefined price on one item is
//! logged and reported in place, never propagated to the others.

use super::evaluator::{Fixing, PayoffEvaluator};
use super::interpreter::is_undefined;
use tracing::warn;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Prices every `(payoff, fixing)` pair.
///
/// Results are returned in input order. With the `parallel` feature the
/// items are spread over the rayon thread pool.
///
/// # Examples
///
/// ```
/// use pricer_models::payoffs::{evaluate_batch, is_undefined, Fixing, PutDiAmerican};
/// use pricer_core::types::Date;
///
/// let payoff = PutDiAmerican::new(
///     vec!["A".to_string()],
///     vec![80.0],
///     vec![100.0],
///     Some(Date::from_ymd(2020, 1, 1).unwrap()),
///     Some(Date::from_ymd(2020, 6, 1).unwrap()),
///     false,
///     1.0,
/// );
///
/// let prices = evaluate_batch(&[
///     (&payoff, Some(Fixing::Scalar(50.0))),
///     (&payoff, None),
/// ]);
/// assert_eq!(prices[0], 0.5);
/// assert!(is_undefined(prices[1]));
/// ```
#[cfg(feature = "parallel")]
pub fn evaluate_batch<E>(items: &[(E, Option<Fixing>)]) -> Vec<f64>
where
    E: PayoffEvaluator + Sync,
{
    items
        .par_iter()
        .enumerate()
        .map(|(index, (payoff, fixing))| evaluate_item(index, payoff, fixing.as_ref()))
        .collect()
}

/// Prices every `(payoff, fixing)` pair sequentially.
#[cfg(not(feature = "parallel"))]
pub fn evaluate_batch<E>(items: &[(E, Option<Fixing>)]) -> Vec<f64>
where
    E: PayoffEvaluator,
{
    items
        .iter()
        .enumerate()
        .map(|(index, (payoff, fixing))| evaluate_item(index, payoff, fixing.as_ref()))
        .collect()
}

fn evaluate_item<E: PayoffEvaluator>(index: usize, payoff: &E, fixing: Option<&Fixing>) -> f64 {
    let price = payoff.evaluate(fixing);
    if is_undefined(price) {
        warn!(
            index,
            shape = fixing.map_or("none", Fixing::shape),
            "Batch item priced to undefined"
        );
    }
    price
}

/// Counts of defined and undefined results in a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BatchSummary {
    /// Items with a defined price.
    pub priced: usize,
    /// Items that priced to undefined.
    pub undefined: usize,
    /// Sum of the defined prices.
    pub total: f64,
}

impl BatchSummary {
    /// Summarises a slice of prices.
    pub fn from_prices(prices: &[f64]) -> Self {
        prices.iter().fold(Self::default(), |mut summary, &price| {
            if is_undefined(price) {
                summary.undefined += 1;
            } else {
                summary.priced += 1;
                summary.total += price;
            }
            summary
        })
    }

    /// Number of items summarised.
    pub fn len(&self) -> usize {
        self.priced + self.undefined
    }

    /// Returns `true` if no items were summarised.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
