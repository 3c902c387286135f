//! Fixing interpretation.
//!
//! One payoff algorithm, two fixing shapes. A [`FixingInterpreter`] knows
//! how to detect a knock-in on a single observation and how to price one
//! given a knock-in state; path evaluation is derived from those two
//! operations:
//!
//! - a path knocks in if any observation does
//! - a path prices against its last observation
//!
//! Evaluation never fails. Anything that cannot be priced returns
//! [`UNDEFINED_PRICE`], a quiet NaN that propagates through arithmetic.

use super::put_di_american::PutDiAmerican;
use std::collections::HashMap;

/// Sentinel returned for anything that cannot be priced.
///
/// Never zero: an unpriced instrument must not be counted as worthless.
pub const UNDEFINED_PRICE: f64 = f64::NAN;

/// Returns `true` if `price` is the undefined sentinel.
///
/// # Examples
///
/// ```
/// use pricer_models::payoffs::{is_undefined, UNDEFINED_PRICE};
///
/// assert!(is_undefined(UNDEFINED_PRICE));
/// assert!(is_undefined(UNDEFINED_PRICE * 100.0));
/// assert!(!is_undefined(0.0));
/// ```
#[inline]
pub fn is_undefined(price: f64) -> bool {
    price.is_nan()
}

/// Cross-sectional fixing: variable identifier to observed value.
pub type FixingMap = HashMap<String, f64>;

/// Evaluation strategy for one fixing shape.
pub trait FixingInterpreter {
    /// Shape of a single observation.
    type Fixing;

    /// Returns `true` if the observation breaches a trigger.
    fn is_knock_in(&self, fixing: &Self::Fixing) -> bool;

    /// Prices an observation under the given knock-in state.
    fn price_with(&self, fixing: &Self::Fixing, knocked_in: bool) -> f64;

    /// Knock-in state resolved from history at construction.
    fn historical_knock_in(&self) -> bool;

    /// Returns `true` if any observation on the path breaches a trigger.
    fn is_knock_in_path(&self, path: &[Self::Fixing]) -> bool {
        path.iter().any(|fixing| self.is_knock_in(fixing))
    }

    /// Prices a single observation.
    ///
    /// Knock-in is taken as already resolved from history or detected on
    /// the observation itself.
    fn price(&self, fixing: &Self::Fixing) -> f64 {
        let knocked_in = self.historical_knock_in() || self.is_knock_in(fixing);
        self.price_with(fixing, knocked_in)
    }

    /// Prices a path against its last observation.
    ///
    /// An empty path has nothing to price and returns [`UNDEFINED_PRICE`].
    fn price_path(&self, path: &[Self::Fixing]) -> f64 {
        match path.last() {
            Some(last) => {
                let knocked_in = self.historical_knock_in() || self.is_knock_in_path(path);
                self.price_with(last, knocked_in)
            }
            None => UNDEFINED_PRICE,
        }
    }
}

/// Interpreter for single-underlying payoffs fixed with a bare number.
#[derive(Debug, Clone, Copy)]
pub struct ScalarInterpreter<'a> {
    payoff: &'a PutDiAmerican,
}

impl<'a> ScalarInterpreter<'a> {
    /// Binds the interpreter to a payoff.
    pub fn new(payoff: &'a PutDiAmerican) -> Self {
        Self { payoff }
    }
}

impl FixingInterpreter for ScalarInterpreter<'_> {
    type Fixing = f64;

    fn is_knock_in(&self, fixing: &f64) -> bool {
        self.payoff
            .triggers()
            .first()
            .is_some_and(|trigger| *fixing <= *trigger)
    }

    fn price_with(&self, fixing: &f64, knocked_in: bool) -> f64 {
        let x = *fixing;
        if !x.is_finite() || self.payoff.variables().len() != 1 || !self.payoff.is_priceable() {
            return UNDEFINED_PRICE;
        }
        if !knocked_in {
            return self.payoff.notional();
        }

        let ratio = x / self.payoff.strikes()[0];
        if ratio.is_nan() {
            return UNDEFINED_PRICE;
        }
        self.payoff.notional() * ratio.min(1.0)
    }

    fn historical_knock_in(&self) -> bool {
        self.payoff.is_knocked_in()
    }
}

/// Interpreter for worst-of payoffs fixed with a variable-to-value map.
#[derive(Debug, Clone, Copy)]
pub struct MultiAssetInterpreter<'a> {
    payoff: &'a PutDiAmerican,
}

impl<'a> MultiAssetInterpreter<'a> {
    /// Binds the interpreter to a payoff.
    pub fn new(payoff: &'a PutDiAmerican) -> Self {
        Self { payoff }
    }
}

impl FixingInterpreter for MultiAssetInterpreter<'_> {
    type Fixing = FixingMap;

    /// Variables missing from the map never trigger.
    fn is_knock_in(&self, fixing: &FixingMap) -> bool {
        self.payoff
            .variables()
            .iter()
            .zip(self.payoff.triggers())
            .any(|(variable, trigger)| fixing.get(variable).is_some_and(|x| *x <= *trigger))
    }

    fn price_with(&self, fixing: &FixingMap, knocked_in: bool) -> f64 {
        if !self.payoff.is_priceable() {
            return UNDEFINED_PRICE;
        }

        let mut worst = f64::INFINITY;
        for (variable, strike) in self.payoff.variables().iter().zip(self.payoff.strikes()) {
            let x = match fixing.get(variable) {
                Some(x) if x.is_finite() => *x,
                _ => return UNDEFINED_PRICE,
            };
            let ratio = x / strike;
            // f64::min would silently drop a NaN ratio
            if ratio.is_nan() {
                return UNDEFINED_PRICE;
            }
            worst = worst.min(ratio);
        }

        if knocked_in {
            self.payoff.notional() * worst.min(1.0)
        } else {
            self.payoff.notional()
        }
    }

    fn historical_knock_in(&self) -> bool {
        self.payoff.is_knocked_in()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use pricer_core::types::Date;

    fn window() -> (Option<Date>, Option<Date>) {
        (
            Some(Date::from_ymd(2020, 1, 1).unwrap()),
            Some(Date::from_ymd(2020, 6, 1).unwrap()),
        )
    }

    fn single(knocked_in: bool) -> PutDiAmerican {
        let (start, end) = window();
        PutDiAmerican::new(
            vec!["A".to_string()],
            vec![80.0],
            vec![100.0],
            start,
            end,
            knocked_in,
            1.0,
        )
    }

    fn basket(knocked_in: bool) -> PutDiAmerican {
        let (start, end) = window();
        PutDiAmerican::new(
            vec!["A".to_string(), "B".to_string()],
            vec![80.0, 40.0],
            vec![100.0, 50.0],
            start,
            end,
            knocked_in,
            1.0,
        )
    }

    fn map(pairs: &[(&str, f64)]) -> FixingMap {
        pairs.iter().map(|(k, v)| (k.to_string(), *v)).collect()
    }

    #[test]
    fn test_scalar_knock_in_is_inclusive() {
        let payoff = single(false);
        let scalar = payoff.scalar();
        assert!(scalar.is_knock_in(&80.0));
        assert!(scalar.is_knock_in(&50.0));
        assert!(!scalar.is_knock_in(&80.01));
        assert!(!scalar.is_knock_in(&f64::NAN));
    }

    #[test]
    fn test_scalar_price_with() {
        let payoff = single(false);
        let scalar = payoff.scalar();
        assert_relative_eq!(scalar.price_with(&90.0, true), 0.9);
        assert_relative_eq!(scalar.price_with(&120.0, true), 1.0);
        assert_relative_eq!(scalar.price_with(&50.0, false), 1.0);
    }

    #[test]
    fn test_scalar_uses_historical_flag() {
        let payoff = single(true);
        assert_relative_eq!(payoff.scalar().price(&90.0), 0.9);
    }

    #[test]
    fn test_scalar_live_knock_in_overrides_stale_flag() {
        let payoff = single(false);
        assert_relative_eq!(payoff.scalar().price(&50.0), 0.5);
        assert_relative_eq!(payoff.scalar().price(&90.0), 1.0);
    }

    #[test]
    fn test_scalar_undefined_cases() {
        let payoff = single(true);
        let scalar = payoff.scalar();
        assert!(is_undefined(scalar.price(&f64::NAN)));
        assert!(is_undefined(scalar.price(&f64::NEG_INFINITY)));

        let two = basket(true);
        assert!(is_undefined(two.scalar().price(&90.0)));
        assert!(is_undefined(two.scalar().price_with(&90.0, false)));
    }

    #[test]
    fn test_scalar_path() {
        let payoff = single(false);
        let scalar = payoff.scalar();
        assert!(scalar.is_knock_in_path(&[100.0, 79.0, 95.0]));
        assert!(!scalar.is_knock_in_path(&[100.0, 95.0]));
        assert_relative_eq!(scalar.price_path(&[100.0, 79.0, 95.0]), 0.95);
        assert_relative_eq!(scalar.price_path(&[100.0, 95.0]), 1.0);
        assert!(is_undefined(scalar.price_path(&[])));
    }

    #[test]
    fn test_multi_asset_worst_of() {
        let payoff = basket(true);
        let price = payoff
            .multi_asset()
            .price(&map(&[("A", 120.0), ("B", 30.0)]));
        assert_relative_eq!(price, 0.6);
    }

    #[test]
    fn test_multi_asset_capped_at_notional() {
        let payoff = basket(true);
        let price = payoff
            .multi_asset()
            .price(&map(&[("A", 150.0), ("B", 60.0)]));
        assert_relative_eq!(price, 1.0);
    }

    #[test]
    fn test_multi_asset_knock_in_ignores_absent_variables() {
        let payoff = basket(false);
        let multi = payoff.multi_asset();
        assert!(!multi.is_knock_in(&map(&[("A", 90.0)])));
        assert!(multi.is_knock_in(&map(&[("B", 40.0)])));
        assert!(!multi.is_knock_in(&map(&[("C", 1.0)])));
        assert!(!multi.is_knock_in(&FixingMap::new()));
    }

    #[test]
    fn test_multi_asset_price_needs_every_variable() {
        let payoff = basket(true);
        let multi = payoff.multi_asset();
        assert!(is_undefined(multi.price(&map(&[("A", 90.0)]))));
        assert!(is_undefined(
            multi.price(&map(&[("A", 90.0), ("B", f64::NAN)]))
        ));

        // Extra variables are ignored
        let price = multi.price(&map(&[("A", 90.0), ("B", 50.0), ("C", 1.0)]));
        assert_relative_eq!(price, 0.9);
    }

    #[test]
    fn test_multi_asset_zero_over_zero_is_undefined() {
        let (start, end) = window();
        let payoff = PutDiAmerican::new(
            vec!["A".to_string()],
            vec![80.0],
            vec![0.0],
            start,
            end,
            true,
            1.0,
        );
        assert!(is_undefined(payoff.multi_asset().price(&map(&[("A", 0.0)]))));
    }

    #[test]
    fn test_multi_asset_path() {
        let payoff = basket(false);
        let multi = payoff.multi_asset();
        let path = vec![
            map(&[("A", 100.0), ("B", 50.0)]),
            map(&[("A", 70.0)]),
            map(&[("A", 95.0), ("B", 45.0)]),
        ];
        assert!(multi.is_knock_in_path(&path));
        assert_relative_eq!(multi.price_path(&path), 0.9);
    }

    #[test]
    fn test_unpriceable_is_always_undefined() {
        let (start, end) = window();
        let payoff = PutDiAmerican::new(
            vec!["A".to_string()],
            vec![80.0, 40.0],
            vec![100.0],
            start,
            end,
            true,
            1.0,
        );
        assert!(!payoff.is_priceable());
        assert!(is_undefined(payoff.scalar().price(&90.0)));
        assert!(is_undefined(payoff.scalar().price_with(&90.0, false)));
        assert!(is_undefined(payoff.multi_asset().price(&map(&[("A", 90.0)]))));
    }

    #[test]
    fn test_notional_scales_price() {
        let (start, end) = window();
        let payoff = PutDiAmerican::new(
            vec!["A".to_string()],
            vec![80.0],
            vec![100.0],
            start,
            end,
            true,
            0.5,
        );
        assert_relative_eq!(payoff.scalar().price(&90.0), 0.45);
        assert_relative_eq!(payoff.scalar().price(&110.0), 0.5);
    }

    mod property_tests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #![proptest_config(ProptestConfig::with_cases(200))]

            #[test]
            fn test_knocked_in_never_exceeds_full_notional(x in 0.0f64..500.0) {
                let payoff = single(false);
                let scalar = payoff.scalar();
                prop_assert!(scalar.price_with(&x, true) <= scalar.price_with(&x, false));
            }

            #[test]
            fn test_knocked_in_price_is_monotone(a in 0.0f64..500.0, b in 0.0f64..500.0) {
                let payoff = single(true);
                let scalar = payoff.scalar();
                let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
                prop_assert!(scalar.price(&lo) <= scalar.price(&hi));
            }

            #[test]
            fn test_worst_of_monotone_in_each_variable(
                a in 1.0f64..300.0,
                b in 1.0f64..150.0,
                bump in 0.0f64..50.0,
            ) {
                let payoff = basket(true);
                let multi = payoff.multi_asset();
                let base = multi.price(&map(&[("A", a), ("B", b)]));
                prop_assert!(base <= multi.price(&map(&[("A", a + bump), ("B", b)])));
                prop_assert!(base <= multi.price(&map(&[("A", a), ("B", b + bump)])));
            }

            #[test]
            fn test_multi_asset_knock_in_iff_some_present_breach(
                a in proptest::option::of(0.0f64..200.0),
                b in proptest::option::of(0.0f64..100.0),
            ) {
                let payoff = basket(false);
                let mut fixing = FixingMap::new();
                if let Some(a) = a { fixing.insert("A".to_string(), a); }
                if let Some(b) = b { fixing.insert("B".to_string(), b); }
                let expected = a.is_some_and(|x| x <= 80.0) || b.is_some_and(|x| x <= 40.0);
                prop_assert_eq!(payoff.multi_asset().is_knock_in(&fixing), expected);
            }
        }
    }
}
