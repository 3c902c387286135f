//! Evaluation entry point.
//!
//! [`PayoffEvaluator`] exposes one method per fixing shape and an
//! [`evaluate`](PayoffEvaluator::evaluate) that dispatches on a
//! runtime-shaped [`Fixing`].

use super::interpreter::{FixingMap, UNDEFINED_PRICE};
use serde::{Deserialize, Serialize};
use tracing::trace;

/// Fixing data of a shape known only at runtime.
///
/// Deserialises from JSON by shape: a number, an object of numbers, an
/// array of numbers, or an array of objects. An empty array reads as an
/// empty scalar path.
///
/// # Examples
///
/// ```
/// use pricer_models::payoffs::Fixing;
///
/// let fixing: Fixing = serde_json::from_str(r#"[{"A": 100}, {"A": 79}]"#).unwrap();
/// assert!(matches!(fixing, Fixing::MapPath(ref path) if path.len() == 2));
///
/// let fixing: Fixing = serde_json::from_str("90.5").unwrap();
/// assert_eq!(fixing, Fixing::Scalar(90.5));
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Fixing {
    /// Single observation of a single underlying.
    Scalar(f64),
    /// Single cross-sectional observation.
    Map(FixingMap),
    /// Time series of single-underlying observations.
    ScalarPath(Vec<f64>),
    /// Time series of cross-sectional observations.
    MapPath(Vec<FixingMap>),
}

impl Fixing {
    /// Short name of the fixing shape.
    pub fn shape(&self) -> &'static str {
        match self {
            Fixing::Scalar(_) => "scalar",
            Fixing::Map(_) => "map",
            Fixing::ScalarPath(_) => "scalar path",
            Fixing::MapPath(_) => "map path",
        }
    }
}

impl From<f64> for Fixing {
    fn from(value: f64) -> Self {
        Fixing::Scalar(value)
    }
}

impl From<FixingMap> for Fixing {
    fn from(value: FixingMap) -> Self {
        Fixing::Map(value)
    }
}

impl From<Vec<f64>> for Fixing {
    fn from(value: Vec<f64>) -> Self {
        Fixing::ScalarPath(value)
    }
}

impl From<Vec<FixingMap>> for Fixing {
    fn from(value: Vec<FixingMap>) -> Self {
        Fixing::MapPath(value)
    }
}

/// Prices a payoff against fixings of any shape.
///
/// Every method returns a price or [`UNDEFINED_PRICE`];
/// none of them fail.
pub trait PayoffEvaluator {
    /// Prices a single scalar observation.
    fn price_scalar(&self, fixing: f64) -> f64;

    /// Prices a single cross-sectional observation.
    fn price_map(&self, fixing: &FixingMap) -> f64;

    /// Prices a path of scalar observations.
    fn price_scalar_path(&self, path: &[f64]) -> f64;

    /// Prices a path of cross-sectional observations.
    fn price_map_path(&self, path: &[FixingMap]) -> f64;

    /// Dispatches on the shape of `fixing`.
    ///
    /// No fixing data at all prices to undefined.
    fn evaluate(&self, fixing: Option<&Fixing>) -> f64 {
        let Some(fixing) = fixing else {
            trace!("No fixing supplied");
            return UNDEFINED_PRICE;
        };
        trace!(shape = fixing.shape(), "Evaluating payoff");
        match fixing {
            Fixing::Scalar(x) => self.price_scalar(*x),
            Fixing::Map(map) => self.price_map(map),
            Fixing::ScalarPath(path) => self.price_scalar_path(path),
            Fixing::MapPath(path) => self.price_map_path(path),
        }
    }
}

impl<E: PayoffEvaluator + ?Sized> PayoffEvaluator for &E {
    fn price_scalar(&self, fixing: f64) -> f64 {
        (**self).price_scalar(fixing)
    }

    fn price_map(&self, fixing: &FixingMap) -> f64 {
        (**self).price_map(fixing)
    }

    fn price_scalar_path(&self, path: &[f64]) -> f64 {
        (**self).price_scalar_path(path)
    }

    fn price_map_path(&self, path: &[FixingMap]) -> f64 {
        (**self).price_map_path(path)
    }

    fn evaluate(&self, fixing: Option<&Fixing>) -> f64 {
        (**self).evaluate(fixing)
    }
}
