//! Declarative payoff specifications and their evaluation.
//!
//! This module provides:
//! - [`PayoffSchema`]: The structured JSON form of a payoff
//! - [`PutDiAmerican`]: Down-and-in put specification with historical knock-in resolution
//! - [`FixingInterpreter`]: Knock-in detection and pricing per fixing shape
//!   ([`ScalarInterpreter`], [`MultiAssetInterpreter`])
//! - [`PayoffEvaluator`] and [`Fixing`]: Dispatch on a runtime-shaped fixing
//! - [`Payoff`]: Enum over payoff families, selected by the schema `type`
//! - [`evaluate_batch`]: Failure-isolated batch pricing
//!
//! Malformed input never fails evaluation. It produces a specification
//! that prices to [`UNDEFINED_PRICE`], a quiet NaN.
//!
//! # Examples
//!
//! ```
//! use pricer_models::payoffs::{Fixing, Payoff, PayoffConfig, PayoffEvaluator};
//! use pricer_core::market_data::InMemoryFixingStore;
//! use pricer_core::types::Date;
//!
//! let mut history = InMemoryFixingStore::new();
//! history.insert("A", Date::from_ymd(2020, 3, 1).unwrap(), 75.0);
//!
//! let payoff = Payoff::from_json(
//!     r#"{
//!         "type": "putdiamerican",
//!         "variable": ["A"],
//!         "trigger": [80],
//!         "strike": [100],
//!         "refstart": "2020-01-01",
//!         "refend": "2020-06-01"
//!     }"#,
//!     &PayoffConfig::default(),
//!     &history,
//! ).unwrap();
//!
//! let price = payoff.evaluate(Some(&Fixing::Scalar(90.0)));
//! assert!((price - 0.9).abs() < 1e-12);
//! ```

mod batch;
mod config;
mod error;
mod evaluator;
mod interpreter;
mod payoff;
mod put_di_american;
mod schema;

pub use batch::{evaluate_batch, BatchSummary};
pub use config::PayoffConfig;
pub use error::{ConfigError, PayoffError, SchemaError, Unpriceable};
pub use evaluator::{Fixing, PayoffEvaluator};
pub use interpreter::{
    is_undefined, FixingInterpreter, FixingMap, MultiAssetInterpreter, ScalarInterpreter,
    UNDEFINED_PRICE,
};
pub use payoff::Payoff;
pub use put_di_american::PutDiAmerican;
pub use schema::PayoffSchema;
