//! Structured payoff schema.
//!
//! The schema is the declarative form of a payoff:
//!
//! ```json
//! {
//!   "type": "putdiamerican",
//!   "variable": ["A", "B"],
//!   "trigger": [80, 40],
//!   "strike": [100, 50],
//!   "refstart": "2020-01-01",
//!   "refend": "2020-06-01",
//!   "amount": 1.0,
//!   "description": null
//! }
//! ```
//!
//! Reading is tolerant. Only the overall shape is checked (valid JSON, an
//! object, a string `type`); a field that fails to parse becomes NaN
//! (numbers) or `None` (dates, strings) so the resulting payoff can still
//! be logged and displayed while pricing to undefined.

use super::error::SchemaError;
use pricer_core::types::Date;
use serde_json::{Map, Value};
use std::fmt;

/// Parsed payoff schema, field for field.
#[derive(Debug, Clone, PartialEq)]
pub struct PayoffSchema {
    /// Payoff family tag (`type`).
    pub payoff_type: String,
    /// Underlying identifiers (`variable`).
    pub variables: Vec<String>,
    /// Knock-in trigger levels (`trigger`), positionally matched to `variables`.
    pub triggers: Vec<f64>,
    /// Strike levels (`strike`), positionally matched to `variables`.
    pub strikes: Vec<f64>,
    /// Reference window start (`refstart`).
    pub refstart: Option<Date>,
    /// Reference window end (`refend`).
    pub refend: Option<Date>,
    /// Notional scale (`amount`); `None` when the field is absent.
    pub amount: Option<f64>,
    /// Free-text description (`description`).
    pub description: Option<String>,
}

impl PayoffSchema {
    /// Parses a schema from JSON text.
    ///
    /// # Examples
    ///
    /// ```
    /// use pricer_models::payoffs::PayoffSchema;
    ///
    /// let schema = PayoffSchema::from_json(r#"{
    ///     "type": "putdiamerican",
    ///     "variable": ["A"],
    ///     "trigger": ["eighty"],
    ///     "strike": [100],
    ///     "refstart": "2020-01-01",
    ///     "refend": "not a date"
    /// }"#).unwrap();
    ///
    /// assert!(schema.triggers[0].is_nan());
    /// assert_eq!(schema.strikes, vec![100.0]);
    /// assert!(schema.refend.is_none());
    /// ```
    pub fn from_json(text: &str) -> Result<Self, SchemaError> {
        let value: Value = serde_json::from_str(text)?;
        Self::from_value(&value)
    }

    /// Reads a schema from an already-parsed JSON value.
    pub fn from_value(value: &Value) -> Result<Self, SchemaError> {
        let object = value.as_object().ok_or(SchemaError::NotAnObject)?;
        let payoff_type = object
            .get("type")
            .and_then(Value::as_str)
            .ok_or(SchemaError::MissingType)?
            .trim()
            .to_string();

        Ok(Self {
            payoff_type,
            variables: read_strings(object.get("variable")),
            triggers: read_numbers(object.get("trigger")),
            strikes: read_numbers(object.get("strike")),
            refstart: read_date(object.get("refstart")),
            refend: read_date(object.get("refend")),
            amount: match object.get("amount") {
                None | Some(Value::Null) => None,
                Some(v) => Some(read_number(v)),
            },
            description: object
                .get("description")
                .and_then(Value::as_str)
                .map(str::to_string),
        })
    }

    /// Renders the schema as JSON.
    ///
    /// Non-finite numbers render as `null`, absent dates as `null`, and an
    /// absent amount is omitted.
    pub fn to_value(&self) -> Value {
        let mut object = Map::new();
        object.insert("type".into(), Value::from(self.payoff_type.clone()));
        object.insert("variable".into(), Value::from(self.variables.clone()));
        object.insert("trigger".into(), numbers_value(&self.triggers));
        object.insert("strike".into(), numbers_value(&self.strikes));
        object.insert("refstart".into(), date_value(self.refstart));
        object.insert("refend".into(), date_value(self.refend));
        if let Some(amount) = self.amount {
            object.insert("amount".into(), number_value(amount));
        }
        object.insert(
            "description".into(),
            self.description.clone().map_or(Value::Null, Value::String),
        );
        Value::Object(object)
    }
}

impl fmt::Display for PayoffSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_value())
    }
}

/// Reads a number, accepting numeric strings; anything else is NaN.
fn read_number(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(f64::NAN),
        Value::String(s) => s.trim().parse().unwrap_or(f64::NAN),
        _ => f64::NAN,
    }
}

/// Reads a list of numbers; a bare scalar is a one-element list.
fn read_numbers(value: Option<&Value>) -> Vec<f64> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(read_number).collect(),
        Some(other) => vec![read_number(other)],
    }
}

fn read_string(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Reads a list of identifiers; a bare string is a one-element list.
fn read_strings(value: Option<&Value>) -> Vec<String> {
    match value {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(read_string).collect(),
        Some(other) => vec![read_string(other)],
    }
}

fn read_date(value: Option<&Value>) -> Option<Date> {
    value.and_then(Value::as_str).and_then(|s| Date::parse(s).ok())
}

fn number_value(x: f64) -> Value {
    // serde_json maps non-finite floats to null
    Value::from(x)
}

fn numbers_value(xs: &[f64]) -> Value {
    Value::Array(xs.iter().copied().map(number_value).collect())
}

fn date_value(date: Option<Date>) -> Value {
    date.map_or(Value::Null, |d| Value::String(d.to_string()))
}
