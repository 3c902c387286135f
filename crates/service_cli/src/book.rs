//! Payoff book loading.
//!
//! A book is a JSON array of trades, each pairing a payoff schema with an
//! optional fixing of any shape. Both are read per trade, so a malformed
//! schema or fixing only affects its own trade:
//!
//! ```json
//! [
//!   { "id": "T1", "payoff": { "type": "putdiamerican", ... }, "fixing": 90 },
//!   { "id": "T2", "payoff": { ... }, "fixing": { "A": 120, "B": 30 } }
//! ]
//! ```

use std::path::Path;

use pricer_core::market_data::FixingStore;
use pricer_models::payoffs::{Fixing, Payoff, PayoffConfig, PayoffError, SchemaError};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use crate::{CliError, Result};

/// One book entry as read from file.
#[derive(Debug, Clone, Deserialize)]
pub struct BookEntry {
    /// Trade identifier
    pub id: String,
    /// Payoff schema, kept raw so that one bad schema does not reject the book
    pub payoff: Value,
    /// Live fixing to price against, read per trade like the payoff
    #[serde(default)]
    pub fixing: Option<Value>,
}

/// A book entry with its payoff built.
#[derive(Debug, Clone)]
pub struct Trade {
    /// Trade identifier
    pub id: String,
    /// Built payoff, or why the schema could not describe one
    pub payoff: std::result::Result<Payoff, SchemaError>,
    /// Live fixing to price against; `None` when absent or malformed
    pub fixing: Option<Fixing>,
}

/// Reads a book file.
pub fn load_book(path: &Path) -> Result<Vec<BookEntry>> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let text = std::fs::read_to_string(path)?;
    let entries: Vec<BookEntry> = serde_json::from_str(&text)?;
    debug!(path = %path.display(), trades = entries.len(), "Loaded payoff book");
    Ok(entries)
}

/// Builds every trade's payoff.
///
/// A schema that cannot describe a payoff is recorded on its trade, and a
/// fixing that matches no known shape is dropped so the trade prices to
/// undefined. A failing fixing store aborts the whole build.
pub fn build_trades<S>(entries: Vec<BookEntry>, config: &PayoffConfig, store: &S) -> Result<Vec<Trade>>
where
    S: FixingStore + ?Sized,
{
    entries
        .into_iter()
        .map(|BookEntry { id, payoff, fixing }| {
            let payoff = match Payoff::from_value(&payoff, config, store) {
                Ok(payoff) => Ok(payoff),
                Err(PayoffError::Schema(e)) => {
                    warn!(id = %id, error = %e, "Skipping malformed trade");
                    Err(e)
                }
                Err(e) => return Err(CliError::from(e)),
            };
            let fixing = fixing.and_then(|value| parse_fixing(&id, value));
            Ok(Trade { id, payoff, fixing })
        })
        .collect()
}

fn parse_fixing(id: &str, value: Value) -> Option<Fixing> {
    match serde_json::from_value(value) {
        Ok(fixing) => Some(fixing),
        Err(e) => {
            warn!(id = %id, error = %e, "Ignoring malformed fixing");
            None
        }
    }
}
