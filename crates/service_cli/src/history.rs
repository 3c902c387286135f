//! Fixing history loading.
//!
//! History files are CSV with a `variable,date,value` header:
//!
//! ```text
//! variable,date,value
//! SPX,2020-03-02,3090.23
//! SX5E,2020-03-02,3337.76
//! ```

use std::path::Path;

use pricer_core::market_data::InMemoryFixingStore;
use pricer_core::types::Date;
use serde::Deserialize;
use tracing::debug;

use crate::{CliError, Result};

#[derive(Debug, Deserialize)]
struct HistoryRow {
    variable: String,
    date: String,
    value: f64,
}

/// Loads a fixing history file into an in-memory store.
pub fn load_history(path: &Path) -> Result<InMemoryFixingStore> {
    if !path.exists() {
        return Err(CliError::FileNotFound(path.display().to_string()));
    }
    let reader = csv::ReaderBuilder::new().trim(csv::Trim::All).from_path(path)?;
    let store = read_history(reader)?;
    debug!(
        path = %path.display(),
        fixings = store.len(),
        "Loaded fixing history"
    );
    Ok(store)
}

fn read_history<R: std::io::Read>(mut reader: csv::Reader<R>) -> Result<InMemoryFixingStore> {
    let headers = reader.headers()?.clone();
    let mut store = InMemoryFixingStore::new();
    for record in reader.records() {
        let record = record?;
        let line = record.position().map_or(0, |p| p.line());
        let row: HistoryRow = record
            .deserialize(Some(&headers))
            .map_err(|e| CliError::History {
                line,
                reason: e.to_string(),
            })?;
        let date = Date::parse(&row.date).map_err(|e| CliError::History {
            line,
            reason: e.to_string(),
        })?;
        store.insert(row.variable, date, row.value);
    }
    Ok(store)
}
