//! Schedule command implementation
//!
//! Lists the barrier observation dates of every trade in a payoff book for
//! a calculation period ending on a given date.

use std::path::Path;

use pricer_core::market_data::InMemoryFixingStore;
use pricer_core::types::Date;
use serde::Serialize;
use tracing::info;

use crate::book::{build_trades, load_book};
use crate::config::{CliConfig, OutputFormat};
use crate::{CliError, Result};

/// Observation dates of one trade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    /// Trade identifier
    pub id: String,
    /// Observation dates in order
    pub dates: Vec<Date>,
}

/// Run the schedule command
pub fn run(book: &Path, period_end: &str, format: OutputFormat, config: &CliConfig) -> Result<()> {
    info!("Generating observation schedules...");
    info!("  Book: {}", book.display());
    info!("  Period end: {}", period_end);

    let period_end = Date::parse(period_end)
        .map_err(|e| CliError::InvalidArgument(format!("period end: {}", e)))?;
    let rows = schedule_book(book, period_end, config)?;
    print!("{}", render(&rows, format)?);
    Ok(())
}

/// Loads a book and computes each trade's observation dates.
///
/// Trades whose schema cannot describe a payoff are omitted.
pub fn schedule_book(book: &Path, period_end: Date, config: &CliConfig) -> Result<Vec<ScheduleRow>> {
    // Knock-in state does not affect the schedule, so history is not consulted.
    let store = InMemoryFixingStore::new();
    let trades = build_trades(load_book(book)?, &config.payoff_config()?, &store)?;
    Ok(trades
        .into_iter()
        .filter_map(|trade| {
            let dates = trade.payoff.ok()?.event_dates(&period_end);
            Some(ScheduleRow { id: trade.id, dates })
        })
        .collect())
}

/// Renders schedules in the requested format.
pub fn render(rows: &[ScheduleRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)? + "\n"),
        OutputFormat::Csv => {
            let mut out = String::from("id,date\n");
            for row in rows {
                for date in &row.dates {
                    out.push_str(&format!("{},{}\n", row.id, date));
                }
            }
            Ok(out)
        }
        OutputFormat::Table => {
            let mut out = String::new();
            for row in rows {
                out.push_str(&format!("{} ({} dates)\n", row.id, row.dates.len()));
                for date in &row.dates {
                    out.push_str(&format!("  {}\n", date));
                }
            }
            Ok(out)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_schedule_book() {
        let dir = tempfile::tempdir().unwrap();
        let book = dir.path().join("book.json");
        std::fs::write(
            &book,
            r#"[
                {"id": "T1", "payoff": {"type": "putdiamerican", "variable": ["A"], "trigger": [80], "strike": [100], "refstart": "2020-01-01", "refend": "2020-06-01"}},
                {"id": "T2", "payoff": {"type": "putdiamerican", "variable": ["A"], "trigger": [80], "strike": [100]}},
                {"id": "T3", "payoff": "not an object"}
            ]"#,
        )
        .unwrap();

        let rows = schedule_book(&book, d(2020, 6, 30), &CliConfig::default()).unwrap();
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].dates.first(), Some(&d(2020, 1, 1)));
        assert_eq!(rows[0].dates.last(), Some(&d(2020, 6, 1)));
        assert_eq!(rows[1].dates, vec![d(2020, 6, 30)]);
    }

    #[test]
    fn test_render_csv() {
        let rows = vec![ScheduleRow {
            id: "T1".to_string(),
            dates: vec![d(2020, 1, 1), d(2020, 6, 1)],
        }];
        assert_eq!(
            render(&rows, OutputFormat::Csv).unwrap(),
            "id,date\nT1,2020-01-01\nT1,2020-06-01\n"
        );
    }

    #[test]
    fn test_render_json_dates_as_strings() {
        let rows = vec![ScheduleRow {
            id: "T1".to_string(),
            dates: vec![d(2020, 6, 1)],
        }];
        let text = render(&rows, OutputFormat::Json).unwrap();
        assert!(text.contains("\"2020-06-01\""));
    }
}
