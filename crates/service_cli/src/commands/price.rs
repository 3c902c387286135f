//! Price command implementation
//!
//! Prices every trade in a payoff book against its live fixing, after
//! resolving historical knock-ins from an optional fixing history file.

use std::path::Path;

use pricer_core::market_data::InMemoryFixingStore;
use pricer_models::payoffs::{evaluate_batch, is_undefined, BatchSummary, Payoff, SchemaError};
use serde::Serialize;
use tracing::info;

use crate::book::{build_trades, load_book, Trade};
use crate::config::{CliConfig, OutputFormat};
use crate::history::load_history;
use crate::Result;

/// One output row.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceRow {
    /// Trade identifier
    pub id: String,
    /// Price, absent when undefined
    pub price: Option<f64>,
    /// `ok`, `undefined`, or the reason the trade could not be built
    pub status: String,
}

/// Run the price command
pub fn run(
    book: &Path,
    history: Option<&Path>,
    format: OutputFormat,
    config: &CliConfig,
) -> Result<()> {
    info!("Starting pricing...");
    info!("  Book: {}", book.display());
    info!("  Output format: {}", format);

    let rows = price_book(book, history, config)?;
    print!("{}", render(&rows, format)?);

    info!("Pricing complete");
    Ok(())
}

/// Loads, builds and prices a book.
pub fn price_book(book: &Path, history: Option<&Path>, config: &CliConfig) -> Result<Vec<PriceRow>> {
    let store = match history {
        Some(path) => load_history(path)?,
        None => InMemoryFixingStore::new(),
    };
    let trades = build_trades(load_book(book)?, &config.payoff_config()?, &store)?;
    let rows = price_trades(&trades);

    let prices: Vec<f64> = rows.iter().map(|r| r.price.unwrap_or(f64::NAN)).collect();
    let summary = BatchSummary::from_prices(&prices);
    info!(
        priced = summary.priced,
        undefined = summary.undefined,
        total = summary.total,
        "Book priced"
    );
    Ok(rows)
}

fn price_trades(trades: &[Trade]) -> Vec<PriceRow> {
    let built: Vec<(&Payoff, _)> = trades
        .iter()
        .filter_map(|t| t.payoff.as_ref().ok().map(|p| (p, t.fixing.clone())))
        .collect();
    let mut prices = evaluate_batch(&built).into_iter();

    trades
        .iter()
        .map(|trade| match &trade.payoff {
            Ok(payoff) => {
                let price = prices.next().unwrap_or(f64::NAN);
                let status = if !is_undefined(price) {
                    "ok".to_string()
                } else if let Some(reason) = payoff.unpriceable_reason() {
                    format!("undefined: {}", reason)
                } else {
                    "undefined".to_string()
                };
                PriceRow {
                    id: trade.id.clone(),
                    price: (!is_undefined(price)).then_some(price),
                    status,
                }
            }
            Err(err) => PriceRow {
                id: trade.id.clone(),
                price: None,
                status: schema_status(err),
            },
        })
        .collect()
}

fn schema_status(err: &SchemaError) -> String {
    match err {
        SchemaError::UnknownType(payoff_type) => format!("unsupported: {}", payoff_type),
        other => format!("error: {}", other),
    }
}

/// Renders rows in the requested format.
pub fn render(rows: &[PriceRow], format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Json => Ok(serde_json::to_string_pretty(rows)? + "\n"),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(Vec::new());
            for row in rows {
                writer.serialize(row)?;
            }
            let bytes = writer
                .into_inner()
                .map_err(|e| std::io::Error::other(e.to_string()))?;
            Ok(String::from_utf8_lossy(&bytes).into_owned())
        }
        OutputFormat::Table => Ok(render_table(rows)),
    }
}

fn column_width<'a>(header: &str, cells: impl Iterator<Item = &'a str>) -> usize {
    cells
        .map(|cell| cell.chars().count())
        .fold(header.chars().count(), usize::max)
}

fn render_table(rows: &[PriceRow]) -> String {
    let prices: Vec<String> = rows
        .iter()
        .map(|r| r.price.map_or_else(|| "-".to_string(), |p| format!("{:.6}", p)))
        .collect();
    let id_w = column_width("Trade ID", rows.iter().map(|r| r.id.as_str()));
    let price_w = column_width("Price", prices.iter().map(String::as_str));
    let status_w = column_width("Status", rows.iter().map(|r| r.status.as_str()));

    let rule = |left: &str, mid: &str, right: &str| {
        format!(
            "{}{}{}{}{}{}{}\n",
            left,
            "─".repeat(id_w + 2),
            mid,
            "─".repeat(price_w + 2),
            mid,
            "─".repeat(status_w + 2),
            right
        )
    };

    let mut out = rule("┌", "┬", "┐");
    out.push_str(&format!(
        "│ {:<id_w$} │ {:<price_w$} │ {:<status_w$} │\n",
        "Trade ID", "Price", "Status"
    ));
    out.push_str(&rule("├", "┼", "┤"));
    if rows.is_empty() {
        out.push_str(&format!(
            "│ {:<id_w$} │ {:<price_w$} │ {:<status_w$} │\n",
            "(none)", "", ""
        ));
    }
    for (row, price) in rows.iter().zip(&prices) {
        out.push_str(&format!(
            "│ {:<id_w$} │ {:>price_w$} │ {:<status_w$} │\n",
            row.id, price, row.status
        ));
    }
    out.push_str(&rule("└", "┴", "┘"));
    out
}
