//! Describe command implementation
//!
//! Prints a human-readable summary and the normalised schema of every
//! trade in a payoff book.

use std::path::Path;

use pricer_core::market_data::InMemoryFixingStore;
use tracing::info;

use crate::book::{build_trades, load_book};
use crate::config::CliConfig;
use crate::Result;

/// Run the describe command
pub fn run(book: &Path, config: &CliConfig) -> Result<()> {
    info!("Describing book {}", book.display());
    print!("{}", describe_book(book, config)?);
    Ok(())
}

/// Renders every trade of a book as text.
pub fn describe_book(book: &Path, config: &CliConfig) -> Result<String> {
    let store = InMemoryFixingStore::new();
    let trades = build_trades(load_book(book)?, &config.payoff_config()?, &store)?;

    let mut out = String::new();
    for trade in trades {
        out.push_str(&format!("[{}]\n", trade.id));
        match trade.payoff {
            Ok(payoff) => {
                out.push_str(&payoff.describe());
                out.push('\n');
                out.push_str(&format!("  schema: {}\n", payoff.to_json()));
            }
            Err(reason) => out.push_str(&format!("  error: {}\n", reason)),
        }
        out.push('\n');
    }
    Ok(out)
}
