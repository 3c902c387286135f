//! Market data access for payoff construction.
//!
//! # Components
//!
//! - [`fixings`]: Historical fixing store contract and an in-memory implementation
//! - [`error`]: Market data error types (FixingStoreError)
//!
//! # Example
//!
//! ```
//! use pricer_core::market_data::{FixingStore, InMemoryFixingStore};
//! use pricer_core::types::Date;
//!
//! let mut store = InMemoryFixingStore::new();
//! store.insert("A", Date::from_ymd(2020, 3, 1).unwrap(), 75.0);
//!
//! let window = (Date::from_ymd(2020, 1, 1).unwrap(), Date::from_ymd(2020, 6, 1).unwrap());
//! let series = store.lookup("A", window.0, window.1).unwrap();
//! assert_eq!(series[0].1, 75.0);
//! ```

pub mod error;
pub mod fixings;

// Re-export commonly used types
pub use error::FixingStoreError;
pub use fixings::{FixingStore, HistoricalFixing, InMemoryFixingStore};
