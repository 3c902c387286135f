//! # pricer_core: Foundation for the Knock-in Payoff Engine
//!
//! ## Layer 1 (Foundation) Role
//!
//! pricer_core serves as the bottom layer, providing:
//! - Time types: `Date` with serial day numbers (`types::time`)
//! - Error types: `PricingError`, `DateError` (`types::error`)
//! - Historical fixing lookups: `FixingStore`, `InMemoryFixingStore` (`market_data`)
//!
//! ## Zero Dependency Principle
//!
//! Layer 1 has no dependencies on other pricer_* crates, with minimal external dependencies:
//! - chrono: Date arithmetic
//! - thiserror: Error derivation
//! - serde: Serialisation support (optional)
//!
//! ## Usage Examples
//!
//! ```rust
//! use pricer_core::market_data::{FixingStore, InMemoryFixingStore};
//! use pricer_core::types::Date;
//!
//! let start = Date::from_ymd(2020, 1, 1).unwrap();
//! let end = Date::from_ymd(2020, 6, 1).unwrap();
//! assert_eq!(end.serial() - start.serial(), 152);
//!
//! let store = InMemoryFixingStore::new();
//! assert!(store.lookup("A", start, end).unwrap().is_empty());
//! ```
//!
//! ## Feature Flags
//!
//! - `serde` (default): Enable serialisation for Date

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod market_data;
pub mod types;
