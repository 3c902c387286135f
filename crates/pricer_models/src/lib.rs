//! # Pricer Models (L2: Business Logic)
//!
//! Declarative payoff specifications and barrier observation schedules.
//!
//! This crate provides:
//! - Observation schedule generation with fine/medium/coarse sampling (`schedules`)
//! - Payoff schemas, specifications and historical knock-in resolution (`payoffs`)
//! - Fixing interpreters for scalar and multi-asset observations and paths
//! - Failure-isolated batch evaluation, parallel under the `parallel` feature
//!
//! ## Design Principles
//!
//! - **Enum-based payoff families** for static dispatch
//! - **NaN as the undefined price**: malformed input degrades, it never aborts a batch
//! - **Explicit context**: fixing stores and sampling configuration are passed in, never global

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![deny(rustdoc::private_intra_doc_links)]

pub mod payoffs;
pub mod schedules;
