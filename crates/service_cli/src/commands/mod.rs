//! CLI command implementations
//!
//! Each submodule implements a specific CLI command.

pub mod check;
pub mod describe;
pub mod price;
pub mod schedule;
