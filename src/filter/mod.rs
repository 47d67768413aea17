//! Dashboard filtering.
//!
//! Holds the user-facing filter configuration and the engine that applies it
//! to normalized transactions.

mod engine;
mod options;

pub use engine::filter_transactions;
pub use options::{FilterOptions, TimePeriod, default_filters};
