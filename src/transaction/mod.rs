//! Transaction records as they arrive from the backend and as the pipeline
//! sees them.
//!
//! This module contains:
//! - The heterogeneous [RawTransaction] input shape
//! - The canonical [NormalizedTransaction] used by filtering and aggregation
//! - Amount, category and timestamp coercion rules

mod core;
mod normalize;
mod timestamp;

pub use core::{NormalizedTransaction, RawAmount, RawCategory, RawTransaction};
pub use normalize::{UNCATEGORIZED_LABEL, normalize, normalize_all, parse_amount};
pub use timestamp::{Timestamp, parse_timestamp};
