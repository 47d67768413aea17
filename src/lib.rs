//! Expense Insights turns a raw list of financial transactions and a
//! dashboard filter into aggregated, chart-ready datasets.
//!
//! The library is a pure pipeline: transactions are normalized, filtered by
//! time period and category, summarized into income/expense totals and a
//! category breakdown, and finally adapted into one dataset per chart kind.
//! Rendering, fetching and persistence are left to the host.

#![warn(missing_docs)]

mod config;
mod dashboard;
mod error;
mod filter;
mod format;
mod input;
mod logging;
mod period;
mod pipeline;
mod timezone;
mod transaction;

pub use config::PipelineConfig;
pub use dashboard::{
    CategorySummaryEntry, ChartAdapter, ChartDataset, ChartKind, DonutSlice, HeatPoint, OTHERS_LABEL,
    Series, Summary, TimelinePoint, WeekdayExpense, XyPoint, adapter_for, available_chart_kinds,
    build_chart, summarize,
};
pub use error::Error;
pub use filter::{FilterOptions, TimePeriod, default_filters, filter_transactions};
pub use format::format_currency;
pub use input::{load_filters, load_pipeline_config, load_transactions, parse_transactions};
pub use logging::setup_logging;
pub use period::{Interval, resolve_period};
pub use pipeline::{DashboardData, run_pipeline};
pub use timezone::{get_local_offset, now_in_timezone};
pub use transaction::{
    NormalizedTransaction, RawAmount, RawCategory, RawTransaction, Timestamp,
    UNCATEGORIZED_LABEL, normalize, normalize_all, parse_amount, parse_timestamp,
};
