//! Summaries and chart datasets for the dashboard.
//!
//! [summarize] turns filtered transactions into a [Summary], and the chart
//! adapters shape that summary for each [ChartKind].

mod aggregation;
mod availability;
mod charts;

pub use aggregation::{
    CategorySummaryEntry, OTHERS_LABEL, Summary, TimelinePoint, WeekdayExpense, summarize,
};
pub use availability::available_chart_kinds;
pub use charts::{
    ChartAdapter, ChartDataset, ChartKind, DonutSlice, HeatPoint, Series, XyPoint, adapter_for,
    build_chart,
};
