//! Decides which chart kinds are worth showing for a summary.

use crate::{config::PipelineConfig, dashboard::charts::ChartKind};

/// The chart kinds the picker should offer, in [ChartKind::ALL] order.
///
/// Nothing is offered without records. The bar chart only needs one record,
/// the category charts need a non-empty breakdown, the trend charts need
/// `min_trend_records` records and the heat map needs
/// `min_heat_map_records` records as well as a breakdown.
pub fn available_chart_kinds(
    record_count: usize,
    breakdown_len: usize,
    config: &PipelineConfig,
) -> Vec<ChartKind> {
    if record_count == 0 {
        return Vec::new();
    }

    ChartKind::ALL
        .into_iter()
        .filter(|kind| match kind {
            ChartKind::Bar => true,
            ChartKind::Pie | ChartKind::Donut => breakdown_len > 0,
            ChartKind::Line | ChartKind::Area => record_count >= config.min_trend_records,
            ChartKind::HeatMap => {
                breakdown_len > 0 && record_count >= config.min_heat_map_records
            }
        })
        .collect()
}
