//! Runs the whole transform from raw transactions to chart datasets.

use serde::Serialize;

use crate::{
    config::PipelineConfig,
    dashboard::{ChartDataset, ChartKind, Summary, available_chart_kinds, build_chart, summarize},
    filter::{FilterOptions, filter_transactions},
    transaction::{RawTransaction, normalize_all},
};

/// Everything a dashboard needs to draw itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardData {
    /// Totals and breakdowns for the filtered transactions.
    pub summary: Summary,
    /// The chart kinds worth offering for this summary.
    pub available_charts: Vec<ChartKind>,
    /// One dataset per available chart kind, in the same order.
    pub charts: Vec<ChartDataset>,
}

/// Normalizes, filters and summarizes `raw`, then builds a dataset for every
/// available chart kind.
///
/// `filters` is applied as given; call [FilterOptions::resolved] first if its
/// bounds may be stale. The result depends only on the arguments.
pub fn run_pipeline(
    raw: &[RawTransaction],
    filters: &FilterOptions,
    config: &PipelineConfig,
) -> DashboardData {
    let transactions = normalize_all(raw);
    let filtered = filter_transactions(&transactions, filters);
    let summary = summarize(filtered, config);

    let available_charts = available_chart_kinds(
        summary.transaction_count,
        summary.category_breakdown.len(),
        config,
    );
    let charts = available_charts
        .iter()
        .map(|&kind| build_chart(kind, &summary, config))
        .collect();

    tracing::debug!(
        "Built {} charts from {} of {} transactions",
        available_charts.len(),
        summary.transaction_count,
        raw.len()
    );

    DashboardData {
        summary,
        available_charts,
        charts,
    }
}

#[cfg(test)]
mod tests {
    use time::macros::datetime;

    use crate::{
        config::PipelineConfig,
        dashboard::{CategorySummaryEntry, ChartDataset, ChartKind},
        filter::{FilterOptions, TimePeriod, default_filters},
        transaction::RawTransaction,
    };

    use super::run_pipeline;

    fn entry(name: &str, amount: f64, percentage: f64) -> CategorySummaryEntry {
        CategorySummaryEntry {
            name: name.to_owned(),
            amount,
            percentage,
        }
    }

    #[test]
    fn food_and_income_summary() {
        let raw = [
            RawTransaction::expense(100.0, "Food"),
            RawTransaction::expense(50.0, "Food"),
            RawTransaction::income(1000.0),
        ];

        let data = run_pipeline(&raw, &default_filters(), &PipelineConfig::default());

        assert_eq!(data.summary.total_income, 1000.0);
        assert_eq!(data.summary.total_expenses, 150.0);
        assert_eq!(data.summary.net_amount, 850.0);
        assert_eq!(
            data.summary.category_breakdown,
            vec![entry("Food", 150.0, 100.0)]
        );
    }

    #[test]
    fn small_categories_are_folded_into_others() {
        let raw = [
            RawTransaction::expense(100.0, "A"),
            RawTransaction::expense(90.0, "B"),
            RawTransaction::expense(80.0, "C"),
            RawTransaction::expense(70.0, "D"),
            RawTransaction::expense(60.0, "E"),
            RawTransaction::expense(6.0, "F"),
            RawTransaction::expense(4.0, "G"),
        ];

        let data = run_pipeline(&raw, &default_filters(), &PipelineConfig::default());

        let breakdown = &data.summary.category_breakdown;
        assert_eq!(breakdown.len(), 6);
        assert_eq!(breakdown[5].name, "Others");
        assert_eq!(breakdown[5].amount, 10.0);
        assert!((breakdown[5].percentage - 10.0 / 410.0 * 100.0).abs() < 1e-9);
    }

    #[test]
    fn category_filter_limits_the_summary() {
        let raw = [
            RawTransaction::expense(30.0, "Food"),
            RawTransaction::expense(20.0, "Transport"),
            RawTransaction::expense(10.0, "Food"),
        ];
        let mut filters = default_filters();
        filters.toggle_category("Food");

        let data = run_pipeline(&raw, &filters, &PipelineConfig::default());

        assert_eq!(data.summary.transaction_count, 2);
        assert_eq!(data.summary.total_expenses, 40.0);
        assert_eq!(
            data.summary.category_breakdown,
            vec![entry("Food", 40.0, 100.0)]
        );
    }

    #[test]
    fn unusable_amount_is_skipped() {
        let raw = [
            RawTransaction::expense("abc", "Food"),
            RawTransaction::expense(25.0, "Food"),
        ];

        let data = run_pipeline(&raw, &default_filters(), &PipelineConfig::default());

        assert_eq!(data.summary.transaction_count, 2);
        assert_eq!(data.summary.total_expenses, 25.0);
        assert_eq!(
            data.summary.category_breakdown,
            vec![entry("Food", 25.0, 100.0)]
        );
    }

    #[test]
    fn this_week_filter_starts_on_monday() {
        let now = datetime!(2024-01-17 15:30 UTC);
        let raw = [
            RawTransaction::expense(1.0, "Sunday before").with_transaction_date("2024-01-14T23:59:59Z"),
            RawTransaction::expense(2.0, "Monday").with_transaction_date("2024-01-15T00:00:00Z"),
            RawTransaction::expense(4.0, "Sunday").with_transaction_date("2024-01-21T23:59:59Z"),
            RawTransaction::expense(8.0, "Monday after").with_transaction_date("2024-01-22T00:00:00Z"),
        ];
        let mut filters = default_filters();
        filters.select_period(TimePeriod::Week, now);

        let data = run_pipeline(&raw, &filters, &PipelineConfig::default());

        assert_eq!(data.summary.total_expenses, 6.0);
        assert_eq!(data.summary.transaction_count, 2);
    }

    #[test]
    fn custom_period_without_bounds_is_repaired_before_running() {
        let now = datetime!(2024-01-17 15:30 UTC);
        let raw = [
            RawTransaction::expense(1.0, "Too old").with_date("2023-12-01"),
            RawTransaction::expense(2.0, "Last month").with_date("2023-12-20"),
            RawTransaction::expense(4.0, "This morning").with_transaction_date("2024-01-17T10:00:00Z"),
            RawTransaction::expense(8.0, "Tomorrow").with_date("2024-01-18"),
        ];
        let filters = FilterOptions {
            time_period: TimePeriod::Custom,
            ..Default::default()
        };

        let resolved = filters.resolved(now);
        let data = run_pipeline(&raw, &resolved, &PipelineConfig::default());

        assert_eq!(resolved.start_date, Some(datetime!(2023-12-17 15:30 UTC)));
        assert_eq!(resolved.end_date, Some(now));
        assert_eq!(data.summary.transaction_count, 2);
        assert_eq!(data.summary.total_expenses, 6.0);
    }

    #[test]
    fn month_filter_west_of_utc_keeps_first_and_last_day() {
        let now = datetime!(2024-01-17 12:00 -05:00);
        let raw = [
            RawTransaction::expense(1.0, "Jan1").with_date("2024-01-01"),
            RawTransaction::expense(2.0, "Jan31").with_date("2024-01-31"),
            RawTransaction::expense(4.0, "Feb1").with_date("2024-02-01"),
        ];
        let mut filters = default_filters();
        filters.select_period(TimePeriod::Month, now);

        let data = run_pipeline(&raw, &filters, &PipelineConfig::default());

        assert_eq!(data.summary.total_expenses, 3.0);
    }

    #[test]
    fn empty_input_gives_zero_state() {
        let data = run_pipeline(&[], &default_filters(), &PipelineConfig::default());

        assert_eq!(data.summary.total_income, 0.0);
        assert_eq!(data.summary.total_expenses, 0.0);
        assert_eq!(data.summary.net_amount, 0.0);
        assert!(data.summary.category_breakdown.is_empty());
        assert!(data.available_charts.is_empty());
        assert!(data.charts.is_empty());
    }

    #[test]
    fn all_filter_keeps_every_transaction() {
        let raw = [
            RawTransaction::expense(1.0, "A").with_date("1999-12-31"),
            RawTransaction::expense(1.0, "B").with_date("not a date"),
            RawTransaction::expense(1.0, "C"),
            RawTransaction::income(1.0).with_date("2040-01-01"),
        ];

        let data = run_pipeline(&raw, &default_filters(), &PipelineConfig::default());

        assert_eq!(data.summary.transaction_count, raw.len());
    }

    #[test]
    fn running_twice_gives_identical_results() {
        let raw = [
            RawTransaction::expense(12.5, "Food").with_date("2024-01-15"),
            RawTransaction::expense(7.25, "Fun").with_date("2024-01-16"),
            RawTransaction::income(100.0).with_date("2024-01-16"),
        ];
        let filters = default_filters();
        let config = PipelineConfig::default();

        let first = run_pipeline(&raw, &filters, &config);
        let second = run_pipeline(&raw, &filters, &config);

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn charts_follow_available_kinds() {
        let raw = [
            RawTransaction::expense(12.5, "Food").with_date("2024-01-15"),
            RawTransaction::expense(7.25, "Fun").with_date("2024-01-16"),
            RawTransaction::income(100.0).with_date("2024-01-16"),
        ];

        let data = run_pipeline(&raw, &default_filters(), &PipelineConfig::default());

        assert_eq!(
            data.available_charts,
            vec![
                ChartKind::Bar,
                ChartKind::Pie,
                ChartKind::Donut,
                ChartKind::Line,
                ChartKind::Area,
            ]
        );
        let kinds: Vec<ChartKind> = data.charts.iter().map(ChartDataset::kind).collect();
        assert_eq!(kinds, data.available_charts);
    }

    #[test]
    fn income_only_offers_just_the_bar_chart() {
        let raw = [RawTransaction::income(500.0)];

        let data = run_pipeline(&raw, &default_filters(), &PipelineConfig::default());

        assert!(data.summary.category_breakdown.is_empty());
        assert_eq!(data.available_charts, vec![ChartKind::Bar]);
    }

    #[test]
    fn serializes_camel_case_fields() {
        let raw = [RawTransaction::expense(5.0, "Food")];

        let json =
            serde_json::to_value(run_pipeline(&raw, &default_filters(), &PipelineConfig::default()))
                .unwrap();

        assert_eq!(json["summary"]["totalExpenses"], 5.0);
        assert_eq!(json["availableCharts"][0], "bar");
        assert_eq!(json["charts"][0]["kind"], "bar");
    }
}
