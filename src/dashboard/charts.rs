//! Chart-data adapters for the dashboard.
//!
//! Each adapter maps a [Summary] to the dataset shape of one chart kind:
//! - **Bar**: income, expenses and net as three points
//! - **Pie** and **Donut**: one point per category breakdown entry
//! - **Line**: daily income and expense series
//! - **Area**: running net amount over time
//! - **Heat map**: expenses per weekday and category
//!
//! Adapters never recompute totals or re-filter. Values stay raw numbers so
//! the renderer controls formatting. An empty summary always produces an
//! empty dataset.

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use unicode_segmentation::UnicodeSegmentation;

use crate::{
    config::PipelineConfig,
    dashboard::aggregation::{Summary, weekday_label},
};

/// The ellipsis appended to shortened legend labels.
const ELLIPSIS: char = '…';

/// The visualization families the dashboard can draw.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    /// Income, expenses and net side by side.
    Bar,
    /// Category shares as a pie.
    Pie,
    /// Category shares as a ring with a legend.
    Donut,
    /// Daily income and expenses.
    Line,
    /// Running net amount.
    Area,
    /// Expenses by weekday and category.
    HeatMap,
}

impl ChartKind {
    /// Every chart kind, in the order the chart picker lists them.
    pub const ALL: [ChartKind; 6] = [
        Self::Bar,
        Self::Pie,
        Self::Donut,
        Self::Line,
        Self::Area,
        Self::HeatMap,
    ];

    /// The token used on the command line and in JSON.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Bar => "bar",
            Self::Pie => "pie",
            Self::Donut => "donut",
            Self::Line => "line",
            Self::Area => "area",
            Self::HeatMap => "heat_map",
        }
    }

    /// A human readable name.
    pub fn label(self) -> &'static str {
        match self {
            Self::Bar => "Bar",
            Self::Pie => "Pie",
            Self::Donut => "Donut",
            Self::Line => "Line",
            Self::Area => "Area",
            Self::HeatMap => "Heat map",
        }
    }
}

impl FromStr for ChartKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let value = value.trim().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_query_value().eq_ignore_ascii_case(&value))
            .ok_or_else(|| format!("unknown chart kind \"{value}\""))
    }
}

/// A labelled value, used by bar, pie, line and area charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct XyPoint {
    /// The category or date label.
    pub x: String,
    /// The raw value.
    pub y: f64,
}

impl XyPoint {
    fn new(x: impl Into<String>, y: f64) -> Self {
        Self { x: x.into(), y }
    }
}

/// One slice of a donut chart.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DonutSlice {
    /// The legend label, shortened if needed.
    pub name: String,
    /// The raw value.
    pub amount: f64,
    /// The share of total expenses.
    pub percentage: f64,
    /// The fill color.
    pub color: String,
}

/// A named sequence of points for line and area charts.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Series {
    /// The legend label.
    pub name: String,
    /// The points in x order.
    pub points: Vec<XyPoint>,
}

/// One cell of a heat map.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeatPoint {
    /// The weekday abbreviation.
    pub x: String,
    /// The category name.
    pub y: String,
    /// The expense amount.
    pub heat: f64,
}

/// The data for one chart, shaped for its chart kind.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ChartDataset {
    /// Points for a bar chart.
    Bar(Vec<XyPoint>),
    /// Points for a pie chart.
    Pie(Vec<XyPoint>),
    /// Slices for a donut chart.
    Donut(Vec<DonutSlice>),
    /// Series for a line chart.
    Line(Vec<Series>),
    /// Series for an area chart.
    Area(Vec<Series>),
    /// Cells for a heat map.
    HeatMap(Vec<HeatPoint>),
}

impl ChartDataset {
    /// The chart kind this dataset is for.
    pub fn kind(&self) -> ChartKind {
        match self {
            Self::Bar(_) => ChartKind::Bar,
            Self::Pie(_) => ChartKind::Pie,
            Self::Donut(_) => ChartKind::Donut,
            Self::Line(_) => ChartKind::Line,
            Self::Area(_) => ChartKind::Area,
            Self::HeatMap(_) => ChartKind::HeatMap,
        }
    }

    /// Whether there is nothing to draw.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Bar(points) | Self::Pie(points) => points.is_empty(),
            Self::Donut(slices) => slices.is_empty(),
            Self::Line(series) | Self::Area(series) => series.is_empty(),
            Self::HeatMap(cells) => cells.is_empty(),
        }
    }
}

/// A function that shapes a summary for one chart kind.
pub type ChartAdapter = fn(&Summary, &PipelineConfig) -> ChartDataset;

/// Looks up the adapter for `kind`.
pub fn adapter_for(kind: ChartKind) -> ChartAdapter {
    match kind {
        ChartKind::Bar => bar_chart,
        ChartKind::Pie => pie_chart,
        ChartKind::Donut => donut_chart,
        ChartKind::Line => line_chart,
        ChartKind::Area => area_chart,
        ChartKind::HeatMap => heat_map_chart,
    }
}

/// Builds the dataset for `kind` from `summary`.
pub fn build_chart(kind: ChartKind, summary: &Summary, config: &PipelineConfig) -> ChartDataset {
    adapter_for(kind)(summary, config)
}

/// Income, expenses and net, always in that order.
fn bar_chart(summary: &Summary, _: &PipelineConfig) -> ChartDataset {
    if summary.is_empty() {
        return ChartDataset::Bar(Vec::new());
    }

    ChartDataset::Bar(vec![
        XyPoint::new("Income", summary.total_income),
        XyPoint::new("Expenses", summary.total_expenses),
        XyPoint::new("Net", summary.net_amount),
    ])
}

/// One point per breakdown entry, in breakdown order.
fn pie_chart(summary: &Summary, _: &PipelineConfig) -> ChartDataset {
    ChartDataset::Pie(
        summary
            .category_breakdown
            .iter()
            .map(|entry| XyPoint::new(entry.name.clone(), entry.amount))
            .collect(),
    )
}

/// One slice per breakdown entry, in breakdown order, with colors cycling
/// through the palette.
fn donut_chart(summary: &Summary, config: &PipelineConfig) -> ChartDataset {
    ChartDataset::Donut(
        summary
            .category_breakdown
            .iter()
            .enumerate()
            .map(|(index, entry)| DonutSlice {
                name: truncate_label(&entry.name, config.label_max_graphemes),
                amount: entry.amount,
                percentage: entry.percentage,
                color: palette_color(&config.palette, index),
            })
            .collect(),
    )
}

fn line_chart(summary: &Summary, _: &PipelineConfig) -> ChartDataset {
    if summary.timeline.is_empty() {
        return ChartDataset::Line(Vec::new());
    }

    let income = summary
        .timeline
        .iter()
        .map(|point| XyPoint::new(point.date.to_string(), point.income))
        .collect();
    let expenses = summary
        .timeline
        .iter()
        .map(|point| XyPoint::new(point.date.to_string(), point.expenses))
        .collect();

    ChartDataset::Line(vec![
        Series {
            name: "Income".to_owned(),
            points: income,
        },
        Series {
            name: "Expenses".to_owned(),
            points: expenses,
        },
    ])
}

/// The running net amount, accumulated day by day.
fn area_chart(summary: &Summary, _: &PipelineConfig) -> ChartDataset {
    if summary.timeline.is_empty() {
        return ChartDataset::Area(Vec::new());
    }

    let mut cumulative = 0.0;
    let points = summary
        .timeline
        .iter()
        .map(|point| {
            cumulative += point.income - point.expenses;
            XyPoint::new(point.date.to_string(), cumulative)
        })
        .collect();

    ChartDataset::Area(vec![Series {
        name: "Net".to_owned(),
        points,
    }])
}

fn heat_map_chart(summary: &Summary, _: &PipelineConfig) -> ChartDataset {
    ChartDataset::HeatMap(
        summary
            .weekday_expenses
            .iter()
            .map(|cell| HeatPoint {
                x: weekday_label(cell.weekday).to_owned(),
                y: cell.category.clone(),
                heat: cell.amount,
            })
            .collect(),
    )
}

/// Shortens `label` to at most `max_graphemes` grapheme clusters, ending in
/// an ellipsis when shortened.
fn truncate_label(label: &str, max_graphemes: usize) -> String {
    let graphemes: Vec<&str> = label.graphemes(true).collect();

    if graphemes.len() <= max_graphemes {
        return label.to_owned();
    }

    let mut truncated = graphemes[..max_graphemes.saturating_sub(1)].concat();
    truncated.push(ELLIPSIS);
    truncated
}

fn palette_color(palette: &[String], index: usize) -> String {
    if palette.is_empty() {
        return String::new();
    }

    palette[index % palette.len()].clone()
}

#[cfg(test)]
mod tests {
    use time::macros::date;

    use crate::{
        config::PipelineConfig,
        dashboard::{
            aggregation::{CategorySummaryEntry, Summary, TimelinePoint, summarize},
            charts::{
                ChartDataset, ChartKind, DonutSlice, Series, XyPoint, adapter_for, build_chart,
                truncate_label,
            },
        },
        transaction::{RawTransaction, normalize_all},
    };

    fn empty_summary() -> Summary {
        let transactions = normalize_all(&[]);
        summarize(&transactions, &PipelineConfig::default())
    }

    fn summary_with_categories(amounts: &[(&str, f64)]) -> Summary {
        let raw: Vec<RawTransaction> = amounts
            .iter()
            .map(|(category, amount)| RawTransaction::expense(*amount, category))
            .chain([RawTransaction::income(1000.0)])
            .collect();
        let transactions = normalize_all(&raw);
        summarize(&transactions, &PipelineConfig::default())
    }

    fn point(x: &str, y: f64) -> XyPoint {
        XyPoint { x: x.to_owned(), y }
    }

    #[test]
    fn bar_chart_has_income_expenses_and_net_in_order() {
        let summary = summary_with_categories(&[("Food", 100.0), ("Food", 50.0)]);

        let dataset = build_chart(ChartKind::Bar, &summary, &PipelineConfig::default());

        assert_eq!(
            dataset,
            ChartDataset::Bar(vec![
                point("Income", 1000.0),
                point("Expenses", 150.0),
                point("Net", 850.0),
            ])
        );
    }

    #[test]
    fn bar_chart_keeps_negative_net() {
        let summary = summary_with_categories(&[("Rent", 1500.0)]);

        let dataset = build_chart(ChartKind::Bar, &summary, &PipelineConfig::default());

        let ChartDataset::Bar(points) = dataset else {
            panic!("expected a bar dataset, got {dataset:?}");
        };
        assert_eq!(points[2], point("Net", -500.0));
    }

    #[test]
    fn pie_chart_follows_breakdown_order_including_others() {
        let summary = summary_with_categories(&[
            ("A", 100.0),
            ("B", 90.0),
            ("C", 80.0),
            ("D", 70.0),
            ("E", 60.0),
            ("F", 10.0),
        ]);

        let dataset = build_chart(ChartKind::Pie, &summary, &PipelineConfig::default());

        let ChartDataset::Pie(points) = dataset else {
            panic!("expected a pie dataset, got {dataset:?}");
        };
        let labels: Vec<&str> = points.iter().map(|p| p.x.as_str()).collect();
        assert_eq!(labels, vec!["A", "B", "C", "D", "E", "Others"]);
        let total: f64 = points.iter().map(|p| p.y).sum();
        assert_eq!(total, summary.total_expenses);
    }

    #[test]
    fn donut_chart_cycles_palette_and_truncates_labels() {
        let summary = Summary {
            category_breakdown: vec![
                CategorySummaryEntry {
                    name: "Groceries and household supplies".to_owned(),
                    amount: 75.0,
                    percentage: 75.0,
                },
                CategorySummaryEntry {
                    name: "Fun".to_owned(),
                    amount: 25.0,
                    percentage: 25.0,
                },
            ],
            ..summary_with_categories(&[("Groceries and household supplies", 75.0), ("Fun", 25.0)])
        };
        let config = PipelineConfig {
            palette: vec!["#111".to_owned()],
            label_max_graphemes: 10,
            ..Default::default()
        };

        let dataset = build_chart(ChartKind::Donut, &summary, &config);

        assert_eq!(
            dataset,
            ChartDataset::Donut(vec![
                DonutSlice {
                    name: "Groceries…".to_owned(),
                    amount: 75.0,
                    percentage: 75.0,
                    color: "#111".to_owned(),
                },
                DonutSlice {
                    name: "Fun".to_owned(),
                    amount: 25.0,
                    percentage: 25.0,
                    color: "#111".to_owned(),
                },
            ])
        );
    }

    #[test]
    fn truncation_respects_grapheme_clusters() {
        assert_eq!(truncate_label("Café ☕☕☕", 5), "Café…");
        assert_eq!(truncate_label("🇳🇿🇳🇿🇳🇿", 2), "🇳🇿…");
        assert_eq!(truncate_label("Short", 5), "Short");
    }

    #[test]
    fn line_chart_has_income_and_expense_series() {
        let summary = Summary {
            timeline: vec![
                TimelinePoint {
                    date: date!(2024 - 01 - 15),
                    income: 100.0,
                    expenses: 20.0,
                },
                TimelinePoint {
                    date: date!(2024 - 01 - 16),
                    income: 0.0,
                    expenses: 30.0,
                },
            ],
            ..summary_with_categories(&[("Food", 50.0)])
        };

        let dataset = build_chart(ChartKind::Line, &summary, &PipelineConfig::default());

        assert_eq!(
            dataset,
            ChartDataset::Line(vec![
                Series {
                    name: "Income".to_owned(),
                    points: vec![point("2024-01-15", 100.0), point("2024-01-16", 0.0)],
                },
                Series {
                    name: "Expenses".to_owned(),
                    points: vec![point("2024-01-15", 20.0), point("2024-01-16", 30.0)],
                },
            ])
        );
    }

    #[test]
    fn area_chart_accumulates_net() {
        let transactions = normalize_all(&[
            RawTransaction::income(100.0).with_date("2024-01-15"),
            RawTransaction::expense(30.0, "Food").with_date("2024-01-15"),
            RawTransaction::expense(50.0, "Food").with_date("2024-01-16"),
            RawTransaction::expense(40.0, "Food").with_date("2024-01-18"),
        ]);
        let summary = summarize(&transactions, &PipelineConfig::default());

        let dataset = build_chart(ChartKind::Area, &summary, &PipelineConfig::default());

        assert_eq!(
            dataset,
            ChartDataset::Area(vec![Series {
                name: "Net".to_owned(),
                points: vec![
                    point("2024-01-15", 70.0),
                    point("2024-01-16", 20.0),
                    point("2024-01-18", -20.0),
                ],
            }])
        );
    }

    #[test]
    fn heat_map_uses_weekday_and_category() {
        let transactions =
            normalize_all(&[RawTransaction::expense(12.0, "Food").with_date("2024-01-17")]);
        let summary = summarize(&transactions, &PipelineConfig::default());

        let dataset = build_chart(ChartKind::HeatMap, &summary, &PipelineConfig::default());

        let ChartDataset::HeatMap(cells) = dataset else {
            panic!("expected a heat map dataset, got {dataset:?}");
        };
        assert_eq!(cells.len(), 7);
        assert_eq!(cells[2].x, "Wed");
        assert_eq!(cells[2].y, "Food");
        assert_eq!(cells[2].heat, 12.0);
        assert_eq!(cells[0].heat, 0.0);
    }

    #[test]
    fn every_adapter_returns_empty_dataset_for_empty_summary() {
        let summary = empty_summary();

        for kind in ChartKind::ALL {
            let dataset = adapter_for(kind)(&summary, &PipelineConfig::default());
            assert_eq!(dataset.kind(), kind);
            assert!(dataset.is_empty(), "{kind:?} should be empty: {dataset:?}");
        }
    }

    #[test]
    fn chart_kind_parses_tokens() {
        assert_eq!("heat-map".parse::<ChartKind>(), Ok(ChartKind::HeatMap));
        assert_eq!("Donut".parse::<ChartKind>(), Ok(ChartKind::Donut));
        assert!("radar".parse::<ChartKind>().is_err());
    }

    #[test]
    fn serializes_with_kind_tag() {
        let summary = summary_with_categories(&[("Food", 10.0)]);

        let json = serde_json::to_value(build_chart(
            ChartKind::Pie,
            &summary,
            &PipelineConfig::default(),
        ))
        .unwrap();

        assert_eq!(json["kind"], "pie");
        assert_eq!(json["data"][0]["x"], "Food");
        assert_eq!(json["data"][0]["y"], 10.0);
    }
}
