//! Tuning knobs for aggregation and chart preparation.

use serde::{Deserialize, Serialize};

use crate::{Error, dashboard::OTHERS_LABEL};

/// Colors cycled through by the donut adapter, in slice order.
const DEFAULT_PALETTE: [&str; 8] = [
    "#4e79a7", "#f28e2b", "#e15759", "#76b7b2", "#59a14f", "#edc948", "#b07aa1", "#9c755f",
];

/// Settings shared by the aggregator, the chart adapters and the
/// chart-availability policy.
///
/// Every field has a default, so a partial JSON document is a valid config.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PipelineConfig {
    /// How many of the largest expense categories are kept verbatim before
    /// the remainder is folded into the "Others" entry.
    pub top_categories: usize,
    /// The name of the synthetic remainder entry in the category breakdown.
    pub others_label: String,
    /// Minimum number of filtered records before line and area charts are
    /// offered.
    pub min_trend_records: usize,
    /// Minimum number of filtered records before the heat map is offered.
    pub min_heat_map_records: usize,
    /// Longest donut legend label, in grapheme clusters, before truncation.
    pub label_max_graphemes: usize,
    /// Donut slice colors.
    pub palette: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            top_categories: 5,
            others_label: OTHERS_LABEL.to_owned(),
            min_trend_records: 3,
            min_heat_map_records: 10,
            label_max_graphemes: 16,
            palette: DEFAULT_PALETTE.iter().map(|color| color.to_string()).collect(),
        }
    }
}

impl PipelineConfig {
    /// Checks that the config can drive the pipeline.
    ///
    /// # Errors
    /// Returns [Error::InvalidConfig] if no categories would be kept, the
    /// "Others" label is blank, the label limit is zero or the palette is
    /// empty.
    pub fn validate(&self) -> Result<(), Error> {
        if self.top_categories == 0 {
            return Err(Error::InvalidConfig(
                "topCategories must be at least 1".to_owned(),
            ));
        }

        if self.others_label.trim().is_empty() {
            return Err(Error::InvalidConfig(
                "othersLabel cannot be empty".to_owned(),
            ));
        }

        if self.label_max_graphemes == 0 {
            return Err(Error::InvalidConfig(
                "labelMaxGraphemes must be at least 1".to_owned(),
            ));
        }

        if self.palette.is_empty() {
            return Err(Error::InvalidConfig(
                "palette must contain at least one color".to_owned(),
            ));
        }

        Ok(())
    }
}
