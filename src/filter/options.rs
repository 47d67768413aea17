//! The filter configuration chosen in the dashboard UI.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::period::{Interval, resolve_period};

/// The time period presets offered by the filter UI.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TimePeriod {
    /// Today.
    Day,
    /// The current Monday-to-Sunday week.
    Week,
    /// The current calendar month.
    Month,
    /// The current calendar year.
    Year,
    /// Bounds picked by the user.
    Custom,
    /// No time restriction.
    #[default]
    All,
}

impl TimePeriod {
    /// Every period, in the order the UI lists them.
    pub const ALL: [TimePeriod; 6] = [
        Self::Day,
        Self::Week,
        Self::Month,
        Self::Year,
        Self::Custom,
        Self::All,
    ];

    /// The token used in filter files and on the command line.
    pub fn as_query_value(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::Week => "week",
            Self::Month => "month",
            Self::Year => "year",
            Self::Custom => "custom",
            Self::All => "all",
        }
    }

    /// A human readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Day => "Today",
            Self::Week => "This week",
            Self::Month => "This month",
            Self::Year => "This year",
            Self::Custom => "Custom range",
            Self::All => "All time",
        }
    }
}

impl std::str::FromStr for TimePeriod {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|period| period.as_query_value().eq_ignore_ascii_case(value.trim()))
            .ok_or_else(|| {
                format!("unknown time period \"{value}\", expected one of day, week, month, year, custom, all")
            })
    }
}

/// The filter configuration applied to the transaction list.
///
/// When `time_period` is [TimePeriod::All] both bounds are `None`. For the
/// other periods both bounds are set, except while a custom range is being
/// edited. An empty `categories` set means every category passes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FilterOptions {
    /// The selected preset.
    pub time_period: TimePeriod,
    /// The first instant to include.
    #[serde(with = "time::serde::rfc3339::option")]
    pub start_date: Option<OffsetDateTime>,
    /// The last instant to include.
    #[serde(with = "time::serde::rfc3339::option")]
    pub end_date: Option<OffsetDateTime>,
    /// The category allow-list.
    pub categories: BTreeSet<String>,
}

/// The filters a dashboard starts with: all time, every category.
///
/// Always the same value, regardless of the current date.
pub fn default_filters() -> FilterOptions {
    FilterOptions::default()
}

impl FilterOptions {
    /// The current bounds as an [Interval].
    pub fn interval(&self) -> Interval {
        Interval {
            start: self.start_date,
            end: self.end_date,
        }
    }

    /// Whether both date bounds are set, i.e. whether temporal filtering
    /// applies.
    pub fn has_date_bounds(&self) -> bool {
        self.interval().is_bounded()
    }

    /// Switches to `period` and recomputes the bounds relative to `now`.
    ///
    /// Selecting [TimePeriod::Custom] keeps any bounds already picked and
    /// only fills in the missing ones.
    pub fn select_period(&mut self, period: TimePeriod, now: OffsetDateTime) {
        let interval = resolve_period(period, now, self.interval());
        self.time_period = period;
        self.start_date = interval.start;
        self.end_date = interval.end;
    }

    /// Sets the start bound from a manual date pick.
    ///
    /// The end bound is left alone and the period becomes
    /// [TimePeriod::Custom], even if a named period was active.
    pub fn set_start_date(&mut self, start: OffsetDateTime) {
        self.time_period = TimePeriod::Custom;
        self.start_date = Some(start);
    }

    /// Sets the end bound from a manual date pick.
    ///
    /// The start bound is left alone and the period becomes
    /// [TimePeriod::Custom], even if a named period was active.
    pub fn set_end_date(&mut self, end: OffsetDateTime) {
        self.time_period = TimePeriod::Custom;
        self.end_date = Some(end);
    }

    /// Adds `category` to the allow-list, or removes it if already present.
    pub fn toggle_category(&mut self, category: &str) {
        if !self.categories.remove(category) {
            self.categories.insert(category.to_owned());
        }
    }

    /// Removes every category restriction.
    pub fn clear_categories(&mut self) {
        self.categories.clear();
    }

    /// Returns a copy with the bounds repaired for the current period.
    ///
    /// `all` drops any stray bounds. A named period with a missing bound is
    /// recomputed from `now`, and `custom` fills only its missing bounds.
    pub fn resolved(&self, now: OffsetDateTime) -> FilterOptions {
        let mut filters = self.clone();

        match self.time_period {
            TimePeriod::All => {
                filters.start_date = None;
                filters.end_date = None;
            }
            TimePeriod::Custom => filters.select_period(TimePeriod::Custom, now),
            period if !self.has_date_bounds() => filters.select_period(period, now),
            _ => {}
        }

        filters
    }
}
