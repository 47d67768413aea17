//! Resolves named time periods into concrete date-time intervals.
//!
//! All bounds are expressed in the UTC offset of the `now` instant passed in,
//! so a dashboard in Auckland gets Auckland midnights. Weeks start on Monday.

use serde::{Deserialize, Serialize};
use time::{Date, Duration, Month, OffsetDateTime, Time, macros::time};

use crate::filter::TimePeriod;

/// The last representable instant of a day at millisecond resolution.
const END_OF_DAY: Time = time!(23:59:59.999);

/// A closed interval `[start, end]` where either side may be open.
///
/// Both bounds being `None` means "no temporal restriction".
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Interval {
    /// The first instant included in the interval.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub start: Option<OffsetDateTime>,
    /// The last instant included in the interval.
    #[serde(default, with = "time::serde::rfc3339::option")]
    pub end: Option<OffsetDateTime>,
}

impl Interval {
    /// An interval without bounds.
    pub const UNBOUNDED: Self = Self {
        start: None,
        end: None,
    };

    /// Whether both bounds are set.
    pub fn is_bounded(&self) -> bool {
        self.start.is_some() && self.end.is_some()
    }
}

/// Maps `period` to an interval relative to `now`.
///
/// `current` holds the bounds the user has already picked. Only
/// [TimePeriod::Custom] looks at it: existing bounds are kept and any missing
/// bound defaults to one month before `now` (start) or `now` itself (end).
pub fn resolve_period(period: TimePeriod, now: OffsetDateTime, current: Interval) -> Interval {
    match period {
        TimePeriod::Day => day_bounds(now),
        TimePeriod::Week => week_bounds(now),
        TimePeriod::Month => month_bounds(now),
        TimePeriod::Year => year_bounds(now),
        TimePeriod::Custom => custom_bounds(now, current),
        TimePeriod::All => Interval::UNBOUNDED,
    }
}

fn day_bounds(now: OffsetDateTime) -> Interval {
    let today = now.date();
    span(today, today, now)
}

fn week_bounds(now: OffsetDateTime) -> Interval {
    let anchor_date = now.date();
    let days_since_monday = anchor_date.weekday().number_days_from_monday() as i64;
    let start = anchor_date - Duration::days(days_since_monday);
    let end = start + Duration::days(6);

    span(start, end, now)
}

fn month_bounds(now: OffsetDateTime) -> Interval {
    let anchor_date = now.date();
    let start = anchor_date - Duration::days(i64::from(anchor_date.day()) - 1);
    let month_length = last_day_of_month(anchor_date.year(), anchor_date.month());
    let end = start + Duration::days(i64::from(month_length) - 1);

    span(start, end, now)
}

fn year_bounds(now: OffsetDateTime) -> Interval {
    let anchor_date = now.date();
    let start = anchor_date - Duration::days(i64::from(anchor_date.ordinal()) - 1);
    let year_length = if is_leap_year(anchor_date.year()) {
        366
    } else {
        365
    };
    let end = start + Duration::days(year_length - 1);

    span(start, end, now)
}

fn custom_bounds(now: OffsetDateTime, current: Interval) -> Interval {
    Interval {
        start: Some(current.start.unwrap_or_else(|| one_month_before(now))),
        end: Some(current.end.unwrap_or(now)),
    }
}

/// The whole days from `start` to `end` in the offset of `now`.
fn span(start: Date, end: Date, now: OffsetDateTime) -> Interval {
    Interval {
        start: Some(start.midnight().assume_offset(now.offset())),
        end: Some(end.with_time(END_OF_DAY).assume_offset(now.offset())),
    }
}

/// The same wall-clock time one calendar month earlier, with the day clamped
/// to the length of the earlier month (31 March becomes 28/29 February).
pub(crate) fn one_month_before(now: OffsetDateTime) -> OffsetDateTime {
    let date = now.date();
    let (year, month) = match date.month() {
        Month::January => (date.year() - 1, Month::December),
        month => (date.year(), month.previous()),
    };
    let day = date.day().min(last_day_of_month(year, month));

    match Date::from_calendar_date(year, month, day) {
        Ok(earlier) => now.replace_date(earlier),
        Err(_) => now,
    }
}

fn last_day_of_month(year: i32, month: Month) -> u8 {
    match month {
        Month::January
        | Month::March
        | Month::May
        | Month::July
        | Month::August
        | Month::October
        | Month::December => 31,
        Month::April | Month::June | Month::September | Month::November => 30,
        Month::February => {
            if is_leap_year(year) {
                29
            } else {
                28
            }
        }
    }
}

fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}
