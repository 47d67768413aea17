//! Timestamp resolution for raw transactions.

use time::{
    Date, OffsetDateTime, PrimitiveDateTime,
    format_description::{BorrowedFormatItem, well_known::Rfc3339},
    macros::format_description,
};

const DATE_TIME_WITHOUT_OFFSET: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day]T[hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);
const SPACED_DATE_TIME_WITHOUT_OFFSET: &[BorrowedFormatItem<'_>] = format_description!(
    "[year]-[month]-[day] [hour]:[minute][optional [:[second][optional [.[subsecond]]]]]"
);
const DATE_ONLY: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// When a transaction happened, as far as the raw record lets us tell.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Timestamp {
    /// A timestamp was found and parsed.
    Parsed(OffsetDateTime),
    /// Only a calendar date was given. It matches the same calendar days
    /// in whatever offset the filter bounds use.
    Date(Date),
    /// Timestamp text was present but none of it could be parsed. The
    /// original text is kept for diagnostics.
    Unparseable(String),
    /// The record carried no timestamp at all.
    Missing,
}

impl Timestamp {
    /// Resolves the timestamp from the precise field, falling back to the
    /// coarse one.
    ///
    /// The first field that parses wins. If text is present but neither
    /// parses, the first non-blank text is reported as unparseable.
    pub fn resolve(precise: Option<&str>, coarse: Option<&str>) -> Self {
        let candidates: Vec<&str> = [precise, coarse]
            .into_iter()
            .flatten()
            .map(str::trim)
            .filter(|text| !text.is_empty())
            .collect();

        if let Some(parsed) = candidates.iter().find_map(|text| parse_record_timestamp(text)) {
            return parsed;
        }

        match candidates.first() {
            Some(text) => Self::Unparseable((*text).to_owned()),
            None => Self::Missing,
        }
    }

    /// The parsed instant, if any. Bare dates have no instant.
    pub fn instant(&self) -> Option<OffsetDateTime> {
        match self {
            Self::Parsed(instant) => Some(*instant),
            Self::Date(_) | Self::Unparseable(_) | Self::Missing => None,
        }
    }

    /// The calendar day, in the offset the timestamp was recorded with.
    pub fn date(&self) -> Option<Date> {
        match self {
            Self::Parsed(instant) => Some(instant.date()),
            Self::Date(date) => Some(*date),
            Self::Unparseable(_) | Self::Missing => None,
        }
    }
}

/// Like [parse_timestamp], but keeps a bare date as a calendar date.
fn parse_record_timestamp(text: &str) -> Option<Timestamp> {
    match Date::parse(text.trim(), DATE_ONLY) {
        Ok(date) => Some(Timestamp::Date(date)),
        Err(_) => parse_timestamp(text).map(Timestamp::Parsed),
    }
}

/// Parses an ISO 8601 timestamp.
///
/// Accepts RFC 3339 (`2024-01-15T09:30:00Z`, `2024-01-15T09:30:00.000+13:00`),
/// a date-time without an offset (`2024-01-15T09:30:00`), and a bare date
/// (`2024-01-15`). Values without an offset are taken to be UTC, bare dates
/// at midnight.
pub fn parse_timestamp(text: &str) -> Option<OffsetDateTime> {
    let text = text.trim();

    if let Ok(instant) = OffsetDateTime::parse(text, &Rfc3339) {
        return Some(instant);
    }

    if let Ok(date_time) = PrimitiveDateTime::parse(text, DATE_TIME_WITHOUT_OFFSET)
        .or_else(|_| PrimitiveDateTime::parse(text, SPACED_DATE_TIME_WITHOUT_OFFSET))
    {
        return Some(date_time.assume_utc());
    }

    Date::parse(text, DATE_ONLY)
        .ok()
        .map(|date| date.midnight().assume_utc())
}
