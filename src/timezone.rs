//! Resolves the "current time" the temporal filters are relative to.

use time::{OffsetDateTime, UtcOffset};
use time_tz::{Offset, TimeZone};

use crate::Error;

/// Looks up the current UTC offset of an IANA timezone such as
/// "Pacific/Auckland".
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the name is not a known timezone.
pub fn get_local_offset(canonical_timezone: &str) -> Result<UtcOffset, Error> {
    time_tz::timezones::get_by_name(canonical_timezone)
        .map(|tz| tz.get_offset_utc(&OffsetDateTime::now_utc()).to_utc())
        .ok_or_else(|| Error::InvalidTimezone(canonical_timezone.to_owned()))
}

/// The current time in `canonical_timezone`, or in the system's local offset
/// when no timezone is given.
///
/// Falls back to UTC if the local offset cannot be determined.
///
/// # Errors
/// Returns [Error::InvalidTimezone] if the timezone name is unknown.
pub fn now_in_timezone(canonical_timezone: Option<&str>) -> Result<OffsetDateTime, Error> {
    match canonical_timezone {
        Some(name) => Ok(OffsetDateTime::now_utc().to_offset(get_local_offset(name)?)),
        None => Ok(OffsetDateTime::now_local().unwrap_or_else(|error| {
            tracing::debug!("Could not determine the local offset ({error}), using UTC.");
            OffsetDateTime::now_utc()
        })),
    }
}
