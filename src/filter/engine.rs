//! Applies [FilterOptions] to normalized transactions.

use std::collections::BTreeSet;

use time::OffsetDateTime;

use crate::{
    filter::options::{FilterOptions, TimePeriod},
    transaction::{NormalizedTransaction, Timestamp},
};

/// Returns the transactions that pass both the date and the category filter,
/// in their original order.
///
/// Date filtering applies only when the period is not [TimePeriod::All] and
/// both bounds are set. The interval is closed at both ends. A record with
/// only a calendar date matches when that date falls between the calendar
/// dates of the bounds. Records whose timestamp is missing or unreadable are
/// always kept; an unreadable one is reported with a warning. An empty
/// category set lets every category through.
pub fn filter_transactions<'a>(
    transactions: &'a [NormalizedTransaction],
    filters: &FilterOptions,
) -> Vec<&'a NormalizedTransaction> {
    let bounds = match (filters.time_period, filters.start_date, filters.end_date) {
        (TimePeriod::All, _, _) => None,
        (_, Some(start), Some(end)) => Some((start, end)),
        _ => None,
    };

    if let Some((start, end)) = bounds {
        if start > end {
            tracing::warn!(
                "The date filter starts ({start}) after it ends ({end}), so no dated transaction can match."
            );
        }
    }

    let filtered: Vec<&NormalizedTransaction> = transactions
        .iter()
        .filter(|transaction| {
            is_within_bounds(transaction, bounds)
                && is_allowed_category(transaction, &filters.categories)
        })
        .collect();

    tracing::debug!(
        "Filtered {} transactions down to {} (period: {}, categories: {})",
        transactions.len(),
        filtered.len(),
        filters.time_period.as_query_value(),
        filters.categories.len()
    );

    filtered
}

fn is_within_bounds(
    transaction: &NormalizedTransaction,
    bounds: Option<(OffsetDateTime, OffsetDateTime)>,
) -> bool {
    let Some((start, end)) = bounds else {
        return true;
    };

    match &transaction.timestamp {
        Timestamp::Parsed(instant) => start <= *instant && *instant <= end,
        Timestamp::Date(date) => start.date() <= *date && *date <= end.date(),
        Timestamp::Unparseable(text) => {
            tracing::warn!(
                "Could not read the date {text:?} of transaction {:?}, keeping it in the results.",
                transaction.id.as_deref().unwrap_or("without an ID")
            );
            true
        }
        Timestamp::Missing => true,
    }
}

fn is_allowed_category(transaction: &NormalizedTransaction, categories: &BTreeSet<String>) -> bool {
    categories.is_empty() || categories.contains(&transaction.category)
}
