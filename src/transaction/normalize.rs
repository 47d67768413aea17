//! Coerces raw transactions into [NormalizedTransaction]s.

use serde_json::Value;

use crate::transaction::{
    core::{NormalizedTransaction, RawAmount, RawCategory, RawTransaction},
    timestamp::Timestamp,
};

/// The category name used when a record has no usable category.
pub const UNCATEGORIZED_LABEL: &str = "Uncategorized";

/// Builds the canonical view of a single raw transaction.
///
/// Never fails. A non-finite or non-numeric amount becomes `None`, a missing
/// category becomes [UNCATEGORIZED_LABEL], and an unreadable timestamp is
/// kept as [Timestamp::Unparseable] so the filter can let it through.
pub fn normalize(raw: &RawTransaction) -> NormalizedTransaction {
    NormalizedTransaction {
        id: raw.id.as_ref().map(id_to_string),
        description: raw.description.clone(),
        amount: raw.amount.as_ref().and_then(parse_amount),
        category: resolve_category(raw.category.as_ref()),
        timestamp: Timestamp::resolve(raw.transaction_date.as_deref(), raw.date.as_deref()),
        is_expense: resolve_is_expense(raw),
    }
}

/// Normalizes every transaction, preserving order.
pub fn normalize_all(raw_transactions: &[RawTransaction]) -> Vec<NormalizedTransaction> {
    let normalized: Vec<NormalizedTransaction> = raw_transactions.iter().map(normalize).collect();

    let rejected = normalized.iter().filter(|t| t.amount.is_none()).count();
    if rejected > 0 {
        tracing::debug!(
            "{rejected} of {} transactions have no usable amount and will be left out of totals",
            normalized.len()
        );
    }

    normalized
}

/// Coerces a raw amount to a finite number.
///
/// Numeric strings are trimmed before parsing. Empty strings, non-numeric
/// text, `NaN` and infinities are all rejected.
pub fn parse_amount(amount: &RawAmount) -> Option<f64> {
    let value = match amount {
        RawAmount::Number(number) => *number,
        RawAmount::Text(text) => text.trim().parse::<f64>().ok()?,
        RawAmount::Other(_) => return None,
    };

    value.is_finite().then_some(value)
}

fn resolve_category(category: Option<&RawCategory>) -> String {
    let name = match category {
        Some(RawCategory::Name(name)) => Some(name.as_str()),
        Some(RawCategory::Object { name }) => name.as_deref(),
        Some(RawCategory::Other(_)) | None => None,
    };

    match name {
        Some(name) if !name.trim().is_empty() => name.to_owned(),
        _ => UNCATEGORIZED_LABEL.to_owned(),
    }
}

fn resolve_is_expense(raw: &RawTransaction) -> bool {
    if let Some(is_expense) = raw.is_expense {
        return is_expense;
    }

    raw.kind.as_deref().is_some_and(|kind| {
        let kind = kind.trim();
        kind.eq_ignore_ascii_case("expense") || kind.eq_ignore_ascii_case("debit")
    })
}

fn id_to_string(id: &Value) -> String {
    match id {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}
