//! Defines the raw and normalized transaction models.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::transaction::timestamp::Timestamp;

// ============================================================================
// RAW INPUT
// ============================================================================

/// An amount as sent by the backend: usually a number, sometimes a numeric
/// string, occasionally something else entirely.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// A JSON number.
    Number(f64),
    /// A string that may hold a number, e.g. `"12.50"`.
    Text(String),
    /// Any other JSON value. Never coercible.
    Other(Value),
}

impl From<f64> for RawAmount {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RawAmount {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// A category as sent by the backend: either a bare name or an object
/// carrying a display name.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawCategory {
    /// A plain category name.
    Name(String),
    /// A category object, e.g. `{"id": 3, "name": "Food"}`.
    Object {
        /// The display name of the category.
        #[serde(default)]
        name: Option<String>,
    },
    /// Any other JSON value.
    Other(Value),
}

/// An expense or income exactly as delivered by the remote API.
///
/// Every field is optional so that a single odd record never stops a batch
/// from loading. Use [crate::normalize] to get the canonical view.
///
/// Builder-style helpers are provided for hosts and tests:
///
/// ```
/// use expense_insights::RawTransaction;
///
/// let coffee = RawTransaction::expense(4.5, "Food").with_date("2024-01-15");
/// let salary = RawTransaction::income(3000.0).with_transaction_date("2024-01-15T09:00:00Z");
/// # let _ = (coffee, salary);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawTransaction {
    /// The backend identifier, string or number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<Value>,
    /// Free text describing the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// The amount of money spent or earned.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<RawAmount>,
    /// The category, as a name or an object.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<RawCategory>,
    /// The exact time of the transaction, as an ISO 8601 string.
    #[serde(
        default,
        alias = "transaction_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub transaction_date: Option<String>,
    /// A coarser date for the transaction, used when `transactionDate` is
    /// absent or unreadable.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date: Option<String>,
    /// Whether money left the account.
    #[serde(default, alias = "is_expense", skip_serializing_if = "Option::is_none")]
    pub is_expense: Option<bool>,
    /// A textual kind such as `"expense"` or `"income"`, consulted only when
    /// `isExpense` is missing.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<String>,
}

impl RawTransaction {
    /// Create an expense in `category`.
    pub fn expense(amount: impl Into<RawAmount>, category: &str) -> Self {
        Self {
            amount: Some(amount.into()),
            category: Some(RawCategory::Name(category.to_owned())),
            is_expense: Some(true),
            ..Default::default()
        }
    }

    /// Create an uncategorized income.
    pub fn income(amount: impl Into<RawAmount>) -> Self {
        Self {
            amount: Some(amount.into()),
            is_expense: Some(false),
            ..Default::default()
        }
    }

    /// Set the category to an object carrying `name`.
    pub fn with_category_object(mut self, name: &str) -> Self {
        self.category = Some(RawCategory::Object {
            name: Some(name.to_owned()),
        });
        self
    }

    /// Set the exact transaction time.
    pub fn with_transaction_date(mut self, timestamp: &str) -> Self {
        self.transaction_date = Some(timestamp.to_owned());
        self
    }

    /// Set the coarse transaction date.
    pub fn with_date(mut self, date: &str) -> Self {
        self.date = Some(date.to_owned());
        self
    }

    /// Set the backend identifier.
    pub fn with_id(mut self, id: impl Into<Value>) -> Self {
        self.id = Some(id.into());
        self
    }
}

// ============================================================================
// CANONICAL RECORD
// ============================================================================

/// The type-coerced view of a [RawTransaction].
///
/// Derived on every pipeline run and never stored.
#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedTransaction {
    /// The backend identifier rendered as text.
    pub id: Option<String>,
    /// The free text description.
    pub description: Option<String>,
    /// The amount, or `None` when the raw amount was not a finite number.
    ///
    /// Records without an amount still take part in filtering but are
    /// skipped by every sum.
    pub amount: Option<f64>,
    /// The resolved category name. Never empty.
    pub category: String,
    /// When the transaction happened, if that could be determined.
    pub timestamp: Timestamp,
    /// Whether the transaction is an expense (`true`) or income (`false`).
    pub is_expense: bool,
}
