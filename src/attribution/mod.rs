//! Month-over-month "what changed" category attribution

mod aggregate;
pub mod loader;

pub use aggregate::{attribute_changes, compute_what_changed, normalize_category};
pub use loader::{load_transactions, load_transactions_from_reader};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::money::{serialize_cents, Money};
use crate::period::Period;

/// Synthetic category every income record is aggregated under
pub const INCOME_CATEGORY: &str = "Income";

/// Expense records labelled "Income" aggregate here instead
pub const EXPENSE_LABELLED_INCOME: &str = "Income (expense)";

/// Category used for expense records with a blank label
pub const UNCATEGORIZED: &str = "Uncategorized";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
}

/// A categorized transaction as supplied by the caller
///
/// The sign of `amount` is informational only; aggregation goes by `kind`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionRecord {
    pub date: NaiveDate,
    pub amount: Money,
    pub category: String,
    #[serde(rename = "type")]
    pub kind: TransactionType,
}

/// Change in one category between the two months
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryChange {
    pub category: String,
    #[serde(serialize_with = "serialize_cents")]
    pub current_total: Money,
    #[serde(serialize_with = "serialize_cents")]
    pub previous_total: Money,
    #[serde(serialize_with = "serialize_cents")]
    pub delta: Money,
    /// Absent when the previous total is zero
    #[serde(skip_serializing_if = "Option::is_none")]
    pub percent_change: Option<f64>,
}

/// Income and expense totals for one month
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct PeriodTotals {
    #[serde(serialize_with = "serialize_cents")]
    pub income: Money,
    #[serde(serialize_with = "serialize_cents")]
    pub expenses: Money,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct ComparisonTotals {
    pub current: PeriodTotals,
    pub previous: PeriodTotals,
}

/// Response body of a what-changed request
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WhatChanged {
    pub month: Period,
    pub previous_month: Period,
    /// Ranked by |delta| descending, ties by category name ascending
    pub top_changes: Vec<CategoryChange>,
    pub totals: ComparisonTotals,
}
