//! Category aggregation and change ranking

use std::collections::BTreeMap;

use log::{debug, info};

use super::{
    CategoryChange, ComparisonTotals, PeriodTotals, TransactionRecord, TransactionType, WhatChanged,
    EXPENSE_LABELLED_INCOME, INCOME_CATEGORY, UNCATEGORIZED,
};
use crate::error::{EngineError, Result};
use crate::money::Money;
use crate::period::Period;

/// Attribute changes between two months given as `YYYY-MM` tokens
///
/// Both tokens are parsed strictly before any transaction is looked at.
pub fn compute_what_changed(
    transactions: &[TransactionRecord],
    month: &str,
    previous_month: &str,
) -> Result<WhatChanged> {
    let month = Period::parse(month)?;
    let previous_month = Period::parse(previous_month)?;
    attribute_changes(transactions, month, previous_month)
}

/// Attribute changes between two months
///
/// Transactions outside both months are ignored. Expenses aggregate by
/// category at absolute value; income collapses into a single "Income" line.
/// Fails on a non-finite amount or when a running total overflows.
pub fn attribute_changes(
    transactions: &[TransactionRecord],
    month: Period,
    previous_month: Period,
) -> Result<WhatChanged> {
    // category -> (current, previous)
    let mut by_category: BTreeMap<String, (Money, Money)> = BTreeMap::new();
    let mut totals = ComparisonTotals::default();
    let mut ignored = 0usize;

    for (index, tx) in transactions.iter().enumerate() {
        if !tx.amount.is_finite() {
            return Err(EngineError::InvalidTransaction {
                index,
                reason: format!("amount {} is not a finite number", tx.amount),
            });
        }

        let in_current = month.contains(tx.date);
        let in_previous = previous_month.contains(tx.date);
        if !in_current && !in_previous {
            ignored += 1;
            continue;
        }

        let amount = tx.amount.abs();
        let key = match tx.kind {
            TransactionType::Income => INCOME_CATEGORY.to_string(),
            TransactionType::Expense => expense_category(&tx.category),
        };
        let entry = by_category.entry(key).or_insert((0.0, 0.0));

        if in_current {
            entry.0 += amount;
            add_to_totals(&mut totals.current, tx.kind, amount);
        }
        if in_previous {
            entry.1 += amount;
            add_to_totals(&mut totals.previous, tx.kind, amount);
        }

        let sums = [
            entry.0,
            entry.1,
            totals.current.income,
            totals.current.expenses,
            totals.previous.income,
            totals.previous.expenses,
        ];
        if sums.iter().any(|v| !v.is_finite()) {
            return Err(EngineError::InvalidTransaction {
                index,
                reason: "totals overflow".to_string(),
            });
        }
    }

    let mut top_changes: Vec<CategoryChange> = by_category
        .into_iter()
        .filter(|(_, (current, previous))| *current != 0.0 || *previous != 0.0)
        .map(|(category, (current, previous))| {
            let delta = current - previous;
            CategoryChange {
                category,
                current_total: current,
                previous_total: previous,
                delta,
                percent_change: (previous != 0.0)
                    .then(|| delta / previous * 100.0)
                    .filter(|p| p.is_finite()),
            }
        })
        .collect();

    top_changes.sort_by(|a, b| {
        b.delta
            .abs()
            .total_cmp(&a.delta.abs())
            .then_with(|| a.category.cmp(&b.category))
    });

    debug!("Ignored {} transactions outside {} and {}", ignored, month, previous_month);
    info!(
        "What changed {} vs {}: {} categories from {} transactions",
        month,
        previous_month,
        top_changes.len(),
        transactions.len()
    );

    Ok(WhatChanged {
        month,
        previous_month,
        top_changes,
        totals,
    })
}

/// Trimmed category label; blank labels become "Uncategorized"
pub fn normalize_category(raw: &str) -> String {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        UNCATEGORIZED.to_string()
    } else {
        trimmed.to_string()
    }
}

// Keeps expenses out of the synthetic income line
fn expense_category(raw: &str) -> String {
    let category = normalize_category(raw);
    if category == INCOME_CATEGORY {
        EXPENSE_LABELLED_INCOME.to_string()
    } else {
        category
    }
}

fn add_to_totals(totals: &mut PeriodTotals, kind: TransactionType, amount: Money) {
    match kind {
        TransactionType::Income => totals.income += amount,
        TransactionType::Expense => totals.expenses += amount,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn tx(date: &str, amount: f64, category: &str, kind: TransactionType) -> TransactionRecord {
        TransactionRecord {
            date: NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap(),
            amount,
            category: category.to_string(),
            kind,
        }
    }

    fn sample() -> Vec<TransactionRecord> {
        vec![
            tx("2025-05-02", -120.0, "Dining", TransactionType::Expense),
            tx("2025-05-10", 1800.0, "Salary", TransactionType::Income),
            tx("2025-04-12", -80.0, "Dining", TransactionType::Expense),
        ]
    }

    #[test]
    fn test_income_dominates() {
        let result = compute_what_changed(&sample(), "2025-05", "2025-04").unwrap();

        assert_eq!(result.top_changes.len(), 2);
        let income = &result.top_changes[0];
        assert_eq!(income.category, "Income");
        assert_eq!(income.current_total, 1800.0);
        assert_eq!(income.previous_total, 0.0);
        assert_eq!(income.delta, 1800.0);
        assert_eq!(income.percent_change, None);

        let dining = &result.top_changes[1];
        assert_eq!(dining.category, "Dining");
        assert_eq!(dining.current_total, 120.0);
        assert_eq!(dining.previous_total, 80.0);
        assert_eq!(dining.delta, 40.0);
        assert_eq!(dining.percent_change, Some(50.0));

        assert_eq!(result.totals.current, PeriodTotals { income: 1800.0, expenses: 120.0 });
        assert_eq!(result.totals.previous, PeriodTotals { income: 0.0, expenses: 80.0 });
    }

    #[test]
    fn test_rejects_loose_month_tokens() {
        assert_eq!(
            compute_what_changed(&sample(), "2025/05", "2025-04"),
            Err(EngineError::InvalidPeriodFormat("2025/05".to_string()))
        );
        assert_eq!(
            compute_what_changed(&sample(), "2025-05", "April"),
            Err(EngineError::InvalidPeriodFormat("April".to_string()))
        );
    }

    #[test]
    fn test_empty_input() {
        let result = compute_what_changed(&[], "2025-05", "2025-04").unwrap();
        assert!(result.top_changes.is_empty());
    }

    #[test]
    fn test_sign_normalized_by_type() {
        // Same expense recorded with both sign conventions
        let txs = vec![
            tx("2025-05-01", -50.0, "Groceries", TransactionType::Expense),
            tx("2025-05-03", 50.0, "Groceries", TransactionType::Expense),
            tx("2025-05-04", -900.0, "Freelance", TransactionType::Income),
        ];
        let result = compute_what_changed(&txs, "2025-05", "2025-04").unwrap();
        let by_name: BTreeMap<&str, f64> = result
            .top_changes
            .iter()
            .map(|c| (c.category.as_str(), c.current_total))
            .collect();
        assert_eq!(by_name["Groceries"], 100.0);
        assert_eq!(by_name["Income"], 900.0);
        assert!(!by_name.contains_key("Freelance"));
    }

    #[test]
    fn test_ties_broken_by_name() {
        let txs = vec![
            tx("2025-05-01", -30.0, "Transport", TransactionType::Expense),
            tx("2025-05-01", -30.0, "Books", TransactionType::Expense),
            tx("2025-04-01", -30.0, "Coffee", TransactionType::Expense),
            tx("2025-05-01", -10.0, "Apps", TransactionType::Expense),
        ];
        let result = compute_what_changed(&txs, "2025-05", "2025-04").unwrap();
        let order: Vec<&str> = result.top_changes.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Books", "Coffee", "Transport", "Apps"]);
        assert_eq!(result.top_changes[1].delta, -30.0);
        assert_eq!(result.top_changes[1].percent_change, Some(-100.0));
    }

    #[test]
    fn test_outside_months_and_zero_activity_excluded() {
        let txs = vec![
            tx("2025-03-31", -500.0, "Rent", TransactionType::Expense),
            tx("2025-06-01", -500.0, "Rent", TransactionType::Expense),
            tx("2025-05-15", 0.0, "Refunds", TransactionType::Expense),
            tx("2025-05-15", -20.0, "  Dining ", TransactionType::Expense),
            tx("2025-04-15", -5.0, "   ", TransactionType::Expense),
        ];
        let result = compute_what_changed(&txs, "2025-05", "2025-04").unwrap();
        let order: Vec<&str> = result.top_changes.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(order, vec!["Dining", "Uncategorized"]);
    }

    #[test]
    fn test_year_boundary() {
        let txs = vec![
            tx("2025-01-05", -60.0, "Utilities", TransactionType::Expense),
            tx("2024-12-20", -90.0, "Utilities", TransactionType::Expense),
        ];
        let result = compute_what_changed(&txs, "2025-01", "2024-12").unwrap();
        assert_eq!(result.top_changes[0].delta, -30.0);
    }

    #[test]
    fn test_idempotent_serialization() {
        let a = serde_json::to_string(&compute_what_changed(&sample(), "2025-05", "2025-04").unwrap()).unwrap();
        let b = serde_json::to_string(&compute_what_changed(&sample(), "2025-05", "2025-04").unwrap()).unwrap();
        assert_eq!(a, b);
        assert!(a.starts_with(r#"{"month":"2025-05","previousMonth":"2025-04","topChanges":[{"category":"Income""#));
    }

    #[test]
    fn test_same_month_compares_to_itself() {
        let result = compute_what_changed(&sample(), "2025-05", "2025-05").unwrap();
        let names: Vec<&str> = result.top_changes.iter().map(|c| c.category.as_str()).collect();
        assert_eq!(names, vec!["Dining", "Income"]);
        for change in &result.top_changes {
            assert_eq!(change.current_total, change.previous_total);
            assert_eq!(change.delta, 0.0);
            assert_eq!(change.percent_change, Some(0.0));
        }
        assert_eq!(result.totals.current, result.totals.previous);
    }

    #[test]
    fn test_expense_labelled_income_kept_apart() {
        let txs = vec![
            tx("2025-05-10", 1800.0, "Salary", TransactionType::Income),
            tx("2025-05-12", -40.0, " Income ", TransactionType::Expense),
        ];
        let result = compute_what_changed(&txs, "2025-05", "2025-04").unwrap();
        let by_name: BTreeMap<&str, f64> = result
            .top_changes
            .iter()
            .map(|c| (c.category.as_str(), c.current_total))
            .collect();
        assert_eq!(by_name["Income"], 1800.0);
        assert_eq!(by_name["Income (expense)"], 40.0);
        assert_eq!(result.totals.current, PeriodTotals { income: 1800.0, expenses: 40.0 });
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let mut txs = sample();
        txs.push(tx("2025-05-20", f64::NAN, "Dining", TransactionType::Expense));
        match compute_what_changed(&txs, "2025-05", "2025-04") {
            Err(EngineError::InvalidTransaction { index, .. }) => assert_eq!(index, 3),
            other => panic!("expected InvalidTransaction, got {:?}", other),
        }

        // Rejected even when the record falls outside both months
        let txs = vec![tx("2020-01-01", f64::INFINITY, "Dining", TransactionType::Expense)];
        assert!(matches!(
            compute_what_changed(&txs, "2025-05", "2025-04"),
            Err(EngineError::InvalidTransaction { index: 0, .. })
        ));
    }

    #[test]
    fn test_overflowing_totals_rejected() {
        let txs = vec![
            tx("2025-05-01", 1e308, "Salary", TransactionType::Income),
            tx("2025-05-02", 1e308, "Bonus", TransactionType::Income),
        ];
        assert_eq!(
            compute_what_changed(&txs, "2025-05", "2025-04"),
            Err(EngineError::InvalidTransaction {
                index: 1,
                reason: "totals overflow".to_string(),
            })
        );
    }

    #[test]
    fn test_tiny_previous_total_drops_percent() {
        let txs = vec![
            tx("2025-05-01", -1e300, "Dining", TransactionType::Expense),
            tx("2025-04-01", -1e-300, "Dining", TransactionType::Expense),
        ];
        let result = compute_what_changed(&txs, "2025-05", "2025-04").unwrap();
        assert_eq!(result.top_changes[0].percent_change, None);
        assert!(result.top_changes[0].delta.is_finite());
    }
}
