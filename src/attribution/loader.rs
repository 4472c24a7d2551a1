//! Transaction loading from CSV
//!
//! Expected header: `date,amount,category,type` with ISO dates and
//! `income` / `expense` type tokens.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use anyhow::Context;

use super::TransactionRecord;

/// Load transactions from a CSV file
pub fn load_transactions(path: &Path) -> anyhow::Result<Vec<TransactionRecord>> {
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    load_transactions_from_reader(file)
}

/// Load transactions from any CSV reader
pub fn load_transactions_from_reader<R: Read>(reader: R) -> anyhow::Result<Vec<TransactionRecord>> {
    let mut rdr = csv::ReaderBuilder::new().trim(csv::Trim::Headers).from_reader(reader);
    let mut transactions = Vec::new();

    for (i, result) in rdr.deserialize().enumerate() {
        // Row 1 is the header
        let record: TransactionRecord = result.with_context(|| format!("invalid transaction on row {}", i + 2))?;
        if !record.amount.is_finite() {
            anyhow::bail!("invalid transaction on row {}: amount {} is not finite", i + 2, record.amount);
        }
        transactions.push(record);
    }

    log::info!("Loaded {} transactions", transactions.len());
    Ok(transactions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::attribution::TransactionType;

    #[test]
    fn test_load_from_reader() {
        let data = "\
date,amount,category,type
2025-05-02,-120,Dining,expense
2025-05-10,1800.50,Salary,income
";
        let txs = load_transactions_from_reader(data.as_bytes()).unwrap();
        assert_eq!(txs.len(), 2);
        assert_eq!(txs[0].category, "Dining");
        assert_eq!(txs[0].kind, TransactionType::Expense);
        assert_eq!(txs[1].amount, 1800.50);
        assert_eq!(txs[1].kind, TransactionType::Income);
    }

    #[test]
    fn test_bad_row_reports_line() {
        let data = "\
date,amount,category,type
2025-05-02,-120,Dining,expense
2025/05/03,-10,Dining,expense
";
        let err = load_transactions_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 3"), "{err}");
    }

    #[test]
    fn test_non_finite_amount_rejected() {
        let data = "\
date,amount,category,type
2025-05-02,NaN,Dining,expense
";
        let err = load_transactions_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 2"), "{err}");

        let data = "date,amount,category,type\n2025-05-02,-120,Dining,expense\n2025-05-03,inf,Salary,income\n";
        let err = load_transactions_from_reader(data.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 3"), "{err}");
    }

    #[test]
    fn test_unknown_type_rejected() {
        let data = "date,amount,category,type\n2025-05-02,-120,Dining,transfer\n";
        assert!(load_transactions_from_reader(data.as_bytes()).is_err());
    }
}
