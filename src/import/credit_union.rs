//! Credit union (TFCU-style) CSV adapter
//!
//! Expected columns: `Account Name, Processed Date, Description, Check
//! Number, Credit or Debit, Amount`. Dates are already ISO (`YYYY-MM-DD`) and
//! the direction comes from the Credit or Debit column rather than the sign.

use crate::models::{Transaction, TransactionId, TransactionKind, TransactionStatus};

use super::categorize::categorize_merchant;
use super::reader::{header_matches, is_blank_row, parse_amount, parse_csv, parse_iso_date};
use super::ImportOutcome;

const EXPECTED_HEADERS: [&str; 6] = [
    "Account Name",
    "Processed Date",
    "Description",
    "Check Number",
    "Credit or Debit",
    "Amount",
];

const ACCOUNT_LABEL: &str = "Credit Union";
const SOURCE_TAG: &str = "tfcu";

/// Import a credit union CSV export
pub fn import(text: &str) -> ImportOutcome {
    let rows = parse_csv(text);
    if rows.is_empty() {
        return ImportOutcome::failure("File is empty");
    }

    if !header_matches(&rows[0], &EXPECTED_HEADERS) {
        return ImportOutcome::failure(format!(
            "Invalid credit union CSV format. Expected headers: {}",
            EXPECTED_HEADERS.join(", ")
        ));
    }

    let mut outcome = ImportOutcome::default();
    for (index, row) in rows.iter().enumerate().skip(1) {
        if is_blank_row(row) {
            outcome.skipped += 1;
            continue;
        }

        match row_to_transaction(row, ACCOUNT_LABEL, index) {
            Ok(Some(txn)) => outcome.transactions.push(txn),
            Ok(None) => outcome.skipped += 1,
            Err(e) => outcome.errors.push(format!("Row {}: {}", index + 1, e)),
        }
    }

    outcome.success = !outcome.transactions.is_empty();
    outcome
}

/// Convert one credit union data row into a transaction.
///
/// Returns `Ok(None)` for zero-amount rows.
pub fn row_to_transaction(
    row: &[String],
    account_label: &str,
    row_index: usize,
) -> Result<Option<Transaction>, String> {
    let date = parse_iso_date(row.get(1).ok_or("Missing processed date")?)?;

    let description = row
        .get(2)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or("Missing description")?;

    let kind = match row
        .get(4)
        .map(|s| s.trim().to_lowercase())
        .unwrap_or_default()
        .as_str()
    {
        "debit" | "dr" => TransactionKind::Expense,
        "credit" | "cr" => TransactionKind::Income,
        other => return Err(format!("Unknown Credit or Debit value '{}'", other)),
    };

    let amount = parse_amount(row.get(5).ok_or("Missing amount")?)?.abs();
    if amount.is_zero() {
        return Ok(None);
    }

    // No native category column; merchant heuristics only
    let category = categorize_merchant(description, "").to_string();

    let account = row
        .first()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .unwrap_or(account_label);

    let mut txn = Transaction::new(date, description, amount, kind);
    txn.id = TransactionId::for_import(SOURCE_TAG, row_index);
    txn.category = category;
    txn.account = account.to_string();
    txn.notes = row
        .get(3)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(|n| format!("Check {}", n));
    txn.status = Some(TransactionStatus::Cleared);
    Ok(Some(txn))
}
