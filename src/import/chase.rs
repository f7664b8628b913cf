//! Chase credit card CSV adapter
//!
//! Expected columns: `Transaction Date, Post Date, Description, Category,
//! Type, Amount, Memo`, dates as `MM/DD/YYYY`. Negative amounts are expenses.

use crate::models::{Transaction, TransactionId, TransactionStatus};

use super::categorize::map_chase_category;
use super::reader::{header_matches, is_blank_row, parse_csv, parse_mdy_date, parse_signed_amount};
use super::ImportOutcome;

const EXPECTED_HEADERS: [&str; 7] = [
    "Transaction Date",
    "Post Date",
    "Description",
    "Category",
    "Type",
    "Amount",
    "Memo",
];

const ACCOUNT_LABEL: &str = "Chase Credit Card";
const SOURCE_TAG: &str = "chase";

/// Import a Chase CSV export
pub fn import(text: &str) -> ImportOutcome {
    let rows = parse_csv(text);
    if rows.is_empty() {
        return ImportOutcome::failure("File is empty");
    }

    if !header_matches(&rows[0], &EXPECTED_HEADERS) {
        return ImportOutcome::failure(format!(
            "Invalid Chase CSV format. Expected headers: {}",
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
            Ok(txn) => outcome.transactions.push(txn),
            Err(e) => outcome.errors.push(format!("Row {}: {}", index + 1, e)),
        }
    }

    outcome.success = !outcome.transactions.is_empty();
    outcome
}

/// Convert one Chase data row into a transaction
pub fn row_to_transaction(
    row: &[String],
    account_label: &str,
    row_index: usize,
) -> Result<Transaction, String> {
    let date = parse_mdy_date(row.first().ok_or("Missing transaction date")?)?;

    let description = row
        .get(2)
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .ok_or("Missing description")?;

    let (amount, kind) = parse_signed_amount(row.get(5).ok_or("Missing amount")?)?;

    let category = map_chase_category(row.get(3).map(String::as_str).unwrap_or(""));

    let mut txn = Transaction::new(date, description, amount, kind);
    txn.id = TransactionId::for_import(SOURCE_TAG, row_index);
    txn.category = category;
    txn.account = account_label.to_string();
    txn.notes = row.get(6).map(|s| s.trim()).filter(|s| !s.is_empty()).map(String::from);
    txn.status = Some(TransactionStatus::Cleared);
    Ok(txn)
}
