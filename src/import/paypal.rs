//! PayPal CSV adapter
//!
//! PayPal activity exports carry fifteen columns; only a handful matter here.
//! Pending payments and internal transfers (deposits into the PayPal balance)
//! are not real transactions and are skipped, not errored.

use crate::models::{Transaction, TransactionId, TransactionStatus};

use super::categorize::categorize_merchant;
use super::reader::{is_blank_row, parse_csv, parse_mdy_date, parse_signed_amount};
use super::ImportOutcome;

/// Column names that must appear somewhere in the header row
const REQUIRED_HEADERS: [&str; 5] = ["Date", "Time", "TimeZone", "Name", "Type"];

const ACCOUNT_LABEL: &str = "PayPal";
const SOURCE_TAG: &str = "paypal";

/// Source types that are internal transfers, not purchases
const INTERNAL_TRANSFER_TYPES: [&str; 3] = [
    "deposit to pp account",
    "general card deposit",
    "bank deposit",
];

/// Import a PayPal CSV export
pub fn import(text: &str) -> ImportOutcome {
    let rows = parse_csv(text);
    if rows.is_empty() {
        return ImportOutcome::failure("File is empty");
    }

    let header = &rows[0];
    let has_required = REQUIRED_HEADERS.iter().all(|name| {
        header
            .iter()
            .any(|h| h.to_lowercase().contains(&name.to_lowercase()))
    });
    if !has_required {
        return ImportOutcome::failure(
            "Invalid PayPal CSV format. Expected columns: Date, Time, TimeZone, Name, Type, Status, Amount, etc.",
        );
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

/// Convert one PayPal data row into a transaction.
///
/// Returns `Ok(None)` for rows that parse fine but are not real transactions:
/// pending payments, internal transfers, and zero-amount rows.
pub fn row_to_transaction(
    row: &[String],
    account_label: &str,
    row_index: usize,
) -> Result<Option<Transaction>, String> {
    let status = row.get(5).map(String::as_str).unwrap_or("");
    if status.eq_ignore_ascii_case("pending") {
        return Ok(None);
    }

    let source_type = row.get(4).map(String::as_str).unwrap_or("");
    let type_lower = source_type.to_lowercase();
    if INTERNAL_TRANSFER_TYPES.iter().any(|t| type_lower.contains(t)) {
        return Ok(None);
    }

    let (amount, kind) = parse_signed_amount(row.get(7).ok_or("Missing amount")?)?;
    if amount.is_zero() {
        return Ok(None);
    }

    let date = parse_mdy_date(row.first().ok_or("Missing date")?)?;

    let name = row.get(3).map(|s| s.trim()).unwrap_or("");
    // Merchant name, falling back to the transaction type for transfers
    let description = if name.is_empty() { source_type.trim() } else { name };
    if description.is_empty() {
        return Err("Missing merchant name and type".to_string());
    }

    let mut txn = Transaction::new(date, description, amount, kind);
    txn.id = TransactionId::for_import(SOURCE_TAG, row_index);
    txn.category = categorize_merchant(name, source_type).to_string();
    txn.account = account_label.to_string();
    txn.notes = row.get(14).map(|s| s.trim()).filter(|s| !s.is_empty()).map(String::from);
    txn.status = Some(TransactionStatus::Cleared);
    Ok(Some(txn))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::TransactionKind;
    use chrono::NaiveDate;

    const HEADER: &str = "Date,Time,TimeZone,Name,Type,Status,Currency,Amount,Fees,Total,Exchange Rate,Receipt ID,Balance,Transaction ID,Item Title";

    fn row(date: &str, name: &str, kind: &str, status: &str, amount: &str) -> String {
        format!("{},10:30:00,PDT,{},{},{},USD,{},0.00,{},,,,ABC123,", date, name, kind, status, amount, amount)
    }

    #[test]
    fn test_import_completed_payment() {
        let csv = format!(
            "{}\n{}",
            HEADER,
            row("03/15/2025", "Spotify USA", "PreApproved Payment", "Completed", "-10.99")
        );
        let outcome = import(&csv);

        assert!(outcome.success);
        let txn = &outcome.transactions[0];
        assert_eq!(txn.date, NaiveDate::from_ymd_opt(2025, 3, 15).unwrap());
        assert_eq!(txn.description, "Spotify USA");
        assert_eq!(txn.amount.cents(), 1099);
        assert_eq!(txn.kind, TransactionKind::Expense);
        assert_eq!(txn.category, "Entertainment");
        assert_eq!(txn.account, "PayPal");
        assert!(txn.id.as_str().starts_with("paypal_"));
    }

    #[test]
    fn test_pending_rows_skipped() {
        let csv = format!(
            "{}\n{}",
            HEADER,
            row("03/15/2025", "Some Store", "Express Checkout Payment", "Pending", "-20.00")
        );
        let outcome = import(&csv);

        assert!(!outcome.success);
        assert_eq!(outcome.skipped, 1);
        assert!(outcome.errors.is_empty());
    }

    #[test]
    fn test_internal_transfers_skipped() {
        let csv = format!(
            "{}\n{}\n{}",
            HEADER,
            row("03/15/2025", "", "General Card Deposit", "Completed", "50.00"),
            row("03/16/2025", "", "Bank Deposit to PP Account", "Completed", "25.00"),
        );
        let outcome = import(&csv);
        assert_eq!(outcome.skipped, 2);
        assert!(outcome.transactions.is_empty());
    }

    #[test]
    fn test_zero_amount_skipped() {
        let csv = format!(
            "{}\n{}",
            HEADER,
            row("03/15/2025", "Authorization Hold", "Authorization", "Completed", "0.00")
        );
        let outcome = import(&csv);
        assert_eq!(outcome.skipped, 1);
    }

    #[test]
    fn test_type_used_when_name_empty() {
        let csv = format!(
            "{}\n{}",
            HEADER,
            row("03/15/2025", "", "Mobile Payment", "Completed", "-5.00")
        );
        let outcome = import(&csv);
        assert_eq!(outcome.transactions[0].description, "Mobile Payment");
        assert_eq!(outcome.transactions[0].category, "Other");
    }

    #[test]
    fn test_unknown_merchant_falls_back_by_type() {
        let csv = format!(
            "{}\n{}",
            HEADER,
            row("03/15/2025", "Corner Bakery", "PreApproved Payment Bill User Payment", "Completed", "-7.50")
        );
        let outcome = import(&csv);
        assert_eq!(outcome.transactions[0].category, "Subscriptions");
    }

    #[test]
    fn test_item_title_becomes_notes() {
        let csv = format!(
            "{}\n03/15/2025,10:30:00,PDT,Valve,Express Checkout Payment,Completed,USD,-15.00,0.00,-15.00,,,,XYZ,Half-Life 3",
            HEADER
        );
        let outcome = import(&csv);
        assert_eq!(outcome.transactions[0].notes.as_deref(), Some("Half-Life 3"));
        assert_eq!(outcome.transactions[0].category, "Entertainment");
    }

    #[test]
    fn test_header_mismatch_aborts() {
        let outcome = import("Date,Amount\n03/15/2025,-5.00");
        assert!(!outcome.success);
        assert!(outcome.errors[0].contains("Invalid PayPal CSV format"));
    }

    #[test]
    fn test_malformed_amount_is_row_error() {
        let csv = format!(
            "{}\n{}",
            HEADER,
            row("03/15/2025", "Store", "Express Checkout Payment", "Completed", "oops")
        );
        let outcome = import(&csv);
        assert_eq!(outcome.errors.len(), 1);
        assert!(outcome.errors[0].starts_with("Row 2:"));
    }
}
