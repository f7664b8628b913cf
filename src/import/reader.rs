//! Minimal CSV tokenizer and shared row-parsing helpers
//!
//! The tokenizer handles the subset of CSV that bank exports actually use:
//! comma-delimited fields with optional double-quoting, where commas inside
//! quotes are not delimiters. Quote-escaping (`""`) and embedded newlines are
//! NOT handled — a known limitation.

use chrono::NaiveDate;

use crate::models::{Money, TransactionKind};

/// Split raw CSV text into rows of trimmed fields.
///
/// Blank lines are skipped. A double quote toggles the in-field state; commas
/// seen while inside quotes are part of the field.
pub fn parse_csv(text: &str) -> Vec<Vec<String>> {
    let mut rows = Vec::new();

    for line in text.lines() {
        if line.trim().is_empty() {
            continue;
        }

        let mut row = Vec::new();
        let mut current = String::new();
        let mut in_quotes = false;

        for ch in line.chars() {
            match ch {
                '"' => in_quotes = !in_quotes,
                ',' if !in_quotes => {
                    row.push(current.trim().to_string());
                    current.clear();
                }
                _ => current.push(ch),
            }
        }
        row.push(current.trim().to_string());
        rows.push(row);
    }

    rows
}

/// Check whether a header row matches the expected column names positionally
/// (case-insensitive substring match). The engine never guesses column order.
pub fn header_matches(header: &[String], expected: &[&str]) -> bool {
    expected.iter().enumerate().all(|(idx, name)| {
        header
            .get(idx)
            .map(|h| h.to_lowercase().contains(&name.to_lowercase()))
            .unwrap_or(false)
    })
}

/// Check whether a row is entirely empty fields
pub fn is_blank_row(row: &[String]) -> bool {
    row.iter().all(|cell| cell.trim().is_empty())
}

/// Parse an `MM/DD/YYYY` date
pub fn parse_mdy_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%m/%d/%Y")
        .map_err(|_| format!("Could not parse date '{}'", s))
}

/// Parse a `YYYY-MM-DD` date
pub fn parse_iso_date(s: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
        .map_err(|_| format!("Could not parse date '{}'", s))
}

/// Parse a signed source amount into an absolute value and a transaction kind.
///
/// Negative amounts are expenses, positive (and zero) are income; the stored
/// amount is always the absolute value. Currency symbols and thousands
/// separators are tolerated.
pub fn parse_signed_amount(s: &str) -> Result<(Money, TransactionKind), String> {
    let amount = parse_amount(s)?;
    let kind = if amount.is_negative() {
        TransactionKind::Expense
    } else {
        TransactionKind::Income
    };
    Ok((amount.abs(), kind))
}

/// Parse an amount string, tolerating `$` and `,`
pub fn parse_amount(s: &str) -> Result<Money, String> {
    let cleaned: String = s.chars().filter(|c| *c != '$' && *c != ',').collect();
    let cleaned = cleaned.trim();
    if cleaned.is_empty() {
        return Err(format!("Could not parse amount '{}'", s));
    }
    Money::parse(cleaned).map_err(|_| format!("Could not parse amount '{}'", s))
}
