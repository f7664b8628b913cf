//! Duplicate detection for imported transactions
//!
//! Cross-references newly imported candidates against the existing set so the
//! same real-world event is not entered twice when, say, a bank feed and a
//! PayPal feed both record one purchase.
//!
//! Matching is intentionally permissive: treating a near-match as a duplicate
//! is preferred over double-importing. This is a deliberate trade-off, not a
//! bug.

use std::collections::HashSet;

use crate::models::Transaction;

/// Minimum description token overlap for two transactions to be considered
/// the same event
pub const SIMILARITY_THRESHOLD: f64 = 0.3;

/// Candidates partitioned into duplicates and unique transactions
#[derive(Debug, Clone, Default)]
pub struct DedupOutcome {
    /// Candidates matching an existing transaction
    pub duplicates: Vec<Transaction>,
    /// Candidates safe to import
    pub unique: Vec<Transaction>,
}

/// Partition candidates by whether an existing transaction records the same
/// real-world event. The first match in the existing set wins; there is no
/// best-match scoring.
pub fn detect_duplicates(candidates: Vec<Transaction>, existing: &[Transaction]) -> DedupOutcome {
    let mut outcome = DedupOutcome::default();

    for candidate in candidates {
        let is_duplicate = existing.iter().any(|e| is_same_event(&candidate, e));
        if is_duplicate {
            outcome.duplicates.push(candidate);
        } else {
            outcome.unique.push(candidate);
        }
    }

    outcome
}

/// Two transactions record the same event when date, amount, and kind all
/// match exactly, and either the descriptions overlap enough or the
/// cross-account PayPal heuristic fires.
fn is_same_event(candidate: &Transaction, existing: &Transaction) -> bool {
    if candidate.date != existing.date
        || candidate.amount != existing.amount
        || candidate.kind != existing.kind
    {
        return false;
    }

    description_similarity(&candidate.description, &existing.description) >= SIMILARITY_THRESHOLD
        || cross_account_match(candidate, existing)
}

/// Fraction of the candidate's words longer than three characters that also
/// appear in the other description.
///
/// With no qualifying words to compare, falls back to case-insensitive
/// equality of the full descriptions (1.0 or 0.0).
pub fn description_similarity(candidate: &str, other: &str) -> f64 {
    let other_tokens: HashSet<String> = other
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .collect();

    let candidate_tokens: Vec<String> = candidate
        .split_whitespace()
        .map(|w| w.to_lowercase())
        .filter(|w| w.chars().count() > 3)
        .collect();

    if candidate_tokens.is_empty() {
        return if candidate.trim().eq_ignore_ascii_case(other.trim()) {
            1.0
        } else {
            0.0
        };
    }

    let matching = candidate_tokens
        .iter()
        .filter(|w| other_tokens.contains(*w))
        .count();

    matching as f64 / candidate_tokens.len() as f64
}

/// The cross-account heuristic: one side's account field mentions PayPal
/// while the other side's description does. Catches a bank feed and a PayPal
/// feed recording the same purchase.
fn cross_account_match(a: &Transaction, b: &Transaction) -> bool {
    fn account_mentions_paypal(txn: &Transaction) -> bool {
        txn.account.to_lowercase().contains("paypal")
    }
    fn description_mentions_paypal(txn: &Transaction) -> bool {
        txn.description.to_lowercase().contains("paypal")
    }

    (account_mentions_paypal(a) && description_mentions_paypal(b))
        || (account_mentions_paypal(b) && description_mentions_paypal(a))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, TransactionKind};
    use chrono::NaiveDate;

    fn txn(description: &str, cents: i64, kind: TransactionKind) -> Transaction {
        Transaction::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            description,
            Money::from_cents(cents),
            kind,
        )
    }

    fn expense(description: &str, cents: i64) -> Transaction {
        txn(description, cents, TransactionKind::Expense)
    }

    #[test]
    fn test_similar_descriptions_are_duplicates() {
        let existing = vec![expense("Starbucks Coffee", 1250)];
        let candidate = expense("STARBUCKS #123", 1250);

        let outcome = detect_duplicates(vec![candidate], &existing);
        assert_eq!(outcome.duplicates.len(), 1);
        assert!(outcome.unique.is_empty());
    }

    #[test]
    fn test_different_amount_is_not_duplicate() {
        let existing = vec![expense("Starbucks Coffee", 1250)];
        let candidate = expense("STARBUCKS #123", 1350);

        let outcome = detect_duplicates(vec![candidate], &existing);
        assert!(outcome.duplicates.is_empty());
        assert_eq!(outcome.unique.len(), 1);
    }

    #[test]
    fn test_different_date_is_not_duplicate() {
        let existing = vec![expense("Starbucks Coffee", 1250)];
        let mut candidate = expense("Starbucks Coffee", 1250);
        candidate.date = NaiveDate::from_ymd_opt(2025, 3, 11).unwrap();

        let outcome = detect_duplicates(vec![candidate], &existing);
        assert_eq!(outcome.unique.len(), 1);
    }

    #[test]
    fn test_kind_must_match() {
        let existing = vec![txn("Starbucks Coffee", 1250, TransactionKind::Income)];
        let candidate = expense("Starbucks Coffee", 1250);

        let outcome = detect_duplicates(vec![candidate], &existing);
        assert_eq!(outcome.unique.len(), 1);
    }

    #[test]
    fn test_dissimilar_descriptions_same_amount_unique() {
        let existing = vec![expense("Whole Foods Market", 1250)];
        let candidate = expense("Shell Gasoline", 1250);

        let outcome = detect_duplicates(vec![candidate], &existing);
        assert_eq!(outcome.unique.len(), 1);
    }

    #[test]
    fn test_cross_account_paypal_heuristic() {
        // Bank feed shows the processor; PayPal feed shows the merchant
        let mut bank_side = expense("PAYPAL *SPOTIFY", 1099);
        bank_side.account = "Everyday Checking".to_string();

        let mut paypal_side = expense("Spotify USA", 1099);
        paypal_side.account = "PayPal".to_string();

        let outcome = detect_duplicates(vec![paypal_side], &[bank_side]);
        assert_eq!(outcome.duplicates.len(), 1);
    }

    #[test]
    fn test_similarity_threshold() {
        // 1 of 2 qualifying words overlaps: 0.5 >= 0.3
        assert!(description_similarity("STARBUCKS #123", "Starbucks Coffee") >= 0.3);
        // No overlap at all
        assert_eq!(description_similarity("Shell Gasoline", "Whole Foods"), 0.0);
        // Short-token fallback: exact equality
        assert_eq!(description_similarity("ATM", "atm"), 1.0);
        assert_eq!(description_similarity("ATM", "Fee"), 0.0);
    }

    #[test]
    fn test_first_match_wins_against_full_set() {
        let existing = vec![
            expense("Starbucks Coffee", 1250),
            expense("Starbucks Reserve", 1250),
        ];
        let candidate = expense("Starbucks Downtown", 1250);

        let outcome = detect_duplicates(vec![candidate], &existing);
        assert_eq!(outcome.duplicates.len(), 1);
    }

    #[test]
    fn test_mixed_batch_partitions() {
        let existing = vec![expense("Starbucks Coffee", 1250)];
        let candidates = vec![
            expense("STARBUCKS #123", 1250),
            expense("New Merchant", 999),
        ];

        let outcome = detect_duplicates(candidates, &existing);
        assert_eq!(outcome.duplicates.len(), 1);
        assert_eq!(outcome.unique.len(), 1);
        assert_eq!(outcome.unique[0].description, "New Merchant");
    }
}
