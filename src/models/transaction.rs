//! Transaction model
//!
//! Represents income and expense transactions. Amounts are stored as absolute
//! values; the direction of money flow is carried by the transaction kind.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, TransactionId};
use super::money::Money;

/// Direction of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionKind {
    /// Money coming in
    Income,
    /// Money going out
    Expense,
}

impl fmt::Display for TransactionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Income => write!(f, "income"),
            Self::Expense => write!(f, "expense"),
        }
    }
}

/// Status of a transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    /// Transaction has not yet cleared the bank
    Pending,
    /// Transaction has cleared the bank
    Cleared,
    /// Transaction has been reconciled against a statement
    Reconciled,
}

impl fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pending => write!(f, "Pending"),
            Self::Cleared => write!(f, "Cleared"),
            Self::Reconciled => write!(f, "Reconciled"),
        }
    }
}

/// A financial transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Unique identifier (UUID-based, or synthetic for imported rows)
    pub id: TransactionId,

    /// Transaction date (calendar date, no time component)
    pub date: NaiveDate,

    /// Free-text description (merchant name, memo line, ...)
    pub description: String,

    /// Amount, always non-negative; direction lives in `kind`
    pub amount: Money,

    /// Whether this is income or an expense
    #[serde(rename = "type")]
    pub kind: TransactionKind,

    /// Free-text category label
    pub category: String,

    /// Free-text source account label ("Chase Credit Card", "PayPal", ...)
    pub account: String,

    /// Optional notes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,

    /// Optional clearing status
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TransactionStatus>,

    /// Back-reference to the owning budget, if allocated
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub budget_id: Option<BudgetId>,
}

impl Transaction {
    /// Create a new transaction
    pub fn new(
        date: NaiveDate,
        description: impl Into<String>,
        amount: Money,
        kind: TransactionKind,
    ) -> Self {
        Self {
            id: TransactionId::new(),
            date,
            description: description.into(),
            amount,
            kind,
            category: String::new(),
            account: String::new(),
            notes: None,
            status: None,
            budget_id: None,
        }
    }

    /// Check if this is income
    pub fn is_income(&self) -> bool {
        self.kind == TransactionKind::Income
    }

    /// Check if this is an expense
    pub fn is_expense(&self) -> bool {
        self.kind == TransactionKind::Expense
    }

    /// Check whether this transaction is allocated to the given budget
    pub fn is_allocated_to(&self, budget_id: &BudgetId) -> bool {
        self.budget_id.as_ref() == Some(budget_id)
    }

    /// Validate the transaction
    pub fn validate(&self) -> Result<(), TransactionValidationError> {
        if self.amount.is_negative() {
            return Err(TransactionValidationError::NegativeAmount(self.amount));
        }
        if self.description.trim().is_empty() {
            return Err(TransactionValidationError::EmptyDescription);
        }
        Ok(())
    }
}

impl fmt::Display for Transaction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = match self.kind {
            TransactionKind::Income => "+",
            TransactionKind::Expense => "-",
        };
        write!(
            f,
            "{} {} {}{}",
            self.date.format("%Y-%m-%d"),
            self.description,
            sign,
            self.amount
        )
    }
}

/// Validation errors for transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransactionValidationError {
    NegativeAmount(Money),
    EmptyDescription,
}

impl fmt::Display for TransactionValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Amount must not be negative (got {})", amount)
            }
            Self::EmptyDescription => write!(f, "Description must not be empty"),
        }
    }
}

impl std::error::Error for TransactionValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 1, 15).unwrap()
    }

    #[test]
    fn test_new_transaction() {
        let txn = Transaction::new(
            test_date(),
            "Coffee",
            Money::from_cents(450),
            TransactionKind::Expense,
        );
        assert_eq!(txn.date, test_date());
        assert_eq!(txn.amount.cents(), 450);
        assert!(txn.is_expense());
        assert!(txn.budget_id.is_none());
        assert!(txn.status.is_none());
    }

    #[test]
    fn test_allocation_check() {
        let budget_id = BudgetId::from_raw("bgt_food");
        let other_id = BudgetId::from_raw("bgt_other");

        let mut txn = Transaction::new(
            test_date(),
            "Groceries",
            Money::from_cents(8000),
            TransactionKind::Expense,
        );
        assert!(!txn.is_allocated_to(&budget_id));

        txn.budget_id = Some(budget_id.clone());
        assert!(txn.is_allocated_to(&budget_id));
        assert!(!txn.is_allocated_to(&other_id));
    }

    #[test]
    fn test_validation() {
        let mut txn = Transaction::new(
            test_date(),
            "Refund",
            Money::from_cents(2000),
            TransactionKind::Income,
        );
        assert!(txn.validate().is_ok());

        txn.amount = Money::from_cents(-100);
        assert!(matches!(
            txn.validate(),
            Err(TransactionValidationError::NegativeAmount(_))
        ));

        txn.amount = Money::from_cents(100);
        txn.description = "  ".to_string();
        assert_eq!(
            txn.validate(),
            Err(TransactionValidationError::EmptyDescription)
        );
    }

    #[test]
    fn test_serialization_field_names() {
        let mut txn = Transaction::new(
            test_date(),
            "Starbucks",
            Money::from_cents(1250),
            TransactionKind::Expense,
        );
        txn.budget_id = Some(BudgetId::from_raw("bgt_coffee"));
        txn.status = Some(TransactionStatus::Cleared);

        let json = serde_json::to_string(&txn).unwrap();
        assert!(json.contains("\"type\":\"expense\""));
        assert!(json.contains("\"budgetId\":\"bgt_coffee\""));
        assert!(json.contains("\"status\":\"cleared\""));

        let deserialized: Transaction = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, txn.id);
        assert_eq!(deserialized.kind, TransactionKind::Expense);
        assert_eq!(deserialized.budget_id, txn.budget_id);
    }

    #[test]
    fn test_optional_fields_absent_in_json() {
        let txn = Transaction::new(
            test_date(),
            "Paycheck",
            Money::from_cents(250000),
            TransactionKind::Income,
        );
        let json = serde_json::to_string(&txn).unwrap();
        assert!(!json.contains("budgetId"));
        assert!(!json.contains("notes"));
        assert!(!json.contains("status"));
    }

    #[test]
    fn test_display() {
        let txn = Transaction::new(
            test_date(),
            "Test Store",
            Money::from_cents(5000),
            TransactionKind::Expense,
        );
        assert_eq!(format!("{}", txn), "2025-01-15 Test Store -$50.00");
    }
}
