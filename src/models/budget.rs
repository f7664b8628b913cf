//! Budget model
//!
//! A budget grants a fixed amount per funding period and tracks which
//! transactions have been allocated against it.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::{BudgetId, TransactionId};
use super::money::Money;

/// How often a budget's funding amount is granted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetPeriod {
    Monthly,
    Weekly,
    Yearly,
}

impl fmt::Display for BudgetPeriod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Monthly => write!(f, "monthly"),
            Self::Weekly => write!(f, "weekly"),
            Self::Yearly => write!(f, "yearly"),
        }
    }
}

/// A recurring budget
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Budget {
    /// Unique identifier
    pub id: BudgetId,

    /// Display title
    pub title: String,

    /// Amount granted per funding period
    pub amount: Money,

    /// Funding period
    pub period: BudgetPeriod,

    /// Calendar date the schedule anchors to
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_date: Option<NaiveDate>,

    /// Carried-over balance from external tracking (signed)
    #[serde(default)]
    pub starting_balance: Money,

    /// Day of month (1-31) credits apply; monthly budgets only
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollover_day: Option<u32>,

    /// Ids of transactions allocated to this budget
    #[serde(default)]
    pub transaction_ids: Vec<TransactionId>,

    /// Whether the budget is pinned in listings
    #[serde(default)]
    pub pinned: bool,

    /// Presentation ordering hint
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_order: Option<u32>,

    /// When the budget was created
    pub created_at: DateTime<Utc>,
}

impl Budget {
    /// Create a new budget
    pub fn new(title: impl Into<String>, amount: Money, period: BudgetPeriod) -> Self {
        Self {
            id: BudgetId::new(),
            title: title.into(),
            amount,
            period,
            start_date: None,
            starting_balance: Money::zero(),
            rollover_day: None,
            transaction_ids: Vec::new(),
            pinned: false,
            display_order: None,
            created_at: Utc::now(),
        }
    }

    /// Create a budget with a schedule anchor
    pub fn with_schedule(
        title: impl Into<String>,
        amount: Money,
        period: BudgetPeriod,
        start_date: NaiveDate,
        rollover_day: Option<u32>,
    ) -> Self {
        let mut budget = Self::new(title, amount, period);
        budget.start_date = Some(start_date);
        budget.rollover_day = rollover_day;
        budget
    }

    /// Check whether a transaction id is allocated to this budget
    pub fn owns(&self, transaction_id: &TransactionId) -> bool {
        self.transaction_ids.contains(transaction_id)
    }

    /// Remove a transaction id from the allocation list
    pub fn release(&mut self, transaction_id: &TransactionId) {
        self.transaction_ids.retain(|id| id != transaction_id);
    }

    /// Validate the budget
    pub fn validate(&self) -> Result<(), BudgetValidationError> {
        if self.amount.is_negative() {
            return Err(BudgetValidationError::NegativeAmount(self.amount));
        }
        if let Some(day) = self.rollover_day {
            if !(1..=31).contains(&day) {
                return Err(BudgetValidationError::InvalidRolloverDay(day));
            }
        }
        Ok(())
    }
}

impl fmt::Display for Budget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} {})", self.title, self.amount, self.period)
    }
}

/// Validation errors for budgets
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BudgetValidationError {
    NegativeAmount(Money),
    InvalidRolloverDay(u32),
}

impl fmt::Display for BudgetValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NegativeAmount(amount) => {
                write!(f, "Budget amount must not be negative (got {})", amount)
            }
            Self::InvalidRolloverDay(day) => {
                write!(f, "Rollover day must be between 1 and 31 (got {})", day)
            }
        }
    }
}

impl std::error::Error for BudgetValidationError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_budget() {
        let budget = Budget::new("Groceries", Money::from_cents(50000), BudgetPeriod::Monthly);
        assert_eq!(budget.title, "Groceries");
        assert_eq!(budget.amount.cents(), 50000);
        assert_eq!(budget.starting_balance, Money::zero());
        assert!(budget.start_date.is_none());
        assert!(budget.transaction_ids.is_empty());
        assert!(!budget.pinned);
    }

    #[test]
    fn test_with_schedule() {
        let start = NaiveDate::from_ymd_opt(2025, 1, 15).unwrap();
        let budget = Budget::with_schedule(
            "Dining",
            Money::from_cents(20000),
            BudgetPeriod::Monthly,
            start,
            Some(1),
        );
        assert_eq!(budget.start_date, Some(start));
        assert_eq!(budget.rollover_day, Some(1));
    }

    #[test]
    fn test_owns_and_release() {
        let mut budget = Budget::new("Fun", Money::from_cents(10000), BudgetPeriod::Monthly);
        let txn_id = TransactionId::from_raw("txn_a");
        budget.transaction_ids.push(txn_id.clone());

        assert!(budget.owns(&txn_id));
        budget.release(&txn_id);
        assert!(!budget.owns(&txn_id));
    }

    #[test]
    fn test_validation() {
        let mut budget = Budget::new("Travel", Money::from_cents(30000), BudgetPeriod::Yearly);
        assert!(budget.validate().is_ok());

        budget.rollover_day = Some(32);
        assert_eq!(
            budget.validate(),
            Err(BudgetValidationError::InvalidRolloverDay(32))
        );

        budget.rollover_day = Some(15);
        budget.amount = Money::from_cents(-1);
        assert!(matches!(
            budget.validate(),
            Err(BudgetValidationError::NegativeAmount(_))
        ));
    }

    #[test]
    fn test_serialization_field_names() {
        let start = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
        let mut budget = Budget::with_schedule(
            "Rent",
            Money::from_cents(120000),
            BudgetPeriod::Monthly,
            start,
            Some(1),
        );
        budget.starting_balance = Money::from_cents(-2500);

        let json = serde_json::to_string(&budget).unwrap();
        assert!(json.contains("\"period\":\"monthly\""));
        assert!(json.contains("\"startDate\":\"2025-03-01\""));
        assert!(json.contains("\"startingBalance\":-2500"));
        assert!(json.contains("\"rolloverDay\":1"));
        assert!(json.contains("\"transactionIds\":[]"));

        let deserialized: Budget = serde_json::from_str(&json).unwrap();
        assert_eq!(deserialized.id, budget.id);
        assert_eq!(deserialized.starting_balance, budget.starting_balance);
    }
}
