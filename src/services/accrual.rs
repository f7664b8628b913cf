//! Budget accrual engine
//!
//! Pure calculations deriving a budget's funded, spent, and remaining amounts
//! from the budget entity and its allocated transactions.

use chrono::{Local, NaiveDate};

use crate::models::{Budget, Money, Transaction};

use super::period::elapsed_periods_on;

/// Derived accounting figures for a budget
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetSummary {
    /// Funding periods elapsed since the schedule start
    pub periods: u32,
    /// Total amount granted across all elapsed periods
    pub cumulative_budget: Money,
    /// Starting balance plus cumulative budget
    pub total_available: Money,
    /// Sum of allocated expense transactions
    pub spent: Money,
    /// Total available minus spent (negative when overspent)
    pub remaining: Money,
    /// Spent as a fraction of total available, 0.0 when nothing is available
    pub percentage_used: f64,
}

/// Total funding granted across all elapsed periods.
pub fn cumulative_budget(budget: &Budget, today: NaiveDate) -> Money {
    let periods = elapsed_periods_on(budget.start_date, budget.period, budget.rollover_day, today);
    budget.amount * periods
}

/// Starting balance plus cumulative budget.
pub fn total_available(budget: &Budget, today: NaiveDate) -> Money {
    budget.starting_balance + cumulative_budget(budget, today)
}

/// Sum of expense transactions allocated to the budget.
///
/// A transaction counts if the budget lists its id or if it carries the
/// budget's id as a back-reference. Allocated income is excluded here; it can
/// be reported separately by the caller.
pub fn spent(budget: &Budget, transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_expense())
        .filter(|t| budget.owns(&t.id) || t.is_allocated_to(&budget.id))
        .map(|t| t.amount)
        .sum()
}

/// Sum of income transactions allocated to the budget.
pub fn received(budget: &Budget, transactions: &[Transaction]) -> Money {
    transactions
        .iter()
        .filter(|t| t.is_income())
        .filter(|t| budget.owns(&t.id) || t.is_allocated_to(&budget.id))
        .map(|t| t.amount)
        .sum()
}

/// Total available minus the amount spent.
pub fn remaining(budget: &Budget, spent: Money, today: NaiveDate) -> Money {
    total_available(budget, today) - spent
}

/// Compute the full accounting summary for a budget as of today.
pub fn summarize(budget: &Budget, transactions: &[Transaction]) -> BudgetSummary {
    summarize_on(budget, transactions, Local::now().date_naive())
}

/// Deterministic variant of [`summarize`] with an explicit "today".
pub fn summarize_on(budget: &Budget, transactions: &[Transaction], today: NaiveDate) -> BudgetSummary {
    let periods = elapsed_periods_on(budget.start_date, budget.period, budget.rollover_day, today);
    let cumulative = budget.amount * periods;
    let total_available = budget.starting_balance + cumulative;
    let spent = spent(budget, transactions);

    BudgetSummary {
        periods,
        cumulative_budget: cumulative,
        total_available,
        spent,
        remaining: total_available - spent,
        percentage_used: spent.percentage_of(total_available),
    }
}
