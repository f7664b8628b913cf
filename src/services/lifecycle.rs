//! Budget lifecycle series generator
//!
//! Produces the chronological credit/debit/balance series used to chart a
//! budget's history, one data point per rollover boundary.

use chrono::{Local, NaiveDate};
use std::collections::HashMap;

use crate::models::{Budget, Money, Transaction};

use super::period::rollover_dates;

/// One point in a budget's lifecycle series
#[derive(Debug, Clone, PartialEq)]
pub struct LifecyclePoint {
    /// Rollover boundary date
    pub date: NaiveDate,
    /// Human-friendly label ("Feb 2025")
    pub display_label: String,
    /// Budget amount credited at this boundary
    pub credit: Money,
    /// Allocated expenses dated within this boundary's interval
    pub debit: Money,
    /// Running balance, seeded by the starting balance
    pub balance: Money,
    /// Running total of credits
    pub cumulative_credit: Money,
    /// Running total of debits
    pub cumulative_debit: Money,
}

/// Generate the lifecycle series for a budget from its start date to now.
///
/// Returns an empty series when the budget has no start date. The series is
/// recomputed in full on every call; no state is retained between calls.
pub fn generate_series(budget: &Budget, allocated: &[Transaction]) -> Vec<LifecyclePoint> {
    generate_series_on(budget, allocated, Local::now().date_naive())
}

/// Deterministic variant of [`generate_series`] with an explicit "today".
///
/// Boundaries are always monthly-style rollover dates, also for weekly and
/// yearly budgets — a known limitation of the chart.
pub fn generate_series_on(
    budget: &Budget,
    allocated: &[Transaction],
    today: NaiveDate,
) -> Vec<LifecyclePoint> {
    let Some(start) = budget.start_date else {
        return Vec::new();
    };

    let rollover_day = budget.rollover_day.unwrap_or(1);
    let boundaries = rollover_dates(start, rollover_day, today);
    if boundaries.is_empty() {
        return Vec::new();
    }

    // Bucket allocated expenses by the boundary interval containing them.
    // Transactions dated before the first boundary are not charted; the last
    // interval is open-ended.
    let last_boundary = boundaries[boundaries.len() - 1];
    let mut debits: HashMap<NaiveDate, Money> = HashMap::new();
    for txn in allocated.iter().filter(|t| t.is_expense()) {
        let Some(bucket) = boundaries
            .windows(2)
            .find(|pair| txn.date >= pair[0] && txn.date < pair[1])
            .map(|pair| pair[0])
            .or_else(|| (txn.date >= last_boundary).then_some(last_boundary))
        else {
            continue;
        };
        *debits.entry(bucket).or_insert_with(Money::zero) += txn.amount;
    }

    let mut balance = budget.starting_balance;
    let mut cumulative_credit = Money::zero();
    let mut cumulative_debit = Money::zero();

    boundaries
        .into_iter()
        .map(|boundary| {
            let credit = budget.amount;
            let debit = debits.get(&boundary).copied().unwrap_or_default();

            cumulative_credit += credit;
            cumulative_debit += debit;
            balance += credit - debit;

            LifecyclePoint {
                date: boundary,
                display_label: boundary.format("%b %Y").to_string(),
                credit,
                debit,
                balance,
                cumulative_credit,
                cumulative_debit,
            }
        })
        .collect()
}
