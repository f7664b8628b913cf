//! Terminal display formatting
//!
//! Renders transactions and budget summaries as tables for the CLI.

use tabled::settings::Style;
use tabled::{Table, Tabled};

use crate::models::{Budget, Transaction};
use crate::services::accrual::BudgetSummary;
use crate::services::lifecycle::LifecyclePoint;

#[derive(Tabled)]
struct TransactionRow {
    #[tabled(rename = "Date")]
    date: String,
    #[tabled(rename = "Description")]
    description: String,
    #[tabled(rename = "Amount")]
    amount: String,
    #[tabled(rename = "Category")]
    category: String,
    #[tabled(rename = "Account")]
    account: String,
    #[tabled(rename = "Budget")]
    budget: String,
}

/// Format transactions as a table
pub fn transaction_table(transactions: &[Transaction], budgets: &[Budget]) -> String {
    if transactions.is_empty() {
        return "No transactions found.".to_string();
    }

    let rows: Vec<TransactionRow> = transactions
        .iter()
        .map(|txn| {
            let sign = if txn.is_expense() { "-" } else { "+" };
            let budget = txn
                .budget_id
                .as_ref()
                .and_then(|id| budgets.iter().find(|b| &b.id == id))
                .map(|b| b.title.clone())
                .unwrap_or_default();

            TransactionRow {
                date: txn.date.format("%Y-%m-%d").to_string(),
                description: truncate(&txn.description, 32),
                amount: format!("{}{}", sign, txn.amount),
                category: txn.category.clone(),
                account: txn.account.clone(),
                budget,
            }
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[derive(Tabled)]
struct BudgetRow {
    #[tabled(rename = "Budget")]
    title: String,
    #[tabled(rename = "Per Period")]
    amount: String,
    #[tabled(rename = "Periods")]
    periods: u32,
    #[tabled(rename = "Available")]
    available: String,
    #[tabled(rename = "Spent")]
    spent: String,
    #[tabled(rename = "Remaining")]
    remaining: String,
    #[tabled(rename = "Used")]
    used: String,
}

/// Format budgets with their summaries as a table
pub fn budget_table(entries: &[(Budget, BudgetSummary)]) -> String {
    if entries.is_empty() {
        return "No budgets found.".to_string();
    }

    let rows: Vec<BudgetRow> = entries
        .iter()
        .map(|(budget, summary)| BudgetRow {
            title: if budget.pinned {
                format!("* {}", budget.title)
            } else {
                budget.title.clone()
            },
            amount: format!("{} {}", budget.amount, budget.period),
            periods: summary.periods,
            available: summary.total_available.to_string(),
            spent: summary.spent.to_string(),
            remaining: summary.remaining.to_string(),
            used: format!("{:.0}%", summary.percentage_used),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

#[derive(Tabled)]
struct LifecycleRow {
    #[tabled(rename = "Period")]
    label: String,
    #[tabled(rename = "Credit")]
    credit: String,
    #[tabled(rename = "Debit")]
    debit: String,
    #[tabled(rename = "Balance")]
    balance: String,
}

/// Format a budget's lifecycle series as a table
pub fn lifecycle_table(series: &[LifecyclePoint]) -> String {
    if series.is_empty() {
        return "No history to chart (budget has no start date).".to_string();
    }

    let rows: Vec<LifecycleRow> = series
        .iter()
        .map(|point| LifecycleRow {
            label: point.display_label.clone(),
            credit: point.credit.to_string(),
            debit: point.debit.to_string(),
            balance: point.balance.to_string(),
        })
        .collect();

    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() <= max {
        s.to_string()
    } else {
        let head: String = s.chars().take(max.saturating_sub(1)).collect();
        format!("{}…", head)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{BudgetPeriod, Money, TransactionKind};
    use crate::services::accrual::summarize_on;
    use chrono::NaiveDate;

    #[test]
    fn test_empty_tables() {
        assert_eq!(transaction_table(&[], &[]), "No transactions found.");
        assert_eq!(budget_table(&[]), "No budgets found.");
    }

    #[test]
    fn test_transaction_table_contains_fields() {
        let mut txn = Transaction::new(
            NaiveDate::from_ymd_opt(2025, 3, 10).unwrap(),
            "Corner Store",
            Money::from_cents(1234),
            TransactionKind::Expense,
        );
        txn.category = "Groceries".to_string();

        let table = transaction_table(&[txn], &[]);
        assert!(table.contains("Corner Store"));
        assert!(table.contains("-$12.34"));
        assert!(table.contains("Groceries"));
    }

    #[test]
    fn test_budget_table_marks_pinned() {
        let mut budget = Budget::new("Rent", Money::from_cents(120000), BudgetPeriod::Monthly);
        budget.pinned = true;
        let summary = summarize_on(&budget, &[], NaiveDate::from_ymd_opt(2025, 3, 1).unwrap());

        let table = budget_table(&[(budget, summary)]);
        assert!(table.contains("* Rent"));
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("a very long description here", 10), "a very lo…");
    }
}
