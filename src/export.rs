//! Data export
//!
//! Exports transactions to CSV and the full dataset (budgets plus
//! transactions) to a JSON snapshot.

use std::io::Write;

use serde::Serialize;

use crate::error::{BudgetBookError, BudgetBookResult};
use crate::models::{Budget, Transaction};
use crate::storage::Storage;

/// Full-dataset snapshot shape
#[derive(Debug, Serialize)]
pub struct Snapshot {
    pub budgets: Vec<Budget>,
    pub transactions: Vec<Transaction>,
}

/// Export all transactions as CSV
pub fn export_transactions_csv<W: Write>(storage: &Storage, writer: W) -> BudgetBookResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    csv_writer
        .write_record([
            "ID",
            "Date",
            "Description",
            "Amount",
            "Type",
            "Category",
            "Account",
            "Notes",
            "Status",
            "Budget",
        ])
        .map_err(|e| BudgetBookError::Export(e.to_string()))?;

    for txn in storage.transactions.get_all()? {
        let date = txn.date.format("%Y-%m-%d").to_string();
        let amount = format!("{}.{:02}", txn.amount.dollars(), txn.amount.cents_part());
        let kind = txn.kind.to_string();
        let status = txn.status.map(|s| s.to_string()).unwrap_or_default();

        csv_writer
            .write_record([
                txn.id.as_str(),
                date.as_str(),
                txn.description.as_str(),
                amount.as_str(),
                kind.as_str(),
                txn.category.as_str(),
                txn.account.as_str(),
                txn.notes.as_deref().unwrap_or(""),
                status.as_str(),
                txn.budget_id.as_ref().map(|b| b.as_str()).unwrap_or(""),
            ])
            .map_err(|e| BudgetBookError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| BudgetBookError::Export(e.to_string()))?;
    Ok(())
}

/// Export budgets and transactions as a pretty-printed JSON snapshot
pub fn export_snapshot_json<W: Write>(storage: &Storage, writer: W) -> BudgetBookResult<()> {
    let snapshot = Snapshot {
        budgets: storage.budgets.get_all()?,
        transactions: storage.transactions.get_all()?,
    };

    serde_json::to_writer_pretty(writer, &snapshot)
        .map_err(|e| BudgetBookError::Export(e.to_string()))
}
