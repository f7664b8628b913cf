//! Transaction CLI commands

use chrono::{Local, NaiveDate};
use clap::Subcommand;

use crate::config::Settings;
use crate::display;
use crate::error::{BudgetBookError, BudgetBookResult};
use crate::import::{detect_duplicates, ImportFormat};
use crate::models::{Money, TransactionId, TransactionKind};
use crate::services::{CreateTransactionInput, TransactionFilter, TransactionService};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum TransactionCommands {
    /// Add a new transaction
    Add {
        /// Description (merchant, memo line, ...)
        description: String,
        /// Amount (e.g. "12.50")
        amount: String,
        /// Record as income instead of expense
        #[arg(short, long)]
        income: bool,
        /// Transaction date (YYYY-MM-DD, defaults to today)
        #[arg(short, long)]
        date: Option<String>,
        /// Category label
        #[arg(short, long, default_value = "Other")]
        category: String,
        /// Source account label (defaults from settings)
        #[arg(short, long)]
        account: Option<String>,
        /// Notes
        #[arg(short, long)]
        notes: Option<String>,
    },
    /// List transactions
    List {
        /// Only expenses or only income
        #[arg(short, long)]
        kind: Option<String>,
        /// Filter by category
        #[arg(short, long)]
        category: Option<String>,
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: usize,
    },
    /// Delete a transaction
    Delete {
        /// Transaction id
        id: String,
    },
    /// Import transactions from a bank CSV export
    Import {
        /// Path to the CSV file
        file: String,
        /// Export format: chase, paypal, or credit-union
        #[arg(short, long)]
        format: String,
    },
}

/// Handle a transaction subcommand
pub fn handle_transaction_command(
    storage: &Storage,
    settings: &Settings,
    command: TransactionCommands,
) -> BudgetBookResult<()> {
    let service = TransactionService::new(storage);

    match command {
        TransactionCommands::Add {
            description,
            amount,
            income,
            date,
            category,
            account,
            notes,
        } => {
            let date = match date {
                Some(s) => NaiveDate::parse_from_str(&s, "%Y-%m-%d").map_err(|_| {
                    BudgetBookError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", s))
                })?,
                None => Local::now().date_naive(),
            };

            let txn = service.create(CreateTransactionInput {
                date,
                description,
                amount: Money::parse(&amount)
                    .map_err(|e| BudgetBookError::Validation(e.to_string()))?,
                kind: if income {
                    TransactionKind::Income
                } else {
                    TransactionKind::Expense
                },
                category,
                account: account.unwrap_or_else(|| settings.default_account.clone()),
                notes,
                status: None,
            })?;
            println!("Recorded {} ({})", txn, txn.id);
        }
        TransactionCommands::List {
            kind,
            category,
            limit,
        } => {
            let mut filter = TransactionFilter::new().limit(limit);
            if let Some(kind) = kind {
                filter = filter.kind(parse_kind(&kind)?);
            }
            if let Some(category) = category {
                filter = filter.category(category);
            }

            let transactions = service.list(filter)?;
            let budgets = storage.budgets.get_all()?;
            println!("{}", display::transaction_table(&transactions, &budgets));
        }
        TransactionCommands::Delete { id } => {
            service.delete(&TransactionId::from_raw(id.clone()))?;
            println!("Deleted transaction {}", id);
        }
        TransactionCommands::Import { file, format } => {
            let format: ImportFormat = format
                .parse()
                .map_err(BudgetBookError::Import)?;
            let text = std::fs::read_to_string(&file)
                .map_err(|e| BudgetBookError::Io(format!("Failed to read {}: {}", file, e)))?;

            let outcome = format.import(&text);
            for error in &outcome.errors {
                eprintln!("warning: {}", error);
            }
            if !outcome.success {
                return Err(BudgetBookError::Import(format!(
                    "No transactions imported from {}",
                    file
                )));
            }

            let existing = storage.transactions.get_all()?;
            let deduped = detect_duplicates(outcome.transactions, &existing);

            let imported = service.bulk_create(deduped.unique)?;
            println!(
                "Imported {} transaction(s) ({} duplicate(s) skipped, {} row(s) skipped, {} error(s))",
                imported,
                deduped.duplicates.len(),
                outcome.skipped,
                outcome.errors.len()
            );
        }
    }

    Ok(())
}

fn parse_kind(s: &str) -> BudgetBookResult<TransactionKind> {
    match s.to_lowercase().as_str() {
        "income" => Ok(TransactionKind::Income),
        "expense" => Ok(TransactionKind::Expense),
        other => Err(BudgetBookError::Validation(format!(
            "Unknown kind '{}' (expected income or expense)",
            other
        ))),
    }
}
