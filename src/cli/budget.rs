//! Budget CLI commands

use chrono::NaiveDate;
use clap::Subcommand;

use crate::config::Settings;
use crate::display;
use crate::error::{BudgetBookError, BudgetBookResult};
use crate::models::{BudgetPeriod, Money, TransactionId};
use crate::services::{BudgetService, CreateBudgetInput};
use crate::storage::Storage;

#[derive(Subcommand)]
pub enum BudgetCommands {
    /// Create a new budget
    Add {
        /// Budget title
        title: String,
        /// Amount granted per period (e.g. "500" or "500.00")
        amount: String,
        /// Funding period: monthly, weekly, or yearly
        #[arg(short, long, default_value = "monthly")]
        period: String,
        /// Schedule start date (YYYY-MM-DD)
        #[arg(short, long)]
        start_date: Option<String>,
        /// Day of month credits apply (monthly budgets)
        #[arg(short, long)]
        rollover_day: Option<u32>,
        /// Carried-over balance from external tracking
        #[arg(short = 'b', long, default_value = "0")]
        starting_balance: String,
    },
    /// List budgets with their current standing
    List,
    /// Show one budget's accounting summary
    Status {
        /// Budget title or id
        budget: String,
    },
    /// Show a budget's credit/debit/balance history
    Chart {
        /// Budget title or id
        budget: String,
    },
    /// Replace a budget's allocated transaction set
    Allocate {
        /// Budget title or id
        budget: String,
        /// Transaction ids (the new complete set)
        transactions: Vec<String>,
    },
    /// Delete a budget, releasing its transactions
    Delete {
        /// Budget title or id
        budget: String,
    },
}

/// Handle a budget subcommand
pub fn handle_budget_command(
    storage: &Storage,
    settings: &Settings,
    command: BudgetCommands,
) -> BudgetBookResult<()> {
    let service = BudgetService::new(storage);

    match command {
        BudgetCommands::Add {
            title,
            amount,
            period,
            start_date,
            rollover_day,
            starting_balance,
        } => {
            let period = parse_period(&period)?;
            let start_date = start_date.map(|s| parse_date(&s)).transpose()?;
            let rollover_day = match (period, rollover_day, start_date) {
                (BudgetPeriod::Monthly, Some(day), _) => Some(day),
                (BudgetPeriod::Monthly, None, Some(_)) => Some(settings.default_rollover_day),
                _ => None,
            };

            let budget = service.create(CreateBudgetInput {
                title,
                amount: parse_money(&amount)?,
                period,
                start_date,
                starting_balance: parse_money(&starting_balance)?,
                rollover_day,
            })?;
            println!("Created budget {} ({})", budget.title, budget.id);
        }
        BudgetCommands::List => {
            let mut entries = Vec::new();
            for budget in service.list()? {
                let summary = service.summary(&budget.id)?;
                entries.push((budget, summary));
            }
            println!("{}", display::budget_table(&entries));
        }
        BudgetCommands::Status { budget } => {
            let budget = find_budget(&service, &budget)?;
            let summary = service.summary(&budget.id)?;
            println!("{}", budget.title);
            println!("  Periods elapsed:   {}", summary.periods);
            println!("  Cumulative budget: {}", summary.cumulative_budget);
            println!("  Total available:   {}", summary.total_available);
            println!("  Spent:             {}", summary.spent);
            println!("  Remaining:         {}", summary.remaining);
            println!("  Used:              {:.1}%", summary.percentage_used);
        }
        BudgetCommands::Chart { budget } => {
            let budget = find_budget(&service, &budget)?;
            let series = service.lifecycle(&budget.id)?;
            println!("{}", display::lifecycle_table(&series));
        }
        BudgetCommands::Allocate {
            budget,
            transactions,
        } => {
            let budget = find_budget(&service, &budget)?;
            let ids: Vec<TransactionId> =
                transactions.into_iter().map(TransactionId::from_raw).collect();
            let count = ids.len();
            service.allocate(&budget.id, ids)?;
            println!("Allocated {} transaction(s) to {}", count, budget.title);
        }
        BudgetCommands::Delete { budget } => {
            let budget = find_budget(&service, &budget)?;
            service.delete(&budget.id)?;
            println!("Deleted budget {}", budget.title);
        }
    }

    Ok(())
}

fn find_budget(
    service: &BudgetService,
    identifier: &str,
) -> BudgetBookResult<crate::models::Budget> {
    service
        .find(identifier)?
        .ok_or_else(|| BudgetBookError::budget_not_found(identifier))
}

fn parse_period(s: &str) -> BudgetBookResult<BudgetPeriod> {
    match s.to_lowercase().as_str() {
        "monthly" => Ok(BudgetPeriod::Monthly),
        "weekly" => Ok(BudgetPeriod::Weekly),
        "yearly" => Ok(BudgetPeriod::Yearly),
        other => Err(BudgetBookError::Validation(format!(
            "Unknown period '{}' (expected monthly, weekly, or yearly)",
            other
        ))),
    }
}

fn parse_date(s: &str) -> BudgetBookResult<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map_err(|_| BudgetBookError::Validation(format!("Invalid date '{}' (expected YYYY-MM-DD)", s)))
}

fn parse_money(s: &str) -> BudgetBookResult<Money> {
    Money::parse(s).map_err(|e| BudgetBookError::Validation(e.to_string()))
}
