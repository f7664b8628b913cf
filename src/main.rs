use anyhow::Result;
use clap::{Parser, Subcommand};

use budgetbook::cli::{
    handle_budget_command, handle_transaction_command, BudgetCommands, TransactionCommands,
};
use budgetbook::config::{paths::BudgetBookPaths, Settings};
use budgetbook::export;
use budgetbook::storage::Storage;

#[derive(Parser)]
#[command(
    name = "budgetbook",
    version,
    about = "Personal finance tracker with rollover-aware budgets",
    long_about = "BudgetBook tracks income and expense transactions, funds \
                  recurring budgets on their rollover schedule, and imports \
                  transaction history from bank and PayPal CSV exports."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Budget management commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Transaction management commands
    #[command(subcommand, alias = "txn")]
    Transaction(TransactionCommands),

    /// Export data
    Export {
        /// Output format: csv (transactions) or json (full snapshot)
        #[arg(short, long, default_value = "csv")]
        format: String,
    },

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = BudgetBookPaths::new()?;
    let settings = Settings::load_or_create(&paths)?;

    let mut storage = Storage::new(paths.clone())?;
    storage.load_all()?;

    match cli.command {
        Commands::Budget(cmd) => {
            handle_budget_command(&storage, &settings, cmd)?;
        }
        Commands::Transaction(cmd) => {
            handle_transaction_command(&storage, &settings, cmd)?;
        }
        Commands::Export { format } => match format.to_lowercase().as_str() {
            "csv" => export::export_transactions_csv(&storage, std::io::stdout().lock())?,
            "json" => export::export_snapshot_json(&storage, std::io::stdout().lock())?,
            other => anyhow::bail!("Unknown export format '{}' (expected csv or json)", other),
        },
        Commands::Config => {
            println!("Base directory:    {}", paths.base_dir().display());
            println!("Transactions file: {}", paths.transactions_file().display());
            println!("Budgets file:      {}", paths.budgets_file().display());
            println!("Currency symbol:   {}", settings.currency_symbol);
            println!("Default account:   {}", settings.default_account);
            println!("Default rollover:  day {}", settings.default_rollover_day);
        }
    }

    Ok(())
}
