//! Storage layer for BudgetBook
//!
//! Provides JSON file storage with atomic writes and automatic directory
//! creation. The core services are persistence-agnostic; this layer is the
//! concrete storage collaborator they are wired to.

pub mod budgets;
pub mod file_io;
pub mod transactions;

pub use budgets::BudgetRepository;
pub use file_io::{read_json, write_json_atomic};
pub use transactions::TransactionRepository;

use crate::config::paths::BudgetBookPaths;
use crate::error::BudgetBookError;

/// Main storage coordinator that provides access to all repositories
pub struct Storage {
    paths: BudgetBookPaths,
    pub transactions: TransactionRepository,
    pub budgets: BudgetRepository,
}

impl Storage {
    /// Create a new Storage instance
    pub fn new(paths: BudgetBookPaths) -> Result<Self, BudgetBookError> {
        // Ensure directories exist
        paths.ensure_directories()?;

        Ok(Self {
            transactions: TransactionRepository::new(paths.transactions_file()),
            budgets: BudgetRepository::new(paths.budgets_file()),
            paths,
        })
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetBookPaths {
        &self.paths
    }

    /// Load all data from disk
    pub fn load_all(&mut self) -> Result<(), BudgetBookError> {
        self.transactions.load()?;
        self.budgets.load()?;
        Ok(())
    }

    /// Save all data to disk
    pub fn save_all(&self) -> Result<(), BudgetBookError> {
        self.transactions.save()?;
        self.budgets.save()?;
        Ok(())
    }

    /// Remove all data (in memory and on disk)
    pub fn clear_all(&self) -> Result<(), BudgetBookError> {
        self.transactions.clear()?;
        self.budgets.clear()?;
        self.save_all()
    }
}
