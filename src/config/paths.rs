//! Path management for BudgetBook
//!
//! Provides platform-appropriate path resolution for configuration and data.
//!
//! ## Path Resolution Order
//!
//! 1. `BUDGETBOOK_DATA_DIR` environment variable (if set)
//! 2. The platform config directory via `directories`
//!    (Linux: `~/.config/budgetbook`, macOS: `~/Library/Application
//!    Support/budgetbook`, Windows: `%APPDATA%\budgetbook`)

use std::path::PathBuf;

use directories::ProjectDirs;

use crate::error::BudgetBookError;

/// Manages all paths used by BudgetBook
#[derive(Debug, Clone)]
pub struct BudgetBookPaths {
    /// Base directory for all BudgetBook data
    base_dir: PathBuf,
}

impl BudgetBookPaths {
    /// Create a new BudgetBookPaths instance
    ///
    /// # Errors
    ///
    /// Returns an error if no home directory can be determined.
    pub fn new() -> Result<Self, BudgetBookError> {
        let base_dir = if let Ok(custom) = std::env::var("BUDGETBOOK_DATA_DIR") {
            PathBuf::from(custom)
        } else {
            let dirs = ProjectDirs::from("", "", "budgetbook").ok_or_else(|| {
                BudgetBookError::Config("Could not determine a home directory".into())
            })?;
            dirs.config_dir().to_path_buf()
        };

        Ok(Self { base_dir })
    }

    /// Create paths with a custom base directory (useful for testing)
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the data directory
    pub fn data_dir(&self) -> PathBuf {
        self.base_dir.join("data")
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("config.json")
    }

    /// Get the path to transactions.json
    pub fn transactions_file(&self) -> PathBuf {
        self.data_dir().join("transactions.json")
    }

    /// Get the path to budgets.json
    pub fn budgets_file(&self) -> PathBuf {
        self.data_dir().join("budgets.json")
    }

    /// Ensure all required directories exist
    pub fn ensure_directories(&self) -> Result<(), BudgetBookError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| BudgetBookError::Io(format!("Failed to create base directory: {}", e)))?;

        std::fs::create_dir_all(self.data_dir())
            .map_err(|e| BudgetBookError::Io(format!("Failed to create data directory: {}", e)))?;

        Ok(())
    }
}
