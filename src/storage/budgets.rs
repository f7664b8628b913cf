//! Budget repository for JSON storage
//!
//! Manages loading and saving budgets to budgets.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use crate::error::BudgetBookError;
use crate::models::{Budget, BudgetId};

use super::file_io::{read_json, write_json_atomic};

/// Serializable budget data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct BudgetData {
    budgets: Vec<Budget>,
}

/// Repository for budget persistence
pub struct BudgetRepository {
    path: PathBuf,
    data: RwLock<HashMap<BudgetId, Budget>>,
}

impl BudgetRepository {
    /// Create a new budget repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
        }
    }

    /// Load budgets from disk
    pub fn load(&self) -> Result<(), BudgetBookError> {
        let file_data: BudgetData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        for budget in file_data.budgets {
            data.insert(budget.id.clone(), budget);
        }

        Ok(())
    }

    /// Save budgets to disk
    pub fn save(&self) -> Result<(), BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| a.created_at.cmp(&b.created_at));

        let file_data = BudgetData { budgets };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a budget by ID
    pub fn get(&self, id: &BudgetId) -> Result<Option<Budget>, BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get all budgets, pinned first, then by display order and creation time
    pub fn get_all(&self) -> Result<Vec<Budget>, BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut budgets: Vec<_> = data.values().cloned().collect();
        budgets.sort_by(|a, b| {
            b.pinned
                .cmp(&a.pinned)
                .then_with(|| {
                    a.display_order
                        .unwrap_or(u32::MAX)
                        .cmp(&b.display_order.unwrap_or(u32::MAX))
                })
                .then_with(|| a.created_at.cmp(&b.created_at))
        });
        Ok(budgets)
    }

    /// Find a budget by title (exact, case-insensitive)
    pub fn find_by_title(&self, title: &str) -> Result<Option<Budget>, BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data
            .values()
            .find(|b| b.title.eq_ignore_ascii_case(title))
            .cloned())
    }

    /// Insert or update a budget
    pub fn upsert(&self, budget: Budget) -> Result<(), BudgetBookError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.insert(budget.id.clone(), budget);
        Ok(())
    }

    /// Delete a budget
    pub fn delete(&self, id: &BudgetId) -> Result<bool, BudgetBookError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        Ok(data.remove(id).is_some())
    }

    /// Count budgets
    pub fn count(&self) -> Result<usize, BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Remove all budgets
    pub fn clear(&self) -> Result<(), BudgetBookError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        Ok(())
    }
}
