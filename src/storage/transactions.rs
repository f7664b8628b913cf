//! Transaction repository for JSON storage
//!
//! Manages loading and saving transactions to transactions.json

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::RwLock;

use chrono::NaiveDate;

use crate::error::BudgetBookError;
use crate::models::{BudgetId, Transaction, TransactionId, TransactionKind};

use super::file_io::{read_json, write_json_atomic};

/// Serializable transaction data structure
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
struct TransactionData {
    transactions: Vec<Transaction>,
}

/// Repository for transaction persistence with a budget index
pub struct TransactionRepository {
    path: PathBuf,
    data: RwLock<HashMap<TransactionId, Transaction>>,
    /// Index: budget_id -> transaction_ids
    by_budget: RwLock<HashMap<BudgetId, Vec<TransactionId>>>,
}

impl TransactionRepository {
    /// Create a new transaction repository
    pub fn new(path: PathBuf) -> Self {
        Self {
            path,
            data: RwLock::new(HashMap::new()),
            by_budget: RwLock::new(HashMap::new()),
        }
    }

    /// Load transactions from disk and build indexes
    pub fn load(&self) -> Result<(), BudgetBookError> {
        let file_data: TransactionData = read_json(&self.path)?;

        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_budget.clear();

        for txn in file_data.transactions {
            if let Some(budget_id) = &txn.budget_id {
                by_budget
                    .entry(budget_id.clone())
                    .or_default()
                    .push(txn.id.clone());
            }
            data.insert(txn.id.clone(), txn);
        }

        Ok(())
    }

    /// Save transactions to disk
    pub fn save(&self) -> Result<(), BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date).then_with(|| a.id.cmp(&b.id)));

        let file_data = TransactionData { transactions };
        write_json_atomic(&self.path, &file_data)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: &TransactionId) -> Result<Option<Transaction>, BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.get(id).cloned())
    }

    /// Get all transactions, newest first
    pub fn get_all(&self) -> Result<Vec<Transaction>, BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let mut transactions: Vec<_> = data.values().cloned().collect();
        transactions.sort_by(|a, b| b.date.cmp(&a.date));
        Ok(transactions)
    }

    /// Get transactions allocated to a budget
    pub fn get_by_budget(&self, budget_id: &BudgetId) -> Result<Vec<Transaction>, BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        let by_budget = self
            .by_budget
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        let ids = by_budget.get(budget_id).map(|v| v.as_slice()).unwrap_or(&[]);
        let mut transactions: Vec<_> = ids.iter().filter_map(|id| data.get(id).cloned()).collect();
        transactions.sort_by(|a, b| a.date.cmp(&b.date));
        Ok(transactions)
    }

    /// Get transactions of a given kind
    pub fn get_by_kind(&self, kind: TransactionKind) -> Result<Vec<Transaction>, BudgetBookError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|t| t.kind == kind)
            .collect())
    }

    /// Get transactions with a given category label
    pub fn get_by_category(&self, category: &str) -> Result<Vec<Transaction>, BudgetBookError> {
        Ok(self
            .get_all()?
            .into_iter()
            .filter(|t| t.category == category)
            .collect())
    }

    /// Get transactions in a date range (inclusive)
    pub fn get_by_date_range(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<Vec<Transaction>, BudgetBookError> {
        let all = self.get_all()?;
        Ok(all
            .into_iter()
            .filter(|t| t.date >= start && t.date <= end)
            .collect())
    }

    /// Insert or update a transaction
    pub fn upsert(&self, txn: Transaction) -> Result<(), BudgetBookError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        // Remove from old index if updating
        if let Some(old) = data.get(&txn.id) {
            if let Some(budget_id) = &old.budget_id {
                if let Some(ids) = by_budget.get_mut(budget_id) {
                    ids.retain(|id| id != &txn.id);
                }
            }
        }

        // Add to new index
        if let Some(budget_id) = &txn.budget_id {
            by_budget
                .entry(budget_id.clone())
                .or_default()
                .push(txn.id.clone());
        }

        data.insert(txn.id.clone(), txn);
        Ok(())
    }

    /// Insert a batch of transactions
    pub fn bulk_upsert(&self, transactions: Vec<Transaction>) -> Result<(), BudgetBookError> {
        for txn in transactions {
            self.upsert(txn)?;
        }
        Ok(())
    }

    /// Delete a transaction
    pub fn delete(&self, id: &TransactionId) -> Result<bool, BudgetBookError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        if let Some(txn) = data.remove(id) {
            if let Some(budget_id) = &txn.budget_id {
                if let Some(ids) = by_budget.get_mut(budget_id) {
                    ids.retain(|tid| tid != id);
                }
            }
            Ok(true)
        } else {
            Ok(false)
        }
    }

    /// Count transactions
    pub fn count(&self) -> Result<usize, BudgetBookError> {
        let data = self
            .data
            .read()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(data.len())
    }

    /// Remove all transactions
    pub fn clear(&self) -> Result<(), BudgetBookError> {
        let mut data = self
            .data
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        let mut by_budget = self
            .by_budget
            .write()
            .map_err(|e| BudgetBookError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        data.clear();
        by_budget.clear();
        Ok(())
    }
}
