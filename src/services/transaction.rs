//! Transaction service
//!
//! Business logic for transaction management: CRUD operations, filtering, and
//! the delete-side of referential integrity with budgets.

use chrono::NaiveDate;

use crate::error::{BudgetBookError, BudgetBookResult};
use crate::models::{
    BudgetId, Money, Transaction, TransactionId, TransactionKind, TransactionStatus,
};
use crate::storage::Storage;

/// Options for filtering transactions
#[derive(Debug, Clone, Default)]
pub struct TransactionFilter {
    /// Filter by owning budget
    pub budget_id: Option<BudgetId>,
    /// Filter by kind
    pub kind: Option<TransactionKind>,
    /// Filter by category label
    pub category: Option<String>,
    /// Filter by date range start
    pub start_date: Option<NaiveDate>,
    /// Filter by date range end
    pub end_date: Option<NaiveDate>,
    /// Maximum number of transactions to return
    pub limit: Option<usize>,
}

impl TransactionFilter {
    /// Create a new empty filter
    pub fn new() -> Self {
        Self::default()
    }

    /// Filter by owning budget
    pub fn budget(mut self, budget_id: BudgetId) -> Self {
        self.budget_id = Some(budget_id);
        self
    }

    /// Filter by kind
    pub fn kind(mut self, kind: TransactionKind) -> Self {
        self.kind = Some(kind);
        self
    }

    /// Filter by category
    pub fn category(mut self, category: impl Into<String>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by date range
    pub fn date_range(mut self, start: NaiveDate, end: NaiveDate) -> Self {
        self.start_date = Some(start);
        self.end_date = Some(end);
        self
    }

    /// Limit results
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }
}

/// Input for creating a new transaction
#[derive(Debug, Clone)]
pub struct CreateTransactionInput {
    pub date: NaiveDate,
    pub description: String,
    pub amount: Money,
    pub kind: TransactionKind,
    pub category: String,
    pub account: String,
    pub notes: Option<String>,
    pub status: Option<TransactionStatus>,
}

/// Aggregate figures across all transactions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionStats {
    pub total_transactions: usize,
    pub total_income: Money,
    pub total_expenses: Money,
}

/// Service for transaction management
pub struct TransactionService<'a> {
    storage: &'a Storage,
}

impl<'a> TransactionService<'a> {
    /// Create a new transaction service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new transaction
    pub fn create(&self, input: CreateTransactionInput) -> BudgetBookResult<Transaction> {
        let mut txn = Transaction::new(input.date, input.description.trim(), input.amount, input.kind);
        txn.category = input.category;
        txn.account = input.account;
        txn.notes = input.notes;
        txn.status = input.status;

        txn.validate()
            .map_err(|e| BudgetBookError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        Ok(txn)
    }

    /// Insert a batch of transactions with a single save (used by import)
    pub fn bulk_create(&self, transactions: Vec<Transaction>) -> BudgetBookResult<usize> {
        for txn in &transactions {
            txn.validate()
                .map_err(|e| BudgetBookError::Validation(e.to_string()))?;
        }

        let count = transactions.len();
        self.storage.transactions.bulk_upsert(transactions)?;
        self.storage.transactions.save()?;
        Ok(count)
    }

    /// Get a transaction by ID
    pub fn get(&self, id: &TransactionId) -> BudgetBookResult<Option<Transaction>> {
        self.storage.transactions.get(id)
    }

    /// List transactions with optional filtering, newest first
    pub fn list(&self, filter: TransactionFilter) -> BudgetBookResult<Vec<Transaction>> {
        let mut transactions = if let Some(budget_id) = &filter.budget_id {
            self.storage.transactions.get_by_budget(budget_id)?
        } else {
            self.storage.transactions.get_all()?
        };

        if let Some(kind) = filter.kind {
            transactions.retain(|t| t.kind == kind);
        }
        if let Some(category) = &filter.category {
            transactions.retain(|t| &t.category == category);
        }
        if let Some(start) = filter.start_date {
            transactions.retain(|t| t.date >= start);
        }
        if let Some(end) = filter.end_date {
            transactions.retain(|t| t.date <= end);
        }
        if let Some(limit) = filter.limit {
            transactions.truncate(limit);
        }

        Ok(transactions)
    }

    /// Update mutable transaction fields (re-categorization / edit)
    pub fn update(
        &self,
        id: &TransactionId,
        date: Option<NaiveDate>,
        description: Option<String>,
        amount: Option<Money>,
        category: Option<String>,
        notes: Option<Option<String>>,
        status: Option<Option<TransactionStatus>>,
    ) -> BudgetBookResult<Transaction> {
        let mut txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| BudgetBookError::transaction_not_found(id.to_string()))?;

        if let Some(date) = date {
            txn.date = date;
        }
        if let Some(description) = description {
            txn.description = description.trim().to_string();
        }
        if let Some(amount) = amount {
            txn.amount = amount;
        }
        if let Some(category) = category {
            txn.category = category;
        }
        if let Some(notes) = notes {
            txn.notes = notes;
        }
        if let Some(status) = status {
            txn.status = status;
        }

        txn.validate()
            .map_err(|e| BudgetBookError::Validation(e.to_string()))?;

        self.storage.transactions.upsert(txn.clone())?;
        self.storage.transactions.save()?;
        Ok(txn)
    }

    /// Delete a transaction.
    ///
    /// When the transaction is allocated, its id is removed from the owning
    /// budget's list first so the budget never references a missing
    /// transaction.
    pub fn delete(&self, id: &TransactionId) -> BudgetBookResult<()> {
        let txn = self
            .storage
            .transactions
            .get(id)?
            .ok_or_else(|| BudgetBookError::transaction_not_found(id.to_string()))?;

        if let Some(budget_id) = &txn.budget_id {
            if let Some(mut budget) = self.storage.budgets.get(budget_id)? {
                budget.release(id);
                self.storage.budgets.upsert(budget)?;
            }
        }

        self.storage.transactions.delete(id)?;
        self.storage.save_all()?;
        Ok(())
    }

    /// Aggregate income/expense totals
    pub fn stats(&self) -> BudgetBookResult<TransactionStats> {
        let all = self.storage.transactions.get_all()?;

        let total_income = all.iter().filter(|t| t.is_income()).map(|t| t.amount).sum();
        let total_expenses = all.iter().filter(|t| t.is_expense()).map(|t| t.amount).sum();

        Ok(TransactionStats {
            total_transactions: all.len(),
            total_income,
            total_expenses,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::paths::BudgetBookPaths;
    use crate::models::{Budget, BudgetPeriod};
    use tempfile::TempDir;

    fn create_test_storage() -> (TempDir, Storage) {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetBookPaths::with_base_dir(temp_dir.path().to_path_buf());
        let mut storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (temp_dir, storage)
    }

    fn expense_input(description: &str, cents: i64) -> CreateTransactionInput {
        CreateTransactionInput {
            date: NaiveDate::from_ymd_opt(2025, 2, 10).unwrap(),
            description: description.into(),
            amount: Money::from_cents(cents),
            kind: TransactionKind::Expense,
            category: "Groceries".into(),
            account: "Checking".into(),
            notes: None,
            status: None,
        }
    }

    #[test]
    fn test_create_and_get() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service.create(expense_input("Market", 4200)).unwrap();
        let fetched = service.get(&txn.id).unwrap().unwrap();
        assert_eq!(fetched.description, "Market");
        assert_eq!(fetched.amount.cents(), 4200);
    }

    #[test]
    fn test_create_rejects_negative_amount() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let result = service.create(expense_input("Bad", -100));
        assert!(matches!(result, Err(BudgetBookError::Validation(_))));
    }

    #[test]
    fn test_list_with_filters() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(expense_input("A", 100)).unwrap();
        service.create(expense_input("B", 200)).unwrap();
        let mut income = expense_input("Paycheck", 100000);
        income.kind = TransactionKind::Income;
        income.category = "Income".into();
        service.create(income).unwrap();

        let expenses = service
            .list(TransactionFilter::new().kind(TransactionKind::Expense))
            .unwrap();
        assert_eq!(expenses.len(), 2);

        let by_category = service
            .list(TransactionFilter::new().category("Income"))
            .unwrap();
        assert_eq!(by_category.len(), 1);

        let limited = service.list(TransactionFilter::new().limit(1)).unwrap();
        assert_eq!(limited.len(), 1);
    }

    #[test]
    fn test_update_recategorizes() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txn = service.create(expense_input("Store", 500)).unwrap();
        let updated = service
            .update(&txn.id, None, None, None, Some("Shopping".into()), None, None)
            .unwrap();
        assert_eq!(updated.category, "Shopping");
        assert_eq!(updated.amount.cents(), 500);
    }

    #[test]
    fn test_delete_releases_budget_reference() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let mut budget = Budget::new("Food", Money::from_cents(50000), BudgetPeriod::Monthly);
        let txn = service.create(expense_input("Store", 500)).unwrap();

        // Wire the allocation by hand on both sides
        budget.transaction_ids.push(txn.id.clone());
        storage.budgets.upsert(budget.clone()).unwrap();
        let mut owned = txn.clone();
        owned.budget_id = Some(budget.id.clone());
        storage.transactions.upsert(owned).unwrap();

        service.delete(&txn.id).unwrap();

        assert!(storage.transactions.get(&txn.id).unwrap().is_none());
        let budget = storage.budgets.get(&budget.id).unwrap().unwrap();
        assert!(budget.transaction_ids.is_empty());
    }

    #[test]
    fn test_bulk_create() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        let txns = vec![
            Transaction::new(
                NaiveDate::from_ymd_opt(2025, 1, 1).unwrap(),
                "One",
                Money::from_cents(100),
                TransactionKind::Expense,
            ),
            Transaction::new(
                NaiveDate::from_ymd_opt(2025, 1, 2).unwrap(),
                "Two",
                Money::from_cents(200),
                TransactionKind::Income,
            ),
        ];

        assert_eq!(service.bulk_create(txns).unwrap(), 2);
        assert_eq!(storage.transactions.count().unwrap(), 2);
    }

    #[test]
    fn test_stats() {
        let (_temp_dir, storage) = create_test_storage();
        let service = TransactionService::new(&storage);

        service.create(expense_input("A", 1500)).unwrap();
        let mut income = expense_input("Paycheck", 100000);
        income.kind = TransactionKind::Income;
        service.create(income).unwrap();

        let stats = service.stats().unwrap();
        assert_eq!(stats.total_transactions, 2);
        assert_eq!(stats.total_income.cents(), 100000);
        assert_eq!(stats.total_expenses.cents(), 1500);
    }
}
