//! Budget service
//!
//! Business logic for budget management. This service is the sole authority
//! for the allocation relationship: `Budget.transaction_ids` and
//! `Transaction.budget_id` are only ever changed together, so no caller can
//! desynchronize the two sides.

use chrono::NaiveDate;

use crate::error::{BudgetBookError, BudgetBookResult};
use crate::models::{Budget, BudgetId, BudgetPeriod, Money, Transaction, TransactionId};
use crate::services::accrual::{summarize, BudgetSummary};
use crate::services::lifecycle::{generate_series, LifecyclePoint};
use crate::storage::Storage;

/// Input for creating a new budget
#[derive(Debug, Clone)]
pub struct CreateBudgetInput {
    pub title: String,
    pub amount: Money,
    pub period: BudgetPeriod,
    pub start_date: Option<NaiveDate>,
    pub starting_balance: Money,
    pub rollover_day: Option<u32>,
}

/// Service for budget management
pub struct BudgetService<'a> {
    storage: &'a Storage,
}

impl<'a> BudgetService<'a> {
    /// Create a new budget service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Create a new budget
    pub fn create(&self, input: CreateBudgetInput) -> BudgetBookResult<Budget> {
        let mut budget = Budget::new(input.title.trim(), input.amount, input.period);
        budget.start_date = input.start_date;
        budget.starting_balance = input.starting_balance;
        budget.rollover_day = input.rollover_day;

        budget
            .validate()
            .map_err(|e| BudgetBookError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        Ok(budget)
    }

    /// Get a budget by ID
    pub fn get(&self, id: &BudgetId) -> BudgetBookResult<Option<Budget>> {
        self.storage.budgets.get(id)
    }

    /// Find a budget by id or title
    pub fn find(&self, identifier: &str) -> BudgetBookResult<Option<Budget>> {
        if let Some(budget) = self.storage.budgets.get(&BudgetId::from_raw(identifier))? {
            return Ok(Some(budget));
        }
        self.storage.budgets.find_by_title(identifier)
    }

    /// List all budgets
    pub fn list(&self) -> BudgetBookResult<Vec<Budget>> {
        self.storage.budgets.get_all()
    }

    /// Update mutable budget fields
    #[allow(clippy::too_many_arguments)]
    pub fn update(
        &self,
        id: &BudgetId,
        title: Option<String>,
        amount: Option<Money>,
        start_date: Option<Option<NaiveDate>>,
        starting_balance: Option<Money>,
        rollover_day: Option<Option<u32>>,
        pinned: Option<bool>,
    ) -> BudgetBookResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| BudgetBookError::budget_not_found(id.to_string()))?;

        if let Some(title) = title {
            budget.title = title.trim().to_string();
        }
        if let Some(amount) = amount {
            budget.amount = amount;
        }
        if let Some(start_date) = start_date {
            budget.start_date = start_date;
        }
        if let Some(starting_balance) = starting_balance {
            budget.starting_balance = starting_balance;
        }
        if let Some(rollover_day) = rollover_day {
            budget.rollover_day = rollover_day;
        }
        if let Some(pinned) = pinned {
            budget.pinned = pinned;
        }

        budget
            .validate()
            .map_err(|e| BudgetBookError::Validation(e.to_string()))?;

        self.storage.budgets.upsert(budget.clone())?;
        self.storage.budgets.save()?;
        Ok(budget)
    }

    /// Replace a budget's allocation set.
    ///
    /// Transactions dropped from the set lose their back-reference;
    /// transactions added to the set gain it, and are released from any other
    /// budget that listed them (a transaction belongs to at most one budget).
    /// All in-memory writes land before the single save, so the caller never
    /// observes a dangling reference.
    pub fn allocate(
        &self,
        budget_id: &BudgetId,
        transaction_ids: Vec<TransactionId>,
    ) -> BudgetBookResult<Budget> {
        let mut budget = self
            .storage
            .budgets
            .get(budget_id)?
            .ok_or_else(|| BudgetBookError::budget_not_found(budget_id.to_string()))?;

        // Every id must resolve before anything is written
        let mut incoming = Vec::with_capacity(transaction_ids.len());
        for id in &transaction_ids {
            let txn = self
                .storage
                .transactions
                .get(id)?
                .ok_or_else(|| BudgetBookError::transaction_not_found(id.to_string()))?;
            incoming.push(txn);
        }

        // Clear the back-reference on transactions no longer in the set
        for previous in self.storage.transactions.get_by_budget(budget_id)? {
            if !transaction_ids.contains(&previous.id) {
                let mut txn = previous;
                txn.budget_id = None;
                self.storage.transactions.upsert(txn)?;
            }
        }

        // Point the new set at this budget, releasing other owners
        for mut txn in incoming {
            if let Some(other_id) = txn.budget_id.clone() {
                if other_id != *budget_id {
                    if let Some(mut other) = self.storage.budgets.get(&other_id)? {
                        other.release(&txn.id);
                        self.storage.budgets.upsert(other)?;
                    }
                }
            }
            txn.budget_id = Some(budget_id.clone());
            self.storage.transactions.upsert(txn)?;
        }

        budget.transaction_ids = transaction_ids;
        self.storage.budgets.upsert(budget.clone())?;

        self.storage.save_all()?;
        Ok(budget)
    }

    /// Delete a budget, clearing the back-reference on all member
    /// transactions first so none is left dangling.
    pub fn delete(&self, id: &BudgetId) -> BudgetBookResult<()> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| BudgetBookError::budget_not_found(id.to_string()))?;

        for mut txn in self.storage.transactions.get_by_budget(&budget.id)? {
            txn.budget_id = None;
            self.storage.transactions.upsert(txn)?;
        }

        self.storage.budgets.delete(id)?;
        self.storage.save_all()?;
        Ok(())
    }

    /// Transactions currently allocated to a budget
    pub fn allocated_transactions(&self, id: &BudgetId) -> BudgetBookResult<Vec<Transaction>> {
        self.storage.transactions.get_by_budget(id)
    }

    /// Accounting summary for a budget as of now
    pub fn summary(&self, id: &BudgetId) -> BudgetBookResult<BudgetSummary> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| BudgetBookError::budget_not_found(id.to_string()))?;
        let transactions = self.allocated_transactions(id)?;
        Ok(summarize(&budget, &transactions))
    }

    /// Lifecycle series for a budget, for charting
    pub fn lifecycle(&self, id: &BudgetId) -> BudgetBookResult<Vec<LifecyclePoint>> {
        let budget = self
            .storage
            .budgets
            .get(id)?
            .ok_or_else(|| BudgetBookError::budget_not_found(id.to_string()))?;
        let transactions = self.allocated_transactions(id)?;
        Ok(generate_series(&budget, &transactions))
    }
}
