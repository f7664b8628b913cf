//! Service layer for BudgetBook
//!
//! The service layer provides business logic on top of the storage layer:
//! period math, budget accrual, lifecycle series, and the cross-entity
//! allocation and delete operations.

pub mod accrual;
pub mod budget;
pub mod lifecycle;
pub mod period;
pub mod transaction;

pub use accrual::BudgetSummary;
pub use budget::{BudgetService, CreateBudgetInput};
pub use lifecycle::LifecyclePoint;
pub use transaction::{
    CreateTransactionInput, TransactionFilter, TransactionService, TransactionStats,
};
