//! Core data models for BudgetBook
//!
//! Defines the canonical Transaction and Budget shapes shared by the storage
//! layer, the accounting engine, and the CSV import pipeline.

pub mod budget;
pub mod ids;
pub mod money;
pub mod transaction;

pub use budget::{Budget, BudgetPeriod, BudgetValidationError};
pub use ids::{BudgetId, TransactionId};
pub use money::{Money, MoneyParseError};
pub use transaction::{
    Transaction, TransactionKind, TransactionStatus, TransactionValidationError,
};
