//! CSV ingestion pipeline
//!
//! Per-bank adapters normalize heterogeneous CSV exports into canonical
//! transactions, and the duplicate detector cross-references candidates
//! against already-stored transactions. Adapters operate on raw text; reading
//! files is the caller's job.

pub mod categorize;
pub mod chase;
pub mod credit_union;
pub mod dedup;
pub mod paypal;
pub mod reader;

pub use dedup::{detect_duplicates, DedupOutcome};

use std::fmt;
use std::str::FromStr;

use crate::models::Transaction;

/// Result of importing one CSV file
#[derive(Debug, Clone, Default)]
pub struct ImportOutcome {
    /// Whether any transactions were produced
    pub success: bool,
    /// Normalized transactions, in file order
    pub transactions: Vec<Transaction>,
    /// Per-row failures (1-based row numbers, counting the header row)
    pub errors: Vec<String>,
    /// Rows that parsed but represent non-transaction events
    pub skipped: usize,
}

impl ImportOutcome {
    /// A format-level failure: one error, zero transactions
    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            transactions: Vec::new(),
            errors: vec![error.into()],
            skipped: 0,
        }
    }
}

/// The supported CSV export formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    Chase,
    PayPal,
    CreditUnion,
}

impl ImportFormat {
    /// Run the matching adapter over raw CSV text
    pub fn import(&self, text: &str) -> ImportOutcome {
        match self {
            Self::Chase => chase::import(text),
            Self::PayPal => paypal::import(text),
            Self::CreditUnion => credit_union::import(text),
        }
    }
}

impl fmt::Display for ImportFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Chase => write!(f, "chase"),
            Self::PayPal => write!(f, "paypal"),
            Self::CreditUnion => write!(f, "credit-union"),
        }
    }
}

impl FromStr for ImportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "chase" => Ok(Self::Chase),
            "paypal" => Ok(Self::PayPal),
            "credit-union" | "creditunion" | "tfcu" => Ok(Self::CreditUnion),
            other => Err(format!(
                "Unknown import format '{}' (expected chase, paypal, or credit-union)",
                other
            )),
        }
    }
}
