//! Strongly-typed ID wrappers for all entity types
//!
//! Using newtype wrappers prevents accidentally mixing up IDs from different
//! entity types at compile time. IDs are stored as strings because imported
//! transactions carry synthetic ids composed from their import source rather
//! than bare UUIDs.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Macro to generate ID newtype wrappers
macro_rules! define_id {
    ($name:ident, $prefix:literal) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new random ID
            pub fn new() -> Self {
                Self(format!("{}_{}", $prefix, Uuid::new_v4().simple()))
            }

            /// Wrap an existing raw identifier
            pub fn from_raw(raw: impl Into<String>) -> Self {
                Self(raw.into())
            }

            /// Get the identifier as a string slice
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::new()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl From<String> for $name {
            fn from(raw: String) -> Self {
                Self(raw)
            }
        }

        impl FromStr for $name {
            type Err = std::convert::Infallible;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(s.to_string()))
            }
        }
    };
}

define_id!(TransactionId, "txn");
define_id!(BudgetId, "bgt");

impl TransactionId {
    /// Synthesize an ID for an imported transaction.
    ///
    /// Composed of the source tag, the import timestamp in milliseconds, the
    /// row index within the file, and a random suffix — unique within and
    /// across import runs without a central sequence.
    pub fn for_import(source_tag: &str, row_index: usize) -> Self {
        let suffix = Uuid::new_v4().simple().to_string();
        Self(format!(
            "{}_{}_{}_{}",
            source_tag,
            Utc::now().timestamp_millis(),
            row_index,
            &suffix[..7]
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_id_creation() {
        let id = TransactionId::new();
        assert!(id.as_str().starts_with("txn_"));
    }

    #[test]
    fn test_id_equality() {
        let id1 = BudgetId::from_raw("bgt_abc");
        let id2 = BudgetId::from_raw("bgt_abc");
        assert_eq!(id1, id2);

        let id3 = BudgetId::new();
        assert_ne!(id1, id3);
    }

    #[test]
    fn test_import_id_shape() {
        let id = TransactionId::for_import("chase", 3);
        let parts: Vec<&str> = id.as_str().split('_').collect();
        assert_eq!(parts.len(), 4);
        assert_eq!(parts[0], "chase");
        assert_eq!(parts[2], "3");
        assert_eq!(parts[3].len(), 7);
    }

    #[test]
    fn test_import_ids_unique_within_run() {
        let a = TransactionId::for_import("paypal", 1);
        let b = TransactionId::for_import("paypal", 1);
        assert_ne!(a, b);
    }

    #[test]
    fn test_id_serialization() {
        let id = TransactionId::from_raw("chase_1730000000000_2_ab12cd3");
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"chase_1730000000000_2_ab12cd3\"");

        let deserialized: TransactionId = serde_json::from_str(&json).unwrap();
        assert_eq!(id, deserialized);
    }

    #[test]
    fn test_different_id_types_not_mixable() {
        // Different ID types are distinct at compile time; only the raw
        // strings can be compared.
        let txn_id = TransactionId::from_raw("shared");
        let budget_id = BudgetId::from_raw("shared");
        assert_eq!(txn_id.as_str(), budget_id.as_str());
    }
}
