//! User settings
//!
//! Small set of persisted preferences; everything else is derived from data.

use serde::{Deserialize, Serialize};

use super::paths::BudgetBookPaths;
use crate::error::BudgetBookResult;
use crate::storage::file_io::{read_json, write_json_atomic};

/// Persisted user preferences
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Settings {
    /// Currency symbol used for display
    pub currency_symbol: String,

    /// Account label applied to manually entered transactions
    pub default_account: String,

    /// Rollover day suggested when creating monthly budgets
    pub default_rollover_day: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            currency_symbol: "$".to_string(),
            default_account: "Checking".to_string(),
            default_rollover_day: 1,
        }
    }
}

impl Settings {
    /// Load settings from disk, creating the file with defaults if missing
    pub fn load_or_create(paths: &BudgetBookPaths) -> BudgetBookResult<Self> {
        let path = paths.settings_file();
        if path.exists() {
            read_json(&path)
        } else {
            let settings = Self::default();
            write_json_atomic(&path, &settings)?;
            Ok(settings)
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &BudgetBookPaths) -> BudgetBookResult<()> {
        write_json_atomic(paths.settings_file(), self)
    }
}
