//! Configuration and path management

pub mod paths;
pub mod settings;

pub use paths::BudgetBookPaths;
pub use settings::Settings;
