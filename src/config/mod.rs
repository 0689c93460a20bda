//! Configuration module
//!
//! Resolves where the store lives on disk. The budget configuration itself
//! (categories and income sources) is data, see [`crate::models::BudgetConfig`].

pub mod paths;

pub use paths::BudgetPaths;
