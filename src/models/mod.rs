//! Core data models for the budget tracker
//!
//! Persisted shapes (configuration, categories, income sources, month records)
//! and the derived month summary.

pub mod budget;
pub mod category;
pub mod income;
pub mod money;
pub mod month;
pub mod period;
pub mod summary;

pub use budget::BudgetConfig;
pub use category::{slugify, Category, CategoryType, CategoryValidationError};
pub use income::{IncomeSource, IncomeValidationError, MonthlyIncome};
pub use money::{Money, MoneyParseError};
pub use month::{MonthData, MonthlyExpense, YearlyData};
pub use period::{PeriodParseError, YearMonth};
pub use summary::{CategoryWithActual, IncomeWithSource, MonthSummary};
