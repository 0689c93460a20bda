//! CLI command handlers
//!
//! This module contains the implementation of CLI commands,
//! bridging the clap argument parsing with the service layer.

pub mod category;
pub mod income;
pub mod month;
pub mod year;

pub use category::{handle_category_command, CategoryCommands};
pub use income::{handle_source_command, SourceCommands};
pub use month::{handle_month_command, MonthCommands};
pub use year::{handle_year_command, ExportFormat, YearCommands};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryType, Money};

/// Parse a user-entered amount, naming the field in the error
pub(crate) fn parse_amount(value: &str, field: &str) -> BudgetResult<Money> {
    Money::parse(value)
        .map_err(|e| BudgetError::Validation(format!("Invalid {} amount: {}", field, e)))
}

pub(crate) fn parse_category_type(value: &str) -> BudgetResult<CategoryType> {
    value
        .parse()
        .map_err(|e: crate::models::CategoryValidationError| BudgetError::Validation(e.to_string()))
}
