//! Service layer for the budget tracker
//!
//! The service layer provides business logic on top of the storage layer:
//! month summaries, income suggestions and checks, settings management, month
//! editing and yearly analytics.

pub mod category;
pub mod income;
pub mod month;
pub mod summary;
pub mod year;

pub use category::{CategoryService, CategoryUpdate};
pub use income::{
    check_income, check_source_defaults, suggest_for_period, suggest_income_for_month,
    validate_income_breakdown, IncomeCheck, IncomeService, IncomeSourceUpdate, NewIncomeSource,
    SavedIncomeSource,
};
pub use month::{EditState, MonthEditor};
pub use summary::{percent_of, summarize, UNKNOWN_SOURCE};
pub use year::{CategoryYearTotal, YearSummary, YearTotals};

use crate::error::BudgetResult;
use crate::models::BudgetConfig;
use crate::storage::BudgetStore;

/// Load the configuration, apply a change and save it stamped with the time
///
/// Nothing is written when `change` fails.
pub(crate) fn update_config<T, F>(store: &dyn BudgetStore, change: F) -> BudgetResult<T>
where
    F: FnOnce(&mut BudgetConfig) -> BudgetResult<T>,
{
    let mut config = store.load_config()?;
    let result = change(&mut config)?;
    config.touch();
    store.save_config(&config)?;
    Ok(result)
}
