//! Derived month views
//!
//! These are projections computed from a configuration and a month record.
//! They are never persisted and should be recomputed after every fresh read.

use serde::Serialize;

use super::category::Category;
use super::income::MonthlyIncome;
use super::money::Money;

/// A category together with what was spent against it
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryWithActual {
    #[serde(flatten)]
    pub category: Category,
    pub actual_amount: Money,
    /// Actual minus budget; positive means over budget
    pub variance: Money,
    /// Actual as a percentage of budget, 0 when there is no budget
    pub percent_used: f64,
}

impl CategoryWithActual {
    pub fn is_over_budget(&self) -> bool {
        self.variance.is_positive()
    }
}

/// A month's income record joined with its source's display metadata
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeWithSource {
    #[serde(flatten)]
    pub income: MonthlyIncome,
    /// "Unknown" when the source has been removed from the configuration
    pub source_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source_color: Option<String>,
}

/// Everything derived for one month
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthSummary {
    pub year: i32,
    pub month: u32,
    pub total_budget: Money,
    pub total_actual: Money,
    pub total_variance: Money,
    pub fixed_budget: Money,
    pub fixed_actual: Money,
    pub variable_budget: Money,
    pub variable_actual: Money,
    pub categories: Vec<CategoryWithActual>,
    pub total_income_gross: Money,
    pub total_income_net: Money,
    pub total_deductions: Money,
    /// Net income minus actual spending
    pub disposable_income: Money,
    pub income_breakdown: Vec<IncomeWithSource>,
}

impl MonthSummary {
    pub fn is_under_budget(&self) -> bool {
        !self.total_variance.is_positive()
    }

    /// Spending as a percentage of the whole budget, 0 when there is no budget
    pub fn percent_used(&self) -> f64 {
        if self.total_budget.is_positive() {
            self.total_actual.as_f64() / self.total_budget.as_f64() * 100.0
        } else {
            0.0
        }
    }
}
