//! Month records
//!
//! `MonthData` is the raw record for one (year, month): what was spent per
//! category and what was received per income source. It is created lazily as
//! an empty shell and only written when the user saves it.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::income::MonthlyIncome;
use super::money::Money;
use super::period::{PeriodParseError, YearMonth};

/// Amount spent against one category in a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyExpense {
    pub category_id: String,
    pub actual_amount: Money,
}

impl MonthlyExpense {
    pub fn new(category_id: impl Into<String>, actual_amount: Money) -> Self {
        Self {
            category_id: category_id.into(),
            actual_amount,
        }
    }
}

/// Everything recorded for one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthData {
    pub year: i32,
    pub month: u32,
    pub expenses: Vec<MonthlyExpense>,
    pub income: Vec<MonthlyIncome>,
}

impl MonthData {
    /// An empty shell for a month with nothing recorded
    pub fn empty(period: YearMonth) -> Self {
        Self {
            year: period.year(),
            month: period.month(),
            expenses: Vec::new(),
            income: Vec::new(),
        }
    }

    /// The key this record belongs to
    pub fn period(&self) -> Result<YearMonth, PeriodParseError> {
        YearMonth::new(self.year, self.month)
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty() && self.income.is_empty()
    }

    /// The recorded expense for a category, if any
    pub fn expense_for(&self, category_id: &str) -> Option<&MonthlyExpense> {
        self.expenses.iter().find(|e| e.category_id == category_id)
    }

    /// The recorded income for a source, if any
    pub fn income_for(&self, source_id: &str) -> Option<&MonthlyIncome> {
        self.income.iter().find(|i| i.source_id == source_id)
    }
}

/// A year of month records keyed by zero-padded month, "01".."12"
pub type YearlyData = BTreeMap<String, MonthData>;
