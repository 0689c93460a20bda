//! Budget configuration model
//!
//! The configuration is the singleton settings document for a store root: the
//! categories (in display order) and the income sources.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::category::{Category, CategoryType};
use super::income::IncomeSource;
use super::money::Money;

/// Categories, income sources and when they were last saved
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BudgetConfig {
    pub categories: Vec<Category>,
    pub income_sources: Vec<IncomeSource>,
    pub last_modified: DateTime<Utc>,
}

impl BudgetConfig {
    /// An empty configuration stamped with the current time
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
            income_sources: Vec::new(),
            last_modified: Utc::now(),
        }
    }

    /// The configuration written on first run
    pub fn starter() -> Self {
        let starter = [
            ("rent", "Rent/Mortgage", CategoryType::Fixed, 1500, "#ef4444"),
            ("utilities", "Utilities", CategoryType::Fixed, 200, "#f97316"),
            ("insurance", "Insurance", CategoryType::Fixed, 150, "#f59e0b"),
            ("groceries", "Groceries", CategoryType::Variable, 600, "#84cc16"),
            ("dining", "Dining Out", CategoryType::Variable, 300, "#22c55e"),
            ("entertainment", "Entertainment", CategoryType::Variable, 200, "#06b6d4"),
            ("transport", "Transportation", CategoryType::Variable, 250, "#3b82f6"),
            ("shopping", "Shopping", CategoryType::Variable, 300, "#8b5cf6"),
        ];

        let categories = starter
            .into_iter()
            .map(|(id, name, category_type, pounds, color)| {
                Category::with_id(id, name, category_type, Money::from_pounds(pounds))
                    .with_color(color)
            })
            .collect();

        Self {
            categories,
            income_sources: Vec::new(),
            last_modified: Utc::now(),
        }
    }

    /// Stamp the configuration as modified now
    pub fn touch(&mut self) {
        self.last_modified = Utc::now();
    }

    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn income_source(&self, id: &str) -> Option<&IncomeSource> {
        self.income_sources.iter().find(|s| s.id == id)
    }

    /// Sum of every category's monthly budget
    pub fn total_budget(&self) -> Money {
        self.categories.iter().map(|c| c.budget_amount).sum()
    }
}

impl Default for BudgetConfig {
    fn default() -> Self {
        Self::new()
    }
}
