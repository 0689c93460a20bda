//! Month editing
//!
//! A `MonthEditor` holds the draft of one month's expenses and income between
//! loading and saving. The edit state is explicit so a caller can tell unsaved
//! changes (including suggested income nobody has confirmed yet) from a month
//! that matches what is on disk.

use std::collections::BTreeMap;

use tracing::{debug, info};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{
    BudgetConfig, Money, MonthData, MonthSummary, MonthlyExpense, MonthlyIncome, YearMonth,
};
use crate::storage::BudgetStore;

use super::income::{check_income, suggest_for_period, IncomeCheck};
use super::summary::summarize;

/// Where the draft stands relative to the stored month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditState {
    /// The draft matches what was loaded or last saved
    Clean,
    /// The draft has changes that have not been saved
    Dirty,
    /// A save is in progress
    Saving,
}

/// Draft of one month's record
pub struct MonthEditor<'a> {
    store: &'a dyn BudgetStore,
    config: BudgetConfig,
    period: YearMonth,
    saved: MonthData,
    expenses: BTreeMap<String, Money>,
    income: Vec<MonthlyIncome>,
    income_edited: bool,
    state: EditState,
}

impl<'a> MonthEditor<'a> {
    /// Load a month and prepare its draft
    ///
    /// Active sources without a saved entry get their defaults suggested. A
    /// month with no saved income at all that received suggestions starts
    /// `Dirty`, since nothing the user sees has been stored yet.
    pub fn open(store: &'a dyn BudgetStore, config: BudgetConfig, period: YearMonth) -> BudgetResult<Self> {
        let saved = store.load_period(period)?;

        let mut expenses = BTreeMap::new();
        for expense in &saved.expenses {
            expenses
                .entry(expense.category_id.clone())
                .or_insert(expense.actual_amount);
        }

        let mut income = saved.income.clone();
        let suggestions: Vec<MonthlyIncome> = suggest_for_period(&config.income_sources, period)
            .into_iter()
            .filter(|suggested| saved.income_for(&suggested.source_id).is_none())
            .collect();
        let suggested = !suggestions.is_empty();
        income.extend(suggestions);

        let state = if suggested && saved.income.is_empty() {
            EditState::Dirty
        } else {
            EditState::Clean
        };
        debug!(%period, ?state, "Opened month for editing");

        Ok(Self {
            store,
            config,
            period,
            saved,
            expenses,
            income,
            income_edited: false,
            state,
        })
    }

    pub fn period(&self) -> YearMonth {
        self.period
    }

    pub fn state(&self) -> EditState {
        self.state
    }

    pub fn is_dirty(&self) -> bool {
        self.state == EditState::Dirty
    }

    pub fn config(&self) -> &BudgetConfig {
        &self.config
    }

    /// The month as last loaded or saved
    pub fn saved(&self) -> &MonthData {
        &self.saved
    }

    /// The draft amount for a category (0 when nothing is entered)
    pub fn expense(&self, category_id: &str) -> Money {
        self.expenses.get(category_id).copied().unwrap_or_default()
    }

    /// The draft income for a source, if any
    pub fn income(&self, source_id: &str) -> Option<&MonthlyIncome> {
        self.income.iter().find(|i| i.source_id == source_id)
    }

    /// Set what was spent against a configured category
    pub fn set_expense(&mut self, category_id: &str, amount: Money) -> BudgetResult<()> {
        if self.config.category(category_id).is_none() {
            return Err(BudgetError::category_not_found(category_id));
        }
        self.expenses.insert(category_id.to_string(), amount);
        self.state = EditState::Dirty;
        Ok(())
    }

    /// Set every fixed category's actual to its budget, returning how many
    pub fn apply_fixed_defaults(&mut self) -> usize {
        let fixed: Vec<(String, Money)> = self
            .config
            .categories
            .iter()
            .filter(|c| c.is_fixed())
            .map(|c| (c.id.clone(), c.budget_amount))
            .collect();

        let count = fixed.len();
        self.expenses.extend(fixed);
        if count > 0 {
            self.state = EditState::Dirty;
        }
        count
    }

    /// Replace the draft income for a source active this month
    ///
    /// The returned check is advisory; the figures are kept either way.
    pub fn set_income(&mut self, income: MonthlyIncome) -> BudgetResult<IncomeCheck> {
        self.active_source(&income.source_id)?;
        let check = check_income(&income);

        match self
            .income
            .iter_mut()
            .find(|i| i.source_id == income.source_id)
        {
            Some(existing) => *existing = income,
            None => self.income.push(income),
        }
        self.income_edited = true;
        self.state = EditState::Dirty;
        Ok(check)
    }

    /// Reset a source's draft income to its configured defaults
    pub fn use_income_defaults(&mut self, source_id: &str) -> BudgetResult<IncomeCheck> {
        let defaults = self.active_source(source_id)?.default_income();
        self.set_income(defaults)
    }

    /// Whether any income entry was changed since the last load or save
    pub fn income_edited(&self) -> bool {
        self.income_edited
    }

    /// The record `save` would write
    ///
    /// One expense per configured category. Saved income is written back
    /// untouched unless income was edited, in which case only sources active
    /// this month that received something are kept.
    pub fn draft(&self) -> MonthData {
        let income = if self.income_edited {
            self.paid_income()
        } else {
            self.saved.income.clone()
        };
        self.with_income(income)
    }

    /// Write the draft
    ///
    /// On failure the editor goes back to `Dirty` and the saved snapshot is
    /// left as it was.
    pub fn save(&mut self) -> BudgetResult<()> {
        self.state = EditState::Saving;
        let data = self.draft();

        match self.store.save_month(&data) {
            Ok(()) => {
                info!(period = %self.period, "Month saved");
                self.saved = data;
                self.income_edited = false;
                self.state = EditState::Clean;
                Ok(())
            }
            Err(e) => {
                self.state = EditState::Dirty;
                Err(e)
            }
        }
    }

    /// Summary of the month as the editor shows it, suggested income included
    pub fn summary(&self) -> MonthSummary {
        summarize(&self.config, &self.with_income(self.paid_income()))
    }

    fn paid_income(&self) -> Vec<MonthlyIncome> {
        self.income
            .iter()
            .filter(|i| {
                i.gross.is_positive()
                    && self
                        .config
                        .income_source(&i.source_id)
                        .is_some_and(|s| s.is_active(self.period))
            })
            .cloned()
            .collect()
    }

    fn with_income(&self, income: Vec<MonthlyIncome>) -> MonthData {
        let expenses = self
            .config
            .categories
            .iter()
            .map(|c| MonthlyExpense::new(c.id.clone(), self.expense(&c.id)))
            .collect();

        MonthData {
            year: self.period.year(),
            month: self.period.month(),
            expenses,
            income,
        }
    }

    fn active_source(&self, source_id: &str) -> BudgetResult<&crate::models::IncomeSource> {
        self.config
            .income_source(source_id)
            .filter(|s| s.is_active(self.period))
            .ok_or_else(|| {
                BudgetError::income_source_not_found(format!(
                    "{} (not active in {})",
                    source_id,
                    self.period.friendly()
                ))
            })
    }
}
