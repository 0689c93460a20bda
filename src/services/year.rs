//! Yearly analytics
//!
//! Rolls twelve month summaries up into year totals, averages, the best and
//! worst month by variance, and per-category annual figures.

use serde::Serialize;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{CategoryType, BudgetConfig, Money, MonthData, MonthSummary, YearMonth, YearlyData};

use super::summary::summarize;

/// Totals over a run of months
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearTotals {
    /// Number of months the totals cover
    pub months: usize,
    pub total_budget: Money,
    pub total_actual: Money,
    pub total_variance: Money,
    pub total_income_gross: Money,
    pub total_income_net: Money,
    pub total_deductions: Money,
    pub disposable_income: Money,
    pub average_monthly_budget: Money,
    /// Averaged over months with any spending, 0 when there were none
    pub average_monthly_actual: Money,
    pub months_with_spending: usize,
    /// First month with the smallest variance
    pub best_month: Option<u32>,
    /// First month with the largest variance
    pub worst_month: Option<u32>,
}

/// One category's figures over the year
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryYearTotal {
    pub category_id: String,
    pub name: String,
    pub category_type: CategoryType,
    pub annual_budget: Money,
    pub annual_actual: Money,
    pub variance: Money,
}

/// A year of month summaries with its totals
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearSummary {
    pub year: i32,
    pub months: Vec<MonthSummary>,
    pub totals: YearTotals,
    pub categories: Vec<CategoryYearTotal>,
}

impl YearSummary {
    /// Summarize every month of `year`
    ///
    /// Months missing from `yearly` count as empty.
    pub fn build(config: &BudgetConfig, year: i32, yearly: &YearlyData) -> BudgetResult<Self> {
        let periods =
            YearMonth::months_of(year).map_err(|e| BudgetError::Validation(e.to_string()))?;

        let months: Vec<MonthSummary> = periods
            .into_iter()
            .map(|period| match yearly.get(&period.month_key()) {
                Some(data) => summarize(config, data),
                None => summarize(config, &MonthData::empty(period)),
            })
            .collect();

        let totals = totals_of(&months);
        let categories = category_totals(config, &months);

        Ok(Self {
            year,
            months,
            totals,
            categories,
        })
    }

    /// Totals over months 1..=`through_month`
    pub fn year_to_date(&self, through_month: u32) -> BudgetResult<YearTotals> {
        if !(1..=12).contains(&through_month) {
            return Err(BudgetError::Validation(format!(
                "Invalid month {}, expected 1-12",
                through_month
            )));
        }
        let months: Vec<MonthSummary> = self
            .months
            .iter()
            .filter(|m| m.month <= through_month)
            .cloned()
            .collect();
        Ok(totals_of(&months))
    }

    pub fn month(&self, month: u32) -> Option<&MonthSummary> {
        self.months.iter().find(|m| m.month == month)
    }
}

fn totals_of(months: &[MonthSummary]) -> YearTotals {
    let total_budget: Money = months.iter().map(|m| m.total_budget).sum();
    let total_actual: Money = months.iter().map(|m| m.total_actual).sum();
    let total_income_net: Money = months.iter().map(|m| m.total_income_net).sum();
    let months_with_spending = months
        .iter()
        .filter(|m| m.total_actual.is_positive())
        .count();

    let mut best: Option<&MonthSummary> = None;
    let mut worst: Option<&MonthSummary> = None;
    for month in months {
        if best.map_or(true, |b| month.total_variance < b.total_variance) {
            best = Some(month);
        }
        if worst.map_or(true, |w| month.total_variance > w.total_variance) {
            worst = Some(month);
        }
    }

    YearTotals {
        months: months.len(),
        total_budget,
        total_actual,
        total_variance: total_actual - total_budget,
        total_income_gross: months.iter().map(|m| m.total_income_gross).sum(),
        total_income_net,
        total_deductions: months.iter().map(|m| m.total_deductions).sum(),
        disposable_income: total_income_net - total_actual,
        average_monthly_budget: average(total_budget, months.len()),
        average_monthly_actual: average(total_actual, months_with_spending),
        months_with_spending,
        best_month: best.map(|m| m.month),
        worst_month: worst.map(|m| m.month),
    }
}

fn category_totals(config: &BudgetConfig, months: &[MonthSummary]) -> Vec<CategoryYearTotal> {
    config
        .categories
        .iter()
        .map(|category| {
            let rows = months
                .iter()
                .flat_map(|m| m.categories.iter())
                .filter(|row| row.category.id == category.id);
            let (annual_budget, annual_actual) = rows.fold(
                (Money::zero(), Money::zero()),
                |(budget, actual), row| (budget + row.category.budget_amount, actual + row.actual_amount),
            );

            CategoryYearTotal {
                category_id: category.id.clone(),
                name: category.name.clone(),
                category_type: category.category_type,
                annual_budget,
                annual_actual,
                variance: annual_actual - annual_budget,
            }
        })
        .collect()
}

/// Mean rounded to the nearest penny, 0 over no months
fn average(total: Money, count: usize) -> Money {
    if count == 0 {
        return Money::zero();
    }
    let mean = total.pence() as f64 / count as f64;
    Money::from_pence(mean.round() as i64)
}
