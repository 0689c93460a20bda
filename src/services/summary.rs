//! Month summary calculation
//!
//! Combines a configuration with one month's record into every figure the
//! month view shows. The calculation is pure: the same inputs always produce
//! the same summary, so it is recomputed after every load instead of cached.

use crate::models::{
    BudgetConfig, CategoryWithActual, IncomeWithSource, Money, MonthData, MonthSummary,
};

/// Label used for income whose source is no longer configured
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// Derive the full summary for a month
///
/// Rows follow the configured category order. Expenses recorded against a
/// category that is no longer configured are ignored, both in the rows and in
/// the totals.
pub fn summarize(config: &BudgetConfig, month: &MonthData) -> MonthSummary {
    let categories: Vec<CategoryWithActual> = config
        .categories
        .iter()
        .map(|category| {
            let actual_amount = month
                .expense_for(&category.id)
                .map(|expense| expense.actual_amount)
                .unwrap_or_default();

            CategoryWithActual {
                category: category.clone(),
                actual_amount,
                variance: actual_amount - category.budget_amount,
                percent_used: percent_of(actual_amount, category.budget_amount),
            }
        })
        .collect();

    let (fixed_budget, fixed_actual) = totals(categories.iter().filter(|c| c.category.is_fixed()));
    let (variable_budget, variable_actual) =
        totals(categories.iter().filter(|c| !c.category.is_fixed()));
    let (total_budget, total_actual) = totals(categories.iter());

    debug_assert_eq!(total_budget, fixed_budget + variable_budget);
    debug_assert_eq!(total_actual, fixed_actual + variable_actual);

    let income_breakdown: Vec<IncomeWithSource> = month
        .income
        .iter()
        .map(|income| {
            let source = config.income_source(&income.source_id);
            IncomeWithSource {
                income: income.clone(),
                source_name: source
                    .map(|s| s.name.clone())
                    .unwrap_or_else(|| UNKNOWN_SOURCE.to_string()),
                source_color: source.and_then(|s| s.color.clone()),
            }
        })
        .collect();

    let total_income_gross: Money = month.income.iter().map(|i| i.gross).sum();
    let total_income_net: Money = month.income.iter().map(|i| i.net).sum();
    let total_deductions: Money = month.income.iter().map(|i| i.deductions()).sum();

    MonthSummary {
        year: month.year,
        month: month.month,
        total_budget,
        total_actual,
        total_variance: total_actual - total_budget,
        fixed_budget,
        fixed_actual,
        variable_budget,
        variable_actual,
        categories,
        total_income_gross,
        total_income_net,
        total_deductions,
        disposable_income: total_income_net - total_actual,
        income_breakdown,
    }
}

/// `part` as a percentage of `whole`, 0 when `whole` is not positive
pub fn percent_of(part: Money, whole: Money) -> f64 {
    if whole.is_positive() {
        part.pence() as f64 / whole.pence() as f64 * 100.0
    } else {
        0.0
    }
}

fn totals<'a, I>(rows: I) -> (Money, Money)
where
    I: Iterator<Item = &'a CategoryWithActual>,
{
    rows.fold((Money::zero(), Money::zero()), |(budget, actual), row| {
        (budget + row.category.budget_amount, actual + row.actual_amount)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{
        Category, CategoryType, IncomeSource, MonthlyExpense, MonthlyIncome, YearMonth,
    };

    fn config() -> BudgetConfig {
        let mut config = BudgetConfig::new();
        config.categories = vec![
            Category::with_id("rent", "Rent", CategoryType::Fixed, Money::from_pounds(1500)),
            Category::with_id("groceries", "Groceries", CategoryType::Variable, Money::from_pounds(600)),
            Category::with_id("gifts", "Gifts", CategoryType::Variable, Money::zero()),
        ];
        let mut salary = IncomeSource::new("salary", "Salary", YearMonth::new(2024, 1).unwrap());
        salary.color = Some("#3b82f6".into());
        config.income_sources = vec![salary];
        config
    }

    fn march() -> MonthData {
        MonthData::empty(YearMonth::new(2024, 3).unwrap())
    }

    fn income(source_id: &str, gross: i64, pension: i64, ni: i64, tax: i64, net: i64) -> MonthlyIncome {
        MonthlyIncome {
            source_id: source_id.into(),
            gross: Money::from_pounds(gross),
            pension: Money::from_pounds(pension),
            national_insurance: Money::from_pounds(ni),
            tax: Money::from_pounds(tax),
            net: Money::from_pounds(net),
            notes: None,
        }
    }

    #[test]
    fn test_category_rows() {
        let mut month = march();
        month.expenses.push(MonthlyExpense::new("groceries", Money::from_pounds(450)));
        month.expenses.push(MonthlyExpense::new("gifts", Money::from_pounds(20)));

        let summary = summarize(&config(), &month);
        let ids: Vec<_> = summary.categories.iter().map(|c| c.category.id.as_str()).collect();
        assert_eq!(ids, ["rent", "groceries", "gifts"]);

        let rent = &summary.categories[0];
        assert_eq!(rent.actual_amount, Money::zero());
        assert_eq!(rent.variance, Money::from_pounds(-1500));
        assert_eq!(rent.percent_used, 0.0);

        let groceries = &summary.categories[1];
        assert_eq!(groceries.variance, Money::from_pounds(-150));
        assert!((groceries.percent_used - 75.0).abs() < 1e-9);

        // No budget means no percentage, even when money was spent
        assert_eq!(summary.categories[2].percent_used, 0.0);
        assert!(summary.categories[2].is_over_budget());
    }

    #[test]
    fn test_totals_and_partitions() {
        let mut month = march();
        month.expenses.push(MonthlyExpense::new("rent", Money::from_pounds(1500)));
        month.expenses.push(MonthlyExpense::new("groceries", Money::from_pence(65_050)));

        let summary = summarize(&config(), &month);
        assert_eq!(summary.total_budget, Money::from_pounds(2100));
        assert_eq!(summary.fixed_budget, Money::from_pounds(1500));
        assert_eq!(summary.variable_budget, Money::from_pounds(600));
        assert_eq!(summary.fixed_actual, Money::from_pounds(1500));
        assert_eq!(summary.variable_actual, Money::from_pence(65_050));
        assert_eq!(summary.total_actual, summary.fixed_actual + summary.variable_actual);
        assert_eq!(summary.total_variance, Money::from_pence(5_050));
        assert!(!summary.is_under_budget());
    }

    #[test]
    fn test_total_budget_independent_of_month() {
        let config = config();
        let empty = summarize(&config, &march());

        let mut busy = march();
        busy.expenses.push(MonthlyExpense::new("rent", Money::from_pounds(9999)));
        let busy = summarize(&config, &busy);

        assert_eq!(empty.total_budget, config.total_budget());
        assert_eq!(busy.total_budget, config.total_budget());
    }

    #[test]
    fn test_unknown_category_ignored() {
        let mut month = march();
        month.expenses.push(MonthlyExpense::new("boat", Money::from_pounds(10_000)));

        let summary = summarize(&config(), &month);
        assert!(summary.categories.iter().all(|c| c.category.id != "boat"));
        assert_eq!(summary.total_actual, Money::zero());
    }

    #[test]
    fn test_income_totals_and_disposable() {
        let mut month = march();
        month.expenses.push(MonthlyExpense::new("rent", Money::from_pounds(1500)));
        month.income.push(income("salary", 3000, 150, 200, 400, 2250));
        month.income.push(income("old-job", 500, 0, 0, 100, 400));

        let summary = summarize(&config(), &month);
        assert_eq!(summary.total_income_gross, Money::from_pounds(3500));
        assert_eq!(summary.total_income_net, Money::from_pounds(2650));
        assert_eq!(summary.total_deductions, Money::from_pounds(850));
        assert_eq!(summary.disposable_income, Money::from_pounds(1150));

        let salary = &summary.income_breakdown[0];
        assert_eq!(salary.source_name, "Salary");
        assert_eq!(salary.source_color.as_deref(), Some("#3b82f6"));

        let orphan = &summary.income_breakdown[1];
        assert_eq!(orphan.source_name, UNKNOWN_SOURCE);
        assert_eq!(orphan.source_color, None);
    }

    #[test]
    fn test_summarize_is_repeatable() {
        let config = config();
        let mut month = march();
        month.expenses.push(MonthlyExpense::new("groceries", Money::from_pence(33_333)));
        month.income.push(income("salary", 3000, 150, 200, 400, 2250));

        assert_eq!(summarize(&config, &month), summarize(&config.clone(), &month.clone()));
    }

    #[test]
    fn test_empty_config() {
        let summary = summarize(&BudgetConfig::new(), &march());
        assert!(summary.categories.is_empty());
        assert_eq!(summary.total_budget, Money::zero());
        assert_eq!(summary.percent_used(), 0.0);
    }
}
