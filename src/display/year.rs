//! Year summary display

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::YearMonth;
use crate::services::{YearSummary, YearTotals};

use super::report::{double_separator, format_money_colored, format_variance, format_variance_colored};

#[derive(Tabled)]
struct MonthRow {
    #[tabled(rename = "Month")]
    month: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Variance")]
    variance: String,
    #[tabled(rename = "Net income")]
    net: String,
    #[tabled(rename = "Disposable")]
    disposable: String,
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Annual budget")]
    budget: String,
    #[tabled(rename = "Annual actual")]
    actual: String,
    #[tabled(rename = "Variance")]
    variance: String,
}

fn month_label(year: i32, month: u32) -> String {
    YearMonth::new(year, month)
        .map(|p| p.month_short_name().to_string())
        .unwrap_or_else(|_| format!("{:02}", month))
}

/// Table of the twelve months
pub fn format_month_table(summary: &YearSummary) -> String {
    let rows: Vec<MonthRow> = summary
        .months
        .iter()
        .map(|m| MonthRow {
            month: month_label(summary.year, m.month),
            budget: m.total_budget.to_string(),
            actual: m.total_actual.to_string(),
            variance: format_variance(m.total_variance),
            net: m.total_income_net.to_string(),
            disposable: m.disposable_income.to_string(),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// Table of annual figures per category
pub fn format_category_totals_table(summary: &YearSummary) -> String {
    let rows: Vec<CategoryRow> = summary
        .categories
        .iter()
        .map(|c| CategoryRow {
            name: c.name.clone(),
            budget: c.annual_budget.to_string(),
            actual: c.annual_actual.to_string(),
            variance: format_variance(c.variance),
        })
        .collect();

    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// The totals block for a run of months
pub fn format_totals(year: i32, totals: &YearTotals) -> String {
    let mut output = String::new();

    output.push_str(&format!("Budget:          {:>12}\n", totals.total_budget));
    output.push_str(&format!("Actual:          {:>12}\n", totals.total_actual));
    output.push_str(&format!(
        "Variance:        {}\n",
        format_variance_colored(totals.total_variance)
    ));
    output.push_str(&format!("Income gross:    {:>12}\n", totals.total_income_gross));
    output.push_str(&format!("Income net:      {:>12}\n", totals.total_income_net));
    output.push_str(&format!("Deductions:      {:>12}\n", totals.total_deductions));
    output.push_str(&format!(
        "Disposable:      {}\n",
        format_money_colored(totals.disposable_income)
    ));
    output.push_str(&format!("Avg budget/mo:   {:>12}\n", totals.average_monthly_budget));
    output.push_str(&format!(
        "Avg actual/mo:   {:>12} ({} months with spending)\n",
        totals.average_monthly_actual, totals.months_with_spending
    ));
    if let Some(best) = totals.best_month {
        output.push_str(&format!("Best month:      {}\n", month_label(year, best)));
    }
    if let Some(worst) = totals.worst_month {
        output.push_str(&format!("Worst month:     {}\n", month_label(year, worst)));
    }

    output
}

/// Full year report
pub fn format_year_summary(summary: &YearSummary) -> String {
    let title = format!("Year {}", summary.year);
    let mut output = String::new();

    output.push_str(&format!("{}\n", title));
    output.push_str(&format!("{}\n\n", double_separator(title.len())));
    output.push_str(&format_month_table(summary));
    output.push_str("\n\n");
    if !summary.categories.is_empty() {
        output.push_str(&format_category_totals_table(summary));
        output.push_str("\n\n");
    }
    output.push_str(&format_totals(summary.year, &summary.totals));

    output
}
