//! Month summary display
//!
//! Renders a month's category rows and income breakdown as tables, followed by
//! the totals block.

use tabled::settings::object::Columns;
use tabled::settings::{Alignment, Modify, Style};
use tabled::{Table, Tabled};

use crate::models::{CategoryWithActual, IncomeWithSource, MonthSummary};

use super::report::{
    format_bar, format_money_colored, format_percentage, format_variance,
    format_variance_colored, separator, truncate,
};

const BAR_WIDTH: usize = 10;

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "Category")]
    name: String,
    #[tabled(rename = "Type")]
    kind: String,
    #[tabled(rename = "Budget")]
    budget: String,
    #[tabled(rename = "Actual")]
    actual: String,
    #[tabled(rename = "Variance")]
    variance: String,
    #[tabled(rename = "Used")]
    used: String,
    #[tabled(rename = "")]
    bar: String,
}

impl From<&CategoryWithActual> for CategoryRow {
    fn from(row: &CategoryWithActual) -> Self {
        Self {
            name: truncate(&row.category.name, 24),
            kind: row.category.category_type.to_string(),
            budget: row.category.budget_amount.to_string(),
            actual: row.actual_amount.to_string(),
            variance: format_variance(row.variance),
            used: format_percentage(row.percent_used),
            bar: format_bar(row.percent_used, 100.0, BAR_WIDTH),
        }
    }
}

#[derive(Tabled)]
struct IncomeRow {
    #[tabled(rename = "Source")]
    source: String,
    #[tabled(rename = "Gross")]
    gross: String,
    #[tabled(rename = "Pension")]
    pension: String,
    #[tabled(rename = "NI")]
    ni: String,
    #[tabled(rename = "Tax")]
    tax: String,
    #[tabled(rename = "Net")]
    net: String,
}

impl From<&IncomeWithSource> for IncomeRow {
    fn from(row: &IncomeWithSource) -> Self {
        Self {
            source: truncate(&row.source_name, 24),
            gross: row.income.gross.to_string(),
            pension: row.income.pension.to_string(),
            ni: row.income.national_insurance.to_string(),
            tax: row.income.tax.to_string(),
            net: row.income.net.to_string(),
        }
    }
}

/// Table of every category with its budget, actual and variance
pub fn format_category_table(summary: &MonthSummary) -> String {
    let rows: Vec<CategoryRow> = summary.categories.iter().map(CategoryRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(2..6)).with(Alignment::right()))
        .to_string()
}

/// Table of the month's income by source
pub fn format_income_table(summary: &MonthSummary) -> String {
    let rows: Vec<IncomeRow> = summary.income_breakdown.iter().map(IncomeRow::from).collect();
    Table::new(rows)
        .with(Style::rounded())
        .with(Modify::new(Columns::new(1..)).with(Alignment::right()))
        .to_string()
}

/// Full month report: title, categories, income and totals
pub fn format_month_summary(title: &str, summary: &MonthSummary) -> String {
    let mut output = String::new();

    output.push_str(&format!("{}\n", title));
    output.push_str(&format!("{}\n\n", separator(title.chars().count())));

    if summary.categories.is_empty() {
        output.push_str("No categories configured.\n");
    } else {
        output.push_str(&format_category_table(summary));
        output.push('\n');
    }

    if !summary.income_breakdown.is_empty() {
        output.push('\n');
        output.push_str(&format_income_table(summary));
        output.push('\n');
    }

    output.push('\n');
    output.push_str(&format!(
        "Fixed:       {:>12} of {}\n",
        summary.fixed_actual, summary.fixed_budget
    ));
    output.push_str(&format!(
        "Variable:    {:>12} of {}\n",
        summary.variable_actual, summary.variable_budget
    ));
    output.push_str(&format!(
        "Total:       {:>12} of {} ({})\n",
        summary.total_actual,
        summary.total_budget,
        format_percentage(summary.percent_used())
    ));
    output.push_str(&format!(
        "Variance:    {}\n",
        format_variance_colored(summary.total_variance)
    ));

    if !summary.income_breakdown.is_empty() {
        output.push_str(&format!("Income net:  {:>12}\n", summary.total_income_net));
        output.push_str(&format!("Deductions:  {:>12}\n", summary.total_deductions));
    }
    output.push_str(&format!(
        "Disposable:  {}\n",
        format_money_colored(summary.disposable_income)
    ));

    output
}
