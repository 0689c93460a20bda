//! CSV export functionality
//!
//! Exports a year as one spreadsheet row per month.

use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{Money, YearMonth};
use crate::services::YearSummary;
use crate::storage::BudgetStore;

#[derive(Serialize)]
struct MonthCsvRow {
    #[serde(rename = "Month")]
    month: String,
    #[serde(rename = "Budget")]
    budget: String,
    #[serde(rename = "Actual")]
    actual: String,
    #[serde(rename = "Variance")]
    variance: String,
    #[serde(rename = "Gross Income")]
    gross: String,
    #[serde(rename = "Net Income")]
    net: String,
    #[serde(rename = "Deductions")]
    deductions: String,
    #[serde(rename = "Disposable")]
    disposable: String,
}

fn amount(money: Money) -> String {
    format!("{:.2}", money.as_f64())
}

/// Write the year's month rows from an already built summary
pub fn write_year_csv<W: Write>(summary: &YearSummary, writer: W) -> BudgetResult<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);

    for month in &summary.months {
        let label = YearMonth::new(summary.year, month.month)
            .map(|p| p.key())
            .map_err(|e| BudgetError::Export(e.to_string()))?;

        csv_writer
            .serialize(MonthCsvRow {
                month: label,
                budget: amount(month.total_budget),
                actual: amount(month.total_actual),
                variance: amount(month.total_variance),
                gross: amount(month.total_income_gross),
                net: amount(month.total_income_net),
                deductions: amount(month.total_deductions),
                disposable: amount(month.disposable_income),
            })
            .map_err(|e| BudgetError::Export(e.to_string()))?;
    }

    csv_writer
        .flush()
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}

/// Export a year from the store as CSV
pub fn export_year_csv<W: Write>(store: &dyn BudgetStore, year: i32, writer: W) -> BudgetResult<()> {
    let config = store.load_config()?;
    let yearly = store.load_year(year)?;
    let summary = YearSummary::build(&config, year, &yearly)?;
    write_year_csv(&summary, writer)
}
