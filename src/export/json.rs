//! JSON export functionality
//!
//! Exports a year (configuration, month records and totals) to JSON with
//! schema versioning.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetConfig, MonthData};
use crate::services::{YearSummary, YearTotals};
use crate::storage::BudgetStore;

/// Current export schema version
pub const EXPORT_SCHEMA_VERSION: &str = "1.0.0";

/// A year's full export
#[derive(Debug, Clone, Serialize)]
pub struct YearExport {
    /// Schema version for compatibility checking
    pub schema_version: String,

    pub exported_at: DateTime<Utc>,

    /// Application version that created the export
    pub app_version: String,

    pub year: i32,

    pub config: BudgetConfig,

    /// The twelve month records, January first
    pub months: Vec<MonthData>,

    pub totals: YearTotals,

    pub metadata: ExportMetadata,
}

/// Export metadata for reference
#[derive(Debug, Clone, Serialize)]
pub struct ExportMetadata {
    pub category_count: usize,
    pub income_source_count: usize,
    /// Months with at least one expense or income record
    pub recorded_month_count: usize,
}

impl YearExport {
    /// Gather a year from the store
    pub fn from_store(store: &dyn BudgetStore, year: i32) -> BudgetResult<Self> {
        let config = store.load_config()?;
        let yearly = store.load_year(year)?;
        let summary = YearSummary::build(&config, year, &yearly)?;
        let months: Vec<MonthData> = yearly.into_values().collect();

        let metadata = ExportMetadata {
            category_count: config.categories.len(),
            income_source_count: config.income_sources.len(),
            recorded_month_count: months.iter().filter(|m| !m.is_empty()).count(),
        };

        Ok(Self {
            schema_version: EXPORT_SCHEMA_VERSION.to_string(),
            exported_at: Utc::now(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            year,
            config,
            months,
            totals: summary.totals,
            metadata,
        })
    }
}

/// Export a year to pretty-printed JSON
pub fn export_year_json<W: Write>(store: &dyn BudgetStore, year: i32, writer: &mut W) -> BudgetResult<()> {
    let export = YearExport::from_store(store, year)?;
    serde_json::to_writer_pretty(&mut *writer, &export)
        .map_err(|e| BudgetError::Export(e.to_string()))?;
    writeln!(writer).map_err(|e| BudgetError::Export(e.to_string()))?;
    Ok(())
}
