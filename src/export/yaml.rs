//! YAML export functionality
//!
//! The same year export as JSON, in a human-readable form.

use std::io::Write;

use crate::error::{BudgetError, BudgetResult};
use crate::export::json::YearExport;
use crate::storage::BudgetStore;

/// Export a year to YAML with a short header comment
pub fn export_year_yaml<W: Write>(store: &dyn BudgetStore, year: i32, writer: &mut W) -> BudgetResult<()> {
    let export = YearExport::from_store(store, year)?;

    let header = format!(
        "# Household budget export for {}\n# Generated: {}\n# App Version: {}\n\n",
        export.year, export.exported_at, export.app_version
    );
    writer
        .write_all(header.as_bytes())
        .map_err(|e| BudgetError::Export(e.to_string()))?;

    serde_yaml::to_writer(writer, &export).map_err(|e| BudgetError::Export(e.to_string()))?;

    Ok(())
}
