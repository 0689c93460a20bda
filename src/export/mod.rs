//! Export module for the budget tracker
//!
//! Exports a year in three formats:
//! - CSV: one row per month (spreadsheet-compatible)
//! - JSON: machine-readable full export
//! - YAML: human-readable full export

pub mod csv;
pub mod json;
pub mod yaml;

pub use self::csv::{export_year_csv, write_year_csv};
pub use json::{export_year_json, ExportMetadata, YearExport, EXPORT_SCHEMA_VERSION};
pub use yaml::export_year_yaml;
