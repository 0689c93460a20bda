//! Display formatting for terminal output
//!
//! Provides utilities for formatting budget data for terminal display,
//! including tables, colours and bars.

pub mod category;
pub mod income;
pub mod month;
pub mod report;
pub mod year;

pub use category::{format_category_details, format_category_list};
pub use income::{format_income_warning, format_source_details, format_source_list};
pub use month::format_month_summary;
pub use year::{format_totals, format_year_summary};
