//! Schema migration for stored documents
//!
//! Documents on disk carry no version field, so the version is inferred from
//! their shape and upgraded step by step before being deserialized:
//!
//! - v1: `config.json` without `incomeSources`, month files without `income`
//! - v2: the current shape
//!
//! This is the only place that knows about older layouts.

use serde_json::{Map, Value};
use tracing::warn;

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetConfig, MonthData, YearMonth};

/// Current document schema version
pub const CURRENT_SCHEMA_VERSION: u32 = 2;

type Document = Map<String, Value>;

/// One upgrade step, turning a `from` document into a `from + 1` document
struct Migration {
    from: u32,
    apply: fn(&mut Document),
}

const CONFIG_MIGRATIONS: &[Migration] = &[Migration {
    from: 1,
    apply: add_income_sources,
}];

const MONTH_MIGRATIONS: &[Migration] = &[Migration {
    from: 1,
    apply: add_month_income,
}];

fn add_income_sources(doc: &mut Document) {
    doc.insert("incomeSources".into(), Value::Array(Vec::new()));
}

fn add_month_income(doc: &mut Document) {
    doc.insert("income".into(), Value::Array(Vec::new()));
}

fn has_array(doc: &Document, key: &str) -> bool {
    matches!(doc.get(key), Some(Value::Array(_)))
}

/// Infer the schema version of a configuration document
pub fn config_schema_version(doc: &Document) -> u32 {
    if has_array(doc, "incomeSources") {
        2
    } else {
        1
    }
}

/// Infer the schema version of a month document
pub fn month_schema_version(doc: &Document) -> u32 {
    if has_array(doc, "income") {
        2
    } else {
        1
    }
}

fn migrate(doc: &mut Document, mut version: u32, migrations: &[Migration]) {
    while version < CURRENT_SCHEMA_VERSION {
        if let Some(step) = migrations.iter().find(|m| m.from == version) {
            (step.apply)(doc);
        }
        version += 1;
    }
}

fn parse_document(text: &str, what: &str) -> BudgetResult<Value> {
    let value: Value = serde_json::from_str(text)?;
    if !value.is_object() {
        return Err(BudgetError::Json(format!("{} is not a JSON object", what)));
    }
    Ok(value)
}

/// Parse `config.json` text into the current model
pub fn parse_config(text: &str) -> BudgetResult<BudgetConfig> {
    let mut value = parse_document(text, "configuration")?;
    if let Some(doc) = value.as_object_mut() {
        let version = config_schema_version(doc);
        migrate(doc, version, CONFIG_MIGRATIONS);
    }
    Ok(serde_json::from_value(value)?)
}

/// Parse a month file's text into the current model
///
/// The file's location is its identity: a stored year/month that disagrees
/// with `period` is replaced by it.
pub fn parse_month(text: &str, period: YearMonth) -> BudgetResult<MonthData> {
    let mut value = parse_document(text, "month file")?;
    if let Some(doc) = value.as_object_mut() {
        let version = month_schema_version(doc);
        migrate(doc, version, MONTH_MIGRATIONS);
    }

    let mut data: MonthData = serde_json::from_value(value)?;
    if data.year != period.year() || data.month != period.month() {
        warn!(
            stored = %format!("{:04}-{:02}", data.year, data.month),
            expected = %period,
            "Month file records a different month than its name, using the file name"
        );
        data.year = period.year();
        data.month = period.month();
    }
    Ok(data)
}

/// Serialize a document the way it is stored: pretty-printed, two-space indent
pub fn to_document_text<T: serde::Serialize>(data: &T) -> BudgetResult<String> {
    serde_json::to_string_pretty(data).map_err(BudgetError::from)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Money;

    fn march() -> YearMonth {
        YearMonth::new(2024, 3).unwrap()
    }

    #[test]
    fn test_v1_config_gets_income_sources() {
        let text = r#"{
            "categories": [{"id": "rent", "name": "Rent", "type": "fixed", "budgetAmount": 1500}],
            "lastModified": "2024-01-01T00:00:00.000Z"
        }"#;

        let config = parse_config(text).unwrap();
        assert_eq!(config.categories.len(), 1);
        assert!(config.income_sources.is_empty());
    }

    #[test]
    fn test_null_income_sources_treated_as_v1() {
        let text = r#"{"categories": [], "incomeSources": null, "lastModified": "2024-01-01T00:00:00Z"}"#;
        let config = parse_config(text).unwrap();
        assert!(config.income_sources.is_empty());
    }

    #[test]
    fn test_current_config_untouched() {
        let config = crate::models::BudgetConfig::starter();
        let text = to_document_text(&config).unwrap();
        assert_eq!(parse_config(&text).unwrap(), config);
    }

    #[test]
    fn test_v1_month_gets_income() {
        let text = r#"{"year": 2024, "month": 3, "expenses": [{"categoryId": "rent", "actualAmount": 1500}]}"#;
        let data = parse_month(text, march()).unwrap();
        assert!(data.income.is_empty());
        assert_eq!(data.expenses[0].actual_amount, Money::from_pounds(1500));
    }

    #[test]
    fn test_month_identity_follows_path() {
        let text = r#"{"year": 2023, "month": 7, "expenses": [], "income": []}"#;
        let data = parse_month(text, march()).unwrap();
        assert_eq!((data.year, data.month), (2024, 3));
    }

    #[test]
    fn test_corrupt_documents_rejected() {
        assert!(parse_config("{not json").is_err());
        assert!(parse_config("[1, 2, 3]").is_err());
        assert!(parse_month("", march()).is_err());
        assert!(parse_month(r#"{"year": 2024}"#, march()).is_err());
    }

    #[test]
    fn test_version_inference() {
        let v1: Document = serde_json::from_str(r#"{"categories": []}"#).unwrap();
        let v2: Document = serde_json::from_str(r#"{"categories": [], "incomeSources": []}"#).unwrap();
        assert_eq!(config_schema_version(&v1), 1);
        assert_eq!(config_schema_version(&v2), CURRENT_SCHEMA_VERSION);
    }
}
