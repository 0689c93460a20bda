//! Income source display formatting

use crate::models::IncomeSource;
use crate::services::IncomeCheck;

/// Format income sources as an aligned list
pub fn format_source_list(sources: &[IncomeSource]) -> String {
    if sources.is_empty() {
        return "No income sources configured.\n\nRun 'budget source add' to create one."
            .to_string();
    }

    let name_width = sources
        .iter()
        .map(|s| s.name.chars().count())
        .max()
        .unwrap_or(6)
        .max(6);

    let mut output = String::new();
    output.push_str(&format!(
        "{:<width$}  {:<22}  {:>12}  {:>12}  {}\n",
        "Source",
        "Active",
        "Gross",
        "Net",
        "ID",
        width = name_width
    ));
    output.push_str(&format!(
        "{:-<width$}  {:-<22}  {:->12}  {:->12}  {:-<12}\n",
        "",
        "",
        "",
        "",
        "",
        width = name_width
    ));

    for source in sources {
        output.push_str(&format!(
            "{:<width$}  {:<22}  {:>12}  {:>12}  {}\n",
            source.name,
            source.date_range_label(),
            source.default_gross,
            source.default_net,
            source.id,
            width = name_width
        ));
    }

    output
}

/// Format an income source with its default breakdown
pub fn format_source_details(source: &IncomeSource) -> String {
    let mut output = String::new();

    output.push_str(&format!("Income source: {}\n", source.name));
    output.push_str(&format!("  ID:        {}\n", source.id));
    output.push_str(&format!("  Active:    {}\n", source.date_range_label()));
    output.push_str(&format!("  Gross:     {:>12}\n", source.default_gross));
    output.push_str(&format!("  Pension:   {:>12}\n", source.default_pension));
    output.push_str(&format!("  NI:        {:>12}\n", source.default_ni));
    output.push_str(&format!("  Tax:       {:>12}\n", source.default_tax));
    output.push_str(&format!("  Net:       {:>12}\n", source.default_net));

    output
}

/// The advisory line printed after saving figures that do not add up
pub fn format_income_warning(check: &IncomeCheck) -> Option<String> {
    check.warning().map(|message| format!("Warning: {}", message))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Money, YearMonth};
    use crate::services::validate_income_breakdown;

    fn salary() -> IncomeSource {
        let mut source = IncomeSource::new("salary-1", "Salary", YearMonth::parse("2024-01").unwrap());
        source.default_gross = Money::from_pounds(3000);
        source.default_net = Money::from_pounds(2250);
        source
    }

    #[test]
    fn test_list() {
        let output = format_source_list(&[salary()]);
        assert!(output.contains("2024-01 onwards"));
        assert!(output.contains("£2250.00"));
        assert!(output.contains("salary-1"));
    }

    #[test]
    fn test_empty_list() {
        assert!(format_source_list(&[]).starts_with("No income sources"));
    }

    #[test]
    fn test_details() {
        let output = format_source_details(&salary());
        assert!(output.contains("Income source: Salary"));
        assert!(output.contains("£3000.00"));
    }

    #[test]
    fn test_warning_only_when_mismatched() {
        let ok = validate_income_breakdown(
            Money::from_pounds(100),
            Money::zero(),
            Money::zero(),
            Money::zero(),
            Money::from_pounds(100),
        );
        assert_eq!(format_income_warning(&ok), None);

        let bad = validate_income_breakdown(
            Money::from_pounds(100),
            Money::zero(),
            Money::zero(),
            Money::from_pounds(20),
            Money::from_pounds(100),
        );
        assert_eq!(
            format_income_warning(&bad).as_deref(),
            Some("Warning: Net should be £80.00 based on deductions")
        );
    }
}
