//! Income models
//!
//! An income source is a named stream (a salary, a pension) active over a
//! contiguous range of months, carrying the default monthly breakdown used to
//! pre-fill a month. A monthly income record is what was actually received.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::money::Money;
use super::period::YearMonth;

/// Validation errors for income sources
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IncomeValidationError {
    EmptyName,
    EndBeforeStart { start: YearMonth, end: YearMonth },
    NegativeAmount(&'static str),
}

impl fmt::Display for IncomeValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Income source name cannot be empty"),
            Self::EndBeforeStart { start, end } => {
                write!(f, "End date {} must not be before start date {}", end, start)
            }
            Self::NegativeAmount(field) => write!(f, "Default {} cannot be negative", field),
        }
    }
}

impl std::error::Error for IncomeValidationError {}

/// A recurring source of income
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeSource {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,
    pub start_date: YearMonth,
    /// `None` means the source is ongoing
    #[serde(default)]
    pub end_date: Option<YearMonth>,
    pub default_gross: Money,
    pub default_pension: Money,
    #[serde(rename = "defaultNI")]
    pub default_ni: Money,
    pub default_tax: Money,
    pub default_net: Money,
}

impl IncomeSource {
    /// Create an ongoing source with zeroed defaults
    pub fn new(id: impl Into<String>, name: impl Into<String>, start_date: YearMonth) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: None,
            start_date,
            end_date: None,
            default_gross: Money::zero(),
            default_pension: Money::zero(),
            default_ni: Money::zero(),
            default_tax: Money::zero(),
            default_net: Money::zero(),
        }
    }

    /// Whether this source pays anything in the given month (both ends inclusive)
    pub fn is_active(&self, month: YearMonth) -> bool {
        month >= self.start_date && self.end_date.map_or(true, |end| month <= end)
    }

    /// The month record pre-filled from this source's defaults
    pub fn default_income(&self) -> MonthlyIncome {
        MonthlyIncome {
            source_id: self.id.clone(),
            gross: self.default_gross,
            pension: self.default_pension,
            national_insurance: self.default_ni,
            tax: self.default_tax,
            net: self.default_net,
            notes: None,
        }
    }

    /// Validate the source
    ///
    /// A net figure that disagrees with the deductions is not an error here;
    /// see [`crate::services::validate_income_breakdown`].
    pub fn validate(&self) -> Result<(), IncomeValidationError> {
        if self.name.trim().is_empty() {
            return Err(IncomeValidationError::EmptyName);
        }

        if let Some(end) = self.end_date {
            if end < self.start_date {
                return Err(IncomeValidationError::EndBeforeStart {
                    start: self.start_date,
                    end,
                });
            }
        }

        let amounts = [
            ("gross", self.default_gross),
            ("pension", self.default_pension),
            ("national insurance", self.default_ni),
            ("tax", self.default_tax),
            ("net", self.default_net),
        ];
        if let Some((field, _)) = amounts.iter().find(|(_, amount)| amount.is_negative()) {
            return Err(IncomeValidationError::NegativeAmount(*field));
        }

        Ok(())
    }

    /// Date range label, e.g. "2024-01 to 2024-06" or "2024-01 onwards"
    pub fn date_range_label(&self) -> String {
        match self.end_date {
            Some(end) => format!("{} to {}", self.start_date, end),
            None => format!("{} onwards", self.start_date),
        }
    }
}

impl fmt::Display for IncomeSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Income actually received from one source in one month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyIncome {
    pub source_id: String,
    pub gross: Money,
    pub pension: Money,
    pub national_insurance: Money,
    pub tax: Money,
    pub net: Money,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl MonthlyIncome {
    /// An all-zero record for a source
    pub fn empty(source_id: impl Into<String>) -> Self {
        Self {
            source_id: source_id.into(),
            gross: Money::zero(),
            pension: Money::zero(),
            national_insurance: Money::zero(),
            tax: Money::zero(),
            net: Money::zero(),
            notes: None,
        }
    }

    /// Pension + national insurance + tax
    pub fn deductions(&self) -> Money {
        self.pension + self.national_insurance + self.tax
    }
}
