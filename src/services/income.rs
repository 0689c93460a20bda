//! Income service
//!
//! Suggests a month's income from the configured sources, checks that a
//! gross/deductions/net breakdown adds up, and manages the income sources in
//! the configuration.

use chrono::Utc;
use tracing::{debug, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{slugify, IncomeSource, Money, MonthlyIncome, YearMonth};
use crate::storage::BudgetStore;

use super::update_config;

/// Outcome of checking an income breakdown
///
/// Advisory only: a breakdown that does not add up is still saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IncomeCheck {
    pub is_valid: bool,
    /// gross - pension - national insurance - tax
    pub expected_net: Money,
}

impl IncomeCheck {
    /// The message shown next to a mismatched breakdown
    pub fn warning(&self) -> Option<String> {
        if self.is_valid {
            None
        } else {
            Some(format!(
                "Net should be {} based on deductions",
                self.expected_net
            ))
        }
    }
}

/// Check that `net` equals gross minus every deduction
pub fn validate_income_breakdown(
    gross: Money,
    pension: Money,
    national_insurance: Money,
    tax: Money,
    net: Money,
) -> IncomeCheck {
    let expected_net = gross - pension - national_insurance - tax;
    IncomeCheck {
        is_valid: expected_net == net,
        expected_net,
    }
}

/// [`validate_income_breakdown`] over a month's income record
pub fn check_income(income: &MonthlyIncome) -> IncomeCheck {
    validate_income_breakdown(
        income.gross,
        income.pension,
        income.national_insurance,
        income.tax,
        income.net,
    )
}

/// [`validate_income_breakdown`] over a source's default amounts
pub fn check_source_defaults(source: &IncomeSource) -> IncomeCheck {
    validate_income_breakdown(
        source.default_gross,
        source.default_pension,
        source.default_ni,
        source.default_tax,
        source.default_net,
    )
}

/// Pre-filled income records for every source active in `year`/`month`
///
/// Sources keep their configured order. An invalid month yields no
/// suggestions.
pub fn suggest_income_for_month(sources: &[IncomeSource], year: i32, month: u32) -> Vec<MonthlyIncome> {
    match YearMonth::new(year, month) {
        Ok(period) => suggest_for_period(sources, period),
        Err(e) => {
            debug!(year, month, error = %e, "No income suggestions for invalid month");
            Vec::new()
        }
    }
}

/// [`suggest_income_for_month`] for an already validated key
pub fn suggest_for_period(sources: &[IncomeSource], period: YearMonth) -> Vec<MonthlyIncome> {
    sources
        .iter()
        .filter(|source| source.is_active(period))
        .map(IncomeSource::default_income)
        .collect()
}

/// Fields needed to create an income source
#[derive(Debug, Clone, PartialEq)]
pub struct NewIncomeSource {
    pub name: String,
    pub color: Option<String>,
    pub start_date: YearMonth,
    pub end_date: Option<YearMonth>,
    pub gross: Money,
    pub pension: Money,
    pub national_insurance: Money,
    pub tax: Money,
    pub net: Money,
}

impl NewIncomeSource {
    /// An ongoing source starting in `start_date` with zeroed defaults
    pub fn new(name: impl Into<String>, start_date: YearMonth) -> Self {
        Self {
            name: name.into(),
            color: None,
            start_date,
            end_date: None,
            gross: Money::zero(),
            pension: Money::zero(),
            national_insurance: Money::zero(),
            tax: Money::zero(),
            net: Money::zero(),
        }
    }
}

/// Changes to an existing income source; `None` leaves a field alone
#[derive(Debug, Clone, Default, PartialEq)]
pub struct IncomeSourceUpdate {
    pub name: Option<String>,
    pub color: Option<String>,
    pub start_date: Option<YearMonth>,
    /// `Some(None)` makes the source ongoing
    pub end_date: Option<Option<YearMonth>>,
    pub gross: Option<Money>,
    pub pension: Option<Money>,
    pub national_insurance: Option<Money>,
    pub tax: Option<Money>,
    pub net: Option<Money>,
}

/// A source as saved, with the advisory check of its default amounts
#[derive(Debug, Clone, PartialEq)]
pub struct SavedIncomeSource {
    pub source: IncomeSource,
    pub check: IncomeCheck,
}

/// Service for income source management
pub struct IncomeService<'a> {
    store: &'a dyn BudgetStore,
}

impl<'a> IncomeService<'a> {
    pub fn new(store: &'a dyn BudgetStore) -> Self {
        Self { store }
    }

    /// All sources in configured order
    pub fn list(&self) -> BudgetResult<Vec<IncomeSource>> {
        Ok(self.store.load_config()?.income_sources)
    }

    /// Find a source by id, or by name (case-insensitive)
    pub fn find(&self, identifier: &str) -> BudgetResult<IncomeSource> {
        let sources = self.list()?;
        sources
            .iter()
            .find(|s| s.id == identifier)
            .or_else(|| {
                sources
                    .iter()
                    .find(|s| s.name.eq_ignore_ascii_case(identifier))
            })
            .cloned()
            .ok_or_else(|| BudgetError::income_source_not_found(identifier))
    }

    /// Add a source; its id is the slugged name plus the creation time in ms
    pub fn add(&self, input: NewIncomeSource) -> BudgetResult<SavedIncomeSource> {
        let id = format!("{}-{}", slugify(&input.name), Utc::now().timestamp_millis());

        let source = IncomeSource {
            id,
            name: input.name.trim().to_string(),
            color: input.color,
            start_date: input.start_date,
            end_date: input.end_date,
            default_gross: input.gross,
            default_pension: input.pension,
            default_ni: input.national_insurance,
            default_tax: input.tax,
            default_net: input.net,
        };
        source
            .validate()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;

        let saved = update_config(self.store, |config| {
            if config.income_source(&source.id).is_some() {
                return Err(BudgetError::Duplicate {
                    entity_type: "Income source",
                    identifier: source.id.clone(),
                });
            }
            config.income_sources.push(source.clone());
            Ok(source)
        })?;

        Ok(with_check(saved))
    }

    /// Apply changes to a source; the id never changes
    pub fn update(&self, id: &str, update: IncomeSourceUpdate) -> BudgetResult<SavedIncomeSource> {
        let saved = update_config(self.store, |config| {
            let source = config
                .income_sources
                .iter_mut()
                .find(|s| s.id == id)
                .ok_or_else(|| BudgetError::income_source_not_found(id))?;

            let mut changed = source.clone();
            if let Some(name) = update.name {
                changed.name = name.trim().to_string();
            }
            if let Some(color) = update.color {
                changed.color = Some(color);
            }
            if let Some(start_date) = update.start_date {
                changed.start_date = start_date;
            }
            if let Some(end_date) = update.end_date {
                changed.end_date = end_date;
            }
            if let Some(gross) = update.gross {
                changed.default_gross = gross;
            }
            if let Some(pension) = update.pension {
                changed.default_pension = pension;
            }
            if let Some(ni) = update.national_insurance {
                changed.default_ni = ni;
            }
            if let Some(tax) = update.tax {
                changed.default_tax = tax;
            }
            if let Some(net) = update.net {
                changed.default_net = net;
            }

            changed
                .validate()
                .map_err(|e| BudgetError::Validation(e.to_string()))?;
            *source = changed.clone();
            Ok(changed)
        })?;

        Ok(with_check(saved))
    }

    /// Remove a source
    ///
    /// Month records that mention it are left alone and show it as "Unknown".
    pub fn remove(&self, id: &str) -> BudgetResult<IncomeSource> {
        update_config(self.store, |config| {
            let index = config
                .income_sources
                .iter()
                .position(|s| s.id == id)
                .ok_or_else(|| BudgetError::income_source_not_found(id))?;
            Ok(config.income_sources.remove(index))
        })
    }
}

fn with_check(source: IncomeSource) -> SavedIncomeSource {
    let check = check_source_defaults(&source);
    if let Some(message) = check.warning() {
        warn!(source = %source.id, "{}", message);
    }
    SavedIncomeSource { source, check }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MemoryStore;

    fn ym(s: &str) -> YearMonth {
        YearMonth::parse(s).unwrap()
    }

    fn pounds(p: i64) -> Money {
        Money::from_pounds(p)
    }

    fn source(id: &str, start: &str, end: Option<&str>) -> IncomeSource {
        let mut source = IncomeSource::new(id, id, ym(start));
        source.end_date = end.map(ym);
        source.default_gross = pounds(3000);
        source.default_net = pounds(3000);
        source
    }

    #[test]
    fn test_validate_breakdown() {
        let check = validate_income_breakdown(pounds(3000), pounds(150), pounds(200), pounds(400), pounds(2250));
        assert!(check.is_valid);
        assert_eq!(check.expected_net, pounds(2250));
        assert_eq!(check.warning(), None);
    }

    #[test]
    fn test_validate_breakdown_reference_figures() {
        let check = validate_income_breakdown(pounds(1000), pounds(100), pounds(50), pounds(150), pounds(700));
        assert_eq!(check, IncomeCheck { is_valid: true, expected_net: pounds(700) });

        let check = validate_income_breakdown(pounds(1000), pounds(100), pounds(50), pounds(150), pounds(650));
        assert_eq!(check, IncomeCheck { is_valid: false, expected_net: pounds(700) });
    }

    #[test]
    fn test_validate_breakdown_mismatch() {
        let check = validate_income_breakdown(pounds(1000), pounds(100), pounds(100), pounds(100), pounds(800));
        assert!(!check.is_valid);
        assert_eq!(check.expected_net, pounds(700));
        assert_eq!(
            check.warning().as_deref(),
            Some("Net should be £700.00 based on deductions")
        );
    }

    #[test]
    fn test_validate_breakdown_is_exact_to_the_penny() {
        let check = validate_income_breakdown(
            Money::from_pence(100_001),
            Money::zero(),
            Money::zero(),
            Money::zero(),
            pounds(1000),
        );
        assert!(!check.is_valid);
    }

    #[test]
    fn test_suggest_respects_active_range() {
        let sources = vec![
            source("old-job", "2023-01", Some("2024-02")),
            source("salary", "2024-01", None),
            source("bonus", "2024-06", Some("2024-06")),
        ];

        let march: Vec<_> = suggest_income_for_month(&sources, 2024, 3)
            .into_iter()
            .map(|i| i.source_id)
            .collect();
        assert_eq!(march, ["salary"]);

        let february: Vec<_> = suggest_income_for_month(&sources, 2024, 2)
            .into_iter()
            .map(|i| i.source_id)
            .collect();
        assert_eq!(february, ["old-job", "salary"]);

        let june = suggest_income_for_month(&sources, 2024, 6);
        assert_eq!(june.len(), 2);
        assert_eq!(june[1].source_id, "bonus");
        assert_eq!(june[1].gross, pounds(3000));
    }

    #[test]
    fn test_suggest_before_start_is_empty() {
        let sources = vec![source("salary", "2024-01", None)];
        assert!(suggest_income_for_month(&sources, 2023, 12).is_empty());
        assert!(suggest_income_for_month(&sources, 2024, 13).is_empty());
    }

    #[test]
    fn test_add_source() {
        let store = MemoryStore::new();
        let service = IncomeService::new(&store);

        let mut input = NewIncomeSource::new("Main Salary", ym("2024-01"));
        input.gross = pounds(3000);
        input.pension = pounds(150);
        input.national_insurance = pounds(200);
        input.tax = pounds(400);
        input.net = pounds(2250);

        let saved = service.add(input).unwrap();
        assert!(saved.check.is_valid);
        assert!(saved.source.id.starts_with("main-salary-"));
        assert_eq!(service.list().unwrap(), vec![saved.source.clone()]);
        assert_eq!(service.find("main salary").unwrap(), saved.source);
    }

    #[test]
    fn test_add_source_mismatch_is_saved_with_warning() {
        let store = MemoryStore::new();
        let service = IncomeService::new(&store);

        let mut input = NewIncomeSource::new("Freelance", ym("2024-01"));
        input.gross = pounds(1000);
        input.net = pounds(900);

        let saved = service.add(input).unwrap();
        assert!(!saved.check.is_valid);
        assert_eq!(saved.check.expected_net, pounds(1000));
        assert_eq!(service.list().unwrap().len(), 1);
    }

    #[test]
    fn test_add_source_end_before_start_rejected() {
        let store = MemoryStore::new();
        let service = IncomeService::new(&store);

        let mut input = NewIncomeSource::new("Contract", ym("2024-06"));
        input.end_date = Some(ym("2024-05"));

        assert!(service.add(input).unwrap_err().is_validation());
        assert!(service.list().unwrap().is_empty());
    }

    #[test]
    fn test_update_and_remove_source() {
        let store = MemoryStore::new();
        let service = IncomeService::new(&store);
        let saved = service
            .add(NewIncomeSource::new("Pension", ym("2024-01")))
            .unwrap();
        let id = saved.source.id.clone();

        let updated = service
            .update(
                &id,
                IncomeSourceUpdate {
                    end_date: Some(Some(ym("2024-12"))),
                    gross: Some(pounds(500)),
                    net: Some(pounds(500)),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.source.id, id);
        assert_eq!(updated.source.end_date, Some(ym("2024-12")));
        assert!(updated.check.is_valid);

        let bad = IncomeSourceUpdate {
            end_date: Some(Some(ym("2023-01"))),
            ..Default::default()
        };
        assert!(service.update(&id, bad).unwrap_err().is_validation());
        assert_eq!(service.find(&id).unwrap().end_date, Some(ym("2024-12")));

        let removed = service.remove(&id).unwrap();
        assert_eq!(removed.name, "Pension");
        assert!(service.remove(&id).unwrap_err().is_not_found());
    }

    #[test]
    fn test_save_stamps_last_modified() {
        let store = MemoryStore::new();
        let before = store.load_config().unwrap().last_modified;

        IncomeService::new(&store)
            .add(NewIncomeSource::new("Salary", ym("2024-01")))
            .unwrap();

        assert!(store.load_config().unwrap().last_modified >= before);
    }

    #[test]
    fn test_failed_save_leaves_config_unchanged() {
        let store = MemoryStore::new();
        let original = store.load_config().unwrap();

        store.set_fail_writes(true);
        let result = IncomeService::new(&store).add(NewIncomeSource::new("Salary", ym("2024-01")));
        assert!(result.is_err());

        store.set_fail_writes(false);
        assert_eq!(store.load_config().unwrap(), original);
    }
}
