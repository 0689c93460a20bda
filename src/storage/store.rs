//! The store contract
//!
//! A store maps the logical key space `{config} ∪ {(year, month)}` onto some
//! backing medium. Implementors provide the primitive reads and writes; the
//! fallback rules (seed a missing configuration, hand out empty month shells,
//! never let one bad month block a year) live here once for every backend.

use tracing::{info, warn};

use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetConfig, MonthData, YearMonth, YearlyData};

use super::ReadOutcome;

/// Storage for one budget: a configuration and any number of month records
pub trait BudgetStore {
    /// Read the configuration without any fallback
    fn read_config(&self) -> BudgetResult<ReadOutcome<BudgetConfig>>;

    /// Persist the configuration atomically
    fn save_config(&self, config: &BudgetConfig) -> BudgetResult<()>;

    /// Read one month without any fallback
    fn read_month(&self, period: YearMonth) -> BudgetResult<ReadOutcome<MonthData>>;

    /// Persist one month atomically
    fn save_month(&self, data: &MonthData) -> BudgetResult<()>;

    /// Make sure the directory for a year exists
    fn ensure_year_dir(&self, year: i32) -> BudgetResult<()>;

    /// Keep a copy of an unreadable configuration before it is replaced
    fn preserve_corrupt_config(&self) -> BudgetResult<()> {
        Ok(())
    }

    /// Load the configuration, writing the starter configuration on first run
    ///
    /// A corrupt configuration is treated like a missing one, after the
    /// corrupt document has been preserved.
    fn load_config(&self) -> BudgetResult<BudgetConfig> {
        match self.read_config()? {
            ReadOutcome::Loaded(config) => Ok(config),
            ReadOutcome::Absent => {
                info!("No configuration found, writing starter categories");
                seed_config(self)
            }
            ReadOutcome::Corrupt(detail) => {
                warn!(%detail, "Configuration unreadable, replacing with starter categories");
                self.preserve_corrupt_config()?;
                seed_config(self)
            }
        }
    }

    /// Load one month, returning an empty shell when nothing usable is stored
    ///
    /// Never writes.
    fn load_month(&self, year: i32, month: u32) -> BudgetResult<MonthData> {
        let period =
            YearMonth::new(year, month).map_err(|e| BudgetError::Validation(e.to_string()))?;
        self.load_period(period)
    }

    /// [`BudgetStore::load_month`] for an already validated key
    fn load_period(&self, period: YearMonth) -> BudgetResult<MonthData> {
        let data = match self.read_month(period)? {
            ReadOutcome::Loaded(data) => data,
            ReadOutcome::Absent => MonthData::empty(period),
            ReadOutcome::Corrupt(detail) => {
                warn!(%period, %detail, "Month file unreadable, showing it as empty");
                MonthData::empty(period)
            }
        };
        Ok(data)
    }

    /// Load all twelve months of a year keyed "01".."12"
    ///
    /// Creates the year directory. A month that cannot be read is logged and
    /// replaced by its empty shell; only calling before the store is ready
    /// fails the whole year.
    fn load_year(&self, year: i32) -> BudgetResult<YearlyData> {
        let months =
            YearMonth::months_of(year).map_err(|e| BudgetError::Validation(e.to_string()))?;

        match self.ensure_year_dir(year) {
            Ok(()) => {}
            Err(BudgetError::Uninitialized) => return Err(BudgetError::Uninitialized),
            Err(e) => warn!(year, error = %e, "Could not create year directory"),
        }

        let mut yearly = YearlyData::new();
        for period in months {
            let data = match self.load_period(period) {
                Ok(data) => data,
                Err(BudgetError::Uninitialized) => return Err(BudgetError::Uninitialized),
                Err(e) => {
                    warn!(%period, error = %e, "Failed to load month, showing it as empty");
                    MonthData::empty(period)
                }
            };
            yearly.insert(period.month_key(), data);
        }

        Ok(yearly)
    }
}

fn seed_config<S: BudgetStore + ?Sized>(store: &S) -> BudgetResult<BudgetConfig> {
    let config = BudgetConfig::starter();
    store.save_config(&config)?;
    Ok(config)
}
