//! In-memory budget store
//!
//! Holds documents as JSON text under the same relative names the folder
//! store uses ("config.json", "2024/03-march.json"), so reads go through the
//! same parsing and migration as on disk. Useful for tests and previews.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::RwLock;

use crate::config::paths::{month_relative_path, CONFIG_FILE_NAME, CORRUPT_CONFIG_FILE_NAME};
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetConfig, MonthData, YearMonth};

use super::migration::{parse_config, parse_month, to_document_text};
use super::store::BudgetStore;
use super::ReadOutcome;

/// A store that never touches the filesystem
#[derive(Debug, Default)]
pub struct MemoryStore {
    files: RwLock<BTreeMap<String, String>>,
    dirs: RwLock<BTreeSet<String>>,
    writes: AtomicUsize,
    fail_writes: AtomicBool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place raw text under a relative name, bypassing serialization
    pub fn insert_raw(&self, name: impl Into<String>, text: impl Into<String>) -> BudgetResult<()> {
        let mut files = self
            .files
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        files.insert(name.into(), text.into());
        Ok(())
    }

    /// The raw text stored under a relative name
    pub fn raw(&self, name: &str) -> Option<String> {
        self.files.read().ok()?.get(name).cloned()
    }

    /// Number of successful document writes so far
    pub fn write_count(&self) -> usize {
        self.writes.load(Ordering::SeqCst)
    }

    /// Make every following write fail with a storage error
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    pub fn has_year_dir(&self, year: i32) -> bool {
        self.dirs
            .read()
            .map(|dirs| dirs.contains(&format!("{:04}", year)))
            .unwrap_or(false)
    }

    fn read(&self, name: &str) -> BudgetResult<Option<String>> {
        let files = self
            .files
            .read()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire read lock: {}", e)))?;
        Ok(files.get(name).cloned())
    }

    fn write(&self, name: String, text: String) -> BudgetResult<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(BudgetError::Storage(format!("Write to {} refused", name)));
        }
        self.insert_raw(name, text)?;
        self.writes.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

fn classify<T>(name: &str, text: Option<String>, parse: impl FnOnce(&str) -> BudgetResult<T>) -> ReadOutcome<T> {
    match text {
        None => ReadOutcome::Absent,
        Some(text) => match parse(&text) {
            Ok(value) => ReadOutcome::Loaded(value),
            Err(e) => ReadOutcome::Corrupt(format!("Failed to parse {}: {}", name, e)),
        },
    }
}

impl BudgetStore for MemoryStore {
    fn read_config(&self) -> BudgetResult<ReadOutcome<BudgetConfig>> {
        let text = self.read(CONFIG_FILE_NAME)?;
        Ok(classify(CONFIG_FILE_NAME, text, parse_config))
    }

    fn save_config(&self, config: &BudgetConfig) -> BudgetResult<()> {
        let text = to_document_text(config)?;
        self.write(CONFIG_FILE_NAME.to_string(), text)
    }

    fn read_month(&self, period: YearMonth) -> BudgetResult<ReadOutcome<MonthData>> {
        let name = month_relative_path(period);
        let text = self.read(&name)?;
        Ok(classify(&name, text, |text| parse_month(text, period)))
    }

    fn save_month(&self, data: &MonthData) -> BudgetResult<()> {
        let period = data
            .period()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        let text = to_document_text(data)?;
        self.ensure_year_dir(period.year())?;
        self.write(month_relative_path(period), text)
    }

    fn ensure_year_dir(&self, year: i32) -> BudgetResult<()> {
        let mut dirs = self
            .dirs
            .write()
            .map_err(|e| BudgetError::Storage(format!("Failed to acquire write lock: {}", e)))?;
        dirs.insert(format!("{:04}", year));
        Ok(())
    }

    fn preserve_corrupt_config(&self) -> BudgetResult<()> {
        if let Some(text) = self.read(CONFIG_FILE_NAME)? {
            self.insert_raw(CORRUPT_CONFIG_FILE_NAME, text)?;
        }
        Ok(())
    }
}
