//! Storage layer for the budget tracker
//!
//! Provides JSON file storage in a user-chosen folder with atomic writes,
//! default-value fallback on reads, and schema migration of older files.

pub mod file_io;
pub mod memory;
pub mod migration;
pub mod store;

pub use file_io::{read_document, write_atomic};
pub use memory::MemoryStore;
pub use store::BudgetStore;

use std::fs;
use std::io::ErrorKind;

use tracing::{debug, info};

use crate::config::paths::BudgetPaths;
use crate::error::{BudgetError, BudgetResult};
use crate::models::{BudgetConfig, MonthData, YearMonth};

use migration::{parse_config, parse_month, to_document_text};

/// Result of reading a stored document
#[derive(Debug, Clone, PartialEq)]
pub enum ReadOutcome<T> {
    /// The document was read and parsed
    Loaded(T),
    /// Nothing is stored under that key yet
    Absent,
    /// Something is stored but cannot be read or parsed
    Corrupt(String),
}

impl<T> ReadOutcome<T> {
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }

    pub fn is_corrupt(&self) -> bool {
        matches!(self, Self::Corrupt(_))
    }

    /// The loaded value, if any
    pub fn loaded(self) -> Option<T> {
        match self {
            Self::Loaded(value) => Some(value),
            Self::Absent | Self::Corrupt(_) => None,
        }
    }

    pub fn map<U, F: FnOnce(T) -> U>(self, f: F) -> ReadOutcome<U> {
        match self {
            Self::Loaded(value) => ReadOutcome::Loaded(f(value)),
            Self::Absent => ReadOutcome::Absent,
            Self::Corrupt(detail) => ReadOutcome::Corrupt(detail),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum StoreState {
    Uninitialized,
    Ready,
}

/// Budget store backed by a folder of JSON files
///
/// Created `Uninitialized`; [`Storage::open`] checks the root folder and
/// creates the data directory, after which every operation is available.
#[derive(Debug)]
pub struct Storage {
    paths: BudgetPaths,
    state: StoreState,
}

impl Storage {
    /// Create a store for the given paths without touching the filesystem
    pub fn new(paths: BudgetPaths) -> Self {
        Self {
            paths,
            state: StoreState::Uninitialized,
        }
    }

    /// Create and open a store in one step
    pub fn open_at(paths: BudgetPaths) -> BudgetResult<Self> {
        let mut storage = Self::new(paths);
        storage.open()?;
        Ok(storage)
    }

    /// Acquire the root folder and make sure the data directory exists
    ///
    /// # Errors
    ///
    /// `AccessDenied` if the root folder is missing, is not a directory, or
    /// the data directory cannot be created or written.
    pub fn open(&mut self) -> BudgetResult<()> {
        let root = self.paths.root_dir();
        match fs::metadata(root) {
            Ok(meta) if meta.is_dir() => {}
            Ok(_) => {
                return Err(BudgetError::AccessDenied(format!(
                    "{} is not a directory",
                    root.display()
                )))
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(BudgetError::AccessDenied(format!(
                    "{} does not exist",
                    root.display()
                )))
            }
            Err(e) => {
                return Err(BudgetError::AccessDenied(format!(
                    "Cannot access {}: {}",
                    root.display(),
                    e
                )))
            }
        }

        let data_dir = self.paths.data_dir();
        file_io::ensure_dir(&data_dir)?;

        let readonly = fs::metadata(&data_dir)
            .map(|meta| meta.permissions().readonly())
            .map_err(|e| BudgetError::AccessDenied(format!("Cannot access {}: {}", data_dir.display(), e)))?;
        if readonly {
            return Err(BudgetError::AccessDenied(format!(
                "{} is read-only",
                data_dir.display()
            )));
        }

        info!(data_dir = %data_dir.display(), "Budget store opened");
        self.state = StoreState::Ready;
        Ok(())
    }

    pub fn is_ready(&self) -> bool {
        self.state == StoreState::Ready
    }

    /// Get the paths configuration
    pub fn paths(&self) -> &BudgetPaths {
        &self.paths
    }

    fn ready_paths(&self) -> BudgetResult<&BudgetPaths> {
        match self.state {
            StoreState::Ready => Ok(&self.paths),
            StoreState::Uninitialized => Err(BudgetError::Uninitialized),
        }
    }
}

impl BudgetStore for Storage {
    fn read_config(&self) -> BudgetResult<ReadOutcome<BudgetConfig>> {
        let paths = self.ready_paths()?;
        Ok(read_document(paths.config_file(), parse_config))
    }

    fn save_config(&self, config: &BudgetConfig) -> BudgetResult<()> {
        let paths = self.ready_paths()?;
        let text = to_document_text(config)?;
        write_atomic(paths.config_file(), &text)
    }

    fn read_month(&self, period: YearMonth) -> BudgetResult<ReadOutcome<MonthData>> {
        let paths = self.ready_paths()?;
        Ok(read_document(paths.month_file(period), |text| {
            parse_month(text, period)
        }))
    }

    fn save_month(&self, data: &MonthData) -> BudgetResult<()> {
        let paths = self.ready_paths()?;
        let period = data
            .period()
            .map_err(|e| BudgetError::Validation(e.to_string()))?;
        let text = to_document_text(data)?;
        write_atomic(paths.month_file(period), &text)
    }

    fn ensure_year_dir(&self, year: i32) -> BudgetResult<()> {
        let paths = self.ready_paths()?;
        file_io::ensure_dir(paths.year_dir(year))
    }

    fn preserve_corrupt_config(&self) -> BudgetResult<()> {
        let paths = self.ready_paths()?;
        let source = paths.config_file();
        if !source.exists() {
            return Ok(());
        }
        let target = paths.corrupt_config_file();
        debug!(from = %source.display(), to = %target.display(), "Preserving corrupt configuration");
        fs::copy(&source, &target).map_err(|e| {
            BudgetError::Storage(format!(
                "Failed to preserve corrupt configuration at {}: {}",
                target.display(),
                e
            ))
        })?;
        Ok(())
    }
}
