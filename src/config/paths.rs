//! Path management for the budget store
//!
//! The user picks a root folder (often one synced between a household's
//! machines). Everything this application writes lives in a `budget-data`
//! subdirectory of it:
//!
//! ```text
//! <root>/budget-data/config.json
//! <root>/budget-data/<YYYY>/<MM>-<monthname>.json
//! ```
//!
//! ## Root Resolution Order
//!
//! 1. An explicit path (the `--dir` flag)
//! 2. `BUDGET_DATA_DIR` environment variable (if set)
//! 3. The user's Documents directory
//! 4. The user's home directory

use std::path::{Path, PathBuf};

use directories::{BaseDirs, UserDirs};

use crate::error::BudgetError;
use crate::models::YearMonth;

/// Environment variable overriding the store root
pub const DATA_DIR_ENV: &str = "BUDGET_DATA_DIR";

/// Subdirectory of the root owned by this application
pub const DATA_DIR_NAME: &str = "budget-data";

/// Name of the configuration file inside the data directory
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Where a corrupt configuration is moved before defaults are written
pub const CORRUPT_CONFIG_FILE_NAME: &str = "config.json.corrupt";

/// Manages all paths used by the store
#[derive(Debug, Clone)]
pub struct BudgetPaths {
    root_dir: PathBuf,
}

impl BudgetPaths {
    /// Resolve the store root
    ///
    /// # Errors
    ///
    /// Returns an error if no root was given and neither a Documents nor a
    /// home directory can be determined.
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, BudgetError> {
        if let Some(root_dir) = explicit {
            return Ok(Self { root_dir });
        }

        if let Some(custom) = std::env::var_os(DATA_DIR_ENV) {
            return Ok(Self {
                root_dir: PathBuf::from(custom),
            });
        }

        resolve_default_root().map(|root_dir| Self { root_dir })
    }

    /// Create BudgetPaths with a custom root (useful for testing)
    pub fn with_root(root_dir: PathBuf) -> Self {
        Self { root_dir }
    }

    /// The user-designated root folder
    pub fn root_dir(&self) -> &Path {
        &self.root_dir
    }

    /// The application-owned data directory (<root>/budget-data)
    pub fn data_dir(&self) -> PathBuf {
        self.root_dir.join(DATA_DIR_NAME)
    }

    pub fn config_file(&self) -> PathBuf {
        self.data_dir().join(CONFIG_FILE_NAME)
    }

    pub fn corrupt_config_file(&self) -> PathBuf {
        self.data_dir().join(CORRUPT_CONFIG_FILE_NAME)
    }

    /// Directory holding one year's month files
    pub fn year_dir(&self, year: i32) -> PathBuf {
        self.data_dir().join(format!("{:04}", year))
    }

    /// File holding one month, e.g. <root>/budget-data/2024/03-march.json
    pub fn month_file(&self, period: YearMonth) -> PathBuf {
        self.year_dir(period.year()).join(period.file_name())
    }
}

/// Path of a month file relative to the data directory, e.g. "2024/03-march.json"
pub fn month_relative_path(period: YearMonth) -> String {
    format!("{}/{}", period.year_dir_name(), period.file_name())
}

fn resolve_default_root() -> Result<PathBuf, BudgetError> {
    if let Some(documents) = UserDirs::new().and_then(|dirs| dirs.document_dir().map(Path::to_path_buf)) {
        return Ok(documents);
    }

    BaseDirs::new()
        .map(|dirs| dirs.home_dir().to_path_buf())
        .ok_or_else(|| {
            BudgetError::Config(format!(
                "Could not determine a home directory; set {} or pass --dir",
                DATA_DIR_ENV
            ))
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_custom_root() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::with_root(temp_dir.path().to_path_buf());

        assert_eq!(paths.root_dir(), temp_dir.path());
        assert_eq!(paths.data_dir(), temp_dir.path().join("budget-data"));
        assert_eq!(
            paths.config_file(),
            temp_dir.path().join("budget-data").join("config.json")
        );
    }

    #[test]
    fn test_explicit_root_wins() {
        let temp_dir = TempDir::new().unwrap();
        let paths = BudgetPaths::resolve(Some(temp_dir.path().to_path_buf())).unwrap();
        assert_eq!(paths.root_dir(), temp_dir.path());
    }

    #[test]
    fn test_month_paths() {
        let paths = BudgetPaths::with_root(PathBuf::from("/data"));
        let march = YearMonth::new(2024, 3).unwrap();

        assert_eq!(
            paths.month_file(march),
            PathBuf::from("/data/budget-data/2024/03-march.json")
        );
        assert_eq!(month_relative_path(march), "2024/03-march.json");
    }
}
