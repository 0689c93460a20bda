//! File I/O utilities with atomic writes
//!
//! Reads never fail: a missing file is `Absent`, anything unreadable or
//! unparsable is `Corrupt`. Writes go to a temporary file that is renamed over
//! the target, so a reader never sees a half-written document.

use std::fs::{self, File};
use std::io::{ErrorKind, Write};
use std::path::Path;

use tracing::debug;

use crate::error::BudgetError;

use super::ReadOutcome;

/// Read a document and parse it, classifying every failure
pub fn read_document<T, P, F>(path: P, parse: F) -> ReadOutcome<T>
where
    P: AsRef<Path>,
    F: FnOnce(&str) -> Result<T, BudgetError>,
{
    let path = path.as_ref();
    debug!(path = %path.display(), "Reading document");

    match fs::read_to_string(path) {
        Ok(text) => match parse(&text) {
            Ok(value) => ReadOutcome::Loaded(value),
            Err(e) => ReadOutcome::Corrupt(format!("Failed to parse {}: {}", path.display(), e)),
        },
        Err(e) if e.kind() == ErrorKind::NotFound => ReadOutcome::Absent,
        Err(e) => ReadOutcome::Corrupt(format!("Failed to read {}: {}", path.display(), e)),
    }
}

/// Write text to a file atomically (write to temp, then rename)
///
/// The temporary file is removed on every failure path.
pub fn write_atomic<P: AsRef<Path>>(path: P, contents: &str) -> Result<(), BudgetError> {
    let path = path.as_ref();
    debug!(path = %path.display(), bytes = contents.len(), "Writing document");

    if let Some(parent) = path.parent() {
        ensure_dir(parent)?;
    }

    // Same directory as the target so the rename stays on one filesystem
    let temp_path = path.with_extension("json.tmp");

    let result = write_and_sync(&temp_path, contents).and_then(|()| {
        fs::rename(&temp_path, path)
            .map_err(|e| BudgetError::Storage(format!("Failed to rename temp file: {}", e)))
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }

    result
}

fn write_and_sync(temp_path: &Path, contents: &str) -> Result<(), BudgetError> {
    let mut file = File::create(temp_path)
        .map_err(|e| BudgetError::Storage(format!("Failed to create temp file: {}", e)))?;

    file.write_all(contents.as_bytes())
        .map_err(|e| BudgetError::Storage(format!("Failed to write data: {}", e)))?;

    file.sync_all()
        .map_err(|e| BudgetError::Storage(format!("Failed to sync data: {}", e)))
}

/// Create a directory and its parents if missing
pub fn ensure_dir<P: AsRef<Path>>(path: P) -> Result<(), BudgetError> {
    let path = path.as_ref();
    fs::create_dir_all(path).map_err(|e| {
        if e.kind() == ErrorKind::PermissionDenied {
            BudgetError::AccessDenied(format!("Cannot create {}: {}", path.display(), e))
        } else {
            BudgetError::Storage(format!(
                "Failed to create directory {}: {}",
                path.display(),
                e
            ))
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn parse_number(text: &str) -> Result<i64, BudgetError> {
        Ok(serde_json::from_str(text)?)
    }

    #[test]
    fn test_read_nonexistent_is_absent() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nonexistent.json");

        assert!(read_document(&path, parse_number).is_absent());
    }

    #[test]
    fn test_read_garbage_is_corrupt() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("broken.json");
        fs::write(&path, "not json at all").unwrap();

        assert!(read_document(&path, parse_number).is_corrupt());
    }

    #[test]
    fn test_write_and_read() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_atomic(&path, "42").unwrap();

        let outcome = read_document(&path, parse_number);
        assert_eq!(outcome.loaded(), Some(42));
    }

    #[test]
    fn test_atomic_write_no_temp_file_left() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");
        let temp_path = temp_dir.path().join("test.json.tmp");

        write_atomic(&path, "{}").unwrap();

        assert!(path.exists());
        assert!(!temp_path.exists());
    }

    #[test]
    fn test_write_replaces_existing() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("test.json");

        write_atomic(&path, "1").unwrap();
        write_atomic(&path, "2").unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), "2");
    }

    #[test]
    fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("2024").join("03-march.json");

        write_atomic(&path, "{}").unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_failed_write_leaves_no_temp_file() {
        let temp_dir = TempDir::new().unwrap();
        // A directory where the file should go makes the final rename fail
        let path = temp_dir.path().join("taken.json");
        fs::create_dir(&path).unwrap();
        fs::write(path.join("inside"), "x").unwrap();

        assert!(write_atomic(&path, "{}").is_err());
        assert!(!temp_dir.path().join("taken.json.tmp").exists());
    }
}
