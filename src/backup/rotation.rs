//! Backup rotation
//!
//! Keeps the number of backup files per table bounded. Rotation runs before a
//! new backup file is written: when a table already has `limit` or more files
//! in the folder, the single oldest one is deleted.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

use tracing::info;

use crate::error::{TimesheetError, TimesheetResult};

/// A backup file found in a folder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupFile {
    pub file_name: String,
    pub path: PathBuf,
    pub modified: SystemTime,
}

/// Maximum number of retained backup files per table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RotationPolicy {
    limit: usize,
}

impl RotationPolicy {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// Delete the oldest backup of `table_base_name` if the limit is reached
    ///
    /// Returns the deleted file, if any. Fails without deleting anything when
    /// the folder cannot be read.
    pub fn rotate(&self, folder: &Path, table_base_name: &str) -> TimesheetResult<Option<PathBuf>> {
        let files = retained_files(folder, table_base_name)?;

        if files.is_empty() || files.len() < self.limit {
            return Ok(None);
        }

        let oldest = &files[0];
        fs::remove_file(&oldest.path).map_err(|e| {
            TimesheetError::Io(format!(
                "Failed to delete old backup {}: {}",
                oldest.path.display(),
                e
            ))
        })?;

        info!(
            table = table_base_name,
            file = %oldest.file_name,
            "rotated out oldest backup"
        );

        Ok(Some(oldest.path.clone()))
    }
}

/// Rotate the backups of one table in `folder` with the given limit
pub fn rotate(limit: usize, folder: &Path, table_base_name: &str) -> TimesheetResult<Option<PathBuf>> {
    RotationPolicy::new(limit).rotate(folder, table_base_name)
}

/// Regular files in `folder` whose name contains `table_base_name`
///
/// Sorted oldest first by modification time, ties broken by file name.
pub fn retained_files(folder: &Path, table_base_name: &str) -> TimesheetResult<Vec<BackupFile>> {
    let entries = fs::read_dir(folder).map_err(|e| {
        TimesheetError::Io(format!(
            "Failed to read backup directory {}: {}",
            folder.display(),
            e
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| {
            TimesheetError::Io(format!("Failed to read directory entry: {}", e))
        })?;

        let file_name = entry.file_name().to_string_lossy().to_string();
        if !file_name.contains(table_base_name) {
            continue;
        }

        let metadata = entry.metadata().map_err(|e| {
            TimesheetError::Io(format!("Failed to read metadata of {}: {}", file_name, e))
        })?;
        if !metadata.is_file() {
            continue;
        }

        let modified = metadata.modified().map_err(|e| {
            TimesheetError::Io(format!(
                "Failed to read modification time of {}: {}",
                file_name, e
            ))
        })?;

        files.push(BackupFile {
            path: entry.path(),
            file_name,
            modified,
        });
    }

    files.sort_by(|a, b| {
        a.modified
            .cmp(&b.modified)
            .then_with(|| a.file_name.cmp(&b.file_name))
    });

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use std::time::Duration;
    use tempfile::TempDir;

    fn write_with_mtime(folder: &Path, name: &str, secs_ago: u64) -> PathBuf {
        let path = folder.join(name);
        fs::write(&path, "id,name\n").unwrap();
        let mtime = SystemTime::now() - Duration::from_secs(secs_ago);
        File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(mtime)
            .unwrap();
        path
    }

    fn names(folder: &Path, table: &str) -> Vec<String> {
        retained_files(folder, table)
            .unwrap()
            .into_iter()
            .map(|f| f.file_name)
            .collect()
    }

    #[test]
    fn test_empty_folder_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        assert_eq!(rotate(3, temp_dir.path(), "rates").unwrap(), None);
    }

    #[test]
    fn test_below_limit_keeps_everything() {
        let temp_dir = TempDir::new().unwrap();
        write_with_mtime(temp_dir.path(), "rates_1.csv", 20);
        write_with_mtime(temp_dir.path(), "rates_2.csv", 10);

        assert_eq!(rotate(3, temp_dir.path(), "rates").unwrap(), None);
        assert_eq!(names(temp_dir.path(), "rates").len(), 2);
    }

    #[test]
    fn test_at_limit_deletes_only_oldest() {
        let temp_dir = TempDir::new().unwrap();
        // Creation order differs from mtime order on purpose
        write_with_mtime(temp_dir.path(), "rates_2.csv", 20);
        let oldest = write_with_mtime(temp_dir.path(), "rates_1.csv", 30);
        write_with_mtime(temp_dir.path(), "rates_3.csv", 10);

        let deleted = rotate(3, temp_dir.path(), "rates").unwrap();
        assert_eq!(deleted, Some(oldest));
        assert_eq!(names(temp_dir.path(), "rates"), vec!["rates_2.csv", "rates_3.csv"]);
    }

    #[test]
    fn test_other_tables_untouched() {
        let temp_dir = TempDir::new().unwrap();
        write_with_mtime(temp_dir.path(), "holidays_0.csv", 100);
        write_with_mtime(temp_dir.path(), "rates_1.csv", 20);

        rotate(1, temp_dir.path(), "rates").unwrap();
        assert!(names(temp_dir.path(), "rates").is_empty());
        assert_eq!(names(temp_dir.path(), "holidays"), vec!["holidays_0.csv"]);
    }

    #[test]
    fn test_mtime_ties_broken_by_name() {
        let temp_dir = TempDir::new().unwrap();
        write_with_mtime(temp_dir.path(), "rates_b.csv", 10);
        write_with_mtime(temp_dir.path(), "rates_a.csv", 10);

        let deleted = rotate(2, temp_dir.path(), "rates").unwrap().unwrap();
        assert_eq!(deleted.file_name().unwrap(), "rates_a.csv");
    }

    #[test]
    fn test_directories_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("rates_archive")).unwrap();
        write_with_mtime(temp_dir.path(), "rates_1.csv", 10);

        assert_eq!(rotate(2, temp_dir.path(), "rates").unwrap(), None);
        assert!(temp_dir.path().join("rates_archive").is_dir());
    }

    #[test]
    fn test_unreadable_folder_fails() {
        let temp_dir = TempDir::new().unwrap();
        let not_a_folder = temp_dir.path().join("plain.txt");
        fs::write(&not_a_folder, "x").unwrap();

        let err = rotate(1, &not_a_folder, "rates").unwrap_err();
        assert!(matches!(err, TimesheetError::Io(_)));
        assert!(not_a_folder.exists());
    }
}
