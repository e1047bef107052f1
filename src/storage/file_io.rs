//! File I/O utilities with atomic writes
//!
//! Provides safe JSON persistence for the table store plus the CSV readers and
//! writers used by seeding and backups.

use std::fs::{self, File};
use std::io::{BufReader, BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::{de::DeserializeOwned, Serialize};

use crate::error::TimesheetError;

/// Read JSON from a file, returning a default value if file doesn't exist
pub fn read_json<T, P>(path: P) -> Result<T, TimesheetError>
where
    T: DeserializeOwned + Default,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Ok(T::default());
    }

    let file = File::open(path).map_err(|e| {
        TimesheetError::Storage(format!("Failed to open {}: {}", path.display(), e))
    })?;

    let reader = BufReader::new(file);
    serde_json::from_reader(reader).map_err(|e| {
        TimesheetError::Storage(format!("Failed to parse {}: {}", path.display(), e))
    })
}

/// Write JSON to a file atomically (write to temp, then rename)
///
/// The file is either completely written or not modified at all.
pub fn write_json_atomic<T, P>(path: P, data: &T) -> Result<(), TimesheetError>
where
    T: Serialize,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| {
            TimesheetError::Storage(format!(
                "Failed to create directory {}: {}",
                parent.display(),
                e
            ))
        })?;
    }

    // Temp file must live in the same directory for the rename to be atomic
    let temp_path = path.with_extension("json.tmp");

    let file = File::create(&temp_path)
        .map_err(|e| TimesheetError::Storage(format!("Failed to create temp file: {}", e)))?;

    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .map_err(|e| TimesheetError::Storage(format!("Failed to serialize data: {}", e)))?;

    writer
        .flush()
        .map_err(|e| TimesheetError::Storage(format!("Failed to flush data: {}", e)))?;

    writer
        .get_ref()
        .sync_all()
        .map_err(|e| TimesheetError::Storage(format!("Failed to sync data: {}", e)))?;

    fs::rename(&temp_path, path).map_err(|e| {
        let _ = fs::remove_file(&temp_path);
        TimesheetError::Storage(format!("Failed to rename temp file: {}", e))
    })?;

    Ok(())
}

/// Read every row of a CSV file with a header line
pub fn read_csv<T, P>(path: P) -> Result<Vec<T>, TimesheetError>
where
    T: DeserializeOwned,
    P: AsRef<Path>,
{
    let path = path.as_ref();

    if !path.exists() {
        return Err(TimesheetError::file_not_found(path.display().to_string()));
    }

    let file = File::open(path)
        .map_err(|e| TimesheetError::Io(format!("Failed to open {}: {}", path.display(), e)))?;

    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(BufReader::new(file));

    let mut rows = Vec::new();
    for (line, result) in reader.deserialize().enumerate() {
        let row: T = result.map_err(|e| {
            TimesheetError::Csv(format!(
                "Failed to parse row {} of {}: {}",
                line + 1,
                path.display(),
                e
            ))
        })?;
        rows.push(row);
    }

    Ok(rows)
}

/// Write rows to a CSV file atomically (write to temp, then rename)
///
/// Returns the number of rows written. The header line is derived from the
/// row type and is only present when at least one row is written. On failure
/// no file is left at `path` and the temp file is removed.
pub fn write_csv<'a, T, I, P>(path: P, rows: I) -> Result<usize, TimesheetError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
    P: AsRef<Path>,
{
    let path = path.as_ref();
    let temp_path = csv_temp_path(path);

    let result = write_csv_rows(&temp_path, rows).and_then(|count| {
        fs::rename(&temp_path, path).map_err(|e| {
            TimesheetError::Io(format!("Failed to move {} into place: {}", path.display(), e))
        })?;
        Ok(count)
    });

    if result.is_err() {
        let _ = fs::remove_file(&temp_path);
    }
    result
}

fn csv_temp_path(path: &Path) -> PathBuf {
    let mut name = path.as_os_str().to_os_string();
    name.push(".tmp");
    PathBuf::from(name)
}

fn write_csv_rows<'a, T, I>(path: &Path, rows: I) -> Result<usize, TimesheetError>
where
    T: Serialize + 'a,
    I: IntoIterator<Item = &'a T>,
{
    let file = File::create(path)
        .map_err(|e| TimesheetError::Io(format!("Failed to create {}: {}", path.display(), e)))?;

    let mut writer = csv::Writer::from_writer(BufWriter::new(file));
    let mut count = 0;
    for row in rows {
        writer.serialize(row).map_err(|e| {
            TimesheetError::Csv(format!("Failed to write {}: {}", path.display(), e))
        })?;
        count += 1;
    }

    let file = writer
        .into_inner()
        .map_err(|e| TimesheetError::Io(format!("Failed to flush {}: {}", path.display(), e)))?;
    file.into_inner()
        .map_err(|e| TimesheetError::Io(format!("Failed to flush {}: {}", path.display(), e)))?
        .sync_all()
        .map_err(|e| TimesheetError::Io(format!("Failed to sync {}: {}", path.display(), e)))?;

    Ok(count)
}
