//! Export archive
//!
//! An export clears the scratch folder, runs a full backup into it and zips
//! every resulting file into one downloadable archive. The whole sequence runs
//! under the folder lock so concurrent exports cannot mix or truncate each
//! other's files.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use tracing::{info, warn};
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::config::{Settings, TimesheetPaths};
use crate::error::{TimesheetError, TimesheetResult};
use crate::storage::StoreRegistry;

use super::coordinator::{BackupCoordinator, BackupId};
use super::lock::FolderLock;

/// Default archive file name
pub const DEFAULT_ARCHIVE_NAME: &str = "timesheet-backup.zip";

/// Builds the export archive
#[derive(Clone)]
pub struct Exporter {
    coordinator: BackupCoordinator,
    export_dir: PathBuf,
    archive_path: PathBuf,
    rotation: usize,
}

impl Exporter {
    pub fn new(
        coordinator: BackupCoordinator,
        export_dir: PathBuf,
        archive_path: PathBuf,
        rotation: usize,
    ) -> Self {
        Self {
            coordinator,
            export_dir,
            archive_path,
            rotation,
        }
    }

    /// Exporter configured from settings
    pub fn from_settings(
        registry: StoreRegistry,
        settings: &Settings,
        paths: &TimesheetPaths,
    ) -> Self {
        Self::new(
            BackupCoordinator::new(registry),
            settings.export_dir(paths),
            settings.archive_path(paths),
            settings.backup.rotation,
        )
    }

    pub fn export_dir(&self) -> &Path {
        &self.export_dir
    }

    pub fn archive_path(&self) -> &Path {
        &self.archive_path
    }

    /// Clear the export folder, back up every table into it and zip the result
    ///
    /// Returns the archive path. A file that cannot be removed from the export
    /// folder aborts the export before any backup runs. A failure while adding
    /// an entry aborts too, leaving the entries written so far in the archive.
    ///
    /// The archive may be rebuilt by another export as soon as this returns;
    /// use [`export_with`](Self::export_with) to read it safely.
    pub fn export(&self) -> TimesheetResult<PathBuf> {
        self.export_with(|archive| archive.to_path_buf())
    }

    /// Export, then hand the finished archive to `deliver` before releasing
    /// the folder lock
    ///
    /// No other export can truncate the archive while `deliver` runs.
    pub fn export_with<R, F>(&self, deliver: F) -> TimesheetResult<R>
    where
        F: FnOnce(&Path) -> R,
    {
        let lock = FolderLock::for_folder(&self.export_dir);
        let _guard = lock.acquire()?;

        self.build_archive(lock.path())?;
        Ok(deliver(&self.archive_path))
    }

    fn build_archive(&self, lock_path: &Path) -> TimesheetResult<()> {

        fs::create_dir_all(&self.export_dir).map_err(|e| {
            TimesheetError::Io(format!(
                "Failed to create export directory {}: {}",
                self.export_dir.display(),
                e
            ))
        })?;

        let skip = [lock_path, self.archive_path.as_path()];
        clean_exported_files(&self.export_dir, &skip)?;

        let report = self
            .coordinator
            .backup_tables(self.rotation, &self.export_dir, &BackupId::now());
        if !report.is_complete() {
            warn!("exporting incomplete backup: {}", report.summary());
        }

        if let Some(parent) = self.archive_path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TimesheetError::Io(format!(
                    "Failed to create archive directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        let file = OpenOptions::new()
            .write(true)
            .create(true)
            .truncate(true)
            .open(&self.archive_path)
            .map_err(|e| {
                TimesheetError::Io(format!(
                    "Failed to create archive {}: {}",
                    self.archive_path.display(),
                    e
                ))
            })?;

        let files = exported_files(&self.export_dir, &skip)?;

        // Dropping the writer on an error path still finalizes the archive
        let mut zip = ZipWriter::new(file);
        for path in &files {
            append_file(&mut zip, path)?;
        }
        zip.finish()?;

        info!(
            archive = %self.archive_path.display(),
            entries = files.len(),
            "export archive written"
        );

        Ok(())
    }
}

/// Remove every file in `folder` except the ones in `skip`
fn clean_exported_files(folder: &Path, skip: &[&Path]) -> TimesheetResult<()> {
    for path in exported_files(folder, skip)? {
        fs::remove_file(&path).map_err(|e| {
            TimesheetError::Io(format!(
                "Failed to remove exported file {}: {}",
                path.display(),
                e
            ))
        })?;
    }
    Ok(())
}

/// Regular files in `folder`, sorted by name, except the ones in `skip`
fn exported_files(folder: &Path, skip: &[&Path]) -> TimesheetResult<Vec<PathBuf>> {
    let entries = fs::read_dir(folder).map_err(|e| {
        TimesheetError::Io(format!(
            "Failed to read export directory {}: {}",
            folder.display(),
            e
        ))
    })?;

    let mut files = Vec::new();
    for entry in entries {
        let entry = entry
            .map_err(|e| TimesheetError::Io(format!("Failed to read directory entry: {}", e)))?;
        let path = entry.path();
        if skip.contains(&path.as_path()) {
            continue;
        }
        let file_type = entry
            .file_type()
            .map_err(|e| TimesheetError::Io(format!("Failed to stat {}: {}", path.display(), e)))?;
        if file_type.is_file() {
            files.push(path);
        }
    }

    files.sort();
    Ok(files)
}

/// Copy one file into the archive under its base name
fn append_file(zip: &mut ZipWriter<File>, path: &Path) -> TimesheetResult<()> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .ok_or_else(|| TimesheetError::Export(format!("{} has no file name", path.display())))?;

    let mut file = File::open(path)
        .map_err(|e| TimesheetError::Export(format!("failed to open {}: {}", path.display(), e)))?;

    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);
    zip.start_file(name.as_str(), options).map_err(|e| {
        TimesheetError::Export(format!(
            "failed to create entry for {} in zip file: {}",
            name, e
        ))
    })?;

    io::copy(&mut file, zip)
        .map_err(|e| TimesheetError::Export(format!("failed to write {} to zip: {}", name, e)))?;

    Ok(())
}
