//! Advisory folder locks
//!
//! Backups and exports of one folder must not interleave: a concurrent run
//! could rotate away files another run just wrote, or truncate an archive
//! while it is being built. [`FolderLock`] serializes them with an exclusive
//! file lock taken on a sibling `{folder}.lock` file, which keeps the lock file
//! itself out of rotation sets and archives.

use std::fs::{self, File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;
use tracing::debug;

use crate::error::{TimesheetError, TimesheetResult};

/// Lock file name used when a folder has no name of its own (e.g. `/`)
const FALLBACK_LOCK_NAME: &str = ".timesheet.lock";

/// Exclusive lock over one backup or export folder
#[derive(Debug, Clone)]
pub struct FolderLock {
    path: PathBuf,
}

impl FolderLock {
    /// Lock guarding `folder`
    pub fn for_folder(folder: &Path) -> Self {
        let path = match folder.file_name() {
            Some(name) => {
                let mut lock_name = name.to_os_string();
                lock_name.push(".lock");
                folder.with_file_name(lock_name)
            }
            None => folder.join(FALLBACK_LOCK_NAME),
        };
        Self { path }
    }

    /// Path of the lock file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the lock is held
    pub fn acquire(&self) -> TimesheetResult<FolderLockGuard> {
        let file = self.open()?;
        FileExt::lock_exclusive(&file).map_err(|e| {
            TimesheetError::Lock(format!("Failed to lock {}: {}", self.path.display(), e))
        })?;
        debug!(lock = %self.path.display(), "folder lock acquired");
        Ok(FolderLockGuard { file })
    }

    /// Take the lock only if nobody else holds it
    ///
    /// Returns `Ok(None)` when another holder has it; any other failure is a
    /// lock error.
    pub fn try_acquire(&self) -> TimesheetResult<Option<FolderLockGuard>> {
        let file = self.open()?;
        match FileExt::try_lock_exclusive(&file) {
            Ok(()) => {
                debug!(lock = %self.path.display(), "folder lock acquired");
                Ok(Some(FolderLockGuard { file }))
            }
            Err(e) if is_contended(&e) => Ok(None),
            Err(e) => Err(TimesheetError::Lock(format!(
                "Failed to lock {}: {}",
                self.path.display(),
                e
            ))),
        }
    }

    fn open(&self) -> TimesheetResult<File> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(|e| {
                TimesheetError::Lock(format!(
                    "Failed to create lock directory {}: {}",
                    parent.display(),
                    e
                ))
            })?;
        }

        OpenOptions::new()
            .create(true)
            .read(true)
            .write(true)
            .truncate(false)
            .open(&self.path)
            .map_err(|e| {
                TimesheetError::Lock(format!("Failed to open {}: {}", self.path.display(), e))
            })
    }
}

fn is_contended(err: &io::Error) -> bool {
    err.raw_os_error() == fs2::lock_contended_error().raw_os_error()
        || err.kind() == io::ErrorKind::WouldBlock
}

/// Held folder lock, released on drop
#[derive(Debug)]
pub struct FolderLockGuard {
    file: File,
}

impl Drop for FolderLockGuard {
    fn drop(&mut self) {
        let _ = FileExt::unlock(&self.file);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tempfile::TempDir;

    #[test]
    fn test_lock_file_is_sibling_of_folder() {
        let temp_dir = TempDir::new().unwrap();
        let lock = FolderLock::for_folder(&temp_dir.path().join("backups"));
        assert_eq!(lock.path(), temp_dir.path().join("backups.lock"));
    }

    #[test]
    fn test_second_holder_waits_for_release() {
        let temp_dir = TempDir::new().unwrap();
        let folder = temp_dir.path().join("export");
        let lock = FolderLock::for_folder(&folder);

        let guard = lock.acquire().unwrap();
        assert!(lock.try_acquire().unwrap().is_none());

        let (tx, rx) = mpsc::channel();
        let contender = lock.clone();
        let handle = thread::spawn(move || {
            let _guard = contender.acquire().unwrap();
            tx.send(()).unwrap();
        });

        assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
        drop(guard);
        rx.recv_timeout(Duration::from_secs(5)).unwrap();
        handle.join().unwrap();

        assert!(lock.try_acquire().unwrap().is_some());
    }

    #[test]
    fn test_try_acquire_free_lock() {
        let temp_dir = TempDir::new().unwrap();
        let lock = FolderLock::for_folder(&temp_dir.path().join("backups"));

        let guard = lock.try_acquire().unwrap();
        assert!(guard.is_some());
        drop(guard);
        assert!(lock.try_acquire().unwrap().is_some());
    }

    #[test]
    fn test_try_acquire_reports_unusable_lock_path() {
        let temp_dir = TempDir::new().unwrap();
        let blocker = temp_dir.path().join("data");
        fs::write(&blocker, "not a folder").unwrap();
        let lock = FolderLock::for_folder(&blocker.join("backups"));

        let err = lock.try_acquire().unwrap_err();
        assert!(matches!(err, TimesheetError::Lock(_)));
    }

    #[test]
    fn test_contention_error_is_recognized() {
        assert!(is_contended(&fs2::lock_contended_error()));
        assert!(!is_contended(&io::Error::new(
            io::ErrorKind::PermissionDenied,
            "denied"
        )));
    }
}
