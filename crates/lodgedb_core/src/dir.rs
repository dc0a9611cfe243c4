//! Database directory management.
//!
//! This module handles the file system layout for LodgeDB:
//!
//! ```text
//! <db_path>/
//! ├─ LOCK               # Advisory lock for single-writer
//! ├─ manifest.json      # Format version and id counters
//! ├─ facilities.json    # Facility collection
//! ├─ customers.json     # Customer collection
//! └─ bookings.json      # Booking collection
//! ```
//!
//! The LOCK file ensures only one process can write to the database at a
//! time; the collection stores themselves are managed through the store
//! backend.

use crate::error::{CoreError, CoreResult};
use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::path::{Path, PathBuf};

const LOCK_FILE: &str = "LOCK";

/// Manages the database directory and its exclusive lock.
///
/// # Thread Safety
///
/// The `DatabaseDir` holds an exclusive lock on the database directory.
/// Only one `DatabaseDir` instance can exist per directory at a time; the
/// lock is released when the instance is dropped.
#[derive(Debug)]
pub(crate) struct DatabaseDir {
    /// Root directory path.
    path: PathBuf,
    /// Lock file handle (held for exclusive access).
    _lock_file: File,
}

impl DatabaseDir {
    /// Opens or creates a database directory.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - The directory doesn't exist and `create_if_missing` is false
    /// - Another process holds the lock (returns `DatabaseLocked`)
    /// - I/O errors occur
    pub(crate) fn open(path: &Path, create_if_missing: bool) -> CoreResult<Self> {
        // Create directory if needed
        if !path.exists() {
            if create_if_missing {
                fs::create_dir_all(path)?;
            } else {
                return Err(CoreError::invalid_format(format!(
                    "database directory does not exist: {}",
                    path.display()
                )));
            }
        }

        // Verify it's a directory
        if !path.is_dir() {
            return Err(CoreError::invalid_format(format!(
                "path is not a directory: {}",
                path.display()
            )));
        }

        // Acquire exclusive lock (non-blocking)
        let lock_path = path.join(LOCK_FILE);
        let lock_file = OpenOptions::new()
            .read(true)
            .write(true)
            .create(true)
            .truncate(false)
            .open(&lock_path)?;

        if lock_file.try_lock_exclusive().is_err() {
            return Err(CoreError::DatabaseLocked);
        }

        Ok(Self {
            path: path.to_path_buf(),
            _lock_file: lock_file,
        })
    }

    /// Returns the path to the database directory.
    pub(crate) fn path(&self) -> &Path {
        &self.path
    }
}
