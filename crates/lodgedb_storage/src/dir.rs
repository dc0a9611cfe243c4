//! Directory-backed store backend.

use crate::backend::StoreBackend;
use crate::error::StoreResult;
use std::fs::{self, File};
use std::io::{ErrorKind, Read, Write};
use std::path::{Path, PathBuf};

/// A store backend keeping one file per store under a root directory.
///
/// Writes are atomic at the store level using the write-then-rename
/// pattern:
///
/// 1. Write to a temporary file
/// 2. Sync the temporary file to disk
/// 3. Rename the temporary file over the store file
/// 4. Fsync the directory so the rename is durable
///
/// Readers observe either the previous content or the new content in
/// full, never a partially written store.
///
/// # Example
///
/// ```rust
/// use lodgedb_storage::{DirBackend, StoreBackend};
///
/// let temp = tempfile::tempdir().unwrap();
/// let backend = DirBackend::open(temp.path()).unwrap();
/// backend.write("notes.json", b"[]").unwrap();
/// assert_eq!(backend.read("notes.json").unwrap().as_deref(), Some(&b"[]"[..]));
/// ```
#[derive(Debug)]
pub struct DirBackend {
    /// Root directory path.
    root: PathBuf,
    /// Whether writes fsync the store file and the directory.
    sync_on_write: bool,
}

impl DirBackend {
    /// Opens or creates the backing directory with syncing enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created, or if the
    /// path exists and is not a directory.
    pub fn open(root: impl Into<PathBuf>) -> StoreResult<Self> {
        Self::open_with_sync(root, true)
    }

    /// Opens or creates the backing directory.
    ///
    /// With `sync_on_write` disabled, writes still go through the
    /// temp-then-rename sequence but skip the fsync calls. Faster, and
    /// acceptable when losing the most recent write on power failure is
    /// tolerable.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn open_with_sync(root: impl Into<PathBuf>, sync_on_write: bool) -> StoreResult<Self> {
        let root = root.into();
        fs::create_dir_all(&root)?;
        Ok(Self {
            root,
            sync_on_write,
        })
    }

    /// Returns the backing directory path.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn store_path(&self, name: &str) -> PathBuf {
        self.root.join(name)
    }

    /// Syncs the backing directory so renames are durable.
    ///
    /// On Unix, fsync on a directory syncs the directory entries. Windows
    /// NTFS journaling provides similar durability guarantees for metadata
    /// operations, so the explicit fsync is skipped there.
    #[cfg(unix)]
    fn sync_directory(&self) -> StoreResult<()> {
        let dir = File::open(&self.root)?;
        dir.sync_all()?;
        Ok(())
    }

    #[cfg(not(unix))]
    fn sync_directory(&self) -> StoreResult<()> {
        Ok(())
    }
}

impl StoreBackend for DirBackend {
    fn read(&self, name: &str) -> StoreResult<Option<Vec<u8>>> {
        let mut file = match File::open(self.store_path(name)) {
            Ok(file) => file,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(err) => return Err(err.into()),
        };

        let mut data = Vec::new();
        file.read_to_end(&mut data)?;
        Ok(Some(data))
    }

    fn write(&self, name: &str, data: &[u8]) -> StoreResult<()> {
        let store_path = self.store_path(name);
        let temp_path = self.root.join(format!("{name}.tmp"));

        // Write to temp file
        let mut file = File::create(&temp_path)?;
        file.write_all(data)?;
        if self.sync_on_write {
            file.sync_all()?;
        }
        drop(file);

        // Atomic rename
        fs::rename(&temp_path, &store_path)?;

        // Fsync directory to ensure the rename is durable
        if self.sync_on_write {
            self.sync_directory()?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn dir_open_creates_directory() {
        let temp = tempdir().unwrap();
        let root = temp.path().join("stores");

        assert!(!root.exists());

        let backend = DirBackend::open(&root).unwrap();
        assert!(root.is_dir());
        assert_eq!(backend.root(), root);
    }

    #[test]
    fn dir_read_missing_returns_none() {
        let temp = tempdir().unwrap();
        let backend = DirBackend::open(temp.path()).unwrap();

        assert!(backend.read("absent.json").unwrap().is_none());
    }

    #[test]
    fn dir_write_then_read_round_trips() {
        let temp = tempdir().unwrap();
        let backend = DirBackend::open(temp.path()).unwrap();

        backend.write("data.json", b"[1,2,3]").unwrap();
        let data = backend.read("data.json").unwrap();
        assert_eq!(data.as_deref(), Some(&b"[1,2,3]"[..]));
    }

    #[test]
    fn dir_write_replaces_previous_content() {
        let temp = tempdir().unwrap();
        let backend = DirBackend::open(temp.path()).unwrap();

        backend.write("data.json", b"first").unwrap();
        backend.write("data.json", b"second").unwrap();

        let data = backend.read("data.json").unwrap();
        assert_eq!(data.as_deref(), Some(&b"second"[..]));
    }

    #[test]
    fn dir_write_leaves_no_temp_file() {
        let temp = tempdir().unwrap();
        let backend = DirBackend::open(temp.path()).unwrap();

        backend.write("data.json", b"content").unwrap();

        assert!(temp.path().join("data.json").exists());
        assert!(!temp.path().join("data.json.tmp").exists());
    }

    #[test]
    fn dir_reopen_sees_previous_write() {
        let temp = tempdir().unwrap();

        {
            let backend = DirBackend::open(temp.path()).unwrap();
            backend.write("data.json", b"persisted").unwrap();
        }

        let backend = DirBackend::open(temp.path()).unwrap();
        let data = backend.read("data.json").unwrap();
        assert_eq!(data.as_deref(), Some(&b"persisted"[..]));
    }

    #[test]
    fn dir_open_without_sync_still_writes() {
        let temp = tempdir().unwrap();
        let backend = DirBackend::open_with_sync(temp.path(), false).unwrap();

        backend.write("data.json", b"unsynced").unwrap();
        let data = backend.read("data.json").unwrap();
        assert_eq!(data.as_deref(), Some(&b"unsynced"[..]));
    }
}
