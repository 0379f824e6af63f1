//! Persisted coverage store.
//!
//! One plain file holds the whole cumulative record. The location is
//! injected at construction; nothing here is global or process-wide, so two
//! stores in one process (or one store shared by many processes) behave the
//! same way.
//!
//! # Concurrency
//!
//! Writers follow last-save-wins. Concurrent runs that overlap between
//! [`CoverageStore::load`] and [`CoverageStore::save`] can lose each other's
//! increment for that overlap; the record stays well-formed and re-running
//! the lost workload restores the lines. There is no file locking.

use crate::result::CubrirResult;
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Read};
use std::path::{Path, PathBuf};

/// File-backed store for the persisted cumulative record
#[derive(Debug, Clone)]
pub struct CoverageStore {
    path: PathBuf,
}

impl CoverageStore {
    /// Create a store handle for a file location.
    ///
    /// Nothing is touched on disk until one of the I/O operations runs.
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The store's file location
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Create the store file empty when it does not exist yet.
    ///
    /// An existing file is left exactly as it is.
    pub fn ensure_exists(&self) -> CubrirResult<()> {
        match OpenOptions::new().write(true).create_new(true).open(&self.path) {
            Ok(_) => Ok(()),
            Err(err) if err.kind() == ErrorKind::AlreadyExists => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    /// Read the store's full content.
    ///
    /// With `truncate_after` the file is emptied on the same open handle
    /// immediately after the read, so the window where the content exists
    /// only in memory is as small as this process can make it. A missing or
    /// empty file reads as `""`; bytes that are not valid UTF-8 are replaced
    /// rather than failing the read, and fall out as malformed at decode.
    pub fn load(&self, truncate_after: bool) -> CubrirResult<String> {
        match fs::metadata(&self.path) {
            Ok(meta) if meta.len() == 0 => return Ok(String::new()),
            Ok(_) => {}
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(String::new()),
            Err(err) => return Err(err.into()),
        }

        let mut file = OpenOptions::new().read(true).write(true).open(&self.path)?;
        let mut bytes = Vec::new();
        file.read_to_end(&mut bytes)?;
        if truncate_after {
            file.set_len(0)?;
        }
        Ok(String::from_utf8_lossy(&bytes).into_owned())
    }

    /// Replace the store's full content
    pub fn save(&self, text: &str) -> CubrirResult<()> {
        fs::write(&self.path, text)?;
        Ok(())
    }

    /// Discard all accumulated coverage
    pub fn reset(&self) -> CubrirResult<()> {
        fs::write(&self.path, "")?;
        Ok(())
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn store_in(dir: &tempfile::TempDir) -> CoverageStore {
        CoverageStore::new(dir.path().join("coverage.json"))
    }

    #[test]
    fn test_ensure_exists_creates_empty_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.ensure_exists().unwrap();
        assert!(store.path().exists());
        assert_eq!(fs::metadata(store.path()).unwrap().len(), 0);
    }

    #[test]
    fn test_ensure_exists_preserves_existing_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("[]").unwrap();
        store.ensure_exists().unwrap();
        assert_eq!(store.load(false).unwrap(), "[]");
    }

    #[test]
    fn test_load_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        assert_eq!(store.load(false).unwrap(), "");
        assert_eq!(store.load(true).unwrap(), "");
        assert!(!store.path().exists());
    }

    #[test]
    fn test_load_without_truncate_keeps_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("abc").unwrap();
        assert_eq!(store.load(false).unwrap(), "abc");
        assert_eq!(store.load(false).unwrap(), "abc");
    }

    #[test]
    fn test_load_with_truncate_empties_file() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("abc").unwrap();
        assert_eq!(store.load(true).unwrap(), "abc");
        assert_eq!(fs::metadata(store.path()).unwrap().len(), 0);
        assert_eq!(store.load(false).unwrap(), "");
    }

    #[test]
    fn test_save_replaces_whole_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("first version, quite long").unwrap();
        store.save("second").unwrap();
        assert_eq!(store.load(false).unwrap(), "second");
    }

    #[test]
    fn test_reset_clears_content() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        store.save("data").unwrap();
        store.reset().unwrap();
        assert_eq!(store.load(false).unwrap(), "");
        assert!(store.path().exists());
    }

    #[test]
    fn test_load_replaces_invalid_utf8() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::write(store.path(), [0x5b, 0xff, 0x5d]).unwrap();
        let text = store.load(false).unwrap();
        assert!(text.starts_with('['));
        assert!(text.ends_with(']'));
    }
}
