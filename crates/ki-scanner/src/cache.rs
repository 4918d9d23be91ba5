//! Persistence for the previous run's inventory snapshot.
//!
//! The snapshot is a single JSON file owned entirely by this store. Loads
//! never fail: a missing, unreadable, or malformed snapshot degrades to a
//! cold start (with a warning), because the worst outcome is rehashing
//! everything once. Saves fully overwrite the file.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ki_core::CacheSnapshot;
use tracing::{debug, warn};

use crate::error::ScanError;

/// Loads and saves the [`CacheSnapshot`] at a fixed path.
#[derive(Debug, Clone)]
pub struct CacheStore {
    path: Utf8PathBuf,
}

impl CacheStore {
    /// Creates a store for the given snapshot path.
    #[must_use]
    pub fn new(path: impl Into<Utf8PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The snapshot path.
    #[must_use]
    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Loads the previous snapshot, or an empty one on any failure.
    #[must_use]
    pub fn load(&self) -> CacheSnapshot {
        let bytes = match fs::read(self.path.as_std_path()) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                debug!(path = %self.path, "no previous snapshot, cold start");
                return CacheSnapshot::default();
            }
            Err(err) => {
                warn!(path = %self.path, error = %err, "snapshot unreadable, cold start");
                return CacheSnapshot::default();
            }
        };

        match serde_json::from_slice(&bytes) {
            Ok(snapshot) => snapshot,
            Err(err) => {
                warn!(path = %self.path, error = %err, "snapshot malformed, cold start");
                CacheSnapshot::default()
            }
        }
    }

    /// Overwrites the snapshot, creating parent directories as needed.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Persist`] if the directory or file cannot be
    /// written.
    pub fn save(&self, snapshot: &CacheSnapshot) -> Result<(), ScanError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent.as_std_path())
                .map_err(|e| ScanError::persist(&self.path, e))?;
        }
        let json = serde_json::to_vec_pretty(snapshot)
            .map_err(|e| ScanError::persist(&self.path, std::io::Error::other(e)))?;
        fs::write(self.path.as_std_path(), json).map_err(|e| ScanError::persist(&self.path, e))?;
        debug!(path = %self.path, files = snapshot.files.len(), "snapshot saved");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ki_core::{FileRecord, Inventory};
    use pretty_assertions::assert_eq;

    fn store_in(dir: &tempfile::TempDir) -> CacheStore {
        let path = Utf8PathBuf::from_path_buf(dir.path().join("me/cache.json")).unwrap();
        CacheStore::new(path)
    }

    #[test]
    fn test_missing_snapshot_is_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let snapshot = store_in(&dir).load();
        assert!(snapshot.is_empty());
        assert_eq!(snapshot.updated_at, "");
    }

    #[test]
    fn test_save_then_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut inv = Inventory::new();
        inv.insert(FileRecord::hashed("a.txt", "/r/a.txt", 3, 1.5, "aa"));
        inv.insert(FileRecord::failed("b.txt", "/r/b.txt", "gone"));
        let snapshot = CacheSnapshot::from_inventory(inv, "2026-02-01T00:00:00Z");

        store.save(&snapshot).unwrap();
        assert_eq!(store.load(), snapshot);
    }

    #[test]
    fn test_malformed_snapshot_is_cold_start() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);
        fs::create_dir_all(store.path().parent().unwrap()).unwrap();
        fs::write(store.path(), b"{not json").unwrap();

        assert!(store.load().is_empty());
    }

    #[test]
    fn test_save_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let store = store_in(&dir);

        let mut inv = Inventory::new();
        inv.insert(FileRecord::hashed("a.txt", "/r/a.txt", 3, 1.5, "aa"));
        store
            .save(&CacheSnapshot::from_inventory(inv, "t1"))
            .unwrap();
        store
            .save(&CacheSnapshot::from_inventory(Inventory::new(), "t2"))
            .unwrap();

        let loaded = store.load();
        assert!(loaded.is_empty());
        assert_eq!(loaded.updated_at, "t2");
    }
}
