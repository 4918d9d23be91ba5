//! The data model shared by the scanner and the report generator.
//!
//! This module provides:
//!
//! - [`FileRecord`] - one inventoried file (metadata + fingerprint, or a
//!   per-file error)
//! - [`Inventory`] - the per-run mapping of relative path to record
//! - [`CacheSnapshot`] - the persisted form of the previous run's inventory
//! - [`ChangeSet`] - an ordered, deduplicated list of relative paths
//!
//! An [`Inventory`] and a [`ChangeSet`] live within a single run; only the
//! [`CacheSnapshot`] crosses runs, and it is fully overwritten each time.

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::collections::FxHashSet;

/// A single inventoried file.
///
/// The serialized shape matches the inventory artifact: a record either
/// carries full metadata (`size`, `mtime`, `sha256`) or a per-file `error`
/// string when the file could not be stat'd. The two shapes are
/// distinguished structurally (untagged), so the JSON stays flat.
///
/// The `sha256` field may be the empty string while a record is waiting for
/// its parallel hash job, or permanently if the hash job failed.
///
/// # Examples
///
/// ```
/// use ki_core::FileRecord;
///
/// let rec = FileRecord::hashed("docs/a.md", "/tran/docs/a.md", 5, 1_700_000_000.25, "");
/// assert_eq!(rec.rel_path(), "docs/a.md");
/// assert!(!rec.is_failed());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FileRecord {
    /// A file that was stat'd successfully.
    Hashed {
        /// Path relative to the scanned root, forward slashes.
        rel_path: String,
        /// Absolute path on the host filesystem.
        abs_path: Utf8PathBuf,
        /// File size in bytes.
        size: u64,
        /// Modification time as fractional seconds since the Unix epoch.
        mtime: f64,
        /// Hex-encoded SHA-256 digest, or empty if not yet computed.
        sha256: String,
    },

    /// A file that could not be stat'd (permission error, deletion race).
    Failed {
        /// Path relative to the scanned root, forward slashes.
        rel_path: String,
        /// Absolute path on the host filesystem.
        abs_path: Utf8PathBuf,
        /// The error message.
        error: String,
    },
}

impl FileRecord {
    /// Creates a successfully stat'd record.
    #[must_use]
    pub fn hashed(
        rel_path: impl Into<String>,
        abs_path: impl Into<Utf8PathBuf>,
        size: u64,
        mtime: f64,
        sha256: impl Into<String>,
    ) -> Self {
        Self::Hashed {
            rel_path: rel_path.into(),
            abs_path: abs_path.into(),
            size,
            mtime,
            sha256: sha256.into(),
        }
    }

    /// Creates a per-file error record.
    #[must_use]
    pub fn failed(
        rel_path: impl Into<String>,
        abs_path: impl Into<Utf8PathBuf>,
        error: impl Into<String>,
    ) -> Self {
        Self::Failed {
            rel_path: rel_path.into(),
            abs_path: abs_path.into(),
            error: error.into(),
        }
    }

    /// The path relative to the scanned root.
    #[must_use]
    pub fn rel_path(&self) -> &str {
        match self {
            Self::Hashed { rel_path, .. } | Self::Failed { rel_path, .. } => rel_path,
        }
    }

    /// The absolute path on the host filesystem.
    #[must_use]
    pub fn abs_path(&self) -> &Utf8Path {
        match self {
            Self::Hashed { abs_path, .. } | Self::Failed { abs_path, .. } => abs_path,
        }
    }

    /// Returns `true` if this is a per-file error record.
    #[inline]
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed { .. })
    }

    /// The hex digest, if this record carries one (may be empty).
    #[must_use]
    pub fn sha256(&self) -> Option<&str> {
        match self {
            Self::Hashed { sha256, .. } => Some(sha256),
            Self::Failed { .. } => None,
        }
    }

    /// The size in bytes, for non-error records.
    #[must_use]
    pub const fn size(&self) -> Option<u64> {
        match self {
            Self::Hashed { size, .. } => Some(*size),
            Self::Failed { .. } => None,
        }
    }

    /// The modification time in fractional epoch seconds, for non-error
    /// records.
    #[must_use]
    pub const fn mtime(&self) -> Option<f64> {
        match self {
            Self::Hashed { mtime, .. } => Some(*mtime),
            Self::Failed { .. } => None,
        }
    }

    /// Overwrites the digest of a non-error record; no-op for error records.
    pub fn set_sha256(&mut self, digest: impl Into<String>) {
        if let Self::Hashed { sha256, .. } = self {
            *sha256 = digest.into();
        }
    }
}

/// The per-run mapping of relative path to [`FileRecord`].
///
/// Backed by a `BTreeMap`, so iteration and serialization order is always
/// sorted by relative path regardless of the order records were produced
/// (in particular, regardless of parallel hash completion order).
///
/// # Examples
///
/// ```
/// use ki_core::{FileRecord, Inventory};
///
/// let mut inv = Inventory::new();
/// inv.insert(FileRecord::hashed("b.txt", "/r/b.txt", 1, 0.0, ""));
/// inv.insert(FileRecord::hashed("a.txt", "/r/a.txt", 1, 0.0, ""));
///
/// let order: Vec<_> = inv.records().map(|r| r.rel_path().to_owned()).collect();
/// assert_eq!(order, vec!["a.txt", "b.txt"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    records: BTreeMap<String, FileRecord>,
}

impl Inventory {
    /// Creates an empty inventory.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a record, keyed by its relative path. Replaces any existing
    /// record for the same path.
    pub fn insert(&mut self, record: FileRecord) {
        self.records.insert(record.rel_path().to_owned(), record);
    }

    /// Looks up a record by relative path.
    #[must_use]
    pub fn get(&self, rel_path: &str) -> Option<&FileRecord> {
        self.records.get(rel_path)
    }

    /// Mutable lookup by relative path.
    pub fn get_mut(&mut self, rel_path: &str) -> Option<&mut FileRecord> {
        self.records.get_mut(rel_path)
    }

    /// Removes a record by relative path.
    pub fn remove(&mut self, rel_path: &str) -> Option<FileRecord> {
        self.records.remove(rel_path)
    }

    /// Returns `true` if a record exists for the given relative path.
    #[must_use]
    pub fn contains(&self, rel_path: &str) -> bool {
        self.records.contains_key(rel_path)
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the inventory has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Iterates records in relative-path order.
    pub fn records(&self) -> impl Iterator<Item = &FileRecord> {
        self.records.values()
    }

    /// Consumes the inventory into an ordered record vector.
    #[must_use]
    pub fn into_records(self) -> Vec<FileRecord> {
        self.records.into_values().collect()
    }

    /// Number of per-file error records.
    #[must_use]
    pub fn error_count(&self) -> usize {
        self.records.values().filter(|r| r.is_failed()).count()
    }
}

impl FromIterator<FileRecord> for Inventory {
    fn from_iter<T: IntoIterator<Item = FileRecord>>(iter: T) -> Self {
        let mut inv = Self::new();
        for record in iter {
            inv.insert(record);
        }
        inv
    }
}

/// The persisted form of the previous run's inventory.
///
/// Owned exclusively by the cache store: written at the end of every run,
/// read at the start of the next. Records are stored as an ordered
/// sequence; [`CacheSnapshot::to_inventory`] rebuilds the keyed map.
///
/// `Default` is the cold-start snapshot (no files, empty timestamp).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Records from the previous run, ordered by relative path.
    pub files: Vec<FileRecord>,

    /// UTC timestamp of the run that produced this snapshot.
    pub updated_at: String,
}

impl CacheSnapshot {
    /// Builds a snapshot from an inventory and a timestamp.
    #[must_use]
    pub fn from_inventory(inventory: Inventory, updated_at: impl Into<String>) -> Self {
        Self {
            files: inventory.into_records(),
            updated_at: updated_at.into(),
        }
    }

    /// Rebuilds the keyed inventory from the stored sequence.
    #[must_use]
    pub fn to_inventory(&self) -> Inventory {
        self.files.iter().cloned().collect()
    }

    /// Returns `true` for a cold-start snapshot.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

/// An ordered, first-occurrence-deduplicated list of relative paths.
///
/// Used both as the input to the incremental scan strategy (paths believed
/// to have changed) and as a run's output (paths actually reprocessed).
///
/// # Examples
///
/// ```
/// use ki_core::ChangeSet;
///
/// let mut set = ChangeSet::new();
/// assert!(set.push("a.txt"));
/// assert!(set.push("b.txt"));
/// assert!(!set.push("a.txt")); // duplicate, keeps first position
/// assert_eq!(set.paths(), ["a.txt", "b.txt"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChangeSet {
    paths: Vec<String>,
    seen: FxHashSet<String>,
}

impl ChangeSet {
    /// Creates an empty change set.
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a path unless it is already present. Returns whether the
    /// path was new.
    pub fn push(&mut self, path: impl Into<String>) -> bool {
        let path = path.into();
        if self.seen.contains(&path) {
            return false;
        }
        self.seen.insert(path.clone());
        self.paths.push(path);
        true
    }

    /// Returns `true` if the path is in the set.
    #[must_use]
    pub fn contains(&self, path: &str) -> bool {
        self.seen.contains(path)
    }

    /// The paths in first-occurrence order.
    #[must_use]
    pub fn paths(&self) -> &[String] {
        &self.paths
    }

    /// Number of distinct paths.
    #[must_use]
    pub fn len(&self) -> usize {
        self.paths.len()
    }

    /// Returns `true` if the set holds no paths.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.paths.is_empty()
    }

    /// Parses a comma-separated path list, normalizing each entry against
    /// the scan root.
    #[must_use]
    pub fn from_list(list: &str, root: &Utf8Path) -> Self {
        Self::from_entries(list.split(','), root)
    }

    /// Parses newline-delimited path entries (the change-file format),
    /// normalizing each entry against the scan root.
    #[must_use]
    pub fn from_lines(text: &str, root: &Utf8Path) -> Self {
        Self::from_entries(text.lines(), root)
    }

    fn from_entries<'a>(entries: impl Iterator<Item = &'a str>, root: &Utf8Path) -> Self {
        let mut set = Self::new();
        for entry in entries {
            if let Some(path) = normalize_entry(entry, root) {
                set.push(path);
            }
        }
        set
    }
}

impl FromIterator<String> for ChangeSet {
    fn from_iter<T: IntoIterator<Item = String>>(iter: T) -> Self {
        let mut set = Self::new();
        for path in iter {
            set.push(path);
        }
        set
    }
}

/// Normalizes one change-list entry.
///
/// Absolute paths under the root become root-relative; all other entries
/// pass through verbatim (an absolute path outside the root stays absolute
/// and will simply never match an inventoried file). Backslashes are folded
/// to forward slashes so entries match inventory keys on any host.
#[must_use]
pub fn normalize_entry(raw: &str, root: &Utf8Path) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }
    let forward = trimmed.replace('\\', "/");
    let candidate = Utf8Path::new(&forward);
    if candidate.is_absolute() {
        if let Ok(rel) = candidate.strip_prefix(root) {
            return Some(rel.as_str().to_owned());
        }
    }
    Some(forward)
}
