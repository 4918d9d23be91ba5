//! The scan strategies: full tree walk and explicit-change-list update.
//!
//! Both strategies produce the same shape of result: a complete
//! [`Inventory`] of the in-scope tree, the [`ChangeSet`] of paths that were
//! reprocessed, and counters. A full scan re-derives the inventory from the
//! filesystem; an incremental scan starts from the previous inventory and
//! touches only the listed paths, so its cost is proportional to the change
//! list, not the tree.

use std::fs;
use std::time::UNIX_EPOCH;

use camino::{Utf8Component, Utf8Path, Utf8PathBuf};
use ki_core::{ChangeSet, FileRecord, FilterSpec, Inventory};
use tracing::{debug, info, warn};

use crate::error::ScanError;
use crate::filter::PathFilter;
use crate::hasher::{HashJob, ParallelHasher};
use crate::stats::RunStats;
use crate::walker::FileWalker;

/// The result of one scan.
#[derive(Debug)]
pub struct ScanOutcome {
    /// The complete inventory of the in-scope tree after this run.
    pub inventory: Inventory,
    /// Paths reprocessed this run, in first-occurrence order.
    pub changed: ChangeSet,
    /// Run counters.
    pub stats: RunStats,
}

/// Executes scans over one source root.
#[derive(Debug)]
pub struct Scanner {
    root: Utf8PathBuf,
    filter: PathFilter,
    hasher: ParallelHasher,
}

impl Scanner {
    /// Creates a scanner for `root` with the given filter and hashing
    /// concurrency.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if a filter glob fails to compile.
    /// Root existence is checked per scan, not here.
    pub fn new(
        root: impl Into<Utf8PathBuf>,
        filter: &FilterSpec,
        concurrency: Option<usize>,
    ) -> Result<Self, ScanError> {
        Ok(Self {
            root: root.into(),
            filter: PathFilter::new(filter)?,
            hasher: ParallelHasher::new(concurrency),
        })
    }

    /// The source root.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Walks the whole tree and rebuilds the inventory.
    ///
    /// Unchanged files (same size and mtime as `previous`) keep their
    /// previous fingerprint without being read. Everything else is queued
    /// for parallel hashing. Files present in `previous` but absent from
    /// the walk simply do not appear in the result; they are counted in
    /// [`RunStats::removed`].
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root does not exist.
    pub fn scan_full(&self, previous: &Inventory) -> Result<ScanOutcome, ScanError> {
        let walker = FileWalker::new(self.root.clone())?;

        let mut inventory = Inventory::new();
        let mut changed = ChangeSet::new();
        let mut stats = RunStats::default();
        let mut jobs = Vec::new();

        for file in walker.walk() {
            if !self.filter.matches(&file.rel_path) {
                continue;
            }
            stats.total += 1;

            let meta = match fs::metadata(file.abs_path.as_std_path()) {
                Ok(meta) => meta,
                Err(err) => {
                    stats.errors += 1;
                    changed.push(file.rel_path.clone());
                    inventory.insert(FileRecord::failed(
                        file.rel_path,
                        file.abs_path,
                        err.to_string(),
                    ));
                    continue;
                }
            };
            let size = meta.len();
            let mtime = mtime_seconds(&meta);

            if crate::change::needs_rehash(size, mtime, previous.get(&file.rel_path)) {
                stats.hashed += 1;
                changed.push(file.rel_path.clone());
                jobs.push(HashJob {
                    rel_path: file.rel_path.clone(),
                    abs_path: file.abs_path.clone(),
                });
                inventory.insert(FileRecord::hashed(
                    file.rel_path, file.abs_path, size, mtime, "",
                ));
            } else {
                stats.reused += 1;
                let prior = previous
                    .get(&file.rel_path)
                    .and_then(FileRecord::sha256)
                    .unwrap_or_default();
                inventory.insert(FileRecord::hashed(
                    file.rel_path, file.abs_path, size, mtime, prior,
                ));
            }
        }

        stats.removed = previous
            .records()
            .filter(|r| !inventory.contains(r.rel_path()))
            .count();

        self.apply_digests(&mut inventory, jobs);
        info!(strategy = "full", %stats, "scan complete");

        Ok(ScanOutcome {
            inventory,
            changed,
            stats,
        })
    }

    /// Updates the previous inventory for an explicit list of paths.
    ///
    /// Every listed path appears in the `changed` output, whether or not
    /// it produced a record; a listed path that no longer exists (or never
    /// did) is simply dropped from the inventory. Paths outside the filter
    /// scope are dropped too. Nothing outside the list is touched.
    #[must_use]
    pub fn scan_incremental(&self, previous: &Inventory, change_set: &ChangeSet) -> ScanOutcome {
        let mut inventory = previous.clone();
        let mut changed = ChangeSet::new();
        let mut stats = RunStats::default();
        let mut jobs = Vec::new();

        for rel_path in change_set.paths() {
            stats.total += 1;
            changed.push(rel_path.clone());

            // Entries that survived normalization as absolute paths, or
            // that climb out with `..`, can never name a file under the
            // root; joining them would escape it.
            if !stays_under_root(rel_path) {
                warn!(path = %rel_path, "change-list entry outside the root, dropping");
                if inventory.remove(rel_path).is_some() {
                    stats.removed += 1;
                }
                continue;
            }

            if !self.filter.matches(rel_path) {
                if inventory.remove(rel_path).is_some() {
                    stats.removed += 1;
                }
                continue;
            }

            let abs_path = self.root.join(rel_path);
            let meta = match fs::metadata(abs_path.as_std_path()) {
                Ok(meta) => meta,
                Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
                    if inventory.remove(rel_path).is_some() {
                        stats.removed += 1;
                    } else {
                        debug!(path = %rel_path, "listed path was never inventoried");
                    }
                    continue;
                }
                Err(err) => {
                    stats.errors += 1;
                    inventory.insert(FileRecord::failed(rel_path, abs_path, err.to_string()));
                    continue;
                }
            };
            let size = meta.len();
            let mtime = mtime_seconds(&meta);

            if crate::change::needs_rehash(size, mtime, inventory.get(rel_path)) {
                stats.hashed += 1;
                jobs.push(HashJob {
                    rel_path: rel_path.clone(),
                    abs_path: abs_path.clone(),
                });
                inventory.insert(FileRecord::hashed(rel_path, abs_path, size, mtime, ""));
            } else {
                stats.reused += 1;
            }
        }

        self.apply_digests(&mut inventory, jobs);
        info!(strategy = "incremental", %stats, "scan complete");

        ScanOutcome {
            inventory,
            changed,
            stats,
        }
    }

    fn apply_digests(&self, inventory: &mut Inventory, jobs: Vec<HashJob>) {
        for (rel_path, digest) in self.hasher.hash_batch(jobs) {
            if let Some(record) = inventory.get_mut(&rel_path) {
                record.set_sha256(digest);
            }
        }
    }
}

/// Returns `true` if joining `rel_path` onto the scan root cannot leave
/// the root: the path is relative and free of `..` components. Every
/// inventory key must satisfy this.
fn stays_under_root(rel_path: &str) -> bool {
    let path = Utf8Path::new(rel_path);
    !path.is_absolute()
        && !path
            .components()
            .any(|c| matches!(c, Utf8Component::ParentDir | Utf8Component::Prefix(_)))
}

/// Modification time as fractional seconds since the Unix epoch.
///
/// Pre-epoch timestamps come back negative; a filesystem that cannot
/// report mtimes at all yields zero.
fn mtime_seconds(meta: &fs::Metadata) -> f64 {
    meta.modified().map_or(0.0, |time| {
        match time.duration_since(UNIX_EPOCH) {
            Ok(since) => since.as_secs_f64(),
            Err(before) => -before.duration().as_secs_f64(),
        }
    })
}
