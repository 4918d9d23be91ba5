//! Parallel content fingerprinting.
//!
//! Hash jobs are fanned out over a scoped rayon pool and the results are
//! collected back keyed by relative path. A job that fails to read its
//! file produces an empty digest instead of failing the batch; the record
//! keeps its metadata and the next run will retry it.

use camino::Utf8PathBuf;
use ki_core::collections::fx_hash_map_with_capacity;
use ki_core::FxHashMap;
use rayon::prelude::*;
use tracing::{debug, warn};

use crate::fingerprint;

/// One file queued for fingerprinting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HashJob {
    /// Inventory key the digest will be written back under.
    pub rel_path: String,
    /// File to read.
    pub abs_path: Utf8PathBuf,
}

/// Runs batches of hash jobs with bounded concurrency.
#[derive(Debug, Clone, Copy)]
pub struct ParallelHasher {
    cap: usize,
}

impl ParallelHasher {
    /// Creates a hasher with an explicit worker cap, or the number of
    /// available CPU cores when `None`.
    #[must_use]
    pub fn new(configured: Option<usize>) -> Self {
        Self {
            cap: configured.unwrap_or_else(available_cores).max(1),
        }
    }

    /// The configured worker cap. Each batch runs with at most this many
    /// workers, and never more workers than jobs.
    #[must_use]
    pub const fn workers(&self) -> usize {
        self.cap
    }

    /// Fingerprints every job, returning digests keyed by relative path.
    ///
    /// Failed reads yield an empty digest and a warning. Completion order
    /// does not matter; callers merge the map into an ordered inventory.
    #[must_use]
    pub fn hash_batch(&self, jobs: Vec<HashJob>) -> FxHashMap<String, String> {
        if jobs.is_empty() {
            return FxHashMap::default();
        }
        let workers = effective_workers(self.cap, jobs.len());
        debug!(jobs = jobs.len(), workers, "hashing batch");

        // Scoped pool so a host application's global pool settings are
        // never touched.
        let pool = match rayon::ThreadPoolBuilder::new()
            .num_threads(workers)
            .build()
        {
            Ok(pool) => pool,
            Err(err) => {
                warn!(error = %err, "thread pool unavailable, hashing serially");
                let mut results = fx_hash_map_with_capacity(jobs.len());
                results.extend(jobs.into_iter().map(hash_one));
                return results;
            }
        };

        pool.install(|| jobs.into_par_iter().map(hash_one).collect())
    }
}

fn hash_one(job: HashJob) -> (String, String) {
    let digest = match fingerprint::hash_file(&job.abs_path) {
        Ok(digest) => digest,
        Err(err) => {
            warn!(path = %job.abs_path, error = %err, "fingerprint failed");
            String::new()
        }
    };
    (job.rel_path, digest)
}

/// Caps the worker count at the number of jobs, with at least one worker.
#[must_use]
pub fn effective_workers(cap: usize, jobs: usize) -> usize {
    cap.min(jobs).max(1)
}

fn available_cores() -> usize {
    std::thread::available_parallelism().map_or(1, std::num::NonZeroUsize::get)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_effective_workers() {
        // Bounded by the cap when jobs are plentiful.
        assert_eq!(effective_workers(4, 8), 4);
        // Bounded by the job count when the batch is small.
        assert_eq!(effective_workers(8, 3), 3);
        assert_eq!(effective_workers(8, 1), 1);
        // Never zero workers.
        assert_eq!(effective_workers(0, 5), 1);
        assert_eq!(effective_workers(4, 0), 1);
    }

    #[test]
    fn test_cap_defaults_and_floor() {
        assert_eq!(ParallelHasher::new(Some(6)).workers(), 6);
        assert_eq!(ParallelHasher::new(Some(0)).workers(), 1);
        assert!(ParallelHasher::new(None).workers() >= 1);
    }

    #[test]
    fn test_single_job_batch_still_completes_under_wide_cap() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("one.txt");
        fs::write(&path, b"only job").unwrap();

        let jobs = vec![HashJob {
            rel_path: "one.txt".to_owned(),
            abs_path: Utf8PathBuf::from_path_buf(path).unwrap(),
        }];
        let results = ParallelHasher::new(Some(16)).hash_batch(jobs);
        assert_eq!(results["one.txt"].len(), 64);
    }

    #[test]
    fn test_empty_batch() {
        let hasher = ParallelHasher::new(Some(2));
        assert!(hasher.hash_batch(Vec::new()).is_empty());
    }

    #[test]
    fn test_batch_hashes_all_jobs() {
        let dir = tempfile::tempdir().unwrap();
        let mut jobs = Vec::new();
        for name in ["a.txt", "b.txt", "c.txt"] {
            let path = dir.path().join(name);
            fs::write(&path, name.as_bytes()).unwrap();
            jobs.push(HashJob {
                rel_path: name.to_owned(),
                abs_path: Utf8PathBuf::from_path_buf(path).unwrap(),
            });
        }

        let results = ParallelHasher::new(Some(2)).hash_batch(jobs);

        assert_eq!(results.len(), 3);
        for digest in results.values() {
            assert_eq!(digest.len(), 64);
        }
        // Different content, different digests.
        assert_ne!(results["a.txt"], results["b.txt"]);
    }

    #[test]
    fn test_unreadable_file_yields_empty_digest() {
        let jobs = vec![HashJob {
            rel_path: "gone.txt".to_owned(),
            abs_path: Utf8PathBuf::from("/nonexistent/gone.txt"),
        }];
        let results = ParallelHasher::new(Some(1)).hash_batch(jobs);
        assert_eq!(results.len(), 1);
        assert_eq!(results["gone.txt"], "");
    }
}
