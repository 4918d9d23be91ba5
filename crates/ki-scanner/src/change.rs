//! Size/mtime change detection against the previous run.
//!
//! A file is rehashed unless the previous record was successfully hashed
//! and both the size and the exact modification time are unchanged. This
//! is the heuristic that makes repeat runs cheap: an unchanged file needs
//! one `stat`, not a full read.
//!
//! An in-place edit that preserves both size and restores the mtime will
//! keep its stale fingerprint until either changes again. That trade-off
//! is intentional; hashing every file on every run would defeat the cache.

use ki_core::FileRecord;

/// Decides whether a file's content must be rehashed.
///
/// Returns `false` only when the previous record is a successful one and
/// matches the fresh `size` and `mtime` exactly. A previous error record
/// never short-circuits: the file is rehashed so it can recover.
#[must_use]
#[allow(clippy::float_cmp)] // exact equality is the contract: same stored bits, same file
pub fn needs_rehash(size: u64, mtime: f64, previous: Option<&FileRecord>) -> bool {
    match previous {
        Some(FileRecord::Hashed {
            size: prev_size,
            mtime: prev_mtime,
            ..
        }) => *prev_size != size || *prev_mtime != mtime,
        Some(FileRecord::Failed { .. }) | None => true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prev(size: u64, mtime: f64) -> FileRecord {
        FileRecord::hashed("a.txt", "/r/a.txt", size, mtime, "cafe")
    }

    #[test]
    fn test_unseen_file_needs_rehash() {
        assert!(needs_rehash(10, 1.0, None));
    }

    #[test]
    fn test_unchanged_file_skips_rehash() {
        let p = prev(10, 1_700_000_000.25);
        assert!(!needs_rehash(10, 1_700_000_000.25, Some(&p)));
    }

    #[test]
    fn test_size_change_needs_rehash() {
        let p = prev(10, 1.0);
        assert!(needs_rehash(11, 1.0, Some(&p)));
    }

    #[test]
    fn test_mtime_change_needs_rehash() {
        let p = prev(10, 1.0);
        assert!(needs_rehash(10, 1.000_001, Some(&p)));
    }

    #[test]
    fn test_previous_error_record_always_rehashes() {
        let p = FileRecord::failed("a.txt", "/r/a.txt", "permission denied");
        assert!(needs_rehash(10, 1.0, Some(&p)));
    }
}
