//! Per-run counters.

use std::fmt;

/// Counters for one pipeline run.
///
/// `total` counts every in-scope candidate the run considered; the other
/// counters partition what happened to them, plus `removed` for records
/// dropped from the inventory because their file is gone.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunStats {
    /// In-scope files considered this run.
    pub total: usize,
    /// Files whose previous fingerprint was reused.
    pub reused: usize,
    /// Files whose content was (re)hashed.
    pub hashed: usize,
    /// Files that produced a per-file error record.
    pub errors: usize,
    /// Records removed because the file no longer exists (or left scope).
    pub removed: usize,
}

impl fmt::Display for RunStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} files ({} hashed, {} reused, {} errors, {} removed)",
            self.total, self.hashed, self.reused, self.errors, self.removed
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let stats = RunStats {
            total: 10,
            reused: 6,
            hashed: 3,
            errors: 1,
            removed: 2,
        };
        assert_eq!(
            stats.to_string(),
            "10 files (3 hashed, 6 reused, 1 errors, 2 removed)"
        );
    }
}
