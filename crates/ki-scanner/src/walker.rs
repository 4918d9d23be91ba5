//! Deterministic filesystem traversal.
//!
//! The walker visits every regular file under the root in sorted order,
//! with no ignore-file semantics: hidden files and files matched by
//! `.gitignore` are inventoried like any other. Filtering is a separate,
//! explicit concern handled by [`crate::filter::PathFilter`].

use camino::{Utf8Path, Utf8PathBuf};
use ignore::WalkBuilder;
use tracing::warn;

use crate::error::ScanError;

/// One regular file found under the root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WalkedFile {
    /// Path relative to the root, forward slashes.
    pub rel_path: String,
    /// Absolute path on the host filesystem.
    pub abs_path: Utf8PathBuf,
}

/// Walks a root directory, yielding regular files in sorted order.
#[derive(Debug)]
pub struct FileWalker {
    root: Utf8PathBuf,
}

impl FileWalker {
    /// Creates a walker over `root`.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Config`] if the root does not exist or is not a
    /// directory.
    pub fn new(root: impl Into<Utf8PathBuf>) -> Result<Self, ScanError> {
        let root = root.into();
        if !root.exists() {
            return Err(ScanError::config(format!(
                "root directory does not exist: {root}"
            )));
        }
        if !root.is_dir() {
            return Err(ScanError::config(format!("root is not a directory: {root}")));
        }
        Ok(Self { root })
    }

    /// The root being walked.
    #[must_use]
    pub fn root(&self) -> &Utf8Path {
        &self.root
    }

    /// Collects every regular file under the root.
    ///
    /// Unreadable directory entries and non-UTF-8 paths are logged and
    /// skipped rather than aborting the walk. Symlinks are not followed.
    /// Entries come back sorted by name at each level, so the overall
    /// order is a deterministic depth-first traversal.
    #[must_use]
    pub fn walk(&self) -> Vec<WalkedFile> {
        let mut files = Vec::new();

        let walker = WalkBuilder::new(self.root.as_std_path())
            .standard_filters(false)
            .follow_links(false)
            .sort_by_file_name(std::ffi::OsStr::cmp)
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    warn!(error = %err, "skipping unreadable entry");
                    continue;
                }
            };
            if !entry.file_type().is_some_and(|ft| ft.is_file()) {
                continue;
            }
            let Ok(abs_path) = Utf8PathBuf::from_path_buf(entry.into_path()) else {
                warn!("skipping non-UTF-8 path");
                continue;
            };
            let rel_path = match abs_path.strip_prefix(&self.root) {
                Ok(rel) => rel.as_str().replace('\\', "/"),
                Err(_) => abs_path.as_str().to_owned(),
            };
            files.push(WalkedFile { rel_path, abs_path });
        }

        files
    }
}
