//! Error types for the ki-scanner crate.
//!
//! This module provides the [`ScanError`] type for errors that can occur
//! during directory traversal, fingerprinting, and cache persistence.

use camino::Utf8PathBuf;

/// Errors that can occur during scanning operations.
///
/// # Error Recovery Strategy
///
/// - **Pattern errors** ([`ScanError::Pattern`]): Fatal - the filter
///   configuration is malformed
/// - **File read errors** ([`ScanError::Read`]): Absorbed by the caller -
///   a failed fingerprint becomes an empty digest, a failed stat becomes a
///   per-file error record
/// - **Persist errors** ([`ScanError::Persist`]): Returned from cache save;
///   the inventory itself is unaffected
/// - **Config errors** ([`ScanError::Config`]): Fatal - the scan root is
///   unusable
#[derive(Debug, thiserror::Error)]
pub enum ScanError {
    /// An include/exclude glob pattern failed to compile.
    #[error("invalid glob pattern: {0}")]
    Pattern(#[from] globset::Error),

    /// Failed to read a file while fingerprinting.
    #[error("failed to read file {path}: {source}")]
    Read {
        /// The path of the file that couldn't be read.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to persist the cache snapshot.
    #[error("failed to persist cache to {path}: {source}")]
    Persist {
        /// The snapshot path that couldn't be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Invalid scanner configuration.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl ScanError {
    /// Creates a new [`ScanError::Read`] error.
    #[inline]
    pub fn read(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Read {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Persist`] error.
    #[inline]
    pub fn persist(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }

    /// Creates a new [`ScanError::Config`] error.
    #[inline]
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Returns `true` if this error is recoverable (the run can continue by
    /// recording it as per-file data).
    #[inline]
    #[must_use]
    pub const fn is_recoverable(&self) -> bool {
        matches!(self, Self::Read { .. })
    }

    /// Returns the file path associated with this error, if any.
    #[must_use]
    pub fn path(&self) -> Option<&Utf8PathBuf> {
        match self {
            Self::Read { path, .. } | Self::Persist { path, .. } => Some(path),
            Self::Pattern(_) | Self::Config(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_read_error() {
        let err = ScanError::read(
            "docs/a.md",
            io::Error::new(io::ErrorKind::NotFound, "not found"),
        );
        assert!(err.is_recoverable());
        assert_eq!(err.path().map(|p| p.as_str()), Some("docs/a.md"));
        assert!(err.to_string().contains("docs/a.md"));
    }

    #[test]
    fn test_config_error() {
        let err = ScanError::config("root does not exist");
        assert!(!err.is_recoverable());
        assert!(err.path().is_none());
        assert_eq!(
            err.to_string(),
            "invalid configuration: root does not exist"
        );
    }

    #[test]
    fn test_persist_error() {
        let err = ScanError::persist(
            "me/cache.json",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("me/cache.json"));
    }
}
