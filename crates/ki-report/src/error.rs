//! Error types for the ki-report crate.

use camino::Utf8PathBuf;

/// Errors that can occur while writing derived artifacts.
///
/// Reading source material never produces one of these: missing or
/// unreadable inputs shrink the artifact instead of failing the run. Only
/// a failure to land an artifact on disk is reported.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// Failed to write an artifact file.
    #[error("failed to write artifact {path}: {source}")]
    Write {
        /// The artifact path that couldn't be written.
        path: Utf8PathBuf,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize the inventory artifact.
    #[error("failed to serialize inventory: {0}")]
    Serialize(#[from] serde_json::Error),
}

impl ReportError {
    /// Creates a new [`ReportError::Write`] error.
    #[inline]
    pub fn write(path: impl Into<Utf8PathBuf>, source: std::io::Error) -> Self {
        Self::Write {
            path: path.into(),
            source,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;

    #[test]
    fn test_write_error_message() {
        let err = ReportError::write(
            "me/INDEX.md",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert!(err.to_string().contains("me/INDEX.md"));
    }
}
