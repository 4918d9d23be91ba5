//! Idempotent artifact writing.
//!
//! Every derived artifact goes through [`write_if_changed`], so unchanged
//! content never touches the file's mtime. This keeps downstream
//! mtime-based tooling quiet on no-op runs.

use std::fs;

use camino::Utf8Path;
use tracing::debug;

use crate::error::ReportError;

/// Writes `content` to `path` only if the existing content differs.
///
/// A missing or unreadable existing file counts as "no existing content",
/// so the write proceeds. Parent directories are created as needed.
/// Returns whether a write actually occurred.
///
/// # Errors
///
/// Returns [`ReportError::Write`] if the file or its parent directory
/// cannot be created.
pub fn write_if_changed(path: &Utf8Path, content: &[u8]) -> Result<bool, ReportError> {
    match fs::read(path.as_std_path()) {
        Ok(existing) if existing == content => {
            debug!(path = %path, "unchanged, skipping write");
            return Ok(false);
        }
        Ok(_) | Err(_) => {}
    }
    write_always(path, content)?;
    Ok(true)
}

/// Unconditionally writes `content` to `path`, creating parent
/// directories as needed.
///
/// # Errors
///
/// Returns [`ReportError::Write`] on any I/O failure.
pub fn write_always(path: &Utf8Path, content: &[u8]) -> Result<(), ReportError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent.as_std_path()).map_err(|e| ReportError::write(path, e))?;
    }
    fs::write(path.as_std_path(), content).map_err(|e| ReportError::write(path, e))?;
    debug!(path = %path, bytes = content.len(), "artifact written");
    Ok(())
}
