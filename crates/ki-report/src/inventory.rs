//! The machine-readable inventory artifact (`knowledge.json`).

use camino::Utf8Path;
use ki_core::{FileRecord, Inventory};
use serde::Serialize;

use crate::error::ReportError;

/// The serialized shape of `knowledge.json`.
#[derive(Debug, Serialize)]
struct KnowledgeDoc<'a> {
    generated_at_utc: &'a str,
    source_root: &'a str,
    file_count: usize,
    files: Vec<&'a FileRecord>,
}

/// Renders the inventory as pretty-printed JSON, ordered by relative path.
///
/// # Errors
///
/// Returns [`ReportError::Serialize`] if serialization fails.
pub fn render_inventory(
    inventory: &Inventory,
    source_root: &Utf8Path,
    generated_at: &str,
) -> Result<String, ReportError> {
    let doc = KnowledgeDoc {
        generated_at_utc: generated_at,
        source_root: source_root.as_str(),
        file_count: inventory.len(),
        files: inventory.records().collect(),
    };
    Ok(serde_json::to_string_pretty(&doc)?)
}
