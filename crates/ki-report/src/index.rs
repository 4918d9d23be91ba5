//! The human-readable index artifact (`INDEX.md`).
//!
//! One markdown table row per inventoried file: relative path, human
//! size, UTC mtime, and a 16-character digest prefix. Error records keep
//! their row with dash columns so the index always covers the whole
//! inventory.

use ki_core::fmt::{human_bytes, mtime_utc};
use ki_core::{FileRecord, Inventory};

const HASH_PREFIX_LEN: usize = 16;

/// Renders the markdown index table.
#[must_use]
pub fn render_index(inventory: &Inventory) -> String {
    let mut lines = vec![
        "### File index".to_owned(),
        "| Path | Size | Last modified | SHA256 |".to_owned(),
        "|---|---:|---:|---|".to_owned(),
    ];

    for record in inventory.records() {
        lines.push(render_row(record));
    }

    lines.join("\n") + "\n"
}

fn render_row(record: &FileRecord) -> String {
    match record {
        FileRecord::Hashed {
            rel_path,
            size,
            mtime,
            sha256,
            ..
        } => {
            let prefix: String = sha256.chars().take(HASH_PREFIX_LEN).collect();
            format!(
                "| {rel_path} | {} | {} | {prefix}… |",
                human_bytes(*size),
                mtime_utc(*mtime)
            )
        }
        FileRecord::Failed {
            rel_path, error, ..
        } => format!("| {rel_path} | - | - | ERROR: {error} |"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_render_index_table() {
        let mut inv = Inventory::new();
        inv.insert(FileRecord::hashed(
            "docs/a.md",
            "/tran/docs/a.md",
            1536,
            0.0,
            "0123456789abcdef0123456789abcdef0123456789abcdef0123456789abcdef",
        ));
        inv.insert(FileRecord::failed("broken.bin", "/tran/broken.bin", "denied"));

        let index = render_index(&inv);
        let lines: Vec<_> = index.lines().collect();

        assert_eq!(lines[0], "### File index");
        assert_eq!(lines[1], "| Path | Size | Last modified | SHA256 |");
        assert_eq!(lines[2], "|---|---:|---:|---|");
        assert_eq!(lines[3], "| broken.bin | - | - | ERROR: denied |");
        assert_eq!(
            lines[4],
            "| docs/a.md | 1.5 KB | 1970-01-01 00:00:00 UTC | 0123456789abcdef… |"
        );
        assert!(index.ends_with('\n'));
    }

    #[test]
    fn test_empty_digest_row() {
        // A record whose hash job failed keeps an empty prefix.
        let mut inv = Inventory::new();
        inv.insert(FileRecord::hashed("a.txt", "/tran/a.txt", 1, 0.0, ""));

        let index = render_index(&inv);
        assert!(index.contains("| a.txt | 1.0 B | 1970-01-01 00:00:00 UTC | … |"));
    }

    #[test]
    fn test_header_only_for_empty_inventory() {
        let index = render_index(&Inventory::new());
        assert_eq!(index.lines().count(), 3);
    }
}
