//! The narrative summary artifact (`SUMMARY.md`).
//!
//! Assembled from whatever well-known material exists under the source
//! root: excerpts of documentation files, a heuristic look at the OpenAPI
//! contract and the sample dataset, and per-directory listings for the
//! fixed section directories. Every piece is independently optional, so
//! the summary degrades to just its heading on an empty root.

use std::fs;

use camino::{Utf8Path, Utf8PathBuf};
use ki_core::fmt::human_bytes;

/// Maximum characters quoted from any single source file.
const EXCERPT_CHARS: usize = 2000;

/// Documentation files excerpted verbatim, in order.
const EXCERPT_FILES: &[&str] = &[
    "README.md",
    "info/KNOWLEDGE_INDEX.md",
    "info/ROOT_STRUCTURE.md",
    "kb/CHANGELOG.md",
    "kb/all_knowledge.md",
];

/// Section directories whose direct children are listed with sizes.
const SECTION_DIRS: &[(&str, &str)] = &[
    ("models", "Models"),
    ("proj", "Projects"),
    ("set", "Setup"),
    ("tests", "Tests"),
    ("tools", "Tools"),
    ("legacy", "Legacy"),
    ("assets", "Assets"),
];

/// Renders the summary document for the given source root.
#[must_use]
pub fn render_summary(root: &Utf8Path) -> String {
    let mut parts = vec!["### Knowledge summary".to_owned()];

    for rel in EXCERPT_FILES {
        if let Some(text) = read_text_lossy(&root.join(rel)) {
            parts.push(format!("#### {rel}"));
            push_fenced(&mut parts, excerpt(&text));
        }
    }

    push_openapi_section(&mut parts, &root.join("api/openapi.yaml"));
    push_csv_section(&mut parts, &root.join("datasets/sample_posts.csv"));

    if let Some(text) = read_text_lossy(&root.join("ci/github-actions.yml")) {
        parts.push("#### ci/github-actions.yml".to_owned());
        push_fenced(&mut parts, excerpt(&text));
    }

    for (sub, title) in SECTION_DIRS {
        if let Some(listing) = list_section(&root.join(sub)) {
            parts.push(format!("#### {title} ({sub}/)"));
            parts.extend(listing);
        }
    }

    push_version_section(&mut parts, &root.join("version.json"));

    parts.join("\n") + "\n"
}

/// Heuristic facts pulled from an OpenAPI document by line scanning. No
/// schema parser: a wrong guess here costs nothing.
#[derive(Debug, Default, PartialEq, Eq)]
struct OpenApiFacts {
    title: Option<String>,
    version: Option<String>,
    paths_approx: usize,
}

fn scan_openapi(text: &str) -> OpenApiFacts {
    let mut facts = OpenApiFacts {
        // Top-level and two-space-indented lines starting with `/` are
        // taken as path entries.
        paths_approx: text.matches("\n  /").count() + text.matches("\n/").count(),
        ..OpenApiFacts::default()
    };
    for line in text.lines() {
        let trimmed = line.trim();
        if facts.title.is_none() {
            if let Some(rest) = trimmed.strip_prefix("title:") {
                facts.title = Some(rest.trim().to_owned());
            }
        }
        if facts.version.is_none() {
            if let Some(rest) = trimmed.strip_prefix("version:") {
                facts.version = Some(rest.trim().to_owned());
            }
        }
    }
    facts
}

fn push_openapi_section(parts: &mut Vec<String>, path: &Utf8Path) {
    let facts = read_text_lossy(path).map(|text| scan_openapi(&text));

    parts.push("#### API (openapi.yaml)".to_owned());
    parts.push("| Field | Value |".to_owned());
    parts.push("|---|---|".to_owned());
    match facts {
        Some(facts) => {
            parts.push(format!("| title | {} |", facts.title.as_deref().unwrap_or("-")));
            parts.push(format!(
                "| version | {} |",
                facts.version.as_deref().unwrap_or("-")
            ));
            parts.push(format!("| paths_approx | {} |", facts.paths_approx));
        }
        None => {
            parts.push("| title | - |".to_owned());
            parts.push("| version | - |".to_owned());
            parts.push("| paths_approx | - |".to_owned());
        }
    }
}

fn push_csv_section(parts: &mut Vec<String>, path: &Utf8Path) {
    parts.push("#### datasets/sample_posts.csv".to_owned());
    parts.push("| Field | Value |".to_owned());
    parts.push("|---|---|".to_owned());
    match read_text_lossy(path) {
        Some(text) => {
            let mut lines = text.lines();
            let header = lines.next().unwrap_or("").trim().to_owned();
            let rows = lines.count();
            let columns = if header.is_empty() {
                0
            } else {
                header.matches(',').count() + 1
            };
            parts.push(format!("| rows | {rows} |"));
            parts.push(format!("| columns | {columns} |"));
            parts.push(format!("| header | {header} |"));
        }
        None => {
            parts.push("| rows | - |".to_owned());
            parts.push("| columns | - |".to_owned());
            parts.push("| header | - |".to_owned());
        }
    }
}

fn push_version_section(parts: &mut Vec<String>, path: &Utf8Path) {
    let Some(text) = read_text_lossy(path) else {
        return;
    };
    parts.push("#### version.json".to_owned());
    // Re-rendered pretty when it parses, quoted raw when it doesn't.
    let rendered = serde_json::from_str::<serde_json::Value>(&text)
        .ok()
        .and_then(|value| serde_json::to_string_pretty(&value).ok())
        .unwrap_or(text);
    push_fenced(parts, excerpt(&rendered));
}

fn list_section(dir: &Utf8Path) -> Option<Vec<String>> {
    let entries = fs::read_dir(dir.as_std_path()).ok()?;
    let mut files: Vec<Utf8PathBuf> = entries
        .filter_map(Result::ok)
        .filter(|e| e.file_type().is_ok_and(|ft| ft.is_file()))
        .filter_map(|e| Utf8PathBuf::from_path_buf(e.path()).ok())
        .collect();
    files.sort();

    let mut lines = Vec::with_capacity(files.len());
    for file in files {
        let size = fs::metadata(file.as_std_path()).map_or(0, |m| m.len());
        if let Some(name) = file.file_name() {
            lines.push(format!("- {name} ({})", human_bytes(size)));
        }
    }
    Some(lines)
}

fn push_fenced(parts: &mut Vec<String>, body: &str) {
    parts.push("```".to_owned());
    parts.push(body.to_owned());
    parts.push("```".to_owned());
}

fn read_text_lossy(path: &Utf8Path) -> Option<String> {
    let bytes = fs::read(path.as_std_path()).ok()?;
    Some(String::from_utf8_lossy(&bytes).into_owned())
}

/// Truncates to at most [`EXCERPT_CHARS`] characters on a char boundary.
fn excerpt(text: &str) -> &str {
    match text.char_indices().nth(EXCERPT_CHARS) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
