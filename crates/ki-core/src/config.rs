//! Configuration structures for the ki-build pipeline.
//!
//! All configuration is explicit: the CLI (or any other host) constructs an
//! [`IndexConfig`] once at the boundary and passes it down. No component
//! reads the process environment or global state on its own.

use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Glob-based include/exclude filtering for relative paths.
///
/// A path is in scope iff it matches at least one include pattern (or the
/// include list is empty) and matches no exclude pattern. Exclude always
/// wins over include.
///
/// # Examples
///
/// ```
/// use ki_core::FilterSpec;
///
/// let spec = FilterSpec {
///     include: vec!["**/*.md".to_owned()],
///     exclude: vec!["drafts/*".to_owned()],
/// };
/// assert_eq!(spec.include.len(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterSpec {
    /// Include glob patterns. Empty means "match everything".
    pub include: Vec<String>,

    /// Exclude glob patterns. Empty means "exclude nothing".
    pub exclude: Vec<String>,
}

impl FilterSpec {
    /// Parses a comma-separated pattern list into a vector, skipping empty
    /// segments.
    ///
    /// # Examples
    ///
    /// ```
    /// use ki_core::FilterSpec;
    ///
    /// let patterns = FilterSpec::parse_patterns("*.md, docs/**,");
    /// assert_eq!(patterns, vec!["*.md".to_owned(), "docs/**".to_owned()]);
    /// ```
    #[must_use]
    pub fn parse_patterns(list: &str) -> Vec<String> {
        list.split(',')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .map(ToOwned::to_owned)
            .collect()
    }
}

/// Where the explicit change list for an incremental run comes from.
///
/// When absent, the pipeline performs a full scan.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChangeSetSource {
    /// A literal comma-separated list of paths.
    List(String),

    /// A newline-delimited file of paths.
    File(Utf8PathBuf),
}

/// Root configuration for a single pipeline run.
///
/// Constructed once at the boundary (CLI) and handed to the scanner and the
/// report generator. Replaces the ad-hoc environment lookups of earlier
/// incarnations of this tool.
///
/// # Examples
///
/// ```
/// use ki_core::IndexConfig;
///
/// let config = IndexConfig::default();
/// assert_eq!(config.source_root.as_str(), "./tran");
/// assert_eq!(config.output_dir.as_str(), "./me");
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Root directory whose tree is inventoried. Must exist.
    pub source_root: Utf8PathBuf,

    /// Directory that receives all derived artifacts. Created if missing.
    pub output_dir: Utf8PathBuf,

    /// Include/exclude glob patterns applied to relative paths.
    pub filter: FilterSpec,

    /// Hashing concurrency. `None` means use all available CPU cores.
    pub concurrency: Option<usize>,

    /// Optional explicit change list enabling the incremental strategy.
    pub change_set: Option<ChangeSetSource>,
}

impl Default for IndexConfig {
    fn default() -> Self {
        Self {
            source_root: Utf8PathBuf::from("./tran"),
            output_dir: Utf8PathBuf::from("./me"),
            filter: FilterSpec::default(),
            concurrency: None,
            change_set: None,
        }
    }
}

impl IndexConfig {
    /// Creates a configuration for the given source root with defaults for
    /// everything else.
    #[must_use]
    pub fn new(source_root: impl Into<Utf8PathBuf>) -> Self {
        Self {
            source_root: source_root.into(),
            ..Self::default()
        }
    }

    /// Validates that the source root exists and is a directory.
    ///
    /// A missing source root is the single fatal configuration error of the
    /// pipeline; everything else degrades gracefully at run time.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingDirectory`] if the root does not exist,
    /// or [`ConfigError::InvalidPath`] if it exists but is not a directory.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.source_root.exists() {
            return Err(ConfigError::MissingDirectory(self.source_root.clone()));
        }
        if !self.source_root.is_dir() {
            return Err(ConfigError::InvalidPath {
                path: self.source_root.clone(),
                reason: "not a directory".to_owned(),
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_defaults() {
        let config = IndexConfig::default();
        assert_eq!(config.source_root.as_str(), "./tran");
        assert_eq!(config.output_dir.as_str(), "./me");
        assert!(config.filter.include.is_empty());
        assert!(config.filter.exclude.is_empty());
        assert!(config.concurrency.is_none());
        assert!(config.change_set.is_none());
    }

    #[test]
    fn test_parse_patterns() {
        assert_eq!(
            FilterSpec::parse_patterns("*.md,docs/**"),
            vec!["*.md".to_owned(), "docs/**".to_owned()]
        );
        assert_eq!(
            FilterSpec::parse_patterns(" *.md , , docs/** "),
            vec!["*.md".to_owned(), "docs/**".to_owned()]
        );
        assert!(FilterSpec::parse_patterns("").is_empty());
    }

    #[test]
    fn test_validate_missing_root() {
        let config = IndexConfig::new("/nonexistent/path/that/does/not/exist");
        assert!(matches!(
            config.validate(),
            Err(ConfigError::MissingDirectory(_))
        ));
    }

    #[test]
    fn test_serialization_roundtrip() {
        let mut config = IndexConfig::default();
        config.filter.exclude.push("*.tmp".to_owned());
        config.concurrency = Some(4);
        config.change_set = Some(ChangeSetSource::List("a.txt,b.txt".to_owned()));

        let json = serde_json::to_string(&config).unwrap();
        let parsed: IndexConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(config, parsed);
    }

    #[test]
    fn test_deserialize_with_missing_fields() {
        let json = r#"{"source_root": "/data/tran"}"#;
        let config: IndexConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.source_root.as_str(), "/data/tran");
        assert_eq!(config.output_dir.as_str(), "./me");
    }
}
