//! Include/exclude glob filtering for relative paths.

use globset::{Glob, GlobSet, GlobSetBuilder};
use ki_core::FilterSpec;

use crate::error::ScanError;

/// Compiled include/exclude filter applied to root-relative paths.
///
/// Semantics:
///
/// - an empty include list matches every path
/// - exclude always wins over include
/// - patterns are shell-style globs where `*` may cross directory
///   separators, so `*.md` matches `docs/a.md`
#[derive(Debug)]
pub struct PathFilter {
    include: Option<GlobSet>,
    exclude: GlobSet,
}

impl PathFilter {
    /// Compiles a filter from the configured pattern lists.
    ///
    /// # Errors
    ///
    /// Returns [`ScanError::Pattern`] if any glob fails to compile.
    pub fn new(spec: &FilterSpec) -> Result<Self, ScanError> {
        let include = if spec.include.is_empty() {
            None
        } else {
            Some(build_glob_set(&spec.include)?)
        };
        let exclude = build_glob_set(&spec.exclude)?;
        Ok(Self { include, exclude })
    }

    /// An always-matching filter.
    ///
    /// # Errors
    ///
    /// Never fails in practice; the signature matches [`PathFilter::new`].
    pub fn match_all() -> Result<Self, ScanError> {
        Self::new(&FilterSpec::default())
    }

    /// Returns `true` if the relative path is in scope.
    #[must_use]
    pub fn matches(&self, rel_path: &str) -> bool {
        if self.exclude.is_match(rel_path) {
            return false;
        }
        match &self.include {
            Some(include) => include.is_match(rel_path),
            None => true,
        }
    }
}

fn build_glob_set(patterns: &[String]) -> Result<GlobSet, ScanError> {
    let mut builder = GlobSetBuilder::new();
    for pattern in patterns {
        builder.add(Glob::new(pattern)?);
    }
    Ok(builder.build()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(include: &[&str], exclude: &[&str]) -> PathFilter {
        let spec = FilterSpec {
            include: include.iter().map(ToString::to_string).collect(),
            exclude: exclude.iter().map(ToString::to_string).collect(),
        };
        PathFilter::new(&spec).unwrap()
    }

    #[test]
    fn test_empty_filter_matches_everything() {
        let f = PathFilter::match_all().unwrap();
        assert!(f.matches("a.txt"));
        assert!(f.matches("deeply/nested/path.bin"));
    }

    #[test]
    fn test_include_only() {
        let f = filter(&["*.md"], &[]);
        assert!(f.matches("README.md"));
        // `*` crosses separators in this glob dialect.
        assert!(f.matches("docs/guide.md"));
        assert!(!f.matches("src/lib.rs"));
    }

    #[test]
    fn test_exclude_only() {
        let f = filter(&[], &["*.tmp"]);
        assert!(f.matches("a.txt"));
        assert!(!f.matches("scratch/a.tmp"));
    }

    #[test]
    fn test_exclude_wins_over_include() {
        let f = filter(&["*.md"], &["drafts/*"]);
        assert!(f.matches("docs/a.md"));
        assert!(!f.matches("drafts/a.md"));
    }

    #[test]
    fn test_multiple_patterns() {
        let f = filter(&["*.md", "*.yaml"], &[]);
        assert!(f.matches("a.md"));
        assert!(f.matches("ci/pipeline.yaml"));
        assert!(!f.matches("a.json"));
    }

    #[test]
    fn test_invalid_pattern_is_rejected() {
        let spec = FilterSpec {
            include: vec!["[".to_owned()],
            exclude: vec![],
        };
        assert!(matches!(
            PathFilter::new(&spec),
            Err(ScanError::Pattern(_))
        ));
    }
}
