//! Orchestrates one artifact-generation pass over the output directory.

use camino::{Utf8Path, Utf8PathBuf};
use ki_core::Inventory;
use tracing::info;

use crate::error::ReportError;
use crate::writer::{write_always, write_if_changed};
use crate::{index, inventory, summary};

/// File name of the machine-readable inventory artifact.
pub const KNOWLEDGE_FILE: &str = "knowledge.json";
/// File name of the markdown index artifact.
pub const INDEX_FILE: &str = "INDEX.md";
/// File name of the narrative summary artifact.
pub const SUMMARY_FILE: &str = "SUMMARY.md";
/// File name of the heartbeat artifact.
pub const HEARTBEAT_FILE: &str = "latest_run.txt";

/// Which derived artifacts were actually rewritten this run.
///
/// The heartbeat is excluded: it is rewritten unconditionally and says
/// nothing about content changes.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ArtifactReport {
    /// `knowledge.json` content changed.
    pub knowledge: bool,
    /// `INDEX.md` content changed.
    pub index: bool,
    /// `SUMMARY.md` content changed.
    pub summary: bool,
}

impl ArtifactReport {
    /// Number of artifacts rewritten.
    #[must_use]
    pub fn rewritten(&self) -> usize {
        usize::from(self.knowledge) + usize::from(self.index) + usize::from(self.summary)
    }

    /// Returns `true` if no artifact content changed.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.rewritten() == 0
    }
}

/// Writes the derived artifacts for one pipeline run.
#[derive(Debug, Clone)]
pub struct Reporter {
    output_dir: Utf8PathBuf,
}

impl Reporter {
    /// Creates a reporter writing into `output_dir`.
    #[must_use]
    pub fn new(output_dir: impl Into<Utf8PathBuf>) -> Self {
        Self {
            output_dir: output_dir.into(),
        }
    }

    /// The output directory.
    #[must_use]
    pub fn output_dir(&self) -> &Utf8Path {
        &self.output_dir
    }

    /// Renders and writes all artifacts: inventory JSON, index, summary
    /// (each only if changed) and the heartbeat (always).
    ///
    /// # Errors
    ///
    /// Returns [`ReportError`] if rendering or any write fails.
    pub fn write_all(
        &self,
        inv: &Inventory,
        source_root: &Utf8Path,
        generated_at: &str,
    ) -> Result<ArtifactReport, ReportError> {
        let mut report = ArtifactReport::default();

        let knowledge = inventory::render_inventory(inv, source_root, generated_at)?;
        report.knowledge =
            write_if_changed(&self.output_dir.join(KNOWLEDGE_FILE), knowledge.as_bytes())?;

        let index = index::render_index(inv);
        report.index = write_if_changed(&self.output_dir.join(INDEX_FILE), index.as_bytes())?;

        let summary = summary::render_summary(source_root);
        report.summary = write_if_changed(&self.output_dir.join(SUMMARY_FILE), summary.as_bytes())?;

        write_always(&self.output_dir.join(HEARTBEAT_FILE), generated_at.as_bytes())?;

        info!(
            output = %self.output_dir,
            rewritten = report.rewritten(),
            "artifacts written"
        );
        Ok(report)
    }
}
