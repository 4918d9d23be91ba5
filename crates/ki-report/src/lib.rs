//! Derived artifacts for the knowledge index.
//!
//! Takes the [`Inventory`](ki_core::Inventory) a scan produced and turns
//! it into the output directory's contents:
//!
//! - `knowledge.json` - the machine-readable inventory
//! - `INDEX.md` - a human-readable file table
//! - `SUMMARY.md` - a narrative summary of well-known material under the
//!   source root
//! - `latest_run.txt` - a one-line heartbeat
//!
//! All but the heartbeat are written through an idempotent
//! read-compare-write step, so a no-op run leaves their mtimes untouched.

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod error;
pub mod index;
pub mod inventory;
pub mod report;
pub mod summary;
pub mod writer;

pub use error::ReportError;
pub use index::render_index;
pub use inventory::render_inventory;
pub use report::{ArtifactReport, Reporter};
pub use summary::render_summary;
pub use writer::{write_always, write_if_changed};
