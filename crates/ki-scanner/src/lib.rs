//! Incremental filesystem inventory with parallel content fingerprinting.
//!
//! This crate turns a directory tree into an [`Inventory`](ki_core::Inventory)
//! of file records (size, mtime, SHA-256), reusing fingerprints from the
//! previous run whenever size and mtime are unchanged.
//!
//! # Architecture
//!
//! ```text
//! FileWalker ──> PathFilter ──> change detection ──> ParallelHasher
//!     (sorted)      (globs)      (size + mtime)        (rayon pool)
//!                                      │
//!                              CacheStore snapshot
//!                              (previous run's inventory)
//! ```
//!
//! [`Scanner`] ties the stages together and offers two strategies:
//! [`Scanner::scan_full`] walks the whole tree, while
//! [`Scanner::scan_incremental`] touches only an explicit change list.
//!
//! # Example
//!
//! ```no_run
//! use ki_core::FilterSpec;
//! use ki_scanner::{CacheStore, Scanner};
//!
//! let store = CacheStore::new("me/cache.json");
//! let previous = store.load().to_inventory();
//!
//! let scanner = Scanner::new("tran", &FilterSpec::default(), None)?;
//! let outcome = scanner.scan_full(&previous)?;
//! println!("{}", outcome.stats);
//! # Ok::<(), ki_scanner::ScanError>(())
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod cache;
pub mod change;
pub mod error;
pub mod filter;
pub mod fingerprint;
pub mod hasher;
pub mod scan;
pub mod stats;
pub mod walker;

pub use cache::CacheStore;
pub use change::needs_rehash;
pub use error::ScanError;
pub use filter::PathFilter;
pub use hasher::{HashJob, ParallelHasher};
pub use scan::{ScanOutcome, Scanner};
pub use stats::RunStats;
pub use walker::{FileWalker, WalkedFile};
