//! Core types, errors, and utilities for the ki-build pipeline.
//!
//! This crate provides the foundational types used across the workspace:
//!
//! - [`IndexConfig`] and friends - explicit configuration passed into the core
//! - [`FileRecord`], [`Inventory`], [`CacheSnapshot`], [`ChangeSet`] - the
//!   data model shared by the scanner and the report generator
//! - [`ConfigError`] - configuration-level failures
//! - Formatting helpers for human-readable sizes and UTC timestamps
//! - Type aliases for `FxHashMap`/`FxHashSet` (faster than std)

#![deny(clippy::all)]
#![warn(missing_docs)]

pub mod collections;
pub mod config;
pub mod error;
pub mod fmt;
pub mod record;

pub use collections::{FxHashMap, FxHashSet};
pub use config::{ChangeSetSource, FilterSpec, IndexConfig};
pub use error::ConfigError;
pub use record::{CacheSnapshot, ChangeSet, FileRecord, Inventory};
