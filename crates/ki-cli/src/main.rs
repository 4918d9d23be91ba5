//! CLI entry point for the knowledge-index builder.
//!
//! This binary walks a source tree, fingerprints every in-scope file, and
//! writes the derived artifacts (inventory JSON, markdown index, summary,
//! cache snapshot, heartbeat) into the output directory.
//!
//! # Usage
//!
//! ```bash
//! # Full scan of ./tran into ./me
//! ki-build
//!
//! # Explicit locations
//! ki-build --root /workspace/tran --output /workspace/me
//!
//! # Incremental update for two files
//! ki-build --changed docs/a.md,datasets/sample_posts.csv
//!
//! # Incremental update from a newline-delimited list
//! ki-build --changed-from /tmp/changed.txt
//! ```

#![deny(clippy::all)]
#![warn(missing_docs)]

use std::io::Write;

use camino::Utf8PathBuf;
use clap::Parser;
use ki_core::fmt::utc_now_stamp;
use ki_core::{CacheSnapshot, ChangeSet, ChangeSetSource, FilterSpec, IndexConfig};
use ki_report::Reporter;
use ki_scanner::{CacheStore, ScanOutcome, Scanner};
use tracing::{info, warn};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// File name of the cache snapshot inside the output directory.
const CACHE_FILE: &str = "cache.json";

// =============================================================================
// CLI ARGUMENT TYPES
// =============================================================================

/// Builds a knowledge index of a source tree.
///
/// Walks the root, fingerprints files with SHA-256, reuses fingerprints
/// for files whose size and mtime are unchanged since the previous run,
/// and writes the derived artifacts into the output directory.
#[derive(Parser)]
#[command(name = "ki-build", version, about, long_about = None)]
struct Cli {
    /// Source root to index.
    #[arg(short, long, env = "KI_ROOT", default_value = "./tran")]
    root: Utf8PathBuf,

    /// Output directory for derived artifacts. Created if missing.
    #[arg(short, long, env = "KI_OUTPUT", default_value = "./me")]
    output: Utf8PathBuf,

    /// Comma-separated include globs (empty = include everything).
    #[arg(long, value_name = "GLOBS")]
    include: Option<String>,

    /// Comma-separated exclude globs. Exclude wins over include.
    #[arg(long, value_name = "GLOBS")]
    exclude: Option<String>,

    /// Comma-separated list of changed paths; switches to the incremental
    /// strategy, touching only the listed paths.
    #[arg(long, value_name = "LIST", conflicts_with = "changed_from")]
    changed: Option<String>,

    /// Newline-delimited file of changed paths; switches to the
    /// incremental strategy.
    #[arg(long, value_name = "FILE")]
    changed_from: Option<Utf8PathBuf>,

    /// Hashing concurrency. Defaults to the number of CPU cores.
    #[arg(short, long, env = "KI_JOBS")]
    jobs: Option<usize>,

    /// Enable verbose logging (debug level).
    #[arg(short, long)]
    verbose: bool,

    /// Disable colored output.
    #[arg(long)]
    no_color: bool,
}

// =============================================================================
// INITIALIZATION FUNCTIONS
// =============================================================================

/// Initializes the tracing subscriber for logging.
///
/// Respects the `RUST_LOG` environment variable if set. Otherwise, uses
/// `debug` level if `--verbose` is set, or `info` level by default.
fn init_tracing(verbose: bool, no_color: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let level = if verbose { "debug" } else { "info" };
        EnvFilter::new(level.to_owned())
    });

    // Check if colors should be disabled (flag or NO_COLOR env var)
    let use_ansi = !no_color && std::env::var("NO_COLOR").is_err();

    tracing_subscriber::registry()
        .with(fmt::layer().with_target(false).with_ansi(use_ansi))
        .with(filter)
        .init();
}

/// Builds an [`IndexConfig`] from CLI arguments and validates the root.
///
/// # Errors
///
/// Returns an error if the root is missing or not a directory. This is
/// the pipeline's one fatal condition; everything later degrades.
fn build_config(cli: &Cli) -> color_eyre::Result<IndexConfig> {
    let change_set = match (&cli.changed, &cli.changed_from) {
        (Some(list), _) => Some(ChangeSetSource::List(list.clone())),
        (None, Some(file)) => Some(ChangeSetSource::File(file.clone())),
        (None, None) => None,
    };

    let config = IndexConfig {
        source_root: cli.root.clone(),
        output_dir: cli.output.clone(),
        filter: FilterSpec {
            include: cli
                .include
                .as_deref()
                .map(FilterSpec::parse_patterns)
                .unwrap_or_default(),
            exclude: cli
                .exclude
                .as_deref()
                .map(FilterSpec::parse_patterns)
                .unwrap_or_default(),
        },
        concurrency: cli.jobs,
        change_set,
    };

    config.validate()?;
    Ok(config)
}

// =============================================================================
// PIPELINE
// =============================================================================

/// Resolves the configured change-list source into a [`ChangeSet`].
///
/// # Errors
///
/// Returns an error if a `--changed-from` file cannot be read; an
/// explicitly named input that is unusable should not silently widen to
/// a full scan.
fn resolve_change_set(config: &IndexConfig) -> color_eyre::Result<Option<ChangeSet>> {
    match &config.change_set {
        None => Ok(None),
        Some(ChangeSetSource::List(list)) => {
            Ok(Some(ChangeSet::from_list(list, &config.source_root)))
        }
        Some(ChangeSetSource::File(path)) => {
            let text = std::fs::read_to_string(path.as_std_path()).map_err(|e| {
                color_eyre::eyre::eyre!("cannot read change list {path}: {e}")
            })?;
            Ok(Some(ChangeSet::from_lines(&text, &config.source_root)))
        }
    }
}

/// Runs one pipeline pass: scan, persist the snapshot, write artifacts.
fn run_build(config: &IndexConfig) -> color_eyre::Result<ScanOutcome> {
    let store = CacheStore::new(config.output_dir.join(CACHE_FILE));
    let previous = store.load().to_inventory();

    let scanner = Scanner::new(
        config.source_root.clone(),
        &config.filter,
        config.concurrency,
    )?;

    let outcome = match resolve_change_set(config)? {
        Some(changes) => {
            info!(paths = changes.len(), "incremental scan");
            scanner.scan_incremental(&previous, &changes)
        }
        None => scanner.scan_full(&previous)?,
    };

    let stamp = utc_now_stamp();

    // Snapshot and artifact failures degrade: the scan already succeeded
    // and the next run simply starts cold or rewrites.
    let snapshot = CacheSnapshot::from_inventory(outcome.inventory.clone(), stamp.clone());
    if let Err(err) = store.save(&snapshot) {
        warn!(error = %err, "snapshot not persisted, next run starts cold");
    }

    let reporter = Reporter::new(config.output_dir.clone());
    match reporter.write_all(&outcome.inventory, &config.source_root, &stamp) {
        Ok(report) => {
            info!(rewritten = report.rewritten(), "artifacts up to date");
        }
        Err(err) => warn!(error = %err, "artifact generation incomplete"),
    }

    print_completion(&outcome, &stamp, &config.output_dir);
    Ok(outcome)
}

// =============================================================================
// OUTPUT HELPERS
// =============================================================================

/// Prints the one-line completion summary and run counters.
fn print_completion(outcome: &ScanOutcome, stamp: &str, output_dir: &camino::Utf8Path) {
    let stdout = std::io::stdout();
    let mut handle = stdout.lock();

    let _ = writeln!(
        handle,
        "Knowledge built at {stamp}; files: {}; output -> {output_dir}",
        outcome.inventory.len()
    );
    let _ = writeln!(handle, "  {}", outcome.stats);
    if !outcome.changed.is_empty() {
        let _ = writeln!(handle, "  changed: {}", outcome.changed.len());
    }
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Application entry point.
fn main() -> color_eyre::Result<()> {
    // Install color-eyre first (before any potential panics)
    color_eyre::install()?;

    let cli = Cli::parse();
    init_tracing(cli.verbose, cli.no_color);

    let config = build_config(&cli)?;
    run_build(&config)?;
    Ok(())
}
