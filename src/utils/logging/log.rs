//! Logging utilities
//!
//! Log lines for file operations on the record store, shaped around record
//! counts and the lines a load had to drop.

use std::path::Path;
use std::time::Duration;

use itertools::Itertools;

use crate::codec::LoadOutcome;

/// Log a file operation about to run on `path`
///
/// # Arguments
/// * `action` - What is being done, e.g. "Creating backup"
/// * `path` - File the action reads or writes
pub fn log_file_operation(action: &str, path: &Path) {
    log::info!("{action} {}", path.display());
}

/// Log the result of loading the record file
///
/// Skipped lines are reported at warn level with their line numbers.
///
/// # Arguments
/// * `path` - The record file
/// * `outcome` - Records read and lines skipped
/// * `elapsed` - Time spent reading and parsing
pub fn log_records_loaded(path: &Path, outcome: &LoadOutcome, elapsed: Duration) {
    log::info!(
        "Loaded {} records from {} in {elapsed:?}",
        outcome.records.len(),
        path.display()
    );
    if !outcome.skipped.is_empty() {
        log::warn!(
            "Skipped {} malformed lines in {} (lines {})",
            outcome.skipped.len(),
            path.display(),
            outcome.skipped.iter().map(|s| s.line).join(", ")
        );
    }
}

/// Log a completed rewrite of the record file
pub fn log_records_saved(path: &Path, count: usize, atomic: bool) {
    let mode = if atomic { "via rename" } else { "in place" };
    log::debug!("Saved {count} records to {} {mode}", path.display());
}
