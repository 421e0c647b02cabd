//! Error handling for the employee store.

pub mod util;

use std::io;
use std::path::PathBuf;

/// Specialized error type for record store operations
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// A field failed its pattern or range rule
    #[error("Validation error: {field} '{value}' {reason}")]
    Validation {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// Error opening, reading or writing a file
    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A persisted line could not be split into the expected four fields
    #[error("Format error on line {line}: {reason} ({content:?})")]
    Format {
        line: usize,
        content: String,
        reason: String,
    },

    /// Error reading or writing CSV data
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// Error loading configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Nothing has been persisted yet
    #[error("No data to back up: {} does not exist", .0.display())]
    NoData(PathBuf),

    /// Requested backup does not exist
    #[error("Backup not found: {0}")]
    BackupNotFound(String),

    /// Requested backup name is not a plain backup file name
    #[error("Invalid backup name: {0}")]
    InvalidBackupName(String),

    /// Row index outside the current collection
    #[error("Index {index} out of range for {len} records")]
    IndexOutOfRange { index: usize, len: usize },
}

impl StoreError {
    /// Create an I/O error bound to the path it happened on
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Create a format error for a persisted line
    pub fn format(line: usize, content: &str, reason: impl Into<String>) -> Self {
        Self::Format {
            line,
            content: content.to_string(),
            reason: reason.into(),
        }
    }

    /// Whether the error is a validation failure (reported inline, not fatal)
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation { .. })
    }
}

/// Result type for record store operations
pub type Result<T> = std::result::Result<T, StoreError>;
