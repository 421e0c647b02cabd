//! A Rust library for storing employee records in a flat text file, with
//! field validation, search/filter/sort queries, CSV export and file-copy
//! backups.

pub mod backup;
pub mod codec;
pub mod config;
pub mod error;
pub mod export;
pub mod filter;
pub mod models;
pub mod session;
pub mod stats;
pub mod store;
pub mod utils;

// Re-export the most common types for easier use
// Core types
pub use config::StoreConfig;
pub use error::{Result, StoreError};
pub use models::{Employee, EmployeeField};
pub use session::{Autosave, Session};
pub use store::{FileStore, MemoryStore, RecordStore};

// Line format
pub use codec::{LoadOutcome, MalformedLinePolicy, deserialize, serialize};

// Queries
pub use filter::{Department, RecordFilter, ViewQuery, filter_records, search, sort_records};
pub use models::validation::{validate, validate_at};

// Collaborators
pub use backup::{BackupEntry, BackupManager};
pub use export::{ImportOutcome, export_csv, import_csv};
pub use stats::{Statistics, find_duplicates};
