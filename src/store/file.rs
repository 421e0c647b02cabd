//! File-backed record store
//!
//! Persists the collection as the line format of [`crate::codec`] in a
//! single UTF-8 text file. Every save rewrites the whole file.

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::codec::{self, LoadOutcome, MalformedLinePolicy};
use crate::config::StoreConfig;
use crate::error::{Result, util};
use crate::models::Employee;
use crate::store::RecordStore;
use crate::utils::logging::{log_file_operation, log_records_loaded, log_records_saved};

/// Record store persisting to a flat text file
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
    policy: MalformedLinePolicy,
    atomic_writes: bool,
}

impl FileStore {
    /// Create a store for `path` with the default policies
    #[must_use]
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let defaults = StoreConfig::default();
        Self {
            path: path.into(),
            policy: defaults.malformed_lines,
            atomic_writes: defaults.atomic_writes,
        }
    }

    /// Create a store from configuration
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self {
            path: config.data_file.clone(),
            policy: config.malformed_lines,
            atomic_writes: config.atomic_writes,
        }
    }

    /// Set the malformed-line policy
    #[must_use]
    pub fn with_policy(mut self, policy: MalformedLinePolicy) -> Self {
        self.policy = policy;
        self
    }

    /// Choose between rename-based and in-place writes
    #[must_use]
    pub fn with_atomic_writes(mut self, atomic_writes: bool) -> Self {
        self.atomic_writes = atomic_writes;
        self
    }

    /// Path of the persisted file
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl RecordStore for FileStore {
    /// A missing file loads as an empty collection
    fn load(&self) -> Result<LoadOutcome> {
        let start = Instant::now();
        log_file_operation("Loading employees from", &self.path);

        let Some(text) = util::read_optional(&self.path, "loading employee records")? else {
            log::info!("No data file at {}, starting empty", self.path.display());
            return Ok(LoadOutcome::default());
        };

        let outcome = codec::deserialize(&text, self.policy)?;
        log_records_loaded(&self.path, &outcome, start.elapsed());
        Ok(outcome)
    }

    fn save(&mut self, records: &[Employee]) -> Result<()> {
        let text = codec::serialize(records);
        if self.atomic_writes {
            util::write_atomic(&self.path, text.as_bytes(), "saving employee records")?;
        } else {
            util::write_in_place(&self.path, text.as_bytes(), "saving employee records")?;
        }
        log_records_saved(&self.path, records.len(), self.atomic_writes);
        Ok(())
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
