//! Configuration for the employee store.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::codec::MalformedLinePolicy;
use crate::error::{Result, StoreError, util};
use crate::models::EmployeeField;
use crate::models::validation;

/// Configuration for the record store, backups and autosave
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Path of the persisted record file
    pub data_file: PathBuf,
    /// Directory holding timestamped backup copies
    pub backup_dir: PathBuf,
    /// File name prefix of backup copies
    pub backup_prefix: String,
    /// Seconds between autosaves
    pub autosave_interval_secs: u64,
    /// What to do with persisted lines that cannot be parsed
    pub malformed_lines: MalformedLinePolicy,
    /// Write through a temporary file and rename instead of overwriting in place
    pub atomic_writes: bool,
    /// Minimum employee age, bounds the latest accepted birth year
    pub minimum_age: i32,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_file: PathBuf::from("employes.txt"),
            backup_dir: PathBuf::from("backups"),
            backup_prefix: "employes_backup_".to_string(),
            autosave_interval_secs: 300,
            malformed_lines: MalformedLinePolicy::Skip,
            atomic_writes: true,
            minimum_age: 18,
        }
    }
}

impl StoreConfig {
    /// Load configuration from a JSON file; missing keys take their defaults
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = util::read_to_string(path, "reading configuration")?;
        serde_json::from_str(&content)
            .map_err(|e| StoreError::Config(format!("{}: {e}", path.display())))
    }

    /// Autosave interval as a `Duration`
    #[must_use]
    pub const fn autosave_interval(&self) -> Duration {
        Duration::from_secs(self.autosave_interval_secs)
    }

    /// Youngest accepted birth year as of `current_year`
    #[must_use]
    pub const fn latest_birth_year(&self, current_year: i32) -> i32 {
        validation::latest_birth_year(current_year, self.minimum_age)
    }

    /// Why `value` breaks the rule of `field` as of `current_year`, under this
    /// configuration's minimum age
    #[must_use]
    pub fn field_violation(
        &self,
        field: EmployeeField,
        value: &str,
        current_year: i32,
    ) -> Option<String> {
        validation::violation(field, value, self.latest_birth_year(current_year))
    }

    /// Resolve the backup directory, relative paths being siblings of the data file
    #[must_use]
    pub fn resolved_backup_dir(&self) -> PathBuf {
        if self.backup_dir.is_absolute() {
            return self.backup_dir.clone();
        }
        match self.data_file.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.join(&self.backup_dir),
            _ => self.backup_dir.clone(),
        }
    }
}
