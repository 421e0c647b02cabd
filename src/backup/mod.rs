//! Backup and restore of the persisted file
//!
//! A backup is a plain copy of the data file named after the moment it was
//! taken, e.g. `backups/employes_backup_20240314_093000.txt`. Restoring
//! copies one of them back over the data file. There is no retention policy
//! and no integrity check of backup contents.

use std::fs;
use std::path::{Path, PathBuf};

use chrono::{Local, NaiveDateTime};

use crate::config::StoreConfig;
use crate::error::{Result, StoreError, util};
use crate::utils::logging::log_file_operation;

/// Timestamp layout embedded in backup file names
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Extension of backup files
pub const BACKUP_EXTENSION: &str = "txt";

/// One backup file found in the backup directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackupEntry {
    /// File name, as accepted by [`BackupManager::restore`]
    pub name: String,
    /// Full path of the backup file
    pub path: PathBuf,
    /// Moment encoded in the name, if it parses
    pub taken_at: Option<NaiveDateTime>,
}

/// Creates, lists and restores backups of one data file
#[derive(Debug, Clone)]
pub struct BackupManager {
    data_file: PathBuf,
    backup_dir: PathBuf,
    prefix: String,
}

impl BackupManager {
    /// Create a manager for `data_file` keeping copies in `backup_dir`
    #[must_use]
    pub fn new(
        data_file: impl Into<PathBuf>,
        backup_dir: impl Into<PathBuf>,
        prefix: impl Into<String>,
    ) -> Self {
        Self {
            data_file: data_file.into(),
            backup_dir: backup_dir.into(),
            prefix: prefix.into(),
        }
    }

    /// Create a manager from configuration
    #[must_use]
    pub fn from_config(config: &StoreConfig) -> Self {
        Self::new(
            config.data_file.clone(),
            config.resolved_backup_dir(),
            config.backup_prefix.clone(),
        )
    }

    /// Directory holding the backups
    #[must_use]
    pub fn backup_dir(&self) -> &Path {
        &self.backup_dir
    }

    /// File name of a backup taken at `at`
    #[must_use]
    pub fn backup_name(&self, at: NaiveDateTime) -> String {
        format!(
            "{}{}.{BACKUP_EXTENSION}",
            self.prefix,
            at.format(TIMESTAMP_FORMAT)
        )
    }

    /// Copy the data file into the backup directory
    ///
    /// The directory is created if needed. A backup taken within the same
    /// second as an existing one replaces it.
    ///
    /// # Errors
    /// `StoreError::NoData` if the data file does not exist, or an I/O error
    pub fn create(&self, at: NaiveDateTime) -> Result<PathBuf> {
        if !self.data_file.is_file() {
            return Err(StoreError::NoData(self.data_file.clone()));
        }
        util::ensure_dir(&self.backup_dir, "creating backup directory")?;

        let target = self.backup_dir.join(self.backup_name(at));
        log_file_operation("Creating backup", &target);
        util::copy_file(&self.data_file, &target, "creating backup")?;
        Ok(target)
    }

    /// Back up the data file under the current local time
    pub fn create_now(&self) -> Result<PathBuf> {
        self.create(Local::now().naive_local())
    }

    /// Backups in the backup directory, newest first
    ///
    /// A missing directory yields an empty list.
    pub fn list(&self) -> Result<Vec<BackupEntry>> {
        let entries = match fs::read_dir(&self.backup_dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(StoreError::io(&self.backup_dir, e)),
        };

        let mut backups = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| StoreError::io(&self.backup_dir, e))?;
            let name = entry.file_name().to_string_lossy().into_owned();
            if !name.starts_with(&self.prefix) || !entry.path().is_file() {
                continue;
            }
            backups.push(BackupEntry {
                taken_at: self.parse_timestamp(&name),
                path: entry.path(),
                name,
            });
        }

        backups.sort_by(|a, b| b.name.cmp(&a.name));
        Ok(backups)
    }

    /// Copy the backup `name` over the data file
    ///
    /// Callers holding records in memory must reload them afterwards.
    ///
    /// # Errors
    /// `InvalidBackupName` for names that are not plain backup file names,
    /// `BackupNotFound` if no such backup exists, or an I/O error
    pub fn restore(&self, name: &str) -> Result<PathBuf> {
        let is_plain = Path::new(name).file_name().is_some_and(|n| n == name);
        if !is_plain || !name.starts_with(&self.prefix) {
            return Err(StoreError::InvalidBackupName(name.to_string()));
        }

        let source = self.backup_dir.join(name);
        if !source.is_file() {
            return Err(StoreError::BackupNotFound(name.to_string()));
        }

        log_file_operation("Restoring backup", &source);
        util::copy_file(&source, &self.data_file, "restoring backup")?;
        Ok(source)
    }

    fn parse_timestamp(&self, name: &str) -> Option<NaiveDateTime> {
        let stamp = name
            .strip_prefix(&self.prefix)?
            .strip_suffix(&format!(".{BACKUP_EXTENSION}"))?;
        NaiveDateTime::parse_from_str(stamp, TIMESTAMP_FORMAT).ok()
    }
}
