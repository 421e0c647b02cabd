//! Editing session over a record store
//!
//! A `Session` owns the in-memory employee collection and the store it is
//! persisted to. Every mutation validates its input, changes the collection
//! and rewrites the whole store. When the rewrite fails the in-memory change
//! is undone, so the collection always matches the last successful save.

pub mod autosave;

pub use autosave::Autosave;

use std::path::{Path, PathBuf};
use std::time::Instant;

use crate::backup::BackupManager;
use crate::codec::{self, SkippedLine};
use crate::config::StoreConfig;
use crate::error::{Result, StoreError};
use crate::export::{self, ImportOutcome};
use crate::filter::{Matches, SearchFilter, ViewQuery, search};
use crate::models::validation;
use crate::models::Employee;
use crate::stats::{self, Statistics};
use crate::store::RecordStore;

/// In-memory collection bound to a record store
#[derive(Debug)]
pub struct Session<S> {
    store: S,
    records: Vec<Employee>,
    skipped: Vec<SkippedLine>,
    latest_birth_year: i32,
    autosave: Autosave,
}

impl<S: RecordStore> Session<S> {
    /// Load the collection from `store`
    pub fn open(store: S, config: &StoreConfig) -> Result<Self> {
        let outcome = store.load()?;
        Ok(Self {
            store,
            records: outcome.records,
            skipped: outcome.skipped,
            latest_birth_year: config.latest_birth_year(validation::current_year()),
            autosave: Autosave::new(config.autosave_interval(), Instant::now()),
        })
    }

    /// Override the youngest accepted birth year
    #[must_use]
    pub fn with_latest_birth_year(mut self, year: i32) -> Self {
        self.latest_birth_year = year;
        self
    }

    /// Replace the autosave schedule
    #[must_use]
    pub fn with_autosave(mut self, autosave: Autosave) -> Self {
        self.autosave = autosave;
        self
    }

    /// Records in collection order
    #[must_use]
    pub fn records(&self) -> &[Employee] {
        &self.records
    }

    /// Number of records
    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the collection is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Record at `index`
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&Employee> {
        self.records.get(index)
    }

    /// Lines skipped by the last load
    #[must_use]
    pub fn skipped(&self) -> &[SkippedLine] {
        &self.skipped
    }

    /// The underlying store
    #[must_use]
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// The autosave schedule
    #[must_use]
    pub const fn autosave(&self) -> &Autosave {
        &self.autosave
    }

    /// Youngest accepted birth year
    #[must_use]
    pub const fn latest_birth_year(&self) -> i32 {
        self.latest_birth_year
    }

    /// Validate raw form values and append the resulting record
    pub fn add_form(&mut self, values: [&str; 4]) -> Result<&Employee> {
        let employee = Employee::from_form(values, self.latest_birth_year)?;
        self.add(employee)?;
        Ok(&self.records[self.records.len() - 1])
    }

    /// Append a record and persist
    pub fn add(&mut self, employee: Employee) -> Result<()> {
        self.check(&employee)?;
        self.records.push(employee);
        if let Err(e) = self.store.save(&self.records) {
            self.records.pop();
            return Err(e);
        }
        log::info!("Added employee, {} records", self.records.len());
        Ok(())
    }

    /// Replace the record at `index` and persist, returning the previous one
    pub fn update(&mut self, index: usize, employee: Employee) -> Result<Employee> {
        self.check_index(index)?;
        self.check(&employee)?;

        let previous = std::mem::replace(&mut self.records[index], employee);
        if let Err(e) = self.store.save(&self.records) {
            self.records[index] = previous;
            return Err(e);
        }
        Ok(previous)
    }

    /// Remove the record at `index` and persist, returning it
    pub fn delete(&mut self, index: usize) -> Result<Employee> {
        self.check_index(index)?;

        let removed = self.records.remove(index);
        if let Err(e) = self.store.save(&self.records) {
            self.records.insert(index, removed);
            return Err(e);
        }
        log::info!("Deleted employee {}, {} records left", removed.employee_id, self.records.len());
        Ok(removed)
    }

    /// Remove every record carrying `employee_id` and persist
    ///
    /// Employee IDs are not unique, so this may remove several records.
    /// Returns the removed records; nothing is written when none match.
    pub fn delete_by_id(&mut self, employee_id: &str) -> Result<Vec<Employee>> {
        if !self.records.iter().any(|e| e.employee_id == employee_id) {
            return Ok(Vec::new());
        }

        let previous = self.records.clone();
        let (removed, kept): (Vec<Employee>, Vec<Employee>) = previous
            .iter()
            .cloned()
            .partition(|e| e.employee_id == employee_id);
        self.records = kept;

        if let Err(e) = self.store.save(&self.records) {
            self.records = previous;
            return Err(e);
        }
        Ok(removed)
    }

    /// Append the valid rows of a CSV file and persist
    ///
    /// Rejected rows are returned in the outcome and leave the collection
    /// untouched.
    pub fn import_csv(&mut self, path: &Path) -> Result<ImportOutcome> {
        let outcome = export::import_csv(path, self.latest_birth_year)?;
        if outcome.records.is_empty() {
            return Ok(outcome);
        }

        let before = self.records.len();
        self.records.extend(outcome.records.iter().cloned());
        if let Err(e) = self.store.save(&self.records) {
            self.records.truncate(before);
            return Err(e);
        }
        log::info!(
            "Imported {} records from {}",
            outcome.records.len(),
            path.display()
        );
        Ok(outcome)
    }

    /// Export the collection to a CSV file
    pub fn export_csv(&self, path: &Path) -> Result<usize> {
        export::export_csv(path, &self.records)
    }

    /// Rewrite the store from the in-memory collection
    pub fn save(&mut self) -> Result<()> {
        self.store.save(&self.records)
    }

    /// Discard the in-memory collection and load it again from the store
    ///
    /// On failure the current collection is kept.
    pub fn reload(&mut self) -> Result<&[Employee]> {
        let outcome = self.store.load()?;
        self.records = outcome.records;
        self.skipped = outcome.skipped;
        Ok(&self.records)
    }

    /// Restore a backup over the data file, then reload
    pub fn restore(&mut self, backups: &BackupManager, name: &str) -> Result<PathBuf> {
        let source = backups.restore(name)?;
        self.reload()?;
        Ok(source)
    }

    /// Save if the autosave interval has elapsed at `now`
    ///
    /// Returns whether a save happened.
    pub fn tick(&mut self, now: Instant) -> Result<bool> {
        if !self.autosave.is_due(now) {
            return Ok(false);
        }
        self.save()?;
        self.autosave.mark_run(now);
        log::info!("Autosaved {} records to {}", self.records.len(), self.store.describe());
        Ok(true)
    }

    /// Lazy case-insensitive search over the collection
    #[must_use]
    pub fn search(&self, term: &str) -> Matches<'_, SearchFilter> {
        search(&self.records, term)
    }

    /// Search, filter and sort the collection
    #[must_use]
    pub fn view(&self, query: &ViewQuery) -> Vec<Employee> {
        query.apply(&self.records)
    }

    /// Statistics of the collection as of `current_year`
    #[must_use]
    pub fn statistics(&self, current_year: i32) -> Statistics {
        Statistics::compute(&self.records, current_year)
    }

    /// Status bar text for the collection
    #[must_use]
    pub fn status_line(&self, message: &str) -> String {
        stats::status_line(self.records.len(), message)
    }

    fn check(&self, employee: &Employee) -> Result<()> {
        if let Some(violation) = validation::validate_employee(employee, self.latest_birth_year)
            .into_iter()
            .next()
        {
            return Err(StoreError::Validation {
                field: violation.field.label(),
                value: violation.value,
                reason: violation.reason,
            });
        }
        if !codec::is_representable(employee) {
            return Err(StoreError::format(
                self.records.len() + 1,
                &codec::serialize_line(employee),
                format!(
                    "a value contains '{}' or surrounding whitespace and cannot be stored",
                    codec::FIELD_SEPARATOR
                ),
            ));
        }
        Ok(())
    }

    fn check_index(&self, index: usize) -> Result<()> {
        if index >= self.records.len() {
            return Err(StoreError::IndexOutOfRange {
                index,
                len: self.records.len(),
            });
        }
        Ok(())
    }
}
