//! CSV export and import
//!
//! The CSV layout mirrors the persisted line format: a header row
//! `Nom,CIN,Année,ID` followed by one row per record in collection order.

use std::fs::File;
use std::io::{Read, Write};
use std::path::Path;

use crate::codec;
use crate::error::{Result, StoreError};
use crate::models::{Employee, EmployeeField};

/// A CSV row that could not become a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedRow {
    /// 1-based line in the CSV input
    pub line: u64,
    pub reason: String,
}

/// Records read from CSV, plus the rows that were rejected
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ImportOutcome {
    pub records: Vec<Employee>,
    pub rejected: Vec<RejectedRow>,
}

/// Header row, in persisted column order
#[must_use]
pub fn csv_header() -> [&'static str; 4] {
    EmployeeField::ALL.map(EmployeeField::key)
}

/// Write `records` as CSV to `writer`
pub fn write_csv<W: Write>(writer: W, records: &[Employee]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(csv_header())?;
    for employee in records {
        csv_writer.write_record(employee.values())?;
    }
    csv_writer
        .flush()
        .map_err(|e| StoreError::Csv(csv::Error::from(e)))
}

/// Export `records` to a CSV file, returning the number of rows written
pub fn export_csv(path: &Path, records: &[Employee]) -> Result<usize> {
    let file = File::create(path).map_err(|e| StoreError::io(path, e))?;
    write_csv(file, records)?;
    log::info!("Exported {} records to {}", records.len(), path.display());
    Ok(records.len())
}

/// Read records from CSV
///
/// The first row is a header and is skipped. Every other row must hold the
/// four columns in persisted order and pass field validation; rows that do
/// not are reported in `ImportOutcome::rejected` instead of failing the read.
///
/// # Arguments
/// * `reader` - CSV input
/// * `latest_birth_year` - Youngest accepted birth year
pub fn read_csv<R: Read>(reader: R, latest_birth_year: i32) -> Result<ImportOutcome> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(reader);

    let mut outcome = ImportOutcome::default();
    for row in csv_reader.records() {
        let row = row?;
        let line = row.position().map_or(0, csv::Position::line);

        if row.len() != EmployeeField::ALL.len() {
            outcome.rejected.push(RejectedRow {
                line,
                reason: format!("expected 4 columns, found {}", row.len()),
            });
            continue;
        }

        let values = [&row[0], &row[1], &row[2], &row[3]];
        match Employee::from_form(values, latest_birth_year) {
            Ok(employee) if codec::is_representable(&employee) => outcome.records.push(employee),
            Ok(_) => outcome.rejected.push(RejectedRow {
                line,
                reason: "value cannot be stored in the line format".to_string(),
            }),
            Err(e) => outcome.rejected.push(RejectedRow {
                line,
                reason: e.to_string(),
            }),
        }
    }

    Ok(outcome)
}

/// Read records from a CSV file
pub fn import_csv(path: &Path, latest_birth_year: i32) -> Result<ImportOutcome> {
    let file = File::open(path).map_err(|e| StoreError::io(path, e))?;
    let outcome = read_csv(file, latest_birth_year)?;
    for rejected in &outcome.rejected {
        log::warn!(
            "Rejected CSV line {} of {}: {}",
            rejected.line,
            path.display(),
            rejected.reason
        );
    }
    Ok(outcome)
}
