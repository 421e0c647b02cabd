//! Persisted line format
//!
//! One record per line:
//!
//! ```text
//! Nom: Alice Dupont, CIN: AB123456, Année: 1990, ID: EMP-2024-001
//! ```
//!
//! Fields are separated by `", "` and each field is a `key: value` pair, keys
//! in fixed order. The format has no escaping: a value containing `", "`
//! cannot be read back. Only the first `": "` of a field separates key from
//! value, so a value may itself contain `": "`.

use serde::{Deserialize, Serialize};

use crate::error::{Result, StoreError};
use crate::models::{Employee, EmployeeField};

/// Separator between the fields of a line
pub const FIELD_SEPARATOR: &str = ", ";

/// Separator between a field's key and its value
pub const KEY_SEPARATOR: &str = ": ";

/// What a load does with a line that cannot be parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MalformedLinePolicy {
    /// Log and report the line, keep loading
    #[default]
    Skip,
    /// Fail the whole load on the first bad line
    Abort,
}

/// A persisted line dropped under `MalformedLinePolicy::Skip`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedLine {
    /// 1-based line number
    pub line: usize,
    pub content: String,
    pub reason: String,
}

/// Records read from persisted text, plus whatever was skipped
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LoadOutcome {
    pub records: Vec<Employee>,
    pub skipped: Vec<SkippedLine>,
}

/// Serialize one record to its line, without the trailing newline
#[must_use]
pub fn serialize_line(employee: &Employee) -> String {
    EmployeeField::ALL
        .iter()
        .map(|&field| format!("{}{KEY_SEPARATOR}{}", field.key(), employee.field_value(field)))
        .collect::<Vec<_>>()
        .join(FIELD_SEPARATOR)
}

/// Serialize a collection, one newline-terminated line per record, order preserved
#[must_use]
pub fn serialize(records: &[Employee]) -> String {
    let mut text = String::with_capacity(records.len() * 64);
    for employee in records {
        text.push_str(&serialize_line(employee));
        text.push('\n');
    }
    text
}

/// Parse one persisted line
///
/// Surrounding whitespace is ignored. The line must hold exactly four
/// `key: value` fields with the keys `Nom`, `CIN`, `Année`, `ID` in that
/// order, and the year must be an integer. Field values are not validated.
///
/// # Arguments
/// * `line_number` - 1-based position, used in the error
/// * `line` - Raw line text
pub fn parse_line(line_number: usize, line: &str) -> Result<Employee> {
    let trimmed = line.trim();
    let segments: Vec<&str> = trimmed.split(FIELD_SEPARATOR).collect();
    if segments.len() != EmployeeField::ALL.len() {
        return Err(StoreError::format(
            line_number,
            trimmed,
            format!("expected 4 fields, found {}", segments.len()),
        ));
    }

    let mut values = Vec::with_capacity(segments.len());
    for (field, segment) in EmployeeField::ALL.into_iter().zip(segments) {
        let Some((key, value)) = segment.split_once(KEY_SEPARATOR) else {
            return Err(StoreError::format(
                line_number,
                trimmed,
                format!("field '{segment}' has no '{}' separator", KEY_SEPARATOR.trim()),
            ));
        };
        if key != field.key() {
            return Err(StoreError::format(
                line_number,
                trimmed,
                format!("expected key '{}', found '{key}'", field.key()),
            ));
        }
        values.push(value);
    }

    let birth_year = values[2].parse::<i32>().map_err(|e| {
        StoreError::format(line_number, trimmed, format!("birth year '{}': {e}", values[2]))
    })?;

    Ok(Employee::new(values[0], values[1], birth_year, values[3]))
}

/// Parse persisted text into records
///
/// Blank lines are ignored. Malformed lines are handled per `policy`: with
/// `Skip` each one is logged and reported in `LoadOutcome::skipped`, with
/// `Abort` the first one fails the whole call.
pub fn deserialize(text: &str, policy: MalformedLinePolicy) -> Result<LoadOutcome> {
    let mut outcome = LoadOutcome::default();

    for (index, line) in text.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        match parse_line(index + 1, line) {
            Ok(employee) => outcome.records.push(employee),
            Err(StoreError::Format {
                line,
                content,
                reason,
            }) if policy == MalformedLinePolicy::Skip => {
                log::warn!("Skipping malformed line {line}: {reason}");
                outcome.skipped.push(SkippedLine {
                    line,
                    content,
                    reason,
                });
            }
            Err(e) => return Err(e),
        }
    }

    Ok(outcome)
}

/// Whether a record survives a write and a read unchanged
///
/// False for values the line format cannot hold, such as a name containing
/// `", "`, a line break, or surrounding whitespace at the end of the line.
#[must_use]
pub fn is_representable(employee: &Employee) -> bool {
    let line = serialize_line(employee);
    !line.contains(['\n', '\r'])
        && parse_line(0, &line).is_ok_and(|parsed| &parsed == employee)
}
