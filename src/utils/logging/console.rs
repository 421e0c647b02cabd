//! Console output utilities
//!
//! This module provides utilities for formatted console output of records.

use crate::models::{Employee, EmployeeField};

/// Render records as an aligned table with a header and row numbers
#[must_use]
pub fn format_table(records: &[Employee]) -> String {
    let rows: Vec<[String; 4]> = records.iter().map(Employee::values).collect();

    let mut widths = EmployeeField::ALL.map(|field| field.key().chars().count());
    for row in &rows {
        for (width, value) in widths.iter_mut().zip(row) {
            *width = (*width).max(value.chars().count());
        }
    }
    let index_width = records.len().to_string().len().max(1);

    let mut out = String::new();
    out.push_str(&format!("{:>index_width$}", "#"));
    for (field, width) in EmployeeField::ALL.iter().zip(widths) {
        out.push_str(&format!("  {:<width$}", field.key()));
    }
    out.push('\n');

    for (index, row) in rows.iter().enumerate() {
        out.push_str(&format!("{index:>index_width$}"));
        for (value, width) in row.iter().zip(widths) {
            out.push_str(&format!("  {value:<width$}"));
        }
        out.push('\n');
    }
    out
}

/// Print records as a table
pub fn print_records(records: &[Employee]) {
    print!("{}", format_table(records));
}
