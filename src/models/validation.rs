//! Field validation rules
//!
//! Pure checks of raw field text against the fixed format rules of each
//! column. Nothing here panics or errors on bad input; invalid values simply
//! fail the check.

use chrono::{Datelike, Local};
use lazy_static::lazy_static;
use regex::Regex;

use crate::models::employee::{Employee, EmployeeField};

/// Earliest accepted birth year
pub const MIN_BIRTH_YEAR: i32 = 1900;

/// Default minimum employee age
pub const DEFAULT_MINIMUM_AGE: i32 = 18;

lazy_static! {
    static ref NATIONAL_ID_PATTERN: Regex = Regex::new(r"^[A-Z]{2}[0-9]{6}$").unwrap();
    static ref EMPLOYEE_ID_PATTERN: Regex = Regex::new(r"^EMP-[0-9]{4}-[0-9]{3}$").unwrap();
}

/// A rule broken by one field of a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: EmployeeField,
    pub value: String,
    pub reason: String,
}

/// Current calendar year in local time
#[must_use]
pub fn current_year() -> i32 {
    Local::now().year()
}

/// Youngest birth year accepted in `current_year` for the given minimum age
#[must_use]
pub const fn latest_birth_year(current_year: i32, minimum_age: i32) -> i32 {
    current_year - minimum_age
}

/// Name must contain something other than whitespace
#[must_use]
pub fn validate_name(value: &str) -> bool {
    !value.trim().is_empty()
}

/// CIN must be two uppercase letters followed by six digits
#[must_use]
pub fn validate_national_id(value: &str) -> bool {
    NATIONAL_ID_PATTERN.is_match(value)
}

/// Birth year must be an integer in `1900..=latest_birth_year`
#[must_use]
pub fn validate_birth_year(value: &str, latest_birth_year: i32) -> bool {
    value
        .trim()
        .parse::<i32>()
        .is_ok_and(|year| (MIN_BIRTH_YEAR..=latest_birth_year).contains(&year))
}

/// Employee ID must look like `EMP-2024-001`
#[must_use]
pub fn validate_employee_id(value: &str) -> bool {
    EMPLOYEE_ID_PATTERN.is_match(value)
}

/// Explain why `value` breaks the rule of `field`, or `None` if it is valid
#[must_use]
pub fn violation(field: EmployeeField, value: &str, latest_birth_year: i32) -> Option<String> {
    let valid = match field {
        EmployeeField::Name => validate_name(value),
        EmployeeField::NationalId => validate_national_id(value),
        EmployeeField::BirthYear => validate_birth_year(value, latest_birth_year),
        EmployeeField::EmployeeId => validate_employee_id(value),
    };
    if valid {
        return None;
    }

    Some(match field {
        EmployeeField::Name => "is required".to_string(),
        EmployeeField::NationalId => "must match XX123456".to_string(),
        EmployeeField::BirthYear => {
            format!("must be a year between {MIN_BIRTH_YEAR} and {latest_birth_year}")
        }
        EmployeeField::EmployeeId => "must match EMP-2024-001".to_string(),
    })
}

/// Check one field value as of `current_year`, with the default minimum age
#[must_use]
pub fn validate_at(field: EmployeeField, value: &str, current_year: i32) -> bool {
    violation(
        field,
        value,
        latest_birth_year(current_year, DEFAULT_MINIMUM_AGE),
    )
    .is_none()
}

/// Check one field value as of today
#[must_use]
pub fn validate(field: EmployeeField, value: &str) -> bool {
    validate_at(field, value, current_year())
}

/// Every rule a record breaks, in column order
#[must_use]
pub fn validate_employee(employee: &Employee, latest_birth_year: i32) -> Vec<FieldViolation> {
    EmployeeField::ALL
        .into_iter()
        .filter_map(|field| {
            let value = employee.field_value(field);
            violation(field, &value, latest_birth_year).map(|reason| FieldViolation {
                field,
                value,
                reason,
            })
        })
        .collect()
}
