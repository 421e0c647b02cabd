//! Employee entity model
//!
//! An `Employee` is the single record type held by the store: a name, a
//! national identification code (CIN), a birth year and an employee ID.

use std::fmt;
use std::str::FromStr;

use crate::error::{Result, StoreError};
use crate::models::validation;

/// One column of an employee record, in persisted order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EmployeeField {
    /// Full name
    Name,
    /// National identification code (CIN)
    NationalId,
    /// Year of birth
    BirthYear,
    /// Employee identifier
    EmployeeId,
}

impl EmployeeField {
    /// All fields in persisted column order
    pub const ALL: [Self; 4] = [Self::Name, Self::NationalId, Self::BirthYear, Self::EmployeeId];

    /// Key used in the persisted line format and as CSV header
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Name => "Nom",
            Self::NationalId => "CIN",
            Self::BirthYear => "Année",
            Self::EmployeeId => "ID",
        }
    }

    /// Short name used in messages and on the command line
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::NationalId => "cin",
            Self::BirthYear => "year",
            Self::EmployeeId => "id",
        }
    }
}

impl fmt::Display for EmployeeField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for EmployeeField {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "name" | "nom" => Ok(Self::Name),
            "cin" | "national_id" => Ok(Self::NationalId),
            "year" | "birth_year" | "annee" | "année" => Ok(Self::BirthYear),
            "id" | "employee_id" => Ok(Self::EmployeeId),
            other => Err(format!(
                "unknown field '{other}' (expected one of: name, cin, year, id)"
            )),
        }
    }
}

/// Core employee record
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Employee {
    /// Full name, free text
    pub name: String,
    /// National identification code, `XX123456`
    pub national_id: String,
    /// Year of birth
    pub birth_year: i32,
    /// Employee identifier, `EMP-2024-001`
    pub employee_id: String,
}

impl Employee {
    /// Create a record without validating it
    #[must_use]
    pub fn new(
        name: impl Into<String>,
        national_id: impl Into<String>,
        birth_year: i32,
        employee_id: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            national_id: national_id.into(),
            birth_year,
            employee_id: employee_id.into(),
        }
    }

    /// Build a record from raw form input
    ///
    /// Every value is trimmed, then checked against its field rule. The first
    /// violated rule is returned as a `StoreError::Validation`.
    ///
    /// # Arguments
    /// * `values` - Name, CIN, birth year and employee ID, in column order
    /// * `latest_birth_year` - Youngest accepted birth year
    pub fn from_form(values: [&str; 4], latest_birth_year: i32) -> Result<Self> {
        let [name, national_id, birth_year, employee_id] = values.map(str::trim);

        for (field, value) in EmployeeField::ALL.into_iter().zip([name, national_id, birth_year, employee_id]) {
            if let Some(reason) = validation::violation(field, value, latest_birth_year) {
                return Err(StoreError::Validation {
                    field: field.label(),
                    value: value.to_string(),
                    reason,
                });
            }
        }

        let birth_year = birth_year.parse::<i32>().map_err(|e| StoreError::Validation {
            field: EmployeeField::BirthYear.label(),
            value: birth_year.to_string(),
            reason: e.to_string(),
        })?;

        Ok(Self::new(name, national_id, birth_year, employee_id))
    }

    /// Text value of one column
    #[must_use]
    pub fn field_value(&self, field: EmployeeField) -> String {
        match field {
            EmployeeField::Name => self.name.clone(),
            EmployeeField::NationalId => self.national_id.clone(),
            EmployeeField::BirthYear => self.birth_year.to_string(),
            EmployeeField::EmployeeId => self.employee_id.clone(),
        }
    }

    /// All column values in persisted order
    #[must_use]
    pub fn values(&self) -> [String; 4] {
        EmployeeField::ALL.map(|field| self.field_value(field))
    }

    /// Plain-text copy of the record: values joined by `", "`
    #[must_use]
    pub fn copy_text(&self) -> String {
        self.values().join(", ")
    }

    /// Age reached during `year`, `None` if it does not fit an `i32`
    #[must_use]
    pub const fn age_in(&self, year: i32) -> Option<i32> {
        year.checked_sub(self.birth_year)
    }
}

impl fmt::Display for Employee {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&crate::codec::serialize_line(self))
    }
}
