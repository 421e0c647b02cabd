//! Domain models for the employee store
//!
//! This module contains the employee record, its column enumeration and the
//! field validation rules applied before a record is persisted.

pub mod employee;
pub mod validation;

// Re-export commonly used types
pub use employee::{Employee, EmployeeField};
pub use validation::{FieldViolation, validate, validate_at, validate_employee};
