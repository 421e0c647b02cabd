//! Filtering capabilities for employee collections
//!
//! This module provides search, filter and sort over the in-memory record
//! collection, built on a small generic filter framework.

pub mod generic;
pub mod query;
pub mod record;

pub use generic::{AndFilter, BoxedFilter, Filter, FilterBuilder};
pub use query::{Matches, ViewQuery, compare_by, filter_records, search, sort_records};
pub use record::{
    BirthYearFilter, Department, DepartmentFilter, EmployeeFilter, RecordFilter, SearchFilter,
};
