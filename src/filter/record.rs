//! Employee record filters
//!
//! Concrete [`Filter`] implementations over [`Employee`]: free-text search,
//! birth year and department. [`RecordFilter`] feeds the year and department
//! criteria into a [`FilterBuilder`].

use std::fmt;
use std::str::FromStr;

use crate::codec;
use crate::filter::generic::{AndFilter, BoxedFilter, Filter, FilterBuilder};
use crate::models::Employee;

/// Every criterion of a query, combined with AND
pub type EmployeeFilter = AndFilter<Employee, BoxedFilter<Employee>>;

/// Case-insensitive substring match against a record's persisted line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchFilter {
    needle: String,
}

impl SearchFilter {
    /// Create a search filter for `term`
    #[must_use]
    pub fn new(term: &str) -> Self {
        Self {
            needle: term.to_lowercase(),
        }
    }
}

impl Filter<Employee> for SearchFilter {
    fn matches(&self, input: &Employee) -> bool {
        self.needle.is_empty() || codec::serialize_line(input).to_lowercase().contains(&self.needle)
    }
}

/// Exact birth-year match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BirthYearFilter(pub i32);

impl Filter<Employee> for BirthYearFilter {
    fn matches(&self, input: &Employee) -> bool {
        input.birth_year == self.0
    }
}

/// Department selection
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum Department {
    /// Every department
    #[default]
    All,
    /// One named department
    Named(String),
}

impl FromStr for Department {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() || s.eq_ignore_ascii_case("all") || s.eq_ignore_ascii_case("tous") {
            Ok(Self::All)
        } else {
            Ok(Self::Named(s.to_string()))
        }
    }
}

impl fmt::Display for Department {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::All => f.write_str("all"),
            Self::Named(name) => f.write_str(name),
        }
    }
}

/// Department filter
///
/// Records carry no department column, so every record passes whatever
/// department is selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentFilter(pub Department);

impl Filter<Employee> for DepartmentFilter {
    fn matches(&self, _input: &Employee) -> bool {
        true
    }
}

/// Year and department criteria applied together
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RecordFilter {
    /// Keep only this birth year, when set
    pub year: Option<i32>,
    /// Keep only this department
    pub department: Department,
}

impl RecordFilter {
    /// Filter on birth year only
    #[must_use]
    pub fn year(year: i32) -> Self {
        Self {
            year: Some(year),
            department: Department::All,
        }
    }

    /// Add the year and department criteria to `builder`
    #[must_use]
    pub fn add_to(&self, builder: FilterBuilder<Employee>) -> FilterBuilder<Employee> {
        if let Department::Named(name) = &self.department {
            log::debug!("Department filter '{name}' has no column to match and keeps every record");
        }
        builder
            .add_optional(self.year.map(BirthYearFilter))
            .add_filter(DepartmentFilter(self.department.clone()))
    }

    /// The year and department criteria as one filter
    #[must_use]
    pub fn build(&self) -> EmployeeFilter {
        self.add_to(FilterBuilder::new()).build_and()
    }
}
