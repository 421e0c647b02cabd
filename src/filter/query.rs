//! Queries over an in-memory employee collection
//!
//! Search and filter are lazy: they return a [`Matches`] iterator that
//! borrows the collection, yields matching records in their original order
//! and can be restarted or cloned. Sort returns a new ordering.

use std::cmp::Ordering;

use itertools::Itertools;

use crate::filter::generic::{Filter, FilterBuilder};
use crate::filter::record::{EmployeeFilter, RecordFilter, SearchFilter};
use crate::models::{Employee, EmployeeField};

/// Lazy, restartable sequence of records accepted by a filter
#[derive(Debug, Clone)]
pub struct Matches<'a, F> {
    records: &'a [Employee],
    filter: F,
    position: usize,
}

impl<'a, F: Filter<Employee>> Matches<'a, F> {
    /// Iterate over `records` keeping those `filter` accepts
    #[must_use]
    pub const fn new(records: &'a [Employee], filter: F) -> Self {
        Self {
            records,
            filter,
            position: 0,
        }
    }

    /// Go back to the first record
    pub fn restart(&mut self) {
        self.position = 0;
    }

    /// The criteria driving this sequence
    #[must_use]
    pub const fn criteria(&self) -> &F {
        &self.filter
    }
}

impl<'a, F: Filter<Employee>> Iterator for Matches<'a, F> {
    type Item = &'a Employee;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(employee) = self.records.get(self.position) {
            self.position += 1;
            if self.filter.matches(employee) {
                return Some(employee);
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.records.len().saturating_sub(self.position)))
    }
}

/// Records whose persisted line contains `term`, ignoring case
#[must_use]
pub fn search<'a>(records: &'a [Employee], term: &str) -> Matches<'a, SearchFilter> {
    Matches::new(records, SearchFilter::new(term))
}

/// Records accepted by `filter`
#[must_use]
pub fn filter_records<'a>(records: &'a [Employee], filter: &RecordFilter) -> Matches<'a, EmployeeFilter> {
    Matches::new(records, filter.build())
}

/// Natural ordering of two records on one column
///
/// Text columns compare as text, birth year compares numerically.
#[must_use]
pub fn compare_by(field: EmployeeField, a: &Employee, b: &Employee) -> Ordering {
    match field {
        EmployeeField::Name => a.name.cmp(&b.name),
        EmployeeField::NationalId => a.national_id.cmp(&b.national_id),
        EmployeeField::BirthYear => a.birth_year.cmp(&b.birth_year),
        EmployeeField::EmployeeId => a.employee_id.cmp(&b.employee_id),
    }
}

/// Stable ascending sort on one column, returning a new collection
#[must_use]
pub fn sort_records<'a, I>(records: I, field: EmployeeField) -> Vec<Employee>
where
    I: IntoIterator<Item = &'a Employee>,
{
    records
        .into_iter()
        .sorted_by(|a, b| compare_by(field, a, b))
        .cloned()
        .collect()
}

/// Search, filter and sort applied in one pass, as a list view shows them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewQuery {
    /// Free-text search term
    pub term: Option<String>,
    /// Year and department criteria
    pub filter: RecordFilter,
    /// Column to sort on; insertion order when unset
    pub sort: Option<EmployeeField>,
}

impl ViewQuery {
    /// Search term, year and department as one filter
    #[must_use]
    pub fn criteria(&self) -> EmployeeFilter {
        let builder = FilterBuilder::new().add_optional(self.term.as_deref().map(SearchFilter::new));
        self.filter.add_to(builder).build_and()
    }

    /// Run the query against `records`
    #[must_use]
    pub fn apply(&self, records: &[Employee]) -> Vec<Employee> {
        let matching = Matches::new(records, self.criteria());
        match self.sort {
            Some(field) => sort_records(matching, field),
            None => matching.cloned().collect(),
        }
    }
}
