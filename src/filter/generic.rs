//! Generic filtering framework
//!
//! This module provides a trait-based approach to filtering values. Record
//! criteria (search term, birth year, department) implement [`Filter`] and
//! are collected by a [`FilterBuilder`] into one [`AndFilter`].

use std::fmt::Debug;
use std::marker::PhantomData;

/// A predicate over values of type `T`
pub trait Filter<T>: Debug {
    /// Whether `input` passes the filter
    fn matches(&self, input: &T) -> bool;
}

/// A filter that combines multiple filters with a logical AND
#[derive(Debug)]
pub struct AndFilter<T, F>
where
    F: Filter<T>,
{
    filters: Vec<F>,
    _phantom: PhantomData<fn(&T)>,
}

impl<T, F> AndFilter<T, F>
where
    F: Filter<T>,
{
    /// Create a new AND filter
    #[must_use]
    pub const fn new(filters: Vec<F>) -> Self {
        Self {
            filters,
            _phantom: PhantomData,
        }
    }

    /// Number of combined filters
    #[must_use]
    pub fn len(&self) -> usize {
        self.filters.len()
    }

    /// Whether no filter is combined, so everything passes
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}

impl<T: Debug, F> Filter<T> for AndFilter<T, F>
where
    F: Filter<T>,
{
    fn matches(&self, input: &T) -> bool {
        self.filters.iter().all(|filter| filter.matches(input))
    }
}

/// A type-erased filter, so heterogeneous filters can share one combinator
#[derive(Debug)]
pub struct BoxedFilter<T> {
    inner: Box<dyn Filter<T>>,
}

impl<T> BoxedFilter<T> {
    /// Box a concrete filter
    #[must_use]
    pub fn new<F: Filter<T> + 'static>(filter: F) -> Self {
        Self {
            inner: Box::new(filter),
        }
    }
}

impl<T: Debug> Filter<T> for BoxedFilter<T> {
    fn matches(&self, input: &T) -> bool {
        self.inner.matches(input)
    }
}

/// Builder collecting filters into one combined filter
#[derive(Debug)]
pub struct FilterBuilder<T> {
    filters: Vec<BoxedFilter<T>>,
}

impl<T> Default for FilterBuilder<T> {
    fn default() -> Self {
        Self {
            filters: Vec::new(),
        }
    }
}

impl<T: Debug> FilterBuilder<T> {
    /// Create an empty builder
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a filter
    #[must_use]
    pub fn add_filter<F: Filter<T> + 'static>(mut self, filter: F) -> Self {
        self.filters.push(BoxedFilter::new(filter));
        self
    }

    /// Add a filter only when one is given
    #[must_use]
    pub fn add_optional<F: Filter<T> + 'static>(self, filter: Option<F>) -> Self {
        match filter {
            Some(filter) => self.add_filter(filter),
            None => self,
        }
    }

    /// Combine every filter with a logical AND; an empty builder matches everything
    #[must_use]
    pub fn build_and(self) -> AndFilter<T, BoxedFilter<T>> {
        AndFilter::new(self.filters)
    }
}
