//! Method-chaining wrapper over a deferred sequence.

use std::sync::Arc;

use crate::combinators::{accumulate, lazy_take, make_lazy_vec, map_stage};
use crate::deferred::{Deferred, Policy};
use crate::error::Result;
use crate::Value;

/// A sequence of [`Deferred`] cells with `map`/`take`/`accumulate` methods,
/// so a pipeline reads left to right:
///
/// ```
/// use lazy_pipelines::{increment, LazyVec, Policy};
///
/// let sum = LazyVec::new(&[1, 2, 3], Policy::Lazy)
///     .map(increment)
///     .take(2)
///     .accumulate()
///     .unwrap();
/// assert_eq!(sum, 5);
/// ```
#[derive(Debug, Clone, Default)]
pub struct LazyVec {
    cells: Vec<Deferred>,
}

impl LazyVec {
    pub fn new(values: &[Value], policy: Policy) -> Self {
        LazyVec {
            cells: make_lazy_vec(values, policy),
        }
    }

    pub fn from_cells(cells: Vec<Deferred>) -> Self {
        LazyVec { cells }
    }

    pub fn map<F>(&self, func: F) -> LazyVec
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
    {
        LazyVec::from_cells(map_stage(&self.cells, Arc::new(func)))
    }

    pub fn take(&self, count: usize) -> LazyVec {
        LazyVec::from_cells(lazy_take(&self.cells, count))
    }

    pub fn accumulate(&self) -> Result<i64> {
        accumulate(&self.cells)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Deferred> {
        self.cells.iter()
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Policy of the first cell; `None` when empty.
    pub fn policy(&self) -> Option<Policy> {
        self.cells.first().map(Deferred::policy)
    }
}

impl FromIterator<Deferred> for LazyVec {
    fn from_iter<I: IntoIterator<Item = Deferred>>(iter: I) -> Self {
        LazyVec::from_cells(iter.into_iter().collect())
    }
}

impl IntoIterator for LazyVec {
    type Item = Deferred;
    type IntoIter = std::vec::IntoIter<Deferred>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.into_iter()
    }
}

impl<'a> IntoIterator for &'a LazyVec {
    type Item = &'a Deferred;
    type IntoIter = std::slice::Iter<'a, Deferred>;

    fn into_iter(self) -> Self::IntoIter {
        self.cells.iter()
    }
}
