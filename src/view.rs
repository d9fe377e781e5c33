//! Native lazy-view pipeline built from plain iterator adapters.
//!
//! No cells and no intermediate vectors: each element is pulled through every
//! stage only when the reduction asks for it, and `take` stops the pull, so
//! nothing past the prefix limit is ever computed.

use crate::combinators::checked_add;
use crate::error::Result;
use crate::stages::{fibonacci, increment};
use crate::Value;

/// `fib -> inc -> inc -> take(count)` over `values`, unevaluated.
pub fn view_pipeline(values: &[Value], count: usize) -> impl Iterator<Item = Value> + '_ {
    view_pipeline_with(values, fibonacci, increment, count)
}

/// Same shape as [`view_pipeline`] with caller-supplied stages: `first`
/// once, then `second` twice, then `take(count)`.
pub fn view_pipeline_with<'a, F, G>(
    values: &'a [Value],
    first: F,
    second: G,
    count: usize,
) -> impl Iterator<Item = Value> + 'a
where
    F: FnMut(Value) -> Value + 'a,
    G: FnMut(Value) -> Value + Clone + 'a,
{
    values
        .iter()
        .copied()
        .map(first)
        .map(second.clone())
        .map(second)
        .take(count)
}

/// Pull every value out of `iter` and sum with overflow checking.
pub fn view_accumulate<I>(iter: I) -> Result<i64>
where
    I: IntoIterator<Item = Value>,
{
    iter.into_iter().try_fold(0i64, checked_add)
}
