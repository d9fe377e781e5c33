//! The pipeline variants compared by the benchmark and a runner for each.
//!
//! Every variant computes `take(map(map(map(input, fib), inc), inc), count)`
//! and sums the result; only the evaluation strategy differs.

use std::fmt;
use std::io::Write;

use crate::combinators::{accumulate, lazy_map, lazy_take, make_lazy_vec};
use crate::deferred::Policy;
use crate::error::Result;
use crate::lazy_vec::LazyVec;
use crate::stages::{fibonacci, increment};
use crate::stopwatch::Stopwatch;
use crate::Value;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Variant {
    /// Free-function combinators over lazy cells.
    Deferred,
    /// `LazyVec` method chain over lazy cells.
    Chained,
    /// `LazyVec` method chain over eager cells on the rayon pool.
    Eager,
    /// Plain iterator adapters, no cells.
    #[cfg(feature = "native-view")]
    NativeView,
}

impl Variant {
    /// Every compiled-in variant, in the order they are reported.
    pub fn all() -> Vec<Variant> {
        let mut variants = vec![Variant::Deferred, Variant::Chained, Variant::Eager];
        #[cfg(feature = "native-view")]
        variants.push(Variant::NativeView);
        variants
    }

    pub fn label(&self) -> &'static str {
        match self {
            Variant::Deferred => "deferred",
            Variant::Chained => "method chain, deferred",
            Variant::Eager => "method chain, eager",
            #[cfg(feature = "native-view")]
            Variant::NativeView => "native view",
        }
    }

    /// Build and reduce this variant's pipeline over `input`.
    pub fn run(&self, input: &[Value], take: usize) -> Result<i64> {
        self.run_with(input, take, fibonacci, increment)
    }

    /// Like [`Variant::run`] but with `first` in place of `fibonacci` and
    /// `second` in place of both `increment` stages.
    pub fn run_with<F, G>(&self, input: &[Value], take: usize, first: F, second: G) -> Result<i64>
    where
        F: Fn(Value) -> Value + Send + Sync + 'static,
        G: Fn(Value) -> Value + Clone + Send + Sync + 'static,
    {
        tracing::debug!(variant = self.label(), len = input.len(), take, "running pipeline");
        match self {
            Variant::Deferred => {
                let cells = make_lazy_vec(input, Policy::Lazy);
                let cells = lazy_map(&cells, first);
                let cells = lazy_map(&cells, second.clone());
                let cells = lazy_map(&cells, second);
                let cells = lazy_take(&cells, take);
                accumulate(&cells)
            }
            Variant::Chained => chained(input, take, Policy::Lazy, first, second),
            Variant::Eager => chained(input, take, Policy::Eager, first, second),
            #[cfg(feature = "native-view")]
            Variant::NativeView => crate::view::view_accumulate(
                crate::view::view_pipeline_with(input, first, second, take),
            ),
        }
    }

    /// Run inside a [`Stopwatch`] scope, writing the sum and then the
    /// elapsed time to `out`.
    pub fn run_timed<W: Write>(&self, input: &[Value], take: usize, out: W) -> Result<i64> {
        let mut sw = Stopwatch::with_writer(self.label(), out);
        let sum = self.run(input, take)?;
        if let Err(err) = writeln!(sw.writer(), "{}", sum) {
            tracing::warn!(variant = self.label(), error = %err, "failed to write result");
        }
        Ok(sum)
    }
}

impl fmt::Display for Variant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

fn chained<F, G>(input: &[Value], take: usize, policy: Policy, first: F, second: G) -> Result<i64>
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
    G: Fn(Value) -> Value + Clone + Send + Sync + 'static,
{
    LazyVec::new(input, policy)
        .map(first)
        .map(second.clone())
        .map(second)
        .take(take)
        .accumulate()
}
