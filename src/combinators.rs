//! Free-function pipeline combinators over sequences of [`Deferred`] cells.
//!
//! These are the primitives; [`LazyVec`](crate::LazyVec) is a thin chaining
//! adapter that calls straight into them.

use std::sync::Arc;

use crate::deferred::{Deferred, Policy, Stage};
use crate::error::{PipelineError, Result};
use crate::Value;

/// One identity cell per input value, in order, built under `policy`.
pub fn make_lazy_vec(values: &[Value], policy: Policy) -> Vec<Deferred> {
    tracing::debug!(len = values.len(), %policy, "building deferred sequence");
    values
        .iter()
        .map(|&value| Deferred::new(policy, move || Ok(value)))
        .collect()
}

/// Apply `func` to every cell, producing a same-length sequence of cells
/// under each input cell's policy. No cell is forced here.
pub fn lazy_map<F>(cells: &[Deferred], func: F) -> Vec<Deferred>
where
    F: Fn(Value) -> Value + Send + Sync + 'static,
{
    map_stage(cells, Arc::new(func))
}

pub(crate) fn map_stage(cells: &[Deferred], stage: Stage) -> Vec<Deferred> {
    tracing::trace!(len = cells.len(), "mapping stage");
    cells.iter().map(|cell| cell.then(Arc::clone(&stage))).collect()
}

/// The first `min(count, len)` cells, in order, as a new sequence.
pub fn lazy_take(cells: &[Deferred], count: usize) -> Vec<Deferred> {
    cells[..count.min(cells.len())].to_vec()
}

/// Force every cell in order and sum the results.
///
/// Blocks until the last cell is forced. Fails on the first cell that fails
/// or when the sum no longer fits in an `i64`.
pub fn accumulate(cells: &[Deferred]) -> Result<i64> {
    cells
        .iter()
        .try_fold(0i64, |acc, cell| checked_add(acc, cell.force()?))
}

pub(crate) fn checked_add(partial: i64, value: Value) -> Result<i64> {
    partial
        .checked_add(value)
        .ok_or(PipelineError::Overflow { partial, value })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stages::{fibonacci, increment};
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn policy_strategy() -> impl Strategy<Value = Policy> {
        prop_oneof![Just(Policy::Lazy), Just(Policy::Eager)]
    }

    #[test]
    fn test_make_lazy_vec_preserves_order() {
        let cells = make_lazy_vec(&[4, 8, 15, 16, 23, 42], Policy::Lazy);
        let forced: Vec<Value> = cells.iter().map(|c| c.force().unwrap()).collect();
        assert_eq!(forced, vec![4, 8, 15, 16, 23, 42]);
    }

    #[test]
    fn test_map_does_not_force() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cells = make_lazy_vec(&[1, 2, 3], Policy::Lazy);
        let mapped = lazy_map(&cells, move |x| {
            counter.fetch_add(1, Ordering::SeqCst);
            x * 10
        });

        assert_eq!(mapped.len(), 3);
        assert_eq!(calls.load(Ordering::SeqCst), 0);
        assert!(cells.iter().all(|c| !c.is_ready()));

        assert_eq!(accumulate(&mapped), Ok(60));
        assert_eq!(calls.load(Ordering::SeqCst), 3);
    }

    #[test]
    fn test_map_keeps_input_policy() {
        let cells = make_lazy_vec(&[1, 2], Policy::Eager);
        let mapped = lazy_map(&cells, increment);
        assert!(mapped.iter().all(|c| c.policy() == Policy::Eager));
    }

    #[test]
    fn test_take_zero_sums_to_zero() {
        let cells = make_lazy_vec(&[5, 6, 7], Policy::Lazy);
        let taken = lazy_take(&cells, 0);
        assert!(taken.is_empty());
        assert_eq!(accumulate(&taken), Ok(0));
    }

    #[test]
    fn test_take_past_end_is_clamped() {
        let cells = make_lazy_vec(&[5, 6, 7], Policy::Lazy);
        let taken = lazy_take(&cells, 100);
        assert_eq!(taken.len(), 3);
        assert_eq!(accumulate(&taken), Ok(18));
    }

    #[test]
    fn test_take_shares_cells() {
        let cells = make_lazy_vec(&[5, 6, 7], Policy::Lazy);
        let taken = lazy_take(&cells, 2);
        assert_eq!(accumulate(&taken), Ok(11));
        assert!(cells[0].is_ready());
        assert!(cells[1].is_ready());
        assert!(!cells[2].is_ready());
    }

    #[test]
    fn test_accumulate_forces_each_cell_once() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = Arc::clone(&calls);
        let cells = make_lazy_vec(&[1, 2, 3, 4], Policy::Eager);
        let mapped = lazy_map(&cells, move |x| {
            counter.fetch_add(1, Ordering::SeqCst);
            x
        });

        assert_eq!(accumulate(&mapped), Ok(10));
        assert_eq!(accumulate(&mapped), Ok(10));
        assert_eq!(calls.load(Ordering::SeqCst), 4);
    }

    #[test]
    fn test_accumulate_reports_overflow() {
        let cells = make_lazy_vec(&[i64::MAX, 1], Policy::Lazy);
        assert_eq!(
            accumulate(&cells),
            Err(PipelineError::Overflow {
                partial: i64::MAX,
                value: 1
            })
        );
    }

    #[test]
    fn test_fib_inc_inc_small_golden() {
        // sum(fib(0..n)) = fib(n + 1) - 1, plus 2 per element
        let input: Vec<Value> = (0..20).collect();
        for policy in [Policy::Lazy, Policy::Eager] {
            let cells = make_lazy_vec(&input, policy);
            let cells = lazy_map(&cells, fibonacci);
            let cells = lazy_map(&cells, increment);
            let cells = lazy_map(&cells, increment);
            let cells = lazy_take(&cells, 20);
            assert_eq!(accumulate(&cells), Ok(fibonacci(21) - 1 + 40), "{}", policy);
        }
    }

    proptest! {
        #[test]
        fn test_map_composition(
            values in prop::collection::vec(-1000i64..1000, 0..50),
            policy in policy_strategy(),
        ) {
            let f = |x: Value| x * 3;
            let g = |x: Value| x - 7;

            let cells = make_lazy_vec(&values, policy);
            let mapped = lazy_map(&lazy_map(&cells, f), g);

            let expected: i64 = values.iter().map(|&s| g(f(s))).sum();
            prop_assert_eq!(accumulate(&mapped), Ok(expected));
        }

        #[test]
        fn test_take_then_accumulate(
            values in prop::collection::vec(0i64..1000, 0..50),
            count in 0usize..80,
            policy in policy_strategy(),
        ) {
            let cells = lazy_map(&make_lazy_vec(&values, policy), increment);
            let taken = lazy_take(&cells, count);

            prop_assert_eq!(taken.len(), count.min(values.len()));
            let expected: i64 = values.iter().take(count).map(|&s| increment(s)).sum();
            prop_assert_eq!(accumulate(&taken), Ok(expected));
        }
    }
}
