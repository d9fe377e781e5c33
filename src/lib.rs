//! # Lazy Pipelines
//!
//! Three equivalent ways to compose a `fib -> inc -> inc -> take` pipeline
//! over `0..40`, timed side by side.
//!
//! ## Variants
//!
//! 1. **Free-function combinators** over shared lazy cells
//!    - [`make_lazy_vec`], [`lazy_map`], [`lazy_take`], [`accumulate`]
//!
//! 2. **Method chaining**
//!    - [`LazyVec`] wraps the same cells; each method calls the combinator
//!    - Lazy policy: work runs on the forcing thread
//!    - Eager policy: work starts on the rayon pool at construction
//!
//! 3. **Native lazy view** (feature `native-view`)
//!    - Plain iterator adapters, nothing allocated per stage
//!    - The only variant that never computes elements past the take limit
//!
//! ## Example
//!
//! ```
//! use lazy_pipelines::{accumulate, fibonacci, increment, lazy_map, lazy_take, make_lazy_vec, Policy};
//!
//! let cells = make_lazy_vec(&[0, 1, 2, 3, 4, 5], Policy::Lazy);
//! let cells = lazy_map(&cells, fibonacci);
//! let cells = lazy_map(&cells, increment);
//! let cells = lazy_take(&cells, 4);
//! assert_eq!(accumulate(&cells).unwrap(), 1 + 2 + 2 + 3);
//! ```

pub mod benchmark;
pub mod combinators;
pub mod config;
pub mod deferred;
pub mod error;
pub mod lazy_vec;
pub mod stages;
pub mod stopwatch;
#[cfg(feature = "native-view")]
pub mod view;

/// Element and stage-result type.
pub type Value = i64;

pub use benchmark::Variant;
pub use combinators::{accumulate, lazy_map, lazy_take, make_lazy_vec};
pub use config::{BenchConfig, TAKE_NUM, VARS_NUM};
pub use deferred::{Deferred, Policy, Stage};
pub use error::{PipelineError, Result};
pub use lazy_vec::LazyVec;
pub use stages::{factorial_like, fibonacci, increment};
pub use stopwatch::Stopwatch;
#[cfg(feature = "native-view")]
pub use view::{view_accumulate, view_pipeline, view_pipeline_with};
