//! Error types for pipeline construction and reduction.

use thiserror::Error;

/// Result type alias using the pipeline error.
pub type Result<T> = std::result::Result<T, PipelineError>;

/// Everything that can go wrong while forcing or reducing a pipeline.
///
/// `Clone` because a failed cell hands the same error to every handle that
/// forces it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error("stage function panicked: {message}")]
    StagePanicked { message: String },

    #[error("accumulator overflow: {partial} + {value} does not fit in i64")]
    Overflow { partial: i64, value: i64 },

    #[error("take count {take} exceeds input length {len}")]
    TakeExceedsInput { take: usize, len: usize },

    #[error("deferred computation lock was poisoned")]
    LockPoisoned,
}

impl PipelineError {
    /// Build a `StagePanicked` from a `catch_unwind` payload.
    pub(crate) fn from_panic(payload: Box<dyn std::any::Any + Send>) -> Self {
        let message = if let Some(s) = payload.downcast_ref::<&str>() {
            (*s).to_string()
        } else if let Some(s) = payload.downcast_ref::<String>() {
            s.clone()
        } else {
            "non-string panic payload".to_string()
        };
        PipelineError::StagePanicked { message }
    }
}
