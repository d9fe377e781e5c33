//! Benchmark sizing.
//!
//! The process takes no flags, files or environment variables: the run is
//! shaped entirely by the constants below.

use tracing::Level;

use crate::error::{PipelineError, Result};
use crate::Value;

/// Number of input elements, `0..VARS_NUM`.
pub const VARS_NUM: usize = 40;

/// Prefix limit applied at the end of every pipeline.
pub const TAKE_NUM: usize = 40;

const _: () = assert!(VARS_NUM >= TAKE_NUM, "TAKE_NUM must not exceed VARS_NUM");

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BenchConfig {
    pub input_len: usize,
    pub take: usize,
    /// Max level for the stderr log subscriber.
    pub log_level: Level,
}

impl Default for BenchConfig {
    fn default() -> Self {
        BenchConfig {
            input_len: VARS_NUM,
            take: TAKE_NUM,
            log_level: Level::WARN,
        }
    }
}

impl BenchConfig {
    pub fn new(input_len: usize, take: usize) -> Result<Self> {
        let config = BenchConfig {
            input_len,
            take,
            ..BenchConfig::default()
        };
        config.validate()?;
        Ok(config)
    }

    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.take > self.input_len {
            return Err(PipelineError::TakeExceedsInput {
                take: self.take,
                len: self.input_len,
            });
        }
        Ok(())
    }

    /// `0..input_len` as values.
    pub fn input(&self) -> Vec<Value> {
        (0..self.input_len as Value).collect()
    }
}
