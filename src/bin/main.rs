//! Times every pipeline variant over `0..VARS_NUM` and prints, per variant,
//! the reduced sum followed by the elapsed milliseconds.
//!
//! Run with: cargo run --release --bin lazy_pipelines

use std::io;

use lazy_pipelines::{BenchConfig, Result, Variant};

fn main() -> Result<()> {
    let config = BenchConfig::default();

    // Logs go to stderr so stdout carries only results and timings.
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(config.log_level)
        .init();

    config.validate()?;
    let input = config.input();

    for variant in Variant::all() {
        variant.run_timed(&input, config.take, io::stdout())?;
    }

    Ok(())
}
