//! Scoped wall-clock timer.

use std::io::{self, Write};
use std::time::{Duration, Instant};

/// Starts timing on creation and writes `"<ms> ms"` when dropped, on every
/// exit path including unwinding.
pub struct Stopwatch<W: Write> {
    label: &'static str,
    start: Instant,
    out: W,
}

impl<W: Write> Stopwatch<W> {
    pub fn with_writer(label: &'static str, out: W) -> Self {
        tracing::trace!(label, "stopwatch started");
        Stopwatch {
            label,
            start: Instant::now(),
            out,
        }
    }

    pub fn elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// The sink the timing line goes to, for output that belongs inside the
    /// measured scope.
    pub fn writer(&mut self) -> &mut W {
        &mut self.out
    }
}

impl<W: Write> Drop for Stopwatch<W> {
    fn drop(&mut self) {
        let elapsed = self.elapsed();
        tracing::debug!(label = self.label, elapsed_ms = %elapsed.as_millis(), "stopwatch stopped");
        if let Err(err) = write_millis(&mut self.out, elapsed) {
            tracing::warn!(label = self.label, error = %err, "failed to write timing");
        }
    }
}

fn write_millis<W: Write>(out: &mut W, elapsed: Duration) -> io::Result<()> {
    writeln!(out, "{} ms", elapsed.as_millis())
}
