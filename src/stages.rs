//! Pure integer stage functions used by every pipeline variant.

use crate::Value;

/// `x + 1`.
pub fn increment(x: Value) -> Value {
    x + 1
}

/// Naive exponential-time Fibonacci.
///
/// Deliberately expensive: the cost is what makes the difference between
/// deferred, eager and lazy-view evaluation visible. Only defined for
/// `n >= 0`.
pub fn fibonacci(n: Value) -> Value {
    debug_assert!(n >= 0, "fibonacci is undefined for negative input {n}");
    match n {
        n if n < 2 => n,
        _ => fibonacci(n - 2) + fibonacci(n - 1),
    }
}

/// `f(0) = 1`, `f(x) = (f(x - 1) mod 100) * x`.
///
/// Not part of any benchmarked pipeline; kept as a spare stage.
pub fn factorial_like(x: Value) -> Value {
    debug_assert!(x >= 0, "factorial_like is undefined for negative input {x}");
    (1..=x).fold(1, |acc, i| acc % 100 * i)
}
