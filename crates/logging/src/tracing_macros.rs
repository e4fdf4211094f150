//! crates/logging/src/tracing_macros.rs
//! Convenience macros for hashtest-specific tracing.
//!
//! These macros wrap the standard tracing macros with the targets that
//! [`DiagnosticLayer`](crate::DiagnosticLayer) maps onto verbosity flags.

/// Emit a streaming progress note.
///
/// # Example
/// ```ignore
/// trace_progress!("{} GiB so far hashed with {}", gigs, name);
/// ```
#[macro_export]
macro_rules! trace_progress {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "hashtest::progress", $($arg)*);
    };
}

/// Emit a self-test result.
///
/// # Example
/// ```ignore
/// trace_selftest!("extended selftest for {} ({}) passed", name, id);
/// ```
#[macro_export]
macro_rules! trace_selftest {
    ($($arg:tt)*) => {
        ::tracing::info!(target: "hashtest::selftest", $($arg)*);
    };
}

/// Emit a context duplication trace.
///
/// # Example
/// ```ignore
/// trace_fork!("forked at {} bytes", position);
/// ```
#[macro_export]
macro_rules! trace_fork {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "hashtest::fork", $($arg)*);
    };
}

/// Emit a test vector table trace.
///
/// # Example
/// ```ignore
/// trace_vector!("loaded {} vectors", count);
/// ```
#[macro_export]
macro_rules! trace_vector {
    ($($arg:tt)*) => {
        ::tracing::debug!(target: "hashtest::vector", $($arg)*);
    };
}
