//! crates/engine/src/run.rs
//!
//! Error accounting shared by every stage of a run.

use std::fmt;

use logging::target;

use crate::{EngineError, EngineResult};

/// Errors tolerated before a run is stopped.
pub const DEFAULT_MAX_ERRORS: u32 = 50;

/// Counters threaded through a run.
///
/// Counted failures are logged at error level and tallied here. Once the
/// tally reaches the configured limit, [`fail`](Self::fail) returns
/// [`EngineError::TooManyErrors`] and the run unwinds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunContext {
    errors: u32,
    missing_vectors: u32,
    max_errors: u32,
}

impl RunContext {
    /// Creates a context that stops after `max_errors` errors.
    ///
    /// A limit of zero is treated as one.
    #[must_use]
    pub fn new(max_errors: u32) -> Self {
        Self {
            errors: 0,
            missing_vectors: 0,
            max_errors: max_errors.max(1),
        }
    }

    /// Logs `message` as an error and counts it.
    pub fn fail(&mut self, message: impl fmt::Display) -> EngineResult<()> {
        tracing::error!(target: target::RUN, "{message}");
        self.errors = self.errors.saturating_add(1);
        if self.errors >= self.max_errors {
            return Err(EngineError::TooManyErrors {
                limit: self.max_errors,
            });
        }
        Ok(())
    }

    /// Logs `message` as a warning and counts a missing test vector.
    pub fn warn_missing(&mut self, message: impl fmt::Display) {
        tracing::warn!(target: target::DIGEST, "{message}");
        self.missing_vectors = self.missing_vectors.saturating_add(1);
    }

    /// Errors counted so far.
    #[must_use]
    pub const fn errors(&self) -> u32 {
        self.errors
    }

    /// Missing test vectors counted so far.
    #[must_use]
    pub const fn missing_vectors(&self) -> u32 {
        self.missing_vectors
    }

    /// Snapshot of the counters.
    #[must_use]
    pub const fn summary(&self, algorithms_tested: u32) -> RunSummary {
        RunSummary {
            errors: self.errors,
            missing_vectors: self.missing_vectors,
            algorithms_tested,
        }
    }
}

impl Default for RunContext {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_ERRORS)
    }
}

/// Final counters of a completed run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSummary {
    /// Counted errors.
    pub errors: u32,
    /// Checkpoints without a test vector.
    pub missing_vectors: u32,
    /// Algorithms that were self-tested or streamed.
    pub algorithms_tested: u32,
}

impl RunSummary {
    /// Reports whether the run finished without errors.
    ///
    /// Missing vectors do not count as errors.
    #[must_use]
    pub const fn succeeded(&self) -> bool {
        self.errors == 0
    }
}
