//! crates/checksums/src/error.rs
//!
//! Error types surfaced by digest providers.

use thiserror::Error;

use crate::AlgorithmId;

/// Failure reported when opening or duplicating a digest context.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum DigestError {
    /// No algorithm is registered under the identifier.
    #[error("unknown digest algorithm {id}")]
    UnknownAlgorithm {
        /// Identifier the caller asked for.
        id: AlgorithmId,
    },
    /// The backend could not provide the requested context.
    #[error("digest backend failure: {reason}")]
    Backend {
        /// Backend-specific description.
        reason: String,
    },
}

/// Outcome of a failed built-in self-test.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum SelfTestError {
    /// The algorithm has no extended self-test.
    #[error("not implemented")]
    NotImplemented,
    /// No algorithm is registered under the identifier.
    #[error("unknown digest algorithm {id}")]
    UnknownAlgorithm {
        /// Identifier the caller asked for.
        id: AlgorithmId,
    },
    /// A known-answer test produced the wrong digest.
    #[error("known-answer test '{label}' failed: expected {expected}, got {actual}")]
    KnownAnswer {
        /// Short description of the input.
        label: &'static str,
        /// Expected digest in hex.
        expected: String,
        /// Computed digest in hex.
        actual: String,
    },
    /// A duplicated context disagreed with the context it was copied from.
    #[error("duplicated context diverged on '{label}'")]
    DuplicateDiverged {
        /// Short description of the input.
        label: &'static str,
    },
}
