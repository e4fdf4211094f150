//! crates/engine/src/error.rs
//!
//! Error types for the engine crate.

use std::io;
use std::path::PathBuf;

use checksums::{AlgorithmId, DigestError};
use thiserror::Error;

/// Result type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Conditions that end a run immediately.
///
/// Everything else (mismatching digests, failed self-tests, missing vectors)
/// is counted in a [`RunContext`](crate::RunContext) and the run continues.
#[derive(Debug, Error)]
pub enum EngineError {
    /// One or more requested algorithm names did not resolve.
    #[error("{} invalid algorithm name(s) given", names.len())]
    InvalidAlgorithm {
        /// Every name that failed to resolve, in the order given.
        names: Vec<String>,
    },
    /// The provider refused to open a context.
    #[error("opening a context failed for {name} ({id}): {source}")]
    Open {
        /// Algorithm name.
        name: String,
        /// Algorithm identifier.
        id: AlgorithmId,
        /// Provider failure.
        source: DigestError,
    },
    /// The provider refused to duplicate a context.
    #[error("duplicating a context failed for {name} ({id}): {source}")]
    Duplicate {
        /// Algorithm name.
        name: String,
        /// Algorithm identifier.
        id: AlgorithmId,
        /// Provider failure.
        source: DigestError,
    },
    /// The error budget of the run is exhausted.
    #[error("stopped after {limit} errors.")]
    TooManyErrors {
        /// Number of errors that triggered the stop.
        limit: u32,
    },
    /// The provider has no name or digest length for an identifier.
    #[error("no metadata for digest algorithm {id}")]
    UnknownAlgorithm {
        /// Identifier the provider could not describe.
        id: AlgorithmId,
    },
}

impl EngineError {
    /// Reports whether the condition was already logged where it arose.
    ///
    /// Invalid names are logged one per line before the error is returned,
    /// so front ends only print the remaining variants.
    #[must_use]
    pub const fn is_reported(&self) -> bool {
        matches!(self, Self::InvalidAlgorithm { .. })
    }
}

/// Malformed hexadecimal input.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum HexError {
    /// A character pair contains something other than `0-9`, `a-f`, `A-F`.
    #[error("invalid hex digit at position {index}")]
    InvalidDigit {
        /// Offset of the first character of the offending pair.
        index: usize,
    },
    /// The input has an odd number of characters.
    #[error("odd number of hex digits ({len})")]
    OddLength {
        /// Length of the input in characters.
        len: usize,
    },
}

/// Failure while loading test vectors from a file.
#[derive(Debug, Error)]
pub enum VectorError {
    /// The file could not be read.
    #[error("failed to read test vectors from {}: {source}", path.display())]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The document is not valid JSON of the expected shape.
    #[error("malformed test vector document: {0}")]
    Parse(#[from] serde_json::Error),
    /// A record names an algorithm the provider does not know.
    #[error("test vector {index}: unknown algorithm '{name}'")]
    UnknownAlgorithm {
        /// Zero-based record position.
        index: usize,
        /// Name as written in the file.
        name: String,
    },
    /// A record uses an offset other than -64, -1, 0, 1, or 64.
    #[error("test vector {index}: offset {offset} is not a checkpoint offset")]
    InvalidOffset {
        /// Zero-based record position.
        index: usize,
        /// Offset as written in the file.
        offset: i64,
    },
    /// A record's digest is not valid hex.
    #[error("test vector {index}: {source}")]
    InvalidDigest {
        /// Zero-based record position.
        index: usize,
        /// Decoding failure.
        source: HexError,
    },
}
