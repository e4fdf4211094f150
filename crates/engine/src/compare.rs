//! crates/engine/src/compare.rs
//!
//! Comparison of computed checkpoint digests against the vector table.

use std::fmt;

use checksums::AlgorithmId;
use logging::target;

use crate::checkpoint::Offset;
use crate::{EngineResult, RunContext, VectorTable, hex};

/// Result of comparing one digest.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Outcome {
    /// The digest equals the table entry.
    Match,
    /// Same length, different bytes.
    Mismatch,
    /// The table entry has a different length or is not valid hex.
    LengthMismatch,
    /// The table has no entry for this checkpoint.
    NoVector,
}

/// Line prefix identifying a checkpoint in diagnostics.
///
/// Renders as `{gigs} GiB {offset:+3} {name:<10}`.
#[derive(Clone, Copy, Debug)]
pub struct Label<'a> {
    /// Units streamed.
    pub gigs: u32,
    /// Checkpoint offset.
    pub offset: Offset,
    /// Algorithm name.
    pub name: &'a str,
}

impl fmt::Display for Label<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} GiB {:+3} {:<10}", self.gigs, self.offset, self.name)
    }
}

/// Compares `actual` with the table entry for `(algorithm, gigs, offset)`.
///
/// Mismatches are counted as errors, a missing entry as a missing vector.
/// The computed digest is logged as a warning unless it matched, in which
/// case it is only shown when digest output is enabled.
///
/// # Errors
///
/// Returns [`EngineError::TooManyErrors`](crate::EngineError::TooManyErrors)
/// when this comparison exhausts the run's error budget.
pub fn compare(
    actual: &[u8],
    algorithm: AlgorithmId,
    name: &str,
    gigs: u32,
    offset: Offset,
    table: &VectorTable,
    run: &mut RunContext,
) -> EngineResult<Outcome> {
    let label = Label { gigs, offset, name };

    let outcome = match table.lookup(algorithm, gigs, offset) {
        None => {
            run.warn_missing(format_args!("{label} warning: no test vector"));
            Outcome::NoVector
        }
        Some(vector) => match hex::decode(&vector.digest_hex) {
            Err(err) => {
                run.fail(format_args!("{label} error: invalid test vector: {err}"))?;
                Outcome::LengthMismatch
            }
            Ok(expected) if expected.len() != actual.len() => {
                run.fail(format_args!("{label} error: digest length mismatch"))?;
                Outcome::LengthMismatch
            }
            Ok(expected) if expected != actual => {
                run.fail(format_args!("{label} error: mismatch"))?;
                Outcome::Mismatch
            }
            Ok(_) => Outcome::Match,
        },
    };

    let digest = hex::encode(actual);
    if outcome == Outcome::Match {
        tracing::info!(target: target::DIGEST, "{label} {digest}");
    } else {
        tracing::warn!(target: target::DIGEST, "{label} {digest}");
    }
    Ok(outcome)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{EngineError, TestVector};

    const ID: AlgorithmId = AlgorithmId::new(3);

    fn table() -> VectorTable {
        VectorTable::new(vec![
            TestVector::new(ID, 1, Offset::Zero, "00ff"),
            TestVector::new(ID, 1, Offset::Plus1, "zz"),
        ])
    }

    #[test]
    fn label_pads_like_the_classic_tool() {
        let label = Label {
            gigs: 256,
            offset: Offset::Minus1,
            name: "SHA1",
        };
        assert_eq!(label.to_string(), "256 GiB  -1 SHA1      ");
    }

    #[test]
    fn match_leaves_counters_alone() {
        let mut run = RunContext::default();
        let outcome = compare(&[0x00, 0xff], ID, "SHA1", 1, Offset::Zero, &table(), &mut run);
        assert_eq!(outcome.expect("no abort"), Outcome::Match);
        assert_eq!(run.errors(), 0);
        assert_eq!(run.missing_vectors(), 0);
    }

    #[test]
    fn mismatch_counts_one_error() {
        let mut run = RunContext::default();
        let outcome = compare(&[0x00, 0xfe], ID, "SHA1", 1, Offset::Zero, &table(), &mut run);
        assert_eq!(outcome.expect("no abort"), Outcome::Mismatch);
        assert_eq!(run.errors(), 1);
    }

    #[test]
    fn length_mismatch_counts_one_error() {
        let mut run = RunContext::default();
        let outcome = compare(&[0x00], ID, "SHA1", 1, Offset::Zero, &table(), &mut run);
        assert_eq!(outcome.expect("no abort"), Outcome::LengthMismatch);
        assert_eq!(run.errors(), 1);
    }

    #[test]
    fn undecodable_vector_counts_as_error() {
        let mut run = RunContext::default();
        let outcome = compare(&[0x00], ID, "SHA1", 1, Offset::Plus1, &table(), &mut run);
        assert_eq!(outcome.expect("no abort"), Outcome::LengthMismatch);
        assert_eq!(run.errors(), 1);
    }

    #[test]
    fn missing_vector_is_a_warning() {
        let mut run = RunContext::default();
        let outcome = compare(&[0x00], ID, "SHA1", 2, Offset::Zero, &table(), &mut run);
        assert_eq!(outcome.expect("no abort"), Outcome::NoVector);
        assert_eq!(run.errors(), 0);
        assert_eq!(run.missing_vectors(), 1);
    }

    #[test]
    fn last_allowed_error_aborts() {
        let mut run = RunContext::new(1);
        let err = compare(&[0x11, 0x22], ID, "SHA1", 1, Offset::Zero, &table(), &mut run)
            .expect_err("budget exhausted");
        assert!(matches!(err, EngineError::TooManyErrors { limit: 1 }));
    }

    #[test]
    fn comparison_is_deterministic() {
        let mut first = RunContext::default();
        let mut second = RunContext::default();
        for offset in Offset::ALL {
            let a = compare(&[0x00, 0xff], ID, "SHA1", 1, offset, &table(), &mut first);
            let b = compare(&[0x00, 0xff], ID, "SHA1", 1, offset, &table(), &mut second);
            assert_eq!(a.expect("no abort"), b.expect("no abort"));
        }
        assert_eq!(first, second);
    }
}
