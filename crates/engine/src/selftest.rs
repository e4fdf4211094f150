//! crates/engine/src/selftest.rs
//!
//! Zero-length runs: delegate to the provider's extended self-test.

use checksums::{AlgorithmId, DigestProvider, SelfTestError};
use logging::trace_selftest;

use crate::{EngineError, EngineResult, RunContext};

/// Runs the provider's self-test for `algorithm` and records the outcome.
///
/// A failing self-test is counted as an error. Passing and unimplemented
/// self-tests are only noted at info level.
pub fn run_selftest<P: DigestProvider>(
    provider: &P,
    algorithm: AlgorithmId,
    run: &mut RunContext,
) -> EngineResult<()> {
    let name = provider
        .name(algorithm)
        .ok_or(EngineError::UnknownAlgorithm { id: algorithm })?;

    match provider.selftest(algorithm) {
        Ok(()) => trace_selftest!("extended selftest for {name} ({algorithm}) passed"),
        Err(SelfTestError::NotImplemented) => {
            trace_selftest!("extended selftest for {name} ({algorithm}) not implemented");
        }
        Err(err) => {
            run.fail(format_args!(
                "extended selftest for {name} ({algorithm}) failed: {err}"
            ))?;
        }
    }
    Ok(())
}
