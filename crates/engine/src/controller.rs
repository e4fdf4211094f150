//! crates/engine/src/controller.rs
//!
//! Top-level run: resolve algorithms, dispatch each one, aggregate counters.

use std::num::NonZeroU32;

use checksums::{AlgorithmId, DigestProvider};
use logging::target;

use crate::checkpoint::{Geometry, verify_with_geometry};
use crate::{DEFAULT_MAX_ERRORS, EngineError, EngineResult, RunContext, RunSummary, VectorTable};
use crate::selftest::run_selftest;

/// Largest accepted stream length in GiB.
pub const MAX_GIGS: u32 = 1 << 20;

/// Parameters of a run.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunConfig {
    /// Stream length in units; zero runs the self-tests instead.
    pub gigs: u32,
    /// Algorithm names to test. Empty means every testable algorithm.
    pub algorithms: Vec<String>,
    /// Errors tolerated before the run stops.
    pub max_errors: u32,
    /// Unit size of the stream. One GiB outside of tests.
    pub geometry: Geometry,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            gigs: 0,
            algorithms: Vec::new(),
            max_errors: DEFAULT_MAX_ERRORS,
            geometry: Geometry::GIB,
        }
    }
}

/// Runs every requested test.
///
/// All names are resolved up front; any that fail are logged as
/// `invalid algorithm '<name>'` and nothing is tested. Without names, the
/// identifier range is scanned for testable algorithms.
///
/// # Errors
///
/// Returns the first fatal condition: unresolvable names, a context that
/// cannot be opened or duplicated, or an exhausted error budget.
pub fn run<P: DigestProvider>(
    provider: &P,
    config: &RunConfig,
    table: &VectorTable,
) -> EngineResult<RunSummary> {
    let algorithms = select_algorithms(provider, &config.algorithms)?;
    let mut run = RunContext::new(config.max_errors);
    let mut tested = 0u32;

    for algorithm in algorithms {
        match NonZeroU32::new(config.gigs) {
            None => run_selftest(provider, algorithm, &mut run)?,
            Some(gigs) => {
                verify_with_geometry(provider, algorithm, gigs, config.geometry, table, &mut run)?;
            }
        }
        tested += 1;
    }

    if run.missing_vectors() > 0 {
        tracing::error!(target: target::RUN, "Some test vectors are missing");
    }
    Ok(run.summary(tested))
}

fn select_algorithms<P: DigestProvider>(
    provider: &P,
    names: &[String],
) -> EngineResult<Vec<AlgorithmId>> {
    if names.is_empty() {
        return Ok(AlgorithmId::scan()
            .filter(|&id| provider.is_testable(id))
            .collect());
    }

    let mut resolved = Vec::with_capacity(names.len());
    let mut invalid = Vec::new();
    for name in names {
        match provider.map_name(name) {
            Some(id) => resolved.push(id),
            None => {
                tracing::error!(target: target::RUN, "invalid algorithm '{name}'");
                invalid.push(name.clone());
            }
        }
    }

    if invalid.is_empty() {
        Ok(resolved)
    } else {
        Err(EngineError::InvalidAlgorithm { names: invalid })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use checksums::{Algorithm, Registry};

    #[test]
    fn default_config_runs_selftests_with_fifty_errors() {
        let config = RunConfig::default();
        assert_eq!(config.gigs, 0);
        assert_eq!(config.max_errors, 50);
        assert_eq!(config.geometry, Geometry::GIB);
    }

    #[test]
    fn scan_selects_testable_algorithms_in_id_order() {
        let registry = Registry::new().without(Algorithm::Md4);
        let ids = select_algorithms(&registry, &[]).expect("scan");
        assert_eq!(ids.first(), Some(&Algorithm::Md5.id()));
        assert_eq!(ids.len(), Algorithm::ALL.len() - 1);
    }

    #[test]
    fn every_invalid_name_is_collected() {
        let registry = Registry::new();
        let names = ["SHA1".to_owned(), "FOO".to_owned(), "BAR".to_owned()];
        let err = select_algorithms(&registry, &names).expect_err("invalid names");
        match err {
            EngineError::InvalidAlgorithm { names } => assert_eq!(names, ["FOO", "BAR"]),
            other => panic!("unexpected error {other}"),
        }
    }

    #[test]
    fn named_algorithms_keep_their_order() {
        let registry = Registry::new();
        let names = ["sha256".to_owned(), "MD5".to_owned(), "sha256".to_owned()];
        let ids = select_algorithms(&registry, &names).expect("valid names");
        assert_eq!(
            ids,
            [Algorithm::Sha256.id(), Algorithm::Md5.id(), Algorithm::Sha256.id()]
        );
    }

    #[test]
    fn selftest_run_over_registry_succeeds() {
        let summary = run(&Registry::new(), &RunConfig::default(), &VectorTable::builtin())
            .expect("no fatal error");
        assert!(summary.succeeded());
        assert_eq!(summary.algorithms_tested, Algorithm::ALL.len() as u32);
        assert_eq!(summary.missing_vectors, 0);
    }
}
