use crate::selftest;
use crate::{Algorithm, AlgorithmId, DigestContext, DigestError, SelfTestError, StreamingDigest};

/// Source of digest contexts and algorithm metadata.
///
/// The verifier is written against this trait so it can drive any library
/// that offers incremental hashing with forkable state. [`Registry`] is the
/// implementation backed by this crate.
pub trait DigestProvider {
    /// Context type produced by [`open`](Self::open).
    type Context: StreamingDigest;

    /// Opens an empty context for `id`.
    fn open(&self, id: AlgorithmId) -> Result<Self::Context, DigestError>;

    /// Returns the digest length of `id`, if the algorithm is known.
    fn digest_len(&self, id: AlgorithmId) -> Option<usize>;

    /// Returns the human-readable name of `id`, if the algorithm is known.
    fn name(&self, id: AlgorithmId) -> Option<&str>;

    /// Resolves a human-readable name.
    fn map_name(&self, name: &str) -> Option<AlgorithmId>;

    /// Reports whether `id` is available for testing.
    fn is_testable(&self, id: AlgorithmId) -> bool;

    /// Runs the extended self-test for `id`.
    fn selftest(&self, id: AlgorithmId) -> Result<(), SelfTestError>;
}

/// Provider for the algorithms compiled into this crate.
///
/// Individual algorithms can be withheld with [`without`](Self::without);
/// withheld algorithms still resolve by name but are skipped when scanning
/// for testable identifiers.
#[derive(Clone, Debug, Default)]
pub struct Registry {
    disabled: Vec<Algorithm>,
}

impl Registry {
    /// Creates a registry with every built-in algorithm enabled.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a registry that reports `algorithm` as not testable.
    #[must_use]
    pub fn without(mut self, algorithm: Algorithm) -> Self {
        if !self.disabled.contains(&algorithm) {
            self.disabled.push(algorithm);
        }
        self
    }

    fn lookup(id: AlgorithmId) -> Result<Algorithm, DigestError> {
        Algorithm::from_id(id).ok_or(DigestError::UnknownAlgorithm { id })
    }
}

impl DigestProvider for Registry {
    type Context = DigestContext;

    fn open(&self, id: AlgorithmId) -> Result<DigestContext, DigestError> {
        Self::lookup(id).map(DigestContext::new)
    }

    fn digest_len(&self, id: AlgorithmId) -> Option<usize> {
        Algorithm::from_id(id).map(Algorithm::digest_len)
    }

    fn name(&self, id: AlgorithmId) -> Option<&str> {
        Algorithm::from_id(id).map(Algorithm::name)
    }

    fn map_name(&self, name: &str) -> Option<AlgorithmId> {
        Algorithm::from_name(name).map(Algorithm::id)
    }

    fn is_testable(&self, id: AlgorithmId) -> bool {
        Algorithm::from_id(id).is_some_and(|algorithm| !self.disabled.contains(&algorithm))
    }

    fn selftest(&self, id: AlgorithmId) -> Result<(), SelfTestError> {
        let algorithm = Algorithm::from_id(id).ok_or(SelfTestError::UnknownAlgorithm { id })?;
        selftest::run(algorithm)
    }
}
