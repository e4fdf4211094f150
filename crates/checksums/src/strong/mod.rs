//! crates/checksums/src/strong/mod.rs
//!
//! Incremental digest contexts.
//!
//! [`StreamingDigest`] is the interface the verifier drives. A context is
//! created empty, fed bytes with [`write`](StreamingDigest::write), copied
//! with [`duplicate`](StreamingDigest::duplicate), and finalised with
//! [`read`](StreamingDigest::read). Reading finalises a copy of the state, so
//! the context stays usable and further writes extend the same stream.
//! Dropping a context releases it.

mod xxhash;

pub use xxhash::{Xxh3, Xxh64};

use digest::Digest as _;

use crate::{Algorithm, Digest, DigestError};

/// Incremental hash state that can be forked.
pub trait StreamingDigest: Sized {
    /// Feeds additional bytes into the state.
    fn write(&mut self, data: &[u8]);

    /// Returns an independent copy of the current state.
    ///
    /// Writes to either copy afterwards do not affect the other.
    fn duplicate(&self) -> Result<Self, DigestError>;

    /// Returns the digest of every byte written so far.
    #[must_use]
    fn read(&self) -> Digest;
}

/// Streaming context for one of the built-in [`Algorithm`]s.
///
/// # Examples
///
/// ```
/// use checksums::{Algorithm, DigestContext, StreamingDigest};
///
/// let mut ctx = DigestContext::new(Algorithm::Sha1);
/// ctx.write(b"abc");
/// assert_eq!(ctx.read().to_string(), "a9993e364706816aba3e25717850c26c9cd0d89d");
/// assert_eq!(ctx.read().len(), Algorithm::Sha1.digest_len());
/// ```
#[derive(Clone)]
pub struct DigestContext {
    algorithm: Algorithm,
    state: State,
}

#[derive(Clone)]
enum State {
    Md4(md4::Md4),
    Md5(md5::Md5),
    Sha1(sha1::Sha1),
    Sha224(sha2::Sha224),
    Sha256(sha2::Sha256),
    Sha384(sha2::Sha384),
    Sha512(sha2::Sha512),
    Sha512_224(sha2::Sha512_224),
    Sha512_256(sha2::Sha512_256),
    Xxh64(Xxh64),
    Xxh3(Xxh3),
}

impl DigestContext {
    /// Creates an empty context for `algorithm`.
    #[must_use]
    pub fn new(algorithm: Algorithm) -> Self {
        let state = match algorithm {
            Algorithm::Md4 => State::Md4(md4::Md4::new()),
            Algorithm::Md5 => State::Md5(md5::Md5::new()),
            Algorithm::Sha1 => State::Sha1(sha1::Sha1::new()),
            Algorithm::Sha224 => State::Sha224(sha2::Sha224::new()),
            Algorithm::Sha256 => State::Sha256(sha2::Sha256::new()),
            Algorithm::Sha384 => State::Sha384(sha2::Sha384::new()),
            Algorithm::Sha512 => State::Sha512(sha2::Sha512::new()),
            Algorithm::Sha512_224 => State::Sha512_224(sha2::Sha512_224::new()),
            Algorithm::Sha512_256 => State::Sha512_256(sha2::Sha512_256::new()),
            Algorithm::Xxh64 => State::Xxh64(Xxh64::new()),
            Algorithm::Xxh3 | Algorithm::Xxh3_128 => State::Xxh3(Xxh3::new()),
        };
        Self { algorithm, state }
    }

    /// Returns the algorithm this context computes.
    #[must_use]
    pub const fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    /// Hashes `data` in one shot.
    #[must_use]
    pub fn digest(algorithm: Algorithm, data: &[u8]) -> Digest {
        let mut ctx = Self::new(algorithm);
        ctx.write(data);
        ctx.read()
    }
}

fn finish<D>(hasher: &D) -> Digest
where
    D: digest::Digest + Clone,
{
    Digest::from_slice(&hasher.clone().finalize())
}

impl StreamingDigest for DigestContext {
    fn write(&mut self, data: &[u8]) {
        match &mut self.state {
            State::Md4(h) => h.update(data),
            State::Md5(h) => h.update(data),
            State::Sha1(h) => h.update(data),
            State::Sha224(h) => h.update(data),
            State::Sha256(h) => h.update(data),
            State::Sha384(h) => h.update(data),
            State::Sha512(h) => h.update(data),
            State::Sha512_224(h) => h.update(data),
            State::Sha512_256(h) => h.update(data),
            State::Xxh64(h) => h.update(data),
            State::Xxh3(h) => h.update(data),
        }
    }

    fn duplicate(&self) -> Result<Self, DigestError> {
        Ok(self.clone())
    }

    fn read(&self) -> Digest {
        match &self.state {
            State::Md4(h) => finish(h),
            State::Md5(h) => finish(h),
            State::Sha1(h) => finish(h),
            State::Sha224(h) => finish(h),
            State::Sha256(h) => finish(h),
            State::Sha384(h) => finish(h),
            State::Sha512(h) => finish(h),
            State::Sha512_224(h) => finish(h),
            State::Sha512_256(h) => finish(h),
            State::Xxh64(h) => Digest::from_slice(&h.finalize()),
            State::Xxh3(h) if self.algorithm == Algorithm::Xxh3_128 => {
                Digest::from_slice(&h.finalize_128())
            }
            State::Xxh3(h) => Digest::from_slice(&h.finalize_64()),
        }
    }
}

impl std::fmt::Debug for DigestContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DigestContext")
            .field("algorithm", &self.algorithm)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_algorithm_reports_its_digest_len() {
        for algorithm in Algorithm::ALL {
            let ctx = DigestContext::new(algorithm);
            assert_eq!(ctx.read().len(), algorithm.digest_len(), "{algorithm}");
        }
    }

    #[test]
    fn read_does_not_consume_the_stream() {
        let mut ctx = DigestContext::new(Algorithm::Sha256);
        ctx.write(b"a");
        let _ = ctx.read();
        ctx.write(b"bc");
        assert_eq!(ctx.read(), DigestContext::digest(Algorithm::Sha256, b"abc"));
    }

    #[test]
    fn duplicate_is_independent() {
        for algorithm in Algorithm::ALL {
            let mut original = DigestContext::new(algorithm);
            original.write(b"common prefix ");
            let mut fork = original.duplicate().expect("duplicate");

            original.write(b"left");
            fork.write(b"right");

            assert_eq!(
                original.read(),
                DigestContext::digest(algorithm, b"common prefix left"),
                "{algorithm}"
            );
            assert_eq!(
                fork.read(),
                DigestContext::digest(algorithm, b"common prefix right"),
                "{algorithm}"
            );
        }
    }

    #[test]
    fn xxh3_widths_share_state_but_differ_in_output() {
        let short = DigestContext::digest(Algorithm::Xxh3, b"abc");
        let wide = DigestContext::digest(Algorithm::Xxh3_128, b"abc");
        assert_eq!(short.len(), 8);
        assert_eq!(wide.len(), 16);
    }

    #[test]
    fn debug_names_the_algorithm() {
        let ctx = DigestContext::new(Algorithm::Md5);
        assert!(format!("{ctx:?}").contains("Md5"));
    }
}
