//! crates/checksums/src/strong/xxhash.rs
//!
//! Streaming XXHash states used by [`DigestContext`](super::DigestContext).
//!
//! Both hashers run with seed 0 and render their output big-endian, which
//! matches the canonical form printed by `xxhsum` and lets test vectors be
//! copied from it verbatim.

/// Streaming XXH64 state.
#[derive(Clone)]
pub struct Xxh64 {
    inner: xxhash_rust::xxh64::Xxh64,
}

impl Xxh64 {
    /// Creates an empty state with seed 0.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            inner: xxhash_rust::xxh64::Xxh64::new(0),
        }
    }

    /// Feeds additional bytes into the state.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Returns the canonical (big-endian) XXH64 of everything fed so far.
    #[must_use]
    pub fn finalize(&self) -> [u8; 8] {
        self.inner.digest().to_be_bytes()
    }
}

impl Default for Xxh64 {
    fn default() -> Self {
        Self::new()
    }
}

/// Streaming XXH3 state, finalisable to either the 64- or 128-bit variant.
#[derive(Clone)]
pub struct Xxh3 {
    inner: xxhash_rust::xxh3::Xxh3,
}

impl Xxh3 {
    /// Creates an empty state with seed 0.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: xxhash_rust::xxh3::Xxh3::new(),
        }
    }

    /// Feeds additional bytes into the state.
    pub fn update(&mut self, data: &[u8]) {
        self.inner.update(data);
    }

    /// Returns the canonical XXH3/64 of everything fed so far.
    #[must_use]
    pub fn finalize_64(&self) -> [u8; 8] {
        self.inner.digest().to_be_bytes()
    }

    /// Returns the canonical XXH3/128 of everything fed so far.
    #[must_use]
    pub fn finalize_128(&self) -> [u8; 16] {
        self.inner.digest128().to_be_bytes()
    }
}

impl Default for Xxh3 {
    fn default() -> Self {
        Self::new()
    }
}
