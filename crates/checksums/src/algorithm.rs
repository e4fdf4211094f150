use std::fmt;

/// Opaque identifier for a hash algorithm.
///
/// Identifiers are small positive integers that stay stable across releases
/// so that they can be printed next to algorithm names in diagnostics.
/// Callers that want to enumerate everything a provider offers scan the
/// half-open range `1..`[`SCAN_LIMIT`](Self::SCAN_LIMIT).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AlgorithmId(u16);

impl AlgorithmId {
    /// Exclusive upper bound of the identifier range probed when no
    /// algorithm is named explicitly.
    pub const SCAN_LIMIT: u16 = 400;

    /// Wraps a raw identifier.
    #[must_use]
    pub const fn new(raw: u16) -> Self {
        Self(raw)
    }

    /// Returns the raw identifier.
    #[must_use]
    pub const fn get(self) -> u16 {
        self.0
    }

    /// Iterates every identifier in `1..SCAN_LIMIT`.
    pub fn scan() -> impl Iterator<Item = Self> {
        (1..Self::SCAN_LIMIT).map(Self)
    }
}

impl fmt::Display for AlgorithmId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hash algorithms implemented by this crate.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Algorithm {
    /// MD4 (RFC 1320).
    Md4,
    /// MD5 (RFC 1321).
    Md5,
    /// SHA-1 (FIPS 180-4).
    Sha1,
    /// SHA-224 (FIPS 180-4).
    Sha224,
    /// SHA-256 (FIPS 180-4).
    Sha256,
    /// SHA-384 (FIPS 180-4).
    Sha384,
    /// SHA-512 (FIPS 180-4).
    Sha512,
    /// SHA-512/224 (FIPS 180-4).
    Sha512_224,
    /// SHA-512/256 (FIPS 180-4).
    Sha512_256,
    /// 64-bit XXH64, seed 0.
    Xxh64,
    /// 64-bit XXH3, seed 0.
    Xxh3,
    /// 128-bit XXH3, seed 0.
    Xxh3_128,
}

impl Algorithm {
    /// Every built-in algorithm in identifier order.
    pub const ALL: [Self; 12] = [
        Self::Md4,
        Self::Md5,
        Self::Sha1,
        Self::Sha224,
        Self::Sha256,
        Self::Sha384,
        Self::Sha512,
        Self::Sha512_224,
        Self::Sha512_256,
        Self::Xxh64,
        Self::Xxh3,
        Self::Xxh3_128,
    ];

    /// Stable identifier of the algorithm.
    #[must_use]
    pub const fn id(self) -> AlgorithmId {
        AlgorithmId(match self {
            Self::Md4 => 1,
            Self::Md5 => 2,
            Self::Sha1 => 3,
            Self::Sha224 => 4,
            Self::Sha256 => 5,
            Self::Sha384 => 6,
            Self::Sha512 => 7,
            Self::Sha512_224 => 8,
            Self::Sha512_256 => 9,
            Self::Xxh64 => 10,
            Self::Xxh3 => 11,
            Self::Xxh3_128 => 12,
        })
    }

    /// Looks up the algorithm registered under `id`.
    #[must_use]
    pub fn from_id(id: AlgorithmId) -> Option<Self> {
        Self::ALL.into_iter().find(|algorithm| algorithm.id() == id)
    }

    /// Canonical upper-case name used in diagnostics.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Md4 => "MD4",
            Self::Md5 => "MD5",
            Self::Sha1 => "SHA1",
            Self::Sha224 => "SHA224",
            Self::Sha256 => "SHA256",
            Self::Sha384 => "SHA384",
            Self::Sha512 => "SHA512",
            Self::Sha512_224 => "SHA512_224",
            Self::Sha512_256 => "SHA512_256",
            Self::Xxh64 => "XXH64",
            Self::Xxh3 => "XXH3",
            Self::Xxh3_128 => "XXH3_128",
        }
    }

    /// Alternative spellings accepted by [`from_name`](Self::from_name).
    const fn aliases(self) -> &'static [&'static str] {
        match self {
            Self::Md4 | Self::Md5 | Self::Xxh64 => &[],
            Self::Sha1 => &["SHA-1"],
            Self::Sha224 => &["SHA-224"],
            Self::Sha256 => &["SHA-256"],
            Self::Sha384 => &["SHA-384"],
            Self::Sha512 => &["SHA-512"],
            Self::Sha512_224 => &["SHA-512/224", "SHA512/224"],
            Self::Sha512_256 => &["SHA-512/256", "SHA512/256"],
            Self::Xxh3 => &["XXH3-64", "XXH3_64"],
            Self::Xxh3_128 => &["XXH3-128", "XXH128"],
        }
    }

    /// Resolves a human-readable name, ignoring ASCII case.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let name = name.trim();
        Self::ALL.into_iter().find(|algorithm| {
            algorithm.name().eq_ignore_ascii_case(name)
                || algorithm
                    .aliases()
                    .iter()
                    .any(|alias| alias.eq_ignore_ascii_case(name))
        })
    }

    /// Length of the digest in bytes.
    #[must_use]
    pub const fn digest_len(self) -> usize {
        match self {
            Self::Xxh64 | Self::Xxh3 => 8,
            Self::Md4 | Self::Md5 | Self::Xxh3_128 => 16,
            Self::Sha1 => 20,
            Self::Sha224 | Self::Sha512_224 => 28,
            Self::Sha256 | Self::Sha512_256 => 32,
            Self::Sha384 => 48,
            Self::Sha512 => 64,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
