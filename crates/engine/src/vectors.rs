//! crates/engine/src/vectors.rs
//!
//! Known-good digests for checkpoint offsets.
//!
//! A [`VectorTable`] is an ordered list of [`TestVector`]s. Lookups return
//! the first record matching `(algorithm, gigs, offset)`, so records
//! [`prepend`](VectorTable::prepend)ed from a file override the built-ins.
//!
//! The file format is a JSON object with a single `vectors` array:
//!
//! ```json
//! {"vectors": [
//!   {"algorithm": "SHA256", "gigs": 256, "offset": 0,
//!    "digest": "2d0723878cb2c3d5c59dfad910cdb857f4430a6ba2a7d687938d7a20e63dde47"}
//! ]}
//! ```

use std::fs;
use std::path::Path;

use checksums::{Algorithm, AlgorithmId};
use logging::trace_vector;
use serde::Deserialize;

use crate::checkpoint::Offset;
use crate::{VectorError, hex};

/// Expected digest for one algorithm, stream length, and offset.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct TestVector {
    /// Algorithm the digest belongs to.
    pub algorithm: AlgorithmId,
    /// Number of GiB units before the mark.
    pub gigs: u32,
    /// Offset from the mark.
    pub offset: Offset,
    /// Expected digest as hex.
    pub digest_hex: String,
}

impl TestVector {
    /// Creates a record.
    pub fn new(
        algorithm: AlgorithmId,
        gigs: u32,
        offset: Offset,
        digest_hex: impl Into<String>,
    ) -> Self {
        Self {
            algorithm,
            gigs,
            offset,
            digest_hex: digest_hex.into(),
        }
    }
}

/// Built-in records: SHA1, SHA224, and SHA256 at 256 GiB.
const BUILTIN: [(Algorithm, u32, Offset, &str); 15] = [
    (Algorithm::Sha1, 256, Offset::Minus64, "92fc51850c7b750e6e774b75f294f6979d4059f0"),
    (Algorithm::Sha1, 256, Offset::Minus1, "4bddeeb4c08683f02d4944d93dbcb02ebab50134"),
    (Algorithm::Sha1, 256, Offset::Zero, "71b923afde1c8c040884c723a2e3335b333e64c6"),
    (Algorithm::Sha1, 256, Offset::Plus1, "2d99f9b5b86e9c9c937104f4242bd6b8bc0927ef"),
    (Algorithm::Sha1, 256, Offset::Plus64, "a60dabe8d749f798b7ec3a684cc3eab487451482"),
    (
        Algorithm::Sha224,
        256,
        Offset::Minus64,
        "b5672b54d2480a5688a2dc727a1ad4db7a81ef31ce8999e0bbaeffdc",
    ),
    (
        Algorithm::Sha224,
        256,
        Offset::Minus1,
        "814ea7159473e6ffc1c64b90026a542e13ac6980f7f3ca3c4582a9b8",
    ),
    (
        Algorithm::Sha224,
        256,
        Offset::Zero,
        "9ec0e1829455db8650ec7a8b06912196f97a7358bc3a73c79911cd4e",
    ),
    (
        Algorithm::Sha224,
        256,
        Offset::Plus1,
        "e578d5d523320876565bbbc892511a485427caee6dd754d57e3e58c2",
    ),
    (
        Algorithm::Sha224,
        256,
        Offset::Plus64,
        "ff0464df248cd298b63765bc4f87f21e25c93c657fdf3656d3c878e5",
    ),
    (
        Algorithm::Sha256,
        256,
        Offset::Minus64,
        "87a9828d3de78d55d252341db2a622908c4e0ceaee9961ecf9768700fc799ec8",
    ),
    (
        Algorithm::Sha256,
        256,
        Offset::Minus1,
        "823bf95f64ef04a4a77579c38760b1d401b56bf3a8e664bdf56ca15afb468a03",
    ),
    (
        Algorithm::Sha256,
        256,
        Offset::Zero,
        "2d0723878cb2c3d5c59dfad910cdb857f4430a6ba2a7d687938d7a20e63dde47",
    ),
    (
        Algorithm::Sha256,
        256,
        Offset::Plus1,
        "5a2e21b1e79cd866acf53a2a18ca76bd4e02c4b01bf4627354171824c812d95f",
    ),
    (
        Algorithm::Sha256,
        256,
        Offset::Plus64,
        "34444808af8e9d995e67f9e155ed94bf55f195a51dc1d8a989e6bcf95511c8a2",
    ),
];

/// Ordered collection of [`TestVector`]s.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VectorTable {
    vectors: Vec<TestVector>,
}

impl VectorTable {
    /// Creates a table from records, keeping their order.
    #[must_use]
    pub const fn new(vectors: Vec<TestVector>) -> Self {
        Self { vectors }
    }

    /// The built-in table.
    #[must_use]
    pub fn builtin() -> Self {
        BUILTIN
            .iter()
            .map(|&(algorithm, gigs, offset, digest)| {
                TestVector::new(algorithm.id(), gigs, offset, digest)
            })
            .collect()
    }

    /// Parses a JSON vector document.
    ///
    /// `resolve` maps algorithm names in the document to identifiers. Every
    /// record is validated; the first invalid one is reported.
    pub fn from_json<F>(text: &str, resolve: F) -> Result<Self, VectorError>
    where
        F: Fn(&str) -> Option<AlgorithmId>,
    {
        let document: VectorDocument = serde_json::from_str(text)?;
        let vectors = document
            .vectors
            .into_iter()
            .enumerate()
            .map(|(index, record)| record.validate(index, &resolve))
            .collect::<Result<Vec<_>, _>>()?;
        trace_vector!("parsed {} test vectors", vectors.len());
        Ok(Self { vectors })
    }

    /// Reads and parses a JSON vector file.
    pub fn load<F>(path: &Path, resolve: F) -> Result<Self, VectorError>
    where
        F: Fn(&str) -> Option<AlgorithmId>,
    {
        let text = fs::read_to_string(path).map_err(|source| VectorError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let table = Self::from_json(&text, resolve)?;
        trace_vector!("loaded test vectors from {}", path.display());
        Ok(table)
    }

    /// Places `other`'s records ahead of this table's records.
    pub fn prepend(&mut self, other: Self) {
        let mut vectors = other.vectors;
        vectors.append(&mut self.vectors);
        self.vectors = vectors;
    }

    /// Returns the first record for `(algorithm, gigs, offset)`.
    #[must_use]
    pub fn lookup(&self, algorithm: AlgorithmId, gigs: u32, offset: Offset) -> Option<&TestVector> {
        let found = self
            .vectors
            .iter()
            .find(|v| v.algorithm == algorithm && v.gigs == gigs && v.offset == offset);
        tracing::trace!(
            target: logging::target::VECTOR,
            "lookup {algorithm} {gigs} {offset:+}: {}",
            if found.is_some() { "hit" } else { "miss" }
        );
        found
    }

    /// Number of records.
    #[must_use]
    pub fn len(&self) -> usize {
        self.vectors.len()
    }

    /// Reports whether the table has no records.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.vectors.is_empty()
    }

    /// Iterates the records in lookup order.
    pub fn iter(&self) -> impl Iterator<Item = &TestVector> {
        self.vectors.iter()
    }
}

impl FromIterator<TestVector> for VectorTable {
    fn from_iter<I: IntoIterator<Item = TestVector>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct VectorDocument {
    vectors: Vec<VectorRecord>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct VectorRecord {
    algorithm: String,
    gigs: u32,
    offset: i64,
    digest: String,
}

impl VectorRecord {
    fn validate<F>(self, index: usize, resolve: &F) -> Result<TestVector, VectorError>
    where
        F: Fn(&str) -> Option<AlgorithmId>,
    {
        let algorithm = resolve(&self.algorithm).ok_or(VectorError::UnknownAlgorithm {
            index,
            name: self.algorithm,
        })?;
        let offset = Offset::from_bytes(self.offset).ok_or(VectorError::InvalidOffset {
            index,
            offset: self.offset,
        })?;
        hex::decode(&self.digest).map_err(|source| VectorError::InvalidDigest { index, source })?;
        Ok(TestVector::new(algorithm, self.gigs, offset, self.digest))
    }
}
