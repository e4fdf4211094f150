#![cfg_attr(docsrs, feature(doc_cfg))]
#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `checksums` is the digest collaborator behind `hashtest`. It exposes the
//! hash algorithms the verifier drives through a small incremental
//! interface: open a context, feed it bytes, duplicate it, and read a digest
//! without consuming it. Contexts are released when dropped.
//!
//! # Design
//!
//! - [`AlgorithmId`] is an opaque, stable numeric identifier. [`Algorithm`]
//!   enumerates the implementations compiled into this crate.
//! - [`StreamingDigest`] is the seam the verifier is generic over.
//!   [`DigestContext`] implements it for every built-in algorithm by
//!   dispatching to the RustCrypto and `xxhash-rust` hashers.
//! - [`DigestProvider`] bundles name resolution, digest lengths,
//!   availability, and the built-in self-tests. [`Registry`] is the
//!   provider backed by this crate.
//!
//! # Examples
//!
//! ```
//! use checksums::{DigestProvider, Registry, StreamingDigest};
//!
//! let registry = Registry::new();
//! let id = registry.map_name("sha-256").expect("known algorithm");
//! let mut ctx = registry.open(id)?;
//! ctx.write(b"ab");
//! let mut fork = ctx.duplicate()?;
//! fork.write(b"c");
//!
//! assert_eq!(
//!     fork.read().to_string(),
//!     "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
//! );
//! assert_ne!(ctx.read(), fork.read());
//! # Ok::<(), checksums::DigestError>(())
//! ```

mod algorithm;
mod digest;
mod error;
mod provider;
pub mod selftest;
pub mod strong;

pub use algorithm::{Algorithm, AlgorithmId};
pub use digest::{Digest, MAX_DIGEST_LEN};
pub use error::{DigestError, SelfTestError};
pub use provider::{DigestProvider, Registry};
pub use strong::{DigestContext, StreamingDigest};
