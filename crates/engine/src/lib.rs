#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `engine` checks that streaming digest implementations stay correct over
//! very long inputs. It streams a repeating pattern through one context for
//! N GiB, forks the context around the N-GiB mark, and compares the digests
//! at offsets -64, -1, 0, +1, and +64 with a table of known-good vectors.
//!
//! # Design
//!
//! - [`hex`] decodes and encodes vector digests.
//! - [`VectorTable`] holds [`TestVector`]s, built in or loaded from JSON.
//! - [`compare()`] checks one digest and records the [`Outcome`].
//! - [`checkpoint`] produces the five forked digests in a single pass.
//! - [`run_selftest`] handles zero-length runs.
//! - [`controller::run`] resolves names, dispatches, and returns a
//!   [`RunSummary`].
//!
//! Counted failures flow through an explicit [`RunContext`]; conditions that
//! end the run are returned as [`EngineError`]. Diagnostics are `tracing`
//! events under the `hashtest::*` targets defined by the `logging` crate.
//!
//! # Examples
//!
//! ```
//! use checksums::Registry;
//! use engine::{RunConfig, VectorTable, controller};
//!
//! // Zero GiB runs the built-in self-tests for every algorithm.
//! let summary = controller::run(&Registry::new(), &RunConfig::default(), &VectorTable::builtin())?;
//! assert!(summary.succeeded());
//! # Ok::<(), engine::EngineError>(())
//! ```

pub mod checkpoint;
mod compare;
pub mod controller;
mod error;
pub mod hex;
mod run;
mod selftest;
mod vectors;

pub use checkpoint::{Geometry, Offset, stream_checkpoints, verify_longtest};
pub use compare::{Label, Outcome, compare};
pub use controller::{MAX_GIGS, RunConfig};
pub use error::{EngineError, EngineResult, HexError, VectorError};
pub use run::{DEFAULT_MAX_ERRORS, RunContext, RunSummary};
pub use selftest::run_selftest;
pub use vectors::{TestVector, VectorTable};
