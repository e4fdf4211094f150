#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `logging` turns hashtest's `--verbose`/`--debug` counters into a
//! [`VerbosityConfig`] and renders `tracing` events emitted by the engine as
//! `hashtest: <message>` lines on a caller-supplied writer.
//!
//! # Design
//!
//! Diagnostics are ordinary `tracing` events tagged with one of the
//! [`target`] constants. [`DiagnosticLayer`] maps each target onto an
//! [`InfoFlag`] or [`DebugFlag`] and filters by the configured level.
//! Warnings and errors are never suppressed. [`SharedWriter`] lets the layer
//! and the command-line front end write to the same stream.
//!
//! # Examples
//!
//! ```
//! use logging::{SharedWriter, VerbosityConfig, subscriber, target};
//!
//! let out = SharedWriter::new(Vec::new());
//! let quiet = VerbosityConfig::from_verbose_level(0);
//! tracing::subscriber::with_default(subscriber(quiet, out.clone()), || {
//!     tracing::info!(target: target::SELFTEST, "suppressed");
//!     tracing::error!(target: target::RUN, "stopped after 50 errors.");
//! });
//! assert_eq!(out.contents(), "hashtest: stopped after 50 errors.\n");
//! ```

mod config;
mod levels;
mod tracing_bridge;
mod tracing_macros;
mod writer;

pub use config::VerbosityConfig;
pub use levels::{DebugFlag, DebugLevels, InfoFlag, InfoLevels};
pub use tracing_bridge::{DiagnosticLayer, PROGRAM_NAME, subscriber};
pub use writer::{SharedWriter, SharedWriterGuard};

/// Tracing targets understood by [`DiagnosticLayer`].
pub mod target {
    /// Computed digests and comparison outcomes.
    pub const DIGEST: &str = "hashtest::digest";
    /// Periodic streaming progress.
    pub const PROGRESS: &str = "hashtest::progress";
    /// Self-test results.
    pub const SELFTEST: &str = "hashtest::selftest";
    /// Context duplication points.
    pub const FORK: &str = "hashtest::fork";
    /// Test vector table loading and lookups.
    pub const VECTOR: &str = "hashtest::vector";
    /// Run-level notes and fatal conditions.
    pub const RUN: &str = "hashtest::run";
}
