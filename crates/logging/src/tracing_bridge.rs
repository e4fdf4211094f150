//! crates/logging/src/tracing_bridge.rs
//! Bridge between the tracing crate and hashtest's verbosity system.
//!
//! Components emit ordinary `tracing` events under the `hashtest::*`
//! targets listed in [`target`](crate::target). [`DiagnosticLayer`] maps each
//! target to an info or debug flag, consults the [`VerbosityConfig`], and
//! renders surviving events as `hashtest: <message>` lines.
//!
//! Filtering rules:
//!
//! - `ERROR` and `WARN` events are always rendered.
//! - `INFO` events need their info flag at level 1 or above.
//! - `DEBUG` events need their debug flag at level 1 or above; targets
//!   without a debug flag fall back to their info flag at level 2.
//! - `TRACE` events need their debug flag at level 2 or above.

use std::fmt;
use std::io::Write;

use tracing::subscriber::Interest;
use tracing::{Level, Metadata, Subscriber};
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::layer::{Context, Layer, SubscriberExt};

use super::config::VerbosityConfig;
use super::levels::{DebugFlag, InfoFlag};
use crate::target;

/// Prefix written before every diagnostic line.
pub const PROGRAM_NAME: &str = "hashtest";

/// A tracing layer that renders events according to a [`VerbosityConfig`].
pub struct DiagnosticLayer<W> {
    config: VerbosityConfig,
    make_writer: W,
}

impl<W> DiagnosticLayer<W> {
    /// Create a new layer writing through `make_writer`.
    #[must_use]
    pub const fn new(config: VerbosityConfig, make_writer: W) -> Self {
        Self {
            config,
            make_writer,
        }
    }

    /// Map a tracing target to an info flag.
    fn target_to_info_flag(target: &str) -> InfoFlag {
        match target {
            target::DIGEST => InfoFlag::Digest,
            target::PROGRESS => InfoFlag::Progress,
            target::SELFTEST => InfoFlag::Selftest,
            _ => InfoFlag::Misc,
        }
    }

    /// Map a tracing target to a debug flag.
    fn target_to_debug_flag(target: &str) -> Option<DebugFlag> {
        match target {
            target::FORK => Some(DebugFlag::Fork),
            target::VECTOR => Some(DebugFlag::Vector),
            _ => None,
        }
    }

    /// Decide whether an event at `level` for `target` is rendered.
    fn allows(&self, level: &Level, target: &str) -> bool {
        match *level {
            Level::ERROR | Level::WARN => true,
            Level::INFO => self.config.info.get(Self::target_to_info_flag(target)) >= 1,
            Level::DEBUG => match Self::target_to_debug_flag(target) {
                Some(flag) => self.config.debug.get(flag) >= 1,
                None => self.config.info.get(Self::target_to_info_flag(target)) >= 2,
            },
            Level::TRACE => {
                Self::target_to_debug_flag(target).is_some_and(|flag| self.config.debug.get(flag) >= 2)
            }
        }
    }
}

impl<W> fmt::Debug for DiagnosticLayer<W> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DiagnosticLayer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl<S, W> Layer<S> for DiagnosticLayer<W>
where
    S: Subscriber,
    W: for<'a> MakeWriter<'a> + 'static,
{
    fn register_callsite(&self, _metadata: &'static Metadata<'static>) -> Interest {
        // Several subscribers with different configurations may coexist
        // (one per CLI run), so every event is filtered dynamically.
        Interest::sometimes()
    }

    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        !metadata.is_event() || self.allows(metadata.level(), metadata.target())
    }

    fn on_event(&self, event: &tracing::Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        if !self.allows(metadata.level(), metadata.target()) {
            return;
        }

        let mut visitor = MessageVisitor::default();
        event.record(&mut visitor);
        if let Some(message) = visitor.message {
            let mut writer = self.make_writer.make_writer();
            let _ = writeln!(writer, "{PROGRAM_NAME}: {message}");
        }
    }
}

/// Visitor to extract message from tracing event.
#[derive(Default)]
struct MessageVisitor {
    message: Option<String>,
}

impl tracing::field::Visit for MessageVisitor {
    fn record_debug(&mut self, field: &tracing::field::Field, value: &dyn fmt::Debug) {
        if field.name() == "message" {
            self.message = Some(format!("{value:?}"));
        }
    }

    fn record_str(&mut self, field: &tracing::field::Field, value: &str) {
        if field.name() == "message" {
            self.message = Some(value.to_owned());
        }
    }
}

/// Build a subscriber that renders diagnostics through `make_writer`.
///
/// The subscriber is meant to be installed for the duration of one run with
/// [`tracing::subscriber::with_default`].
///
/// # Example
///
/// ```
/// use logging::{SharedWriter, VerbosityConfig, subscriber};
///
/// let stderr = SharedWriter::new(Vec::new());
/// let config = VerbosityConfig::from_verbose_level(1);
/// tracing::subscriber::with_default(subscriber(config, stderr.clone()), || {
///     tracing::info!(target: "hashtest::progress", "16 GiB so far hashed with SHA1");
///     tracing::debug!(target: "hashtest::fork", "not shown at level 1");
/// });
/// assert_eq!(stderr.contents(), "hashtest: 16 GiB so far hashed with SHA1\n");
/// ```
pub fn subscriber<W>(config: VerbosityConfig, make_writer: W) -> impl Subscriber + Send + Sync
where
    W: for<'a> MakeWriter<'a> + Send + Sync + 'static,
{
    tracing_subscriber::registry().with(DiagnosticLayer::new(config, make_writer))
}
