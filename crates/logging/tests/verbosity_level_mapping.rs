//! Integration tests for verbosity level mapping and message filtering.
//!
//! Test coverage:
//! 1. `--verbose` counts map onto info and debug levels
//! 2. Rendered output for each level, captured through [`SharedWriter`]
//! 3. `--debug` raising debug levels without enabling notes

use logging::{DebugFlag, InfoFlag, SharedWriter, VerbosityConfig, subscriber, target};
use logging::{trace_fork, trace_progress, trace_selftest};

fn render(config: VerbosityConfig) -> String {
    let out = SharedWriter::new(Vec::new());
    tracing::subscriber::with_default(subscriber(config, out.clone()), || {
        trace_progress!("16 GiB so far hashed with SHA1");
        trace_selftest!("extended selftest for SHA1 (3) passed");
        trace_fork!("forked at 1073741824 bytes");
        tracing::trace!(target: target::VECTOR, "lookup SHA1 256 +64");
        tracing::warn!(target: target::DIGEST, "256 GiB  -1 SHA1       deadbeef");
        tracing::error!(target: target::RUN, "invalid algorithm 'FOO'");
    });
    out.contents()
}

// ============================================================================
// Test 1: Level Mapping
// ============================================================================

#[test]
fn level_two_enables_debug_flags() {
    let config = VerbosityConfig::from_verbose_level(2);
    assert_eq!(config.info.get(InfoFlag::Digest), 2);
    assert_eq!(config.debug.get(DebugFlag::Fork), 1);
    assert_eq!(config.debug.get(DebugFlag::Vector), 1);
}

#[test]
fn each_level_is_at_least_as_verbose_as_the_last() {
    let flags = [InfoFlag::Digest, InfoFlag::Misc, InfoFlag::Progress, InfoFlag::Selftest];
    for level in 0..4u8 {
        let lower = VerbosityConfig::from_verbose_level(level);
        let higher = VerbosityConfig::from_verbose_level(level + 1);
        for flag in flags {
            assert!(higher.info.get(flag) >= lower.info.get(flag));
        }
        assert!(higher.debug.get(DebugFlag::Fork) >= lower.debug.get(DebugFlag::Fork));
    }
}

// ============================================================================
// Test 2: Rendered Output
// ============================================================================

#[test]
fn quiet_shows_only_warnings_and_errors() {
    let output = render(VerbosityConfig::from_verbose_level(0));
    assert_eq!(
        output,
        "hashtest: 256 GiB  -1 SHA1       deadbeef\nhashtest: invalid algorithm 'FOO'\n"
    );
}

#[test]
fn level_one_adds_notes() {
    let output = render(VerbosityConfig::from_verbose_level(1));
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "hashtest: 16 GiB so far hashed with SHA1");
    assert_eq!(lines[1], "hashtest: extended selftest for SHA1 (3) passed");
}

#[test]
fn level_two_adds_fork_traces() {
    let output = render(VerbosityConfig::from_verbose_level(2));
    assert!(output.contains("hashtest: forked at 1073741824 bytes\n"));
    assert!(!output.contains("lookup SHA1"));
}

#[test]
fn level_three_adds_vector_traces() {
    let output = render(VerbosityConfig::from_verbose_level(3));
    assert!(output.contains("hashtest: lookup SHA1 256 +64\n"));
    assert_eq!(output.lines().count(), 6);
}

// ============================================================================
// Test 3: Debug Switch
// ============================================================================

#[test]
fn debug_switch_enables_forks_without_notes() {
    let output = render(VerbosityConfig::from_verbose_level(0).with_debug());
    assert!(output.contains("forked at"));
    assert!(!output.contains("so far hashed"));
}

#[test]
fn subscribers_are_independent() {
    let quiet = render(VerbosityConfig::from_verbose_level(0));
    let loud = render(VerbosityConfig::from_verbose_level(3));
    let quiet_again = render(VerbosityConfig::from_verbose_level(0));
    assert!(loud.len() > quiet.len());
    assert_eq!(quiet, quiet_again);
}
