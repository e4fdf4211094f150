#![deny(unsafe_code)]
#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # Overview
//!
//! `cli` is the command-line front end of `hashtest`. It parses the
//! arguments, configures diagnostics, runs the [`engine`] controller against
//! the built-in [`checksums::Registry`], and maps the outcome to an exit
//! code.
//!
//! # Design
//!
//! [`run`] accepts an argument iterator, a handle for standard output, and
//! the standard error stream. Standard error is wrapped in a
//! [`SharedWriter`] so that the diagnostic layer and the front end's own
//! messages interleave on the same stream. A `tracing` subscriber built by
//! [`logging::subscriber`] is installed for the duration of the run only.
//!
//! # Errors
//!
//! Usage errors, an out-of-range `--gigs`, unreadable vector files, and
//! fatal engine errors all produce a `hashtest: <message>` line on standard
//! error and exit code `1`. A run that completes returns `1` if any error
//! was counted and `0` otherwise; missing test vectors alone do not change
//! the exit code.
//!
//! # Examples
//!
//! ```
//! use logging::SharedWriter;
//!
//! let mut stdout = Vec::new();
//! let stderr = SharedWriter::new(Vec::new());
//! let status = cli::run(["hashtest", "--version"], &mut stdout, stderr.clone());
//!
//! assert_eq!(status, 0);
//! assert!(String::from_utf8_lossy(&stdout).starts_with("hashtest "));
//! assert!(stderr.contents().is_empty());
//! ```

use std::ffi::OsString;
use std::io::Write;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use checksums::{DigestProvider, Registry};
use clap::error::{ContextKind, ContextValue, ErrorKind};
use clap::{Arg, ArgAction, Command, builder::OsStringValueParser, value_parser};
use engine::{EngineError, MAX_GIGS, RunConfig, RunSummary, VectorTable, controller};
use logging::{PROGRAM_NAME, SharedWriter, VerbosityConfig, target};

/// Maximum exit code representable by a Unix process.
const MAX_EXIT_CODE: i32 = u8::MAX as i32;

/// Usage text printed by `--help`.
const HELP_TEXT: &str = concat!(
    "usage: hashtest [options] [algos]\n",
    "Options:\n",
    "  --verbose       print timings etc.\n",
    "  --debug         also print debug events\n",
    "  --gigs N        Run a test on N GiB\n",
    "  --vectors FILE  Load additional test vectors from a JSON file\n",
    "  --version       Print the version and exit\n",
);

/// Parsed command produced by [`parse_args`].
#[derive(Debug, Default, PartialEq, Eq)]
struct ParsedArgs {
    show_help: bool,
    show_version: bool,
    verbose: u8,
    debug: u8,
    gigs: Option<OsString>,
    vectors: Option<PathBuf>,
    algorithms: Vec<OsString>,
}

impl ParsedArgs {
    /// Verbosity derived from `--verbose` and `--debug`.
    fn verbosity(&self) -> VerbosityConfig {
        let level = self.verbose.saturating_add(self.debug.saturating_mul(2));
        let config = VerbosityConfig::from_verbose_level(level);
        if self.debug > 0 {
            config.with_debug()
        } else {
            config
        }
    }
}

/// Builds the `clap` command used for parsing.
fn clap_command() -> Command {
    Command::new("hashtest")
        .disable_help_flag(true)
        .disable_version_flag(true)
        .arg(
            Arg::new("help")
                .long("help")
                .help("Print usage and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("version")
                .long("version")
                .help("Print the version and exit.")
                .action(ArgAction::SetTrue),
        )
        .arg(
            Arg::new("verbose")
                .long("verbose")
                .help("Print timings etc.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("debug")
                .long("debug")
                .help("Raise verbosity by two and enable debug events.")
                .action(ArgAction::Count),
        )
        .arg(
            Arg::new("gigs")
                .long("gigs")
                .value_name("N")
                .help("Run a test on N GiB.")
                .allow_negative_numbers(true)
                .value_parser(OsStringValueParser::new()),
        )
        .arg(
            Arg::new("vectors")
                .long("vectors")
                .value_name("FILE")
                .help("Load additional test vectors from a JSON file.")
                .value_parser(value_parser!(PathBuf)),
        )
        .arg(
            Arg::new("algorithms")
                .value_name("ALGO")
                .num_args(0..)
                .action(ArgAction::Append)
                .value_parser(OsStringValueParser::new()),
        )
}

/// Parses command-line arguments into a [`ParsedArgs`] structure.
fn parse_args<I, S>(arguments: I) -> Result<ParsedArgs, clap::Error>
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
{
    let mut args: Vec<OsString> = arguments.into_iter().map(Into::into).collect();

    if args.is_empty() {
        args.push(OsString::from("hashtest"));
    }

    let mut matches = clap_command().try_get_matches_from(args)?;

    Ok(ParsedArgs {
        show_help: matches.get_flag("help"),
        show_version: matches.get_flag("version"),
        verbose: matches.get_count("verbose"),
        debug: matches.get_count("debug"),
        gigs: matches.remove_one::<OsString>("gigs"),
        vectors: matches.remove_one::<PathBuf>("vectors"),
        algorithms: matches
            .remove_many::<OsString>("algorithms")
            .map(Iterator::collect)
            .unwrap_or_default(),
    })
}

/// Renders a parse failure the way the classic tool words it.
fn describe_parse_error(error: &clap::Error) -> String {
    if error.kind() == ErrorKind::UnknownArgument
        && let Some(ContextValue::String(arg)) = error.get(ContextKind::InvalidArg)
    {
        return format!("unknown option '{arg}'");
    }
    let rendered = error.to_string();
    let first = rendered.lines().next().unwrap_or_default();
    first.strip_prefix("error: ").unwrap_or(first).to_owned()
}

/// Validates the `--gigs` operand.
fn parse_gigs(value: Option<&OsString>) -> Result<u32, String> {
    let Some(value) = value else {
        return Ok(0);
    };
    value
        .to_str()
        .and_then(|text| text.trim().parse::<u32>().ok())
        .filter(|&gigs| gigs <= MAX_GIGS)
        .ok_or_else(|| format!("value for --gigs must be in the range 0 to {MAX_GIGS}"))
}

/// Formats a run duration for the closing summary.
fn format_elapsed(elapsed: Duration) -> String {
    if elapsed < Duration::from_secs(1) {
        format!("{}ms", elapsed.as_millis())
    } else {
        format!("{:.1}s", elapsed.as_secs_f64())
    }
}

/// Writes a `hashtest: <message>` line directly to standard error.
fn report<W: Write>(stderr: &SharedWriter<W>, message: &str) {
    let _ = writeln!(stderr.lock(), "{PROGRAM_NAME}: {message}");
}

/// Runs the CLI using the provided argument iterator and output handles.
///
/// Returns the process exit code: `0` when every requested test ran without
/// a counted error, `1` otherwise.
pub fn run<I, S, Out, Err>(arguments: I, stdout: &mut Out, stderr: Err) -> i32
where
    I: IntoIterator<Item = S>,
    S: Into<OsString>,
    Out: Write,
    Err: Write + Send + 'static,
{
    let stderr = SharedWriter::new(stderr);
    match parse_args(arguments) {
        Ok(parsed) => execute(parsed, stdout, &stderr),
        Err(error) => {
            report(&stderr, &describe_parse_error(&error));
            1
        }
    }
}

fn execute<Out, Err>(parsed: ParsedArgs, stdout: &mut Out, stderr: &SharedWriter<Err>) -> i32
where
    Out: Write,
    Err: Write + Send + 'static,
{
    if parsed.show_help {
        return i32::from(stdout.write_all(HELP_TEXT.as_bytes()).is_err());
    }

    if parsed.show_version {
        let banner = format!("{PROGRAM_NAME} {}\n", env!("CARGO_PKG_VERSION"));
        return i32::from(stdout.write_all(banner.as_bytes()).is_err());
    }

    let gigs = match parse_gigs(parsed.gigs.as_ref()) {
        Ok(gigs) => gigs,
        Err(message) => {
            report(stderr, &message);
            return 1;
        }
    };

    let verbosity = parsed.verbosity();
    let config = RunConfig {
        gigs,
        algorithms: parsed
            .algorithms
            .iter()
            .map(|name| name.to_string_lossy().into_owned())
            .collect(),
        ..RunConfig::default()
    };

    let dispatch = logging::subscriber(verbosity.clone(), stderr.clone());
    tracing::subscriber::with_default(dispatch, || {
        execute_run(&config, parsed.vectors.as_deref(), verbosity.is_verbose())
    })
}

/// Loads vectors, runs the controller, and reports the outcome.
fn execute_run(config: &RunConfig, vectors: Option<&std::path::Path>, verbose: bool) -> i32 {
    let registry = Registry::new();

    let mut table = VectorTable::builtin();
    if let Some(path) = vectors {
        match VectorTable::load(path, |name| registry.map_name(name)) {
            Ok(extra) => table.prepend(extra),
            Err(error) => {
                tracing::error!(target: target::RUN, "{error}");
                return 1;
            }
        }
    }

    let started = Instant::now();
    match controller::run(&registry, config, &table) {
        Ok(summary) => {
            if verbose {
                tracing::info!(
                    target: target::RUN,
                    "All tests completed in {}.  Errors: {}",
                    format_elapsed(started.elapsed()),
                    summary.errors
                );
            }
            status_from(&summary)
        }
        Err(error) => {
            report_fatal(&error);
            1
        }
    }
}

fn report_fatal(error: &EngineError) {
    if !error.is_reported() {
        tracing::error!(target: target::RUN, "{error}");
    }
}

const fn status_from(summary: &RunSummary) -> i32 {
    if summary.succeeded() { 0 } else { 1 }
}

/// Converts a numeric exit code into an [`std::process::ExitCode`].
#[must_use]
pub fn exit_code_from(status: i32) -> std::process::ExitCode {
    std::process::ExitCode::from(exit_status_byte(status))
}

fn exit_status_byte(status: i32) -> u8 {
    u8::try_from(status.clamp(0, MAX_EXIT_CODE)).unwrap_or(u8::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run_with_args<const N: usize>(args: [&str; N]) -> (i32, String, String) {
        let mut stdout = Vec::new();
        let stderr = SharedWriter::new(Vec::new());
        let code = run(args, &mut stdout, stderr.clone());
        (
            code,
            String::from_utf8(stdout).expect("utf-8 stdout"),
            stderr.contents(),
        )
    }

    // ------------------------------------------------------------------
    // Argument parsing
    // ------------------------------------------------------------------

    #[test]
    fn parse_args_defaults() {
        let parsed = parse_args(["hashtest"]).expect("parse");
        assert_eq!(parsed, ParsedArgs::default());
    }

    #[test]
    fn parse_args_counts_verbose_and_debug() {
        let parsed = parse_args(["hashtest", "--verbose", "--debug", "--verbose"]).expect("parse");
        assert_eq!(parsed.verbose, 2);
        assert_eq!(parsed.debug, 1);
        let config = parsed.verbosity();
        assert_eq!(config, VerbosityConfig::from_verbose_level(4).with_debug());
    }

    #[test]
    fn debug_alone_enables_notes_and_debug_events() {
        let parsed = parse_args(["hashtest", "--debug"]).expect("parse");
        let config = parsed.verbosity();
        assert!(config.is_verbose());
        assert!(config.debug.fork >= 1);
    }

    #[test]
    fn parse_args_collects_algorithms_after_double_dash() {
        let parsed = parse_args(["hashtest", "--gigs", "2", "sha1", "--", "--weird"]).expect("parse");
        assert_eq!(parsed.gigs, Some(OsString::from("2")));
        assert_eq!(
            parsed.algorithms,
            [OsString::from("sha1"), OsString::from("--weird")]
        );
    }

    #[test]
    fn parse_args_accepts_vectors_path() {
        let parsed = parse_args(["hashtest", "--vectors", "extra.json"]).expect("parse");
        assert_eq!(parsed.vectors, Some(PathBuf::from("extra.json")));
    }

    #[test]
    fn unknown_option_uses_classic_wording() {
        let error = parse_args(["hashtest", "--bogus"]).expect_err("unknown option");
        assert_eq!(describe_parse_error(&error), "unknown option '--bogus'");
    }

    #[test]
    fn parse_gigs_bounds() {
        assert_eq!(parse_gigs(None), Ok(0));
        assert_eq!(parse_gigs(Some(&OsString::from("0"))), Ok(0));
        assert_eq!(parse_gigs(Some(&OsString::from("1048576"))), Ok(MAX_GIGS));
        for bad in ["1048577", "-1", "many", ""] {
            assert_eq!(
                parse_gigs(Some(&OsString::from(bad))),
                Err("value for --gigs must be in the range 0 to 1048576".to_owned())
            );
        }
    }

    #[test]
    fn format_elapsed_switches_units() {
        assert_eq!(format_elapsed(Duration::from_millis(250)), "250ms");
        assert_eq!(format_elapsed(Duration::from_millis(2500)), "2.5s");
    }

    #[test]
    fn exit_code_is_clamped() {
        assert_eq!(exit_status_byte(0), 0);
        assert_eq!(exit_status_byte(1), 1);
        assert_eq!(exit_status_byte(-5), 0);
        assert_eq!(exit_status_byte(1000), 255);
    }

    // ------------------------------------------------------------------
    // End-to-end runs
    // ------------------------------------------------------------------

    #[test]
    fn help_goes_to_stdout() {
        let (code, stdout, stderr) = run_with_args(["hashtest", "--help"]);
        assert_eq!(code, 0);
        assert!(stdout.starts_with("usage: hashtest [options] [algos]\n"));
        assert!(stderr.is_empty());
    }

    #[test]
    fn unknown_option_is_fatal() {
        let (code, stdout, stderr) = run_with_args(["hashtest", "--frobnicate"]);
        assert_eq!(code, 1);
        assert!(stdout.is_empty());
        assert_eq!(stderr, "hashtest: unknown option '--frobnicate'\n");
    }

    #[test]
    fn out_of_range_gigs_is_fatal() {
        let (code, _, stderr) = run_with_args(["hashtest", "--gigs", "2000000"]);
        assert_eq!(code, 1);
        assert_eq!(
            stderr,
            "hashtest: value for --gigs must be in the range 0 to 1048576\n"
        );
    }

    #[test]
    fn invalid_algorithm_is_fatal() {
        let (code, _, stderr) = run_with_args(["hashtest", "sha1", "NOPE"]);
        assert_eq!(code, 1);
        assert_eq!(stderr, "hashtest: invalid algorithm 'NOPE'\n");
    }

    #[test]
    fn quiet_selftest_run_prints_nothing() {
        let (code, stdout, stderr) = run_with_args(["hashtest", "sha1", "md5"]);
        assert_eq!(code, 0);
        assert!(stdout.is_empty());
        assert!(stderr.is_empty());
    }

    #[test]
    fn verbose_selftest_run_reports_each_algorithm() {
        let (code, _, stderr) = run_with_args(["hashtest", "--verbose", "sha256", "xxh64"]);
        assert_eq!(code, 0);
        let lines: Vec<&str> = stderr.lines().collect();
        assert_eq!(lines[0], "hashtest: extended selftest for SHA256 (5) passed");
        assert_eq!(
            lines[1],
            "hashtest: extended selftest for XXH64 (10) not implemented"
        );
        assert!(lines[2].starts_with("hashtest: All tests completed in "));
        assert!(lines[2].ends_with(".  Errors: 0"));
    }

    #[test]
    fn unreadable_vector_file_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let missing = dir.path().join("absent.json");
        let missing = missing.to_str().expect("utf-8 path");
        let (code, _, stderr) = run_with_args(["hashtest", "--vectors", missing, "sha1"]);
        assert_eq!(code, 1);
        assert!(stderr.starts_with("hashtest: failed to read test vectors from "));
    }

    #[test]
    fn malformed_vector_file_is_fatal() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("bad.json");
        std::fs::write(
            &path,
            r#"{"vectors": [{"algorithm": "SHA1", "gigs": 1, "offset": 3, "digest": "00"}]}"#,
        )
        .expect("write vectors");
        let path = path.to_str().expect("utf-8 path");
        let (code, _, stderr) = run_with_args(["hashtest", "--vectors", path]);
        assert_eq!(code, 1);
        assert_eq!(
            stderr,
            "hashtest: test vector 0: offset 3 is not a checkpoint offset\n"
        );
    }
}
