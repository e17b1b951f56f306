//! Logging infrastructure for dupgroup.
//!
//! All diagnostics (skipped lines, argument echo, run summaries) go through
//! the `log` facade to stderr via `env_logger`, so the report on stdout never
//! carries diagnostic text. Levels are determined by (in priority order):
//!
//! 1. `RUST_LOG` environment variable (if set)
//! 2. CLI flags: `--quiet` (errors and skipped-line reports only) or
//!    `--verbose` (debug/trace)
//! 3. Default: info level
//!
//! # Example
//!
//! ```rust,no_run
//! use dupgroup::logging::init_logging;
//!
//! // -v
//! init_logging(1, false);
//! log::debug!("Debug info here");
//! ```

use env_logger::{Builder, Target};
use log::LevelFilter;
use std::env;
use std::io::Write;

/// Log target for reports of skipped input lines.
///
/// These stay visible under `--quiet`.
pub const SKIPPED_LINE_TARGET: &str = "dupgroup::skipped";

/// Initialize the logging subsystem based on CLI verbosity flags.
///
/// Must be called once, before any logging calls are made.
///
/// # Arguments
///
/// * `verbose` - Verbosity count from CLI (0=info, 1=debug, 2+=trace)
/// * `quiet` - If true, only show errors and skipped lines (overridden by RUST_LOG)
///
/// # Panics
///
/// Panics if called more than once, as `env_logger` can only be
/// initialized once per process.
pub fn init_logging(verbose: u8, quiet: bool) {
    let use_env = env::var("RUST_LOG").is_ok();

    let mut builder = Builder::new();
    builder.target(Target::Stderr);

    if use_env {
        builder.parse_default_env();
    } else {
        builder.filter_level(determine_level(verbose, quiet));
        if quiet {
            builder.filter_module(SKIPPED_LINE_TARGET, LevelFilter::Warn);
        }
    }

    configure_format(&mut builder, verbose);
    builder.init();

    log::debug!("Logging initialized at level: {:?}", log::max_level());
}

/// Determine the log level from CLI flags.
fn determine_level(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }
}

/// Configure the log format.
///
/// Normal runs print `dupgroup: LEVEL message`; with `-v` the module path
/// is added, and with `-vv` a timestamp as well.
fn configure_format(builder: &mut Builder, verbose: u8) {
    builder.format(move |buf, record| {
        let level = record.level();
        let level_style = buf.default_level_style(level);
        let timestamp = buf.timestamp_millis();

        match verbose {
            0 => writeln!(
                buf,
                "dupgroup: {level_style}{:<5}{level_style:#} {}",
                level,
                record.args()
            ),
            1 => writeln!(
                buf,
                "dupgroup: {level_style}{:<5}{level_style:#} [{}] {}",
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            ),
            _ => writeln!(
                buf,
                "{} dupgroup: {level_style}{:<5}{level_style:#} [{}] {}",
                timestamp,
                level,
                record.module_path().unwrap_or("unknown"),
                record.args()
            ),
        }
    });
}
