//! dupgroup - Hard-link aware duplicate file finder
//!
//! A scanner writes one record per regular file (host, content hash, device,
//! inode, link count, size, path). The report stage merges records from any
//! number of scans, possibly from different hosts, and groups them by
//! `(host, device, content hash)`. Paths sharing an inode are hard links of
//! one physical file and never count as duplicates of each other; a group is
//! a duplicate when its content lives on two or more inodes.

pub mod cli;
pub mod config;
pub mod duplicates;
pub mod error;
pub mod input;
pub mod logging;
pub mod output;
pub mod record;
pub mod scanner;

use std::io::{self, Write};

use anyhow::Context;
use bytesize::ByteSize;

use crate::cli::{Cli, Commands, ReportArgs, ScanArgs};
use crate::config::Config;
use crate::error::ExitCode;
use crate::input::InputSource;
use crate::output::ReportOptions;
use crate::record::printable_separator;

/// Run the selected subcommand.
///
/// Logging must already be initialized.
///
/// # Errors
///
/// Returns an error if an input source cannot be read, the scan root is
/// unusable, or output cannot be written.
pub fn run_app(cli: Cli) -> anyhow::Result<ExitCode> {
    let config = Config::load(cli.config.as_deref());

    match cli.command {
        Commands::Scan(args) => run_scan(&args, &config),
        Commands::Report(args) => run_report(&args, &config),
    }
}

fn run_scan(args: &ScanArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let separator = args.field_separator.unwrap_or_else(|| config.separator());
    let hostname = scanner::hostname();

    log::info!("start_directory => {}", args.start_directory.display());
    log::info!("field_separator => '{}'", printable_separator(separator));
    log::info!("hostname => {hostname}");

    let stdout = io::stdout();
    let summary = match scanner::scan_tree(&args.start_directory, separator, &hostname, stdout.lock())
    {
        Ok(summary) => summary,
        Err(scanner::ScanError::Output(e)) if e.kind() == io::ErrorKind::BrokenPipe => {
            log::debug!("Output closed early, stopping scan");
            return Ok(ExitCode::Success);
        }
        Err(e) => {
            return Err(e).with_context(|| {
                format!("cannot scan {}", args.start_directory.display())
            })
        }
    };

    log::info!(
        "Scanned {} file(s), {}",
        summary.files,
        ByteSize::b(summary.total_size)
    );
    if summary.walk_errors > 0 || summary.read_errors > 0 {
        log::warn!(
            "{} path(s) could not be visited, {} file(s) could not be fully read",
            summary.walk_errors,
            summary.read_errors
        );
    }

    Ok(ExitCode::Success)
}

fn run_report(args: &ReportArgs, config: &Config) -> anyhow::Result<ExitCode> {
    let separator = args.field_separator.unwrap_or_else(|| config.separator());
    let options = ReportOptions {
        min_size: args.size.unwrap_or(config.min_size),
        list_all: args.list_fields,
        suppress_separators: args.suppress_separators(config.suppress_vertical_whitespace),
    };
    let format = args.output.unwrap_or(config.output);
    let sources: Vec<InputSource> = args.files.iter().map(|f| InputSource::from_arg(f)).collect();

    let names: Vec<String> = if sources.is_empty() {
        vec![InputSource::Stdin.to_string()]
    } else {
        sources.iter().map(ToString::to_string).collect()
    };
    log::info!("files => {}", names.join(", "));
    log::info!("field_separator => '{}'", printable_separator(separator));
    log::info!("size => {}", options.min_size);
    log::info!("list_fields => {}", options.list_all);
    log::info!("suppress_vertical_whitespace => {}", options.suppress_separators);

    let (index, summary) =
        input::read_sources(&sources, separator).context("cannot read scan records")?;

    if !summary.skipped.is_empty() {
        log::warn!(
            "{} malformed line(s) skipped out of {}",
            summary.skipped.len(),
            summary.lines
        );
    }

    if args.dump_index {
        eprint!("{}", index.dump());
    }

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let emitted = match output::write_report(&index, &options, format, &mut out) {
        Ok(n) => n,
        Err(e) if e.is_broken_pipe() => {
            log::debug!("Output closed early, stopping report");
            return Ok(ExitCode::Success);
        }
        Err(e) => return Err(e).context("cannot write report"),
    };
    if let Err(e) = out.flush() {
        if e.kind() != io::ErrorKind::BrokenPipe {
            return Err(e).context("cannot write report");
        }
    }

    let stats = index.stats();
    log::info!(
        "{} record(s) from {} source(s); {} group(s) reported, {} duplicate group(s), {} reclaimable",
        summary.records,
        summary.sources,
        emitted,
        stats.duplicate_groups,
        ByteSize::b(stats.reclaimable_bytes)
    );

    Ok(ExitCode::Success)
}
