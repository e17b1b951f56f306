//! Command-line interface definitions for dupgroup.
//!
//! This module defines all CLI arguments, subcommands, and options using the clap derive API.
//! Global options (verbosity, config file) apply to both subcommands.
//!
//! # Example
//!
//! ```bash
//! # Scan a tree and save the records
//! dupgroup scan -d /srv/data > data.scan
//!
//! # Report duplicates of at least 1 MiB from two hosts
//! dupgroup report -f host1.scan -f host2.scan --size 1MiB
//!
//! # Pipe a scan straight into a full listing
//! dupgroup scan -d . | dupgroup report --list-fields
//! ```

use clap::{Args, Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Find duplicate files by content hash, across hosts, aware of hard links.
///
/// `scan` writes one record per regular file; `report` groups records from any
/// number of scans and prints files whose content appears on two or more inodes.
#[derive(Debug, Parser)]
#[command(name = "dupgroup")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Increase verbosity level (-v for debug, -vv for trace)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress all diagnostics except errors and skipped-line reports
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Print fatal errors as JSON on stderr
    #[arg(long, global = true)]
    pub json_errors: bool,

    /// Configuration file (default: platform config directory)
    #[arg(long, value_name = "PATH", global = true, env = "DUPGROUP_CONFIG")]
    pub config: Option<PathBuf>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Walk a directory tree and print one record per regular file
    Scan(ScanArgs),
    /// Group scan records by content hash and report duplicates
    Report(ReportArgs),
}

/// Arguments for the scan subcommand.
#[derive(Debug, Args)]
pub struct ScanArgs {
    /// Root of the tree to scan
    #[arg(short = 'd', long, value_name = "DIR", default_value = ".")]
    pub start_directory: PathBuf,

    /// Field separator for output records (default: ASCII NUL)
    ///
    /// A single character, `\0`, `\t` or `NUL`.
    #[arg(short = 's', long, value_name = "SEP", value_parser = parse_separator)]
    pub field_separator: Option<char>,
}

/// Arguments for the report subcommand.
#[derive(Debug, Args)]
pub struct ReportArgs {
    /// File(s) to read records from (default: standard input)
    ///
    /// Repeatable. Use `-` or `__stdin__` to mix standard input with files.
    #[arg(short = 'f', long = "file", value_name = "FILE")]
    pub files: Vec<String>,

    /// Field separator used in the input records (default: ASCII NUL)
    ///
    /// A single character, `\0`, `\t` or `NUL`.
    #[arg(short = 's', long, value_name = "SEP", value_parser = parse_separator)]
    pub field_separator: Option<char>,

    /// Minimum file size to report, inclusive (e.g. 4096, 1KB, 1MiB)
    ///
    /// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
    #[arg(short = 'S', long, value_name = "SIZE", value_parser = parse_size)]
    pub size: Option<u64>,

    /// Print every file, whether or not it has duplicates
    #[arg(short = 'l', long)]
    pub list_fields: bool,

    /// Do not print a blank line between groups of duplicates
    #[arg(short = 'V', long, overrides_with = "no_suppress_vertical_whitespace")]
    pub suppress_vertical_whitespace: bool,

    /// Print a blank line between groups even if the config file suppresses it
    #[arg(long, overrides_with = "suppress_vertical_whitespace")]
    pub no_suppress_vertical_whitespace: bool,

    /// Output format
    #[arg(short, long, value_enum)]
    pub output: Option<OutputFormat>,

    /// Print the grouping index as a tree on stderr before the report
    #[arg(long)]
    pub dump_index: bool,
}

impl ReportArgs {
    /// Whether group separators are suppressed, given the configured default.
    ///
    /// The last of `-V` / `--no-suppress-vertical-whitespace` wins; with
    /// neither, the configured value applies.
    #[must_use]
    pub fn suppress_separators(&self, configured: bool) -> bool {
        if self.suppress_vertical_whitespace {
            true
        } else if self.no_suppress_vertical_whitespace {
            false
        } else {
            configured
        }
    }
}

/// Output format for reports.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Aligned text columns
    #[default]
    Text,
    /// JSON output for scripting
    Json,
    /// CSV output for spreadsheets
    Csv,
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
            OutputFormat::Csv => write!(f, "csv"),
        }
    }
}

/// Parse a field separator argument.
///
/// Accepts exactly one character, or one of the spellings `\0`, `NUL`
/// (any case) for the NUL character and `\t` for tab. Newline is rejected
/// because it ends records.
///
/// # Examples
///
/// ```
/// use dupgroup::cli::parse_separator;
///
/// assert_eq!(parse_separator("|").unwrap(), '|');
/// assert_eq!(parse_separator("\\0").unwrap(), '\0');
/// assert_eq!(parse_separator("nul").unwrap(), '\0');
/// assert!(parse_separator("::").is_err());
/// ```
///
/// # Errors
///
/// Returns an error for empty input, more than one character, or newline.
pub fn parse_separator(s: &str) -> Result<char, String> {
    match s {
        "\\0" => return Ok('\0'),
        "\\t" => return Ok('\t'),
        _ if s.eq_ignore_ascii_case("nul") => return Ok('\0'),
        _ => {}
    }

    let mut chars = s.chars();
    match (chars.next(), chars.next()) {
        (Some('\n'), None) => Err("Separator cannot be a newline".to_string()),
        (Some(c), None) => Ok(c),
        (None, _) => Err("Separator cannot be empty".to_string()),
        (Some(_), Some(_)) => Err(format!("Separator must be a single character: '{s}'")),
    }
}

/// Parse a human-readable size string into bytes.
///
/// Supports suffixes: B, KB, KiB, MB, MiB, GB, GiB, TB, TiB
/// Case-insensitive. Numbers without suffix are treated as bytes.
///
/// # Examples
///
/// ```
/// use dupgroup::cli::parse_size;
///
/// assert_eq!(parse_size("1024").unwrap(), 1024);
/// assert_eq!(parse_size("1KB").unwrap(), 1000);
/// assert_eq!(parse_size("1KiB").unwrap(), 1024);
/// assert_eq!(parse_size("1MiB").unwrap(), 1_048_576);
/// ```
/// # Errors
///
/// Returns an error if the string is empty, contains an invalid number,
/// a negative number, or an unknown size suffix.
pub fn parse_size(s: &str) -> Result<u64, String> {
    let s = s.trim();
    if s.is_empty() {
        return Err("Size cannot be empty".to_string());
    }

    // Plain integers stay exact; only suffixed values go through f64
    if let Ok(bytes) = s.parse::<u64>() {
        return Ok(bytes);
    }

    let (num_str, suffix) = match s.find(|c: char| !c.is_ascii_digit() && c != '.') {
        Some(idx) => (&s[..idx], s[idx..].trim().to_uppercase()),
        None => (s, String::new()),
    };

    let num: f64 = num_str
        .parse()
        .map_err(|_| format!("Invalid number: '{num_str}'"))?;

    let multiplier: u64 = match suffix.as_str() {
        "" | "B" => 1,
        "KB" | "K" => 1_000,
        "KIB" => 1_024,
        "MB" | "M" => 1_000_000,
        "MIB" => 1_048_576,
        "GB" | "G" => 1_000_000_000,
        "GIB" => 1_073_741_824,
        "TB" | "T" => 1_000_000_000_000,
        "TIB" => 1_099_511_627_776,
        _ => return Err(format!("Unknown size suffix: '{suffix}'")),
    };

    Ok((num * multiplier as f64) as u64)
}
