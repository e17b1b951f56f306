use clap::Parser;
use dupgroup::cli::{Cli, Commands, OutputFormat};
use std::path::PathBuf;

#[test]
fn test_report_defaults() {
    let cli = Cli::try_parse_from(["dupgroup", "report"]).unwrap();
    let Commands::Report(args) = cli.command else {
        panic!("Expected report subcommand");
    };

    assert!(args.files.is_empty());
    assert_eq!(args.field_separator, None);
    assert_eq!(args.size, None);
    assert!(!args.list_fields);
    assert!(!args.suppress_vertical_whitespace);
    assert_eq!(args.output, None);
}

#[test]
fn test_report_all_short_flags() {
    let cli = Cli::try_parse_from([
        "dupgroup", "report", "-f", "a.scan", "-f", "-", "-s", "|", "-S", "1KiB", "-l", "-V",
        "-o", "json",
    ])
    .unwrap();
    let Commands::Report(args) = cli.command else {
        panic!("Expected report subcommand");
    };

    assert_eq!(args.files, vec!["a.scan".to_string(), "-".to_string()]);
    assert_eq!(args.field_separator, Some('|'));
    assert_eq!(args.size, Some(1024));
    assert!(args.list_fields);
    assert!(args.suppress_vertical_whitespace);
    assert_eq!(args.output, Some(OutputFormat::Json));
}

#[test]
fn test_report_separator_spellings() {
    for spelling in ["\\0", "NUL", "nul"] {
        let cli = Cli::try_parse_from(["dupgroup", "report", "-s", spelling]).unwrap();
        let Commands::Report(args) = cli.command else {
            panic!("Expected report subcommand");
        };
        assert_eq!(args.field_separator, Some('\0'));
    }
}

#[test]
fn test_multi_character_separator_rejected() {
    assert!(Cli::try_parse_from(["dupgroup", "report", "-s", "::"]).is_err());
    assert!(Cli::try_parse_from(["dupgroup", "scan", "-s", "\n"]).is_err());
}

#[test]
fn test_scan_defaults_and_flags() {
    let cli = Cli::try_parse_from(["dupgroup", "scan"]).unwrap();
    let Commands::Scan(args) = cli.command else {
        panic!("Expected scan subcommand");
    };
    assert_eq!(args.start_directory, PathBuf::from("."));
    assert_eq!(args.field_separator, None);

    let cli = Cli::try_parse_from(["dupgroup", "scan", "-d", "/srv/data/", "-s", "\\t"]).unwrap();
    let Commands::Scan(args) = cli.command else {
        panic!("Expected scan subcommand");
    };
    assert_eq!(args.start_directory, PathBuf::from("/srv/data/"));
    assert_eq!(args.field_separator, Some('\t'));
}

#[test]
fn test_global_flags_after_subcommand() {
    let cli = Cli::try_parse_from(["dupgroup", "report", "-vv", "--json-errors"]).unwrap();
    assert_eq!(cli.verbose, 2);
    assert!(cli.json_errors);
    assert!(Cli::try_parse_from(["dupgroup", "-q", "-v", "report"]).is_err());
}

#[test]
fn test_invalid_size_rejected() {
    assert!(Cli::try_parse_from(["dupgroup", "report", "-S", "lots"]).is_err());
}
