use clap::Parser;
use dupgroup::cli::Cli;
use dupgroup::error::{ExitCode, StructuredError};
use dupgroup::run_app;
use tempfile::tempdir;

#[test]
fn test_missing_report_file_exits_with_input_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let missing = dir.path().join("missing.scan");

    let cli = Cli::try_parse_from([
        "dupgroup",
        "--config",
        config.to_str().unwrap(),
        "report",
        "-f",
        missing.to_str().unwrap(),
    ])
    .unwrap();
    let err = run_app(cli).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::InputError);
    let structured = StructuredError::new(&err, ExitCode::for_error(&err));
    assert_eq!(structured.code, "DG002");
    assert_eq!(structured.exit_code, 2);
    assert!(structured.message.contains("missing.scan"));
    // Each cause in the chain is printed once
    assert_eq!(structured.message.matches("(os error").count(), 1);
    assert!(structured
        .message
        .starts_with("cannot read scan records: cannot open "));
}

#[test]
fn test_scan_of_missing_directory_is_general_error() {
    let dir = tempdir().unwrap();
    let config = dir.path().join("config.json");
    let missing = dir.path().join("nowhere");

    let cli = Cli::try_parse_from([
        "dupgroup",
        "--config",
        config.to_str().unwrap(),
        "scan",
        "-d",
        missing.to_str().unwrap(),
    ])
    .unwrap();
    let err = run_app(cli).unwrap_err();

    assert_eq!(ExitCode::for_error(&err), ExitCode::GeneralError);
    assert!(format!("{err:#}").contains("nowhere"));
}
