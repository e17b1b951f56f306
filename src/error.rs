//! Structured error handling and exit codes.

use serde::Serialize;

use crate::input::InputError;

/// Exit codes for dupgroup.
///
/// - 0: Success (report or scan completed, whether or not duplicates exist)
/// - 1: General error (unexpected failure)
/// - 2: Input error (a record source could not be opened or read)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ExitCode {
    /// Success: the run completed normally.
    Success = 0,
    /// General error: An unexpected error occurred.
    GeneralError = 1,
    /// Input error: a source could not be opened or read.
    InputError = 2,
}

impl ExitCode {
    /// Get the numeric exit code.
    #[must_use]
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Get the machine-readable code prefix.
    #[must_use]
    pub fn code_prefix(self) -> &'static str {
        match self {
            Self::Success => "DG000",
            Self::GeneralError => "DG001",
            Self::InputError => "DG002",
        }
    }

    /// Pick the exit code for a fatal error.
    #[must_use]
    pub fn for_error(err: &anyhow::Error) -> Self {
        if err.chain().any(|cause| cause.downcast_ref::<InputError>().is_some()) {
            Self::InputError
        } else {
            Self::GeneralError
        }
    }
}

/// Structured error information for JSON output.
#[derive(Debug, Serialize)]
pub struct StructuredError {
    /// The error code (e.g., "DG002")
    pub code: String,
    /// The exit code number
    pub exit_code: i32,
    /// Human-readable error message, including its causes
    pub message: String,
}

impl StructuredError {
    /// Create a new structured error from an anyhow error and an exit code.
    #[must_use]
    pub fn new(err: &anyhow::Error, exit_code: ExitCode) -> Self {
        Self {
            code: exit_code.code_prefix().to_string(),
            exit_code: exit_code.as_i32(),
            message: format!("{err:#}"),
        }
    }
}
