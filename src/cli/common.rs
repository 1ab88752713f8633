//! Shared CLI error and exit code types.

use std::fmt;

use crate::error::MatteError;

/// Process exit codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExitCode {
    /// Run finished (including "art mode unsupported")
    Success,
    /// Device, configuration or I/O failure
    Failure,
    /// A matte specification was rejected
    Validation,
    /// Interrupted by the user
    Interrupted,
}

impl ExitCode {
    /// Numeric code passed to the OS.
    #[must_use]
    pub fn code(self) -> i32 {
        match self {
            Self::Success => 0,
            Self::Failure => 1,
            Self::Validation => 2,
            Self::Interrupted => 130,
        }
    }
}

/// Error surfaced by a CLI command, with the exit code it maps to.
#[derive(Debug)]
pub struct CliError {
    /// Message shown to the user
    pub message: String,
    /// Exit code for the process
    pub exit_code: ExitCode,
}

impl CliError {
    /// Configuration or file system failure.
    pub fn io(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            exit_code: ExitCode::Failure,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

impl std::error::Error for CliError {}

impl From<MatteError> for CliError {
    fn from(err: MatteError) -> Self {
        let exit_code = match err {
            MatteError::Validation(_) => ExitCode::Validation,
            MatteError::Interrupted => ExitCode::Interrupted,
            MatteError::CapabilityFetch(_) | MatteError::Inventory(_) | MatteError::Device(_) => {
                ExitCode::Failure
            }
        };
        Self {
            message: err.to_string(),
            exit_code,
        }
    }
}

/// Result type for CLI commands.
pub type CliResult<T> = Result<T, CliError>;
