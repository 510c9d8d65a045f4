//! Exit codes for the hep-core CLI.
//!
//! Exit codes communicate operation outcome without requiring output parsing.
//!
//! Exit code ranges:
//! - 0-1: Operational outcomes (parse outcome from code, not output)
//! - 10-19: User/environment errors (recoverable by user action)
//! - 20-29: Internal errors (bugs, should be reported)

use crate::config::ConfigError;
use hep_common::Error;

/// Exit codes for hep-core operations.
///
/// These codes are a stable contract for automation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ExitCode {
    // ========================================================================
    // Operational Outcomes (0-1)
    // ========================================================================
    /// Success, or samples compatible
    Clean = 0,

    /// Comparison found a significant difference
    Significant = 1,

    // ========================================================================
    // User / Environment Errors (10-19)
    // ========================================================================
    /// Invalid arguments or unusable input samples
    ArgsError = 10,

    /// Configuration missing, malformed or inconsistent
    ConfigError = 11,

    /// Malformed event text
    ParseError = 12,

    // ========================================================================
    // Internal Errors (20-29)
    // ========================================================================
    /// Internal error (bug - please report)
    InternalError = 20,

    /// I/O error
    IoError = 21,
}

impl ExitCode {
    /// Convert to i32 for process exit.
    pub fn as_i32(self) -> i32 {
        self as i32
    }

    /// Check if this exit code indicates an operational outcome (codes 0-1).
    pub fn is_operational(self) -> bool {
        (self as i32) < 10
    }

    /// Check if this exit code is a user/environment error (codes 10-19).
    pub fn is_user_error(self) -> bool {
        let code = self as i32;
        (10..20).contains(&code)
    }

    /// Check if this exit code is an internal error (codes 20-29).
    pub fn is_internal_error(self) -> bool {
        (self as i32) >= 20
    }

    /// Check if this exit code indicates any error requiring attention.
    pub fn is_error(self) -> bool {
        (self as i32) >= 10
    }

    /// Get the error code name as a string constant (for JSON output).
    pub fn code_name(&self) -> &'static str {
        match self {
            ExitCode::Clean => "OK_CLEAN",
            ExitCode::Significant => "OK_SIGNIFICANT",
            ExitCode::ArgsError => "ERR_ARGS",
            ExitCode::ConfigError => "ERR_CONFIG",
            ExitCode::ParseError => "ERR_PARSE",
            ExitCode::InternalError => "ERR_INTERNAL",
            ExitCode::IoError => "ERR_IO",
        }
    }
}

impl From<ExitCode> for i32 {
    fn from(code: ExitCode) -> Self {
        code as i32
    }
}

impl From<&Error> for ExitCode {
    fn from(err: &Error) -> Self {
        match err {
            Error::Validation { .. } | Error::UnknownParticle(_) => ExitCode::ConfigError,
            Error::Parse { .. } => ExitCode::ParseError,
            Error::Io(_) | Error::Json(_) => ExitCode::IoError,
            Error::LengthMismatch { .. } | Error::InsufficientData { .. } => ExitCode::ArgsError,
            Error::InvalidBoost { .. }
            | Error::DivideByZero
            | Error::SamplingExhausted { .. } => ExitCode::InternalError,
        }
    }
}

impl From<&ConfigError> for ExitCode {
    fn from(err: &ConfigError) -> Self {
        match err {
            ConfigError::Io { .. } => ExitCode::IoError,
            _ => ExitCode::ConfigError,
        }
    }
}

impl std::fmt::Display for ExitCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code_name(), self.as_i32())
    }
}
