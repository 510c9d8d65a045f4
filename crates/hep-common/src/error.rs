//! Error types for hep-sim.
//!
//! This module provides structured error handling with:
//! - Stable error codes for machine parsing
//! - Category classification for error grouping
//! - Remediation suggestions for humans
//!
//! # Human-Facing Output
//!
//! ```text
//! ✗ Invalid Catalog Entry
//!   Reason: invalid decay_modes = 1.5: branching ratios sum above 1
//!   Fix: Check particles.json: every decay mode needs a branching ratio in [0, 1] ...
//! ```
//!
//! # Agent-Facing Output
//!
//! ```json
//! {
//!   "code": 10,
//!   "category": "catalog",
//!   "message": "invalid mass = -1: must be non-negative",
//!   "recoverable": true,
//!   "context": { "field": "mass", "value": "-1" }
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thiserror::Error;

/// Result type alias for hep-sim operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error categories for grouping related errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCategory {
    /// Static data errors (particle catalog, process descriptor).
    Catalog,
    /// Numerically undefined four-vector operations.
    Kinematics,
    /// Monte Carlo sampling errors.
    Sampling,
    /// Statistical test precondition errors.
    Statistics,
    /// Malformed external text records.
    Format,
    /// File I/O and serialization errors.
    Io,
}

impl std::fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorCategory::Catalog => write!(f, "catalog"),
            ErrorCategory::Kinematics => write!(f, "kinematics"),
            ErrorCategory::Sampling => write!(f, "sampling"),
            ErrorCategory::Statistics => write!(f, "statistics"),
            ErrorCategory::Format => write!(f, "format"),
            ErrorCategory::Io => write!(f, "io"),
        }
    }
}

/// Unified error type for hep-sim.
#[derive(Error, Debug)]
pub enum Error {
    // Catalog errors (10-19)
    #[error("invalid {field} = {value}: {reason}")]
    Validation {
        field: String,
        value: String,
        reason: String,
    },

    #[error("unknown particle: {0}")]
    UnknownParticle(String),

    // Kinematics errors (20-29)
    #[error("invalid boost: beta^2 = {beta_squared} (must be < 1)")]
    InvalidBoost { beta_squared: f64 },

    #[error("division of four-momentum by zero")]
    DivideByZero,

    // Sampling errors (30-39)
    #[error("rejection sampling exhausted after {attempts} attempts")]
    SamplingExhausted { attempts: u64 },

    // Statistics errors (40-49)
    #[error("paired samples differ in length: {left} vs {right}")]
    LengthMismatch { left: usize, right: usize },

    #[error("insufficient data: need at least {needed} values, got {got}")]
    InsufficientData { needed: usize, got: usize },

    // Format errors (50-59)
    #[error("parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    // I/O errors (60-69)
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON serialization error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// Shorthand for a field-level validation failure.
    pub fn validation(
        field: impl Into<String>,
        value: impl std::fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Error::Validation {
            field: field.into(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }

    /// Returns the error code for this error type.
    ///
    /// Error codes are stable and grouped by category:
    /// - 10-19: Catalog errors
    /// - 20-29: Kinematics errors
    /// - 30-39: Sampling errors
    /// - 40-49: Statistics errors
    /// - 50-59: Format errors
    /// - 60-69: I/O errors
    pub fn code(&self) -> u32 {
        match self {
            Error::Validation { .. } => 10,
            Error::UnknownParticle(_) => 11,
            Error::InvalidBoost { .. } => 20,
            Error::DivideByZero => 21,
            Error::SamplingExhausted { .. } => 30,
            Error::LengthMismatch { .. } => 40,
            Error::InsufficientData { .. } => 41,
            Error::Parse { .. } => 50,
            Error::Io(_) => 60,
            Error::Json(_) => 61,
        }
    }

    /// Returns the error category for grouping and filtering.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Error::Validation { .. } | Error::UnknownParticle(_) => ErrorCategory::Catalog,
            Error::InvalidBoost { .. } | Error::DivideByZero => ErrorCategory::Kinematics,
            Error::SamplingExhausted { .. } => ErrorCategory::Sampling,
            Error::LengthMismatch { .. } | Error::InsufficientData { .. } => {
                ErrorCategory::Statistics
            }
            Error::Parse { .. } => ErrorCategory::Format,
            Error::Io(_) | Error::Json(_) => ErrorCategory::Io,
        }
    }

    /// Returns whether changing the inputs can resolve this error.
    ///
    /// Kinematic failures come from the caller's arithmetic and are
    /// treated as programming errors.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Error::Validation { .. } => true,
            Error::UnknownParticle(_) => true,
            Error::InvalidBoost { .. } => false,
            Error::DivideByZero => false,
            Error::SamplingExhausted { .. } => true, // Raise max_attempts or fix the envelope
            Error::LengthMismatch { .. } => true,
            Error::InsufficientData { .. } => true,
            Error::Parse { .. } => true,
            Error::Io(_) => true,
            Error::Json(_) => true,
        }
    }

    /// Returns a human-readable remediation hint.
    pub fn remediation(&self) -> &'static str {
        match self {
            Error::Validation { .. } => {
                "Check particles.json / process.json: masses must be non-negative, every decay mode needs a branching ratio in [0, 1] and at least one product, and ratios may not sum above 1."
            }
            Error::UnknownParticle(_) => {
                "Add the particle to the catalog or fix the PDG code in process.json. List known particles with 'hep-core catalog'."
            }
            Error::InvalidBoost { .. } => {
                "Boost velocities must satisfy |beta| < 1. Check the frame transformation being applied."
            }
            Error::DivideByZero => "Four-momenta cannot be scaled by 1/0. Check the divisor.",
            Error::SamplingExhausted { .. } => {
                "The sampling envelope may not bound the cross section. Verify max_weight or raise max_attempts in generator.toml."
            }
            Error::LengthMismatch { .. } => {
                "Paired tests need one observable per event in both inputs. Generate the same number of events as the reference."
            }
            Error::InsufficientData { .. } => {
                "Provide at least two events in each input."
            }
            Error::Parse { .. } => {
                "The event file does not match the 'Event <id>' text layout. Regenerate it with 'hep-core generate'."
            }
            Error::Io(_) => {
                "Check that the file exists and is readable, and that output directories are writable."
            }
            Error::Json(_) => {
                "Invalid JSON in file. Check syntax with 'jq . <file>' or remove it to fall back to defaults."
            }
        }
    }

    /// Returns a short headline for human-readable output.
    pub fn headline(&self) -> &'static str {
        match self {
            Error::Validation { .. } => "Invalid Catalog Entry",
            Error::UnknownParticle(_) => "Unknown Particle",
            Error::InvalidBoost { .. } => "Invalid Lorentz Boost",
            Error::DivideByZero => "Division By Zero",
            Error::SamplingExhausted { .. } => "Sampling Exhausted",
            Error::LengthMismatch { .. } => "Sample Length Mismatch",
            Error::InsufficientData { .. } => "Insufficient Data",
            Error::Parse { .. } => "Event File Parse Error",
            Error::Io(_) => "I/O Error",
            Error::Json(_) => "JSON Parse Error",
        }
    }
}

/// Structured error response for JSON output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StructuredError {
    /// Stable error code.
    pub code: u32,

    /// Error category for grouping.
    pub category: ErrorCategory,

    /// Human-readable error message.
    pub message: String,

    /// Whether the error is potentially recoverable.
    pub recoverable: bool,

    /// Additional structured context (e.g., field, line).
    #[serde(default, skip_serializing_if = "HashMap::is_empty")]
    pub context: HashMap<String, serde_json::Value>,
}

impl From<&Error> for StructuredError {
    fn from(err: &Error) -> Self {
        let mut context = HashMap::new();

        match err {
            Error::Validation { field, value, .. } => {
                context.insert("field".to_string(), serde_json::json!(field));
                context.insert("value".to_string(), serde_json::json!(value));
            }
            Error::UnknownParticle(key) => {
                context.insert("particle".to_string(), serde_json::json!(key));
            }
            Error::SamplingExhausted { attempts } => {
                context.insert("attempts".to_string(), serde_json::json!(attempts));
            }
            Error::LengthMismatch { left, right } => {
                context.insert("left".to_string(), serde_json::json!(left));
                context.insert("right".to_string(), serde_json::json!(right));
            }
            Error::Parse { line, .. } => {
                context.insert("line".to_string(), serde_json::json!(line));
            }
            _ => {}
        }

        StructuredError {
            code: err.code(),
            category: err.category(),
            message: err.to_string(),
            recoverable: err.is_recoverable(),
            context,
        }
    }
}

impl StructuredError {
    /// Add additional context to the error.
    pub fn with_context(mut self, key: impl Into<String>, value: impl Serialize) -> Self {
        if let Ok(v) = serde_json::to_value(value) {
            self.context.insert(key.into(), v);
        }
        self
    }

    /// Serialize to JSON string.
    pub fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| {
            format!(r#"{{"code":{},"error":"serialization_failed"}}"#, self.code)
        })
    }
}

/// Format an error for human-readable stderr output.
///
/// Output format:
/// ```text
/// ✗ [Headline]
///   Reason: [Error message]
///   Fix: [Remediation hint]
/// ```
pub fn format_error_human(err: &Error, use_color: bool) -> String {
    let (red, cyan, reset) = if use_color {
        ("\x1b[31m", "\x1b[36m", "\x1b[0m")
    } else {
        ("", "", "")
    };

    format!(
        "{red}✗{reset} {headline}\n  Reason: {message}\n  {cyan}Fix:{reset} {remediation}",
        headline = err.headline(),
        message = err,
        remediation = err.remediation()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(Error::validation("mass", -1.0, "must be non-negative").code(), 10);
        assert_eq!(Error::UnknownParticle("99".into()).code(), 11);
        assert_eq!(Error::SamplingExhausted { attempts: 5 }.code(), 30);
        assert_eq!(Error::Parse { line: 3, message: "x".into() }.code(), 50);
    }

    #[test]
    fn test_error_category() {
        assert_eq!(Error::DivideByZero.category(), ErrorCategory::Kinematics);
        assert_eq!(
            Error::LengthMismatch { left: 1, right: 2 }.category(),
            ErrorCategory::Statistics
        );
        assert_eq!(
            Error::UnknownParticle("Z".into()).category(),
            ErrorCategory::Catalog
        );
    }

    #[test]
    fn test_error_recoverable() {
        assert!(Error::UnknownParticle("Z".into()).is_recoverable());
        assert!(!Error::InvalidBoost { beta_squared: 1.2 }.is_recoverable());
        assert!(!Error::DivideByZero.is_recoverable());
    }

    #[test]
    fn test_validation_message() {
        let err = Error::validation("branching_ratio", 1.5, "must lie in [0, 1]");
        assert_eq!(err.to_string(), "invalid branching_ratio = 1.5: must lie in [0, 1]");
    }

    #[test]
    fn test_structured_error_from_error() {
        let err = Error::LengthMismatch { left: 10, right: 12 };
        let structured = StructuredError::from(&err);

        assert_eq!(structured.code, 40);
        assert_eq!(structured.category, ErrorCategory::Statistics);
        assert!(structured.recoverable);
        assert_eq!(structured.context.get("left"), Some(&serde_json::json!(10)));
        assert_eq!(structured.context.get("right"), Some(&serde_json::json!(12)));
    }

    #[test]
    fn test_structured_error_json() {
        let err = Error::Parse { line: 7, message: "missing energy".into() };
        let json = StructuredError::from(&err).with_context("file", "ref.txt").to_json();

        assert!(json.contains(r#""code":50"#));
        assert!(json.contains(r#""category":"format""#));
        assert!(json.contains(r#""line":7"#));
        assert!(json.contains(r#""file":"ref.txt""#));
    }

    #[test]
    fn test_format_error_human() {
        let err = Error::UnknownParticle("PDG 99".into());
        let formatted = format_error_human(&err, false);

        assert!(formatted.contains("Unknown Particle"));
        assert!(formatted.contains("unknown particle: PDG 99"));
        assert!(formatted.contains("hep-core catalog"));
        assert!(!formatted.contains("\x1b["));
    }

    #[test]
    fn test_error_category_display() {
        assert_eq!(ErrorCategory::Catalog.to_string(), "catalog");
        assert_eq!(ErrorCategory::Statistics.to_string(), "statistics");
    }
}
