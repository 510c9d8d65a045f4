//! Configuration validation errors and semantic validation.

use crate::catalog::{ParticleRecord, ParticleRef};
use crate::process::ProcessDescriptor;
use crate::settings::GeneratorSettings;
use std::collections::HashSet;
use thiserror::Error;

/// Validation result type.
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Slack allowed when branching ratios of one particle are summed.
pub const BRANCHING_TOLERANCE: f64 = 1e-6;

/// Configuration validation errors.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ValidationError {
    #[error("I/O error: {0}")]
    IoError(String),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Wrong type for {field}: expected {expected}, got {found}")]
    WrongType {
        field: String,
        expected: &'static str,
        found: String,
    },

    #[error("Invalid value for {field} ({value}): {message}")]
    InvalidValue {
        field: String,
        value: String,
        message: String,
    },

    #[error("Duplicate {field}: {value}")]
    Duplicate { field: String, value: String },
}

impl ValidationError {
    /// Error code for structured error reporting.
    pub fn code(&self) -> u32 {
        match self {
            ValidationError::IoError(_) => 60,
            ValidationError::ParseError(_) => 61,
            ValidationError::MissingField(_) => 62,
            ValidationError::WrongType { .. } => 63,
            ValidationError::InvalidValue { .. } => 64,
            ValidationError::Duplicate { .. } => 65,
        }
    }

    pub(crate) fn invalid(
        field: impl Into<String>,
        value: impl std::fmt::Display,
        message: impl Into<String>,
    ) -> Self {
        ValidationError::InvalidValue {
            field: field.into(),
            value: value.to_string(),
            message: message.into(),
        }
    }
}

impl From<ValidationError> for hep_common::Error {
    fn from(err: ValidationError) -> Self {
        use hep_common::Error;
        match err {
            ValidationError::IoError(msg) => Error::Io(std::io::Error::other(msg)),
            ValidationError::ParseError(msg) => Error::validation("document", "<unparseable>", msg),
            ValidationError::MissingField(field) => {
                Error::validation(field, "<missing>", "required field is missing")
            }
            ValidationError::WrongType {
                field,
                expected,
                found,
            } => Error::validation(field, found, format!("expected {}", expected)),
            ValidationError::InvalidValue {
                field,
                value,
                message,
            } => Error::validation(field, value, message),
            ValidationError::Duplicate { field, value } => {
                Error::validation(field, value, "duplicate entry in catalog")
            }
        }
    }
}

/// Validate one particle record.
///
/// `path` prefixes reported field names (e.g. `particles[3]`).
pub fn validate_particle_record(path: &str, record: &ParticleRecord) -> ValidationResult<()> {
    if record.name.trim().is_empty() {
        return Err(ValidationError::invalid(
            format!("{}.name", path),
            format!("{:?}", record.name),
            "must be a non-empty string",
        ));
    }

    if !record.mass.is_finite() || record.mass < 0.0 {
        return Err(ValidationError::invalid(
            format!("{}.mass", path),
            record.mass,
            "must be a finite non-negative number",
        ));
    }

    if !record.charge.is_finite() {
        return Err(ValidationError::invalid(
            format!("{}.charge", path),
            record.charge,
            "must be finite",
        ));
    }

    let mut total = 0.0;
    for (i, mode) in record.decay_modes.iter().enumerate() {
        let mode_path = format!("{}.decay_modes[{}]", path, i);
        let br = mode.branching_ratio;
        if !(0.0..=1.0).contains(&br) {
            return Err(ValidationError::invalid(
                format!("{}.branching_ratio", mode_path),
                br,
                "must be in [0, 1]",
            ));
        }
        if mode.products.is_empty() {
            return Err(ValidationError::invalid(
                format!("{}.products", mode_path),
                "[]",
                "must list at least one product",
            ));
        }
        for (j, product) in mode.products.iter().enumerate() {
            if let ParticleRef::Name(name) = product {
                if name.is_empty() {
                    return Err(ValidationError::invalid(
                        format!("{}.products[{}]", mode_path, j),
                        "\"\"",
                        "product names must be non-empty",
                    ));
                }
            }
        }
        total += br;
    }

    if total > 1.0 + BRANCHING_TOLERANCE {
        return Err(ValidationError::invalid(
            format!("{}.decay_modes", path),
            total,
            "branching ratios sum above 1",
        ));
    }

    Ok(())
}

/// Validate a whole catalog: every record plus uniqueness of PDG codes and names.
pub fn validate_catalog(records: &[ParticleRecord]) -> ValidationResult<()> {
    let mut seen_pdg = HashSet::new();
    let mut seen_name = HashSet::new();

    for (i, record) in records.iter().enumerate() {
        let path = format!("particles[{}]", i);
        validate_particle_record(&path, record)?;

        if !seen_pdg.insert(record.pdg) {
            return Err(ValidationError::Duplicate {
                field: format!("{}.pdg", path),
                value: record.pdg.to_string(),
            });
        }
        if !seen_name.insert(record.name.as_str()) {
            return Err(ValidationError::Duplicate {
                field: format!("{}.name", path),
                value: record.name.clone(),
            });
        }
    }

    Ok(())
}

/// Validate a process descriptor.
pub fn validate_process(process: &ProcessDescriptor) -> ValidationResult<()> {
    if process.name.trim().is_empty() {
        return Err(ValidationError::invalid(
            "process.name",
            format!("{:?}", process.name),
            "must be a non-empty string",
        ));
    }

    if process.model.trim().is_empty() {
        return Err(ValidationError::invalid(
            "process.model",
            format!("{:?}", process.model),
            "must be a non-empty string",
        ));
    }

    if !process.sqrt_s.is_finite() || process.sqrt_s <= 0.0 {
        return Err(ValidationError::invalid(
            "process.sqrt_s",
            process.sqrt_s,
            "center-of-mass energy must be positive",
        ));
    }

    for (side, refs) in [("incoming", &process.incoming), ("outgoing", &process.outgoing)] {
        for (i, particle) in refs.iter().enumerate() {
            if let ParticleRef::Name(name) = particle {
                if name.is_empty() {
                    return Err(ValidationError::invalid(
                        format!("process.{}[{}]", side, i),
                        "\"\"",
                        "particle names must be non-empty",
                    ));
                }
            }
        }
    }

    Ok(())
}

/// Validate generator settings.
pub fn validate_settings(settings: &GeneratorSettings) -> ValidationResult<()> {
    if settings.events == 0 {
        return Err(ValidationError::invalid(
            "generator.events",
            settings.events,
            "must be at least 1",
        ));
    }

    if settings.max_attempts == 0 {
        return Err(ValidationError::invalid(
            "generator.max_attempts",
            settings.max_attempts,
            "must be at least 1",
        ));
    }

    Ok(())
}
