//! Generator settings (generator.toml).

use crate::validate::{validate_settings, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Default number of events per run.
pub const DEFAULT_EVENTS: u32 = 1000;

/// Default cap on rejection-sampling draws for one angle.
pub const DEFAULT_MAX_ATTEMPTS: u64 = 1_000_000;

/// Event generator run settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct GeneratorSettings {
    /// RNG seed; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub events: u32,
    pub max_attempts: u64,
}

impl Default for GeneratorSettings {
    fn default() -> Self {
        Self {
            seed: None,
            events: DEFAULT_EVENTS,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl GeneratorSettings {
    /// Load and validate settings from a TOML file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse and validate settings from a TOML string.
    pub fn parse(content: &str) -> ValidationResult<Self> {
        let settings: Self = toml::from_str(content)
            .map_err(|e| ValidationError::ParseError(format!("Invalid TOML: {}", e)))?;
        validate_settings(&settings)?;
        Ok(settings)
    }
}
