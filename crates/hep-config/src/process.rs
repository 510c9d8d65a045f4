//! Process descriptor (process.json).

use crate::catalog::ParticleRef;
use crate::validate::{validate_process, ValidationError, ValidationResult};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Static description of the scattering process to simulate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcessDescriptor {
    pub name: String,
    /// Physics framework label, e.g. "QED".
    pub model: String,
    #[serde(default)]
    pub notes: String,
    /// Center-of-mass energy √s in GeV.
    pub sqrt_s: f64,
    pub incoming: [ParticleRef; 2],
    pub outgoing: [ParticleRef; 2],
}

impl Default for ProcessDescriptor {
    /// μ⁻μ⁺ → e⁻e⁺ at the Z pole.
    fn default() -> Self {
        Self {
            name: "mu+ mu- -> e+ e-".to_string(),
            model: "QED".to_string(),
            notes: "s-channel photon exchange, massless final state".to_string(),
            sqrt_s: 91.1876,
            incoming: [ParticleRef::Pdg(13), ParticleRef::Pdg(-13)],
            outgoing: [ParticleRef::Pdg(11), ParticleRef::Pdg(-11)],
        }
    }
}

impl ProcessDescriptor {
    /// Load and validate a descriptor from a JSON file.
    pub fn from_file(path: &Path) -> ValidationResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| {
            ValidationError::IoError(format!("Failed to read {}: {}", path.display(), e))
        })?;

        Self::parse(&content)
    }

    /// Parse and validate a descriptor from a JSON string.
    pub fn parse(json: &str) -> ValidationResult<Self> {
        let descriptor: Self = serde_json::from_str(json)
            .map_err(|e| ValidationError::ParseError(format!("Invalid JSON: {}", e)))?;
        validate_process(&descriptor)?;
        Ok(descriptor)
    }

    /// Return a copy with a different center-of-mass energy.
    pub fn with_sqrt_s(mut self, sqrt_s: f64) -> ValidationResult<Self> {
        self.sqrt_s = sqrt_s;
        validate_process(&self)?;
        Ok(self)
    }
}
