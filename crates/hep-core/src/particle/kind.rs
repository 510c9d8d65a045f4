//! Static particle species.

use hep_common::Result;
use hep_config::validate::validate_particle_record;
use hep_config::{ParticleRecord, ParticleRef};
use serde::Serialize;
use std::fmt;
use std::hash::{Hash, Hasher};

/// One decay channel of an unstable species.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecayMode {
    pub branching_ratio: f64,
    pub products: Vec<ParticleRef>,
}

/// Immutable static properties of one particle species.
///
/// Built only from a validated [`ParticleRecord`]. Two kinds are equal when
/// their PDG codes are equal.
#[derive(Debug, Clone, Serialize)]
pub struct ParticleKind {
    name: String,
    pdg: i32,
    category: String,
    mass: f64,
    charge: f64,
    stable: bool,
    decay_modes: Vec<DecayMode>,
}

impl ParticleKind {
    /// Validate a catalog record and build the kind from it.
    pub fn from_record(record: &ParticleRecord) -> Result<Self> {
        validate_particle_record("particle", record)?;
        Ok(Self::from_validated(record))
    }

    pub(crate) fn from_validated(record: &ParticleRecord) -> Self {
        Self {
            name: record.name.clone(),
            pdg: record.pdg,
            category: record.category.clone(),
            mass: record.mass,
            charge: record.charge,
            stable: record.stable,
            decay_modes: record
                .decay_modes
                .iter()
                .map(|m| DecayMode {
                    branching_ratio: m.branching_ratio,
                    products: m.products.clone(),
                })
                .collect(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn pdg(&self) -> i32 {
        self.pdg
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    /// Mass in GeV.
    pub fn mass(&self) -> f64 {
        self.mass
    }

    /// Charge in units of e.
    pub fn charge(&self) -> f64 {
        self.charge
    }

    pub fn is_stable(&self) -> bool {
        self.stable
    }

    pub fn decay_modes(&self) -> &[DecayMode] {
        &self.decay_modes
    }

    /// Sum of the branching ratios of all listed decay modes.
    pub fn total_branching_ratio(&self) -> f64 {
        self.decay_modes.iter().map(|m| m.branching_ratio).sum()
    }
}

impl PartialEq for ParticleKind {
    fn eq(&self, other: &Self) -> bool {
        self.pdg == other.pdg
    }
}

impl Eq for ParticleKind {}

impl Hash for ParticleKind {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.pdg.hash(state);
    }
}

impl fmt::Display for ParticleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (PDG={}, m={:.3} GeV, q={:+})",
            self.name, self.pdg, self.mass, self.charge
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hep_common::Error;
    use hep_config::DecayModeRecord;

    fn muon() -> ParticleRecord {
        ParticleRecord {
            name: "muon".to_string(),
            pdg: 13,
            category: "lepton".to_string(),
            mass: 0.10566,
            charge: -1.0,
            stable: false,
            decay_modes: vec![DecayModeRecord {
                branching_ratio: 1.0,
                products: vec![ParticleRef::Pdg(11), ParticleRef::Pdg(-12), ParticleRef::Pdg(14)],
            }],
        }
    }

    #[test]
    fn test_display() {
        let kind = ParticleKind::from_record(&muon()).unwrap();
        assert_eq!(kind.to_string(), "muon (PDG=13, m=0.106 GeV, q=-1)");

        let mut rec = muon();
        rec.charge = 1.0;
        rec.pdg = -13;
        rec.name = "antimuon".to_string();
        let kind = ParticleKind::from_record(&rec).unwrap();
        assert_eq!(kind.to_string(), "antimuon (PDG=-13, m=0.106 GeV, q=+1)");
    }

    #[test]
    fn test_equality_by_pdg() {
        let a = ParticleKind::from_record(&muon()).unwrap();
        let mut rec = muon();
        rec.name = "mu-".to_string();
        rec.mass = 0.1057;
        let b = ParticleKind::from_record(&rec).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_invalid_record_rejected() {
        let mut rec = muon();
        rec.mass = -0.1;
        match ParticleKind::from_record(&rec) {
            Err(Error::Validation { field, value, .. }) => {
                assert_eq!(field, "particle.mass");
                assert_eq!(value, "-0.1");
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn test_total_branching_ratio() {
        let kind = ParticleKind::from_record(&muon()).unwrap();
        assert!((kind.total_branching_ratio() - 1.0).abs() < 1e-12);
        assert_eq!(kind.decay_modes()[0].products.len(), 3);
    }
}
