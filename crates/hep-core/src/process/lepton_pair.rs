//! Fermion pair production through a single photon: f(cosθ) = 1 + cos²θ.

use super::{ProcessModel, ALPHA, GEV2_TO_NB};
use crate::particle::ParticleRegistry;
use hep_common::{Error, Result};
use hep_config::validate::validate_process;
use hep_config::ProcessDescriptor;
use std::f64::consts::PI;

/// ℓ⁺ℓ⁻ → ℓ'⁺ℓ'⁻ in the massless QED approximation.
#[derive(Debug, Clone, PartialEq)]
pub struct LeptonPairProcess {
    name: String,
    model: String,
    notes: String,
    sqrt_s: f64,
    incoming: [i32; 2],
    outgoing: [i32; 2],
}

impl LeptonPairProcess {
    /// Build the process from a descriptor, resolving particle references
    /// against the registry.
    pub fn from_descriptor(
        descriptor: &ProcessDescriptor,
        registry: &ParticleRegistry,
    ) -> Result<Self> {
        validate_process(descriptor)?;

        let resolve = |refs: &[hep_config::ParticleRef; 2]| -> Result<[i32; 2]> {
            Ok([
                registry.resolve(&refs[0])?.pdg(),
                registry.resolve(&refs[1])?.pdg(),
            ])
        };

        Ok(Self {
            name: descriptor.name.clone(),
            model: descriptor.model.clone(),
            notes: descriptor.notes.clone(),
            sqrt_s: descriptor.sqrt_s,
            incoming: resolve(&descriptor.incoming)?,
            outgoing: resolve(&descriptor.outgoing)?,
        })
    }

    /// Build the process directly from PDG codes.
    pub fn new(sqrt_s: f64, incoming: [i32; 2], outgoing: [i32; 2]) -> Result<Self> {
        if !sqrt_s.is_finite() || sqrt_s <= 0.0 {
            return Err(Error::validation(
                "process.sqrt_s",
                sqrt_s,
                "center-of-mass energy must be positive",
            ));
        }
        Ok(Self {
            name: format!(
                "{} {} -> {} {}",
                incoming[0], incoming[1], outgoing[0], outgoing[1]
            ),
            model: "QED".to_string(),
            notes: String::new(),
            sqrt_s,
            incoming,
            outgoing,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Mandelstam s in GeV².
    pub fn s(&self) -> f64 {
        self.sqrt_s * self.sqrt_s
    }
}

impl ProcessModel for LeptonPairProcess {
    fn name(&self) -> &str {
        &self.name
    }

    fn incoming(&self) -> [i32; 2] {
        self.incoming
    }

    fn outgoing(&self) -> [i32; 2] {
        self.outgoing
    }

    fn sqrt_s(&self) -> f64 {
        self.sqrt_s
    }

    fn differential_cross_section(&self, cos_theta: f64) -> f64 {
        1.0 + cos_theta * cos_theta
    }

    fn max_weight(&self) -> f64 {
        2.0
    }

    /// σ = 4πα² / (3s), converted to nb.
    fn total_cross_section(&self) -> f64 {
        4.0 * PI * ALPHA * ALPHA / (3.0 * self.s()) * GEV2_TO_NB
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use hep_config::ParticleRef;

    #[test]
    fn test_from_default_descriptor() {
        let registry = ParticleRegistry::builtin().unwrap();
        let process =
            LeptonPairProcess::from_descriptor(&ProcessDescriptor::default(), &registry).unwrap();
        assert_eq!(process.incoming(), [13, -13]);
        assert_eq!(process.outgoing(), [11, -11]);
        assert_eq!(process.model(), "QED");
        assert!((process.beam_energy() - 45.5938).abs() < 1e-12);
    }

    #[test]
    fn test_names_resolve_to_codes() {
        let registry = ParticleRegistry::builtin().unwrap();
        let mut descriptor = ProcessDescriptor::default();
        descriptor.incoming = [ParticleRef::from("electron"), ParticleRef::from("positron")];
        descriptor.outgoing = [ParticleRef::from("muon"), ParticleRef::from("antimuon")];
        let process = LeptonPairProcess::from_descriptor(&descriptor, &registry).unwrap();
        assert_eq!(process.incoming(), [11, -11]);
        assert_eq!(process.outgoing(), [13, -13]);
    }

    #[test]
    fn test_unknown_particle_rejected() {
        let registry = ParticleRegistry::builtin().unwrap();
        let mut descriptor = ProcessDescriptor::default();
        descriptor.outgoing = [ParticleRef::Pdg(2212), ParticleRef::Pdg(-2212)];
        assert!(matches!(
            LeptonPairProcess::from_descriptor(&descriptor, &registry),
            Err(Error::UnknownParticle(_))
        ));
    }

    #[test]
    fn test_invalid_descriptor_rejected() {
        let registry = ParticleRegistry::builtin().unwrap();
        let mut descriptor = ProcessDescriptor::default();
        descriptor.name = String::new();
        assert!(matches!(
            LeptonPairProcess::from_descriptor(&descriptor, &registry),
            Err(Error::Validation { .. })
        ));
        assert!(LeptonPairProcess::new(-1.0, [13, -13], [11, -11]).is_err());
    }

    #[test]
    fn test_angular_density_and_envelope() {
        let process = LeptonPairProcess::new(10.0, [11, -11], [13, -13]).unwrap();
        assert_eq!(process.differential_cross_section(0.0), 1.0);
        assert_eq!(process.differential_cross_section(1.0), 2.0);
        assert_eq!(process.differential_cross_section(-1.0), 2.0);
        for i in 0..=100 {
            let c = -1.0 + 2.0 * i as f64 / 100.0;
            assert!(process.differential_cross_section(c) <= process.max_weight());
        }
    }

    #[test]
    fn test_total_cross_section() {
        // 4πα²/(3s) at √s = 10 GeV is 0.8686 nb.
        let process = LeptonPairProcess::new(10.0, [11, -11], [13, -13]).unwrap();
        let sigma = process.total_cross_section();
        assert!((sigma - 0.8686).abs() < 1e-3, "sigma = {sigma}");

        // Scales as 1/s.
        let doubled = LeptonPairProcess::new(20.0, [11, -11], [13, -13]).unwrap();
        assert!((sigma / doubled.total_cross_section() - 4.0).abs() < 1e-12);
    }
}
