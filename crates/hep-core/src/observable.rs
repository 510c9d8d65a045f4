//! Scalar observables and the rule picking which particle supplies them.

use crate::particle::ParticleInstance;
use hep_common::{Error, FourMomentum, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Anything carrying a PDG code and a four-momentum.
pub trait Measured {
    fn pdg(&self) -> i32;
    fn momentum(&self) -> &FourMomentum;
}

impl Measured for ParticleInstance {
    fn pdg(&self) -> i32 {
        ParticleInstance::pdg(self)
    }

    fn momentum(&self) -> &FourMomentum {
        ParticleInstance::momentum(self)
    }
}

/// A scalar derived from one four-momentum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Observable {
    /// pz / |p|, 0 at rest.
    #[default]
    CosTheta,
    Pt,
    Eta,
    Phi,
    Energy,
}

impl Observable {
    pub fn evaluate(&self, p: &FourMomentum) -> f64 {
        match self {
            Observable::CosTheta => p.cos_theta(),
            Observable::Pt => p.pt(),
            Observable::Eta => p.eta(),
            Observable::Phi => p.phi(),
            Observable::Energy => p.e,
        }
    }
}

impl std::str::FromStr for Observable {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "cos_theta" | "cos-theta" | "costheta" => Ok(Observable::CosTheta),
            "pt" => Ok(Observable::Pt),
            "eta" => Ok(Observable::Eta),
            "phi" => Ok(Observable::Phi),
            "energy" | "e" => Ok(Observable::Energy),
            _ => Err(format!(
                "unknown observable '{}' (expected cos_theta, pt, eta, phi or energy)",
                s
            )),
        }
    }
}

impl fmt::Display for Observable {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Observable::CosTheta => write!(f, "cos_theta"),
            Observable::Pt => write!(f, "pt"),
            Observable::Eta => write!(f, "eta"),
            Observable::Phi => write!(f, "phi"),
            Observable::Energy => write!(f, "energy"),
        }
    }
}

/// Pick the particle supplying the observable for one event.
///
/// With a target code, the last particle in line order carrying it wins.
/// Otherwise, or when no particle matches, the second-to-last particle is
/// used. Fails with [`Error::InsufficientData`] when the event has fewer than
/// two particles and no match.
pub fn select_particle<P: Measured>(particles: &[P], target_pdg: Option<i32>) -> Result<&P> {
    if let Some(code) = target_pdg {
        if let Some(found) = particles.iter().rev().find(|p| p.pdg() == code) {
            return Ok(found);
        }
    }

    match particles.len() {
        n if n >= 2 => Ok(&particles[n - 2]),
        n => Err(Error::InsufficientData { needed: 2, got: n }),
    }
}

/// Evaluate an observable on the selected particle of each event.
pub fn extract<'a, P, I>(
    events: I,
    observable: Observable,
    target_pdg: Option<i32>,
) -> Result<Vec<f64>>
where
    P: Measured + 'a,
    I: IntoIterator<Item = &'a [P]>,
{
    events
        .into_iter()
        .map(|particles| {
            select_particle(particles, target_pdg).map(|p| observable.evaluate(p.momentum()))
        })
        .collect()
}
