//! One generated collision.

use crate::particle::ParticleInstance;
use hep_common::{EventId, FourMomentum};

/// Initial- and final-state particles sharing one event id.
///
/// Particles are kept in line order: incoming first, then outgoing.
#[derive(Debug, Clone)]
pub struct Event {
    id: EventId,
    particles: Vec<ParticleInstance>,
    n_incoming: usize,
}

impl Event {
    pub fn new(
        id: EventId,
        incoming: Vec<ParticleInstance>,
        outgoing: Vec<ParticleInstance>,
    ) -> Self {
        let n_incoming = incoming.len();
        let mut particles = incoming;
        particles.extend(outgoing);
        Self {
            id,
            particles,
            n_incoming,
        }
    }

    pub fn id(&self) -> EventId {
        self.id
    }

    pub fn incoming(&self) -> &[ParticleInstance] {
        &self.particles[..self.n_incoming]
    }

    pub fn outgoing(&self) -> &[ParticleInstance] {
        &self.particles[self.n_incoming..]
    }

    /// All particles in line order.
    pub fn particles(&self) -> &[ParticleInstance] {
        &self.particles
    }

    /// Vector sum of the initial state.
    pub fn initial_momentum(&self) -> FourMomentum {
        self.incoming().iter().map(|p| p.momentum()).sum()
    }

    /// Vector sum of the final state.
    pub fn final_momentum(&self) -> FourMomentum {
        self.outgoing().iter().map(|p| p.momentum()).sum()
    }
}
