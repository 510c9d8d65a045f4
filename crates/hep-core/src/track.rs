//! Lineage-based track reconstruction.
//!
//! A track is a chain of particle instances linked by parent references.
//! Building is a single pass over the input: a particle whose parent was
//! already seen joins the parent's track, anything else starts a new one.
//! Lineage forms a forest, so the rule holds for chains of any depth.

use crate::event::Event;
use crate::particle::ParticleInstance;
use hep_common::{EventId, FourMomentum, ParticleId};
use serde::Serialize;
use std::collections::HashMap;

/// An ordered chain of particle instances.
///
/// Holds references into the caller's particles; never empty.
#[derive(Debug, Clone)]
pub struct Track<'a> {
    particles: Vec<&'a ParticleInstance>,
}

impl<'a> Track<'a> {
    fn start(first: &'a ParticleInstance) -> Self {
        Self {
            particles: vec![first],
        }
    }

    pub fn particles(&self) -> &[&'a ParticleInstance] {
        &self.particles
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    /// Event of the particle that started the track.
    pub fn event_id(&self) -> EventId {
        self.particles[0].event_id()
    }

    /// Vector sum of member four-momenta.
    pub fn total_momentum(&self) -> FourMomentum {
        self.particles.iter().map(|p| p.momentum()).sum()
    }

    /// Mean transverse momentum of the members.
    pub fn average_pt(&self) -> f64 {
        let total: f64 = self.particles.iter().map(|p| p.pt()).sum();
        total / self.particles.len() as f64
    }

    /// Momentum-space path length: summed distances between consecutive
    /// members' 3-momenta. Zero for a single particle.
    pub fn length(&self) -> f64 {
        self.particles
            .windows(2)
            .map(|pair| {
                let [ax, ay, az] = pair[0].momentum().three_momentum();
                let [bx, by, bz] = pair[1].momentum().three_momentum();
                ((bx - ax).powi(2) + (by - ay).powi(2) + (bz - az).powi(2)).sqrt()
            })
            .sum()
    }

    /// Serializable digest of the track.
    pub fn summary(&self) -> TrackSummary {
        TrackSummary {
            event: self.event_id(),
            particles: self.particles.iter().map(|p| p.id()).collect(),
            pdg: self.particles.iter().map(|p| p.pdg()).collect(),
            total_momentum: self.total_momentum(),
            average_pt: self.average_pt(),
            length: self.length(),
        }
    }
}

/// Digest of one track for reporting.
#[derive(Debug, Clone, Serialize)]
pub struct TrackSummary {
    pub event: EventId,
    pub particles: Vec<ParticleId>,
    pub pdg: Vec<i32>,
    pub total_momentum: FourMomentum,
    pub average_pt: f64,
    pub length: f64,
}

/// Groups particle instances into tracks.
pub struct TrackBuilder;

impl TrackBuilder {
    /// Group particles into tracks in one pass.
    ///
    /// Tracks are returned in order of their first particle. A particle
    /// whose parent appears later in the input, or not at all, starts its
    /// own track.
    ///
    /// Parents are matched by [`ParticleId`], so ids must be unique within
    /// one call. Samples that reuse ids (two runs both starting at event 1)
    /// go through [`TrackBuilder::build_for_events`] instead.
    pub fn build<'a, I>(particles: I) -> Vec<Track<'a>>
    where
        I: IntoIterator<Item = &'a ParticleInstance>,
    {
        let mut tracks: Vec<Track<'a>> = Vec::new();
        let mut track_of: HashMap<ParticleId, usize> = HashMap::new();

        for particle in particles {
            let parent_track = particle
                .lineage()
                .parent()
                .and_then(|parent| track_of.get(&parent).copied());

            let index = match parent_track {
                Some(index) => {
                    tracks[index].particles.push(particle);
                    index
                }
                None => {
                    tracks.push(Track::start(particle));
                    tracks.len() - 1
                }
            };
            track_of.insert(particle.id(), index);
        }

        tracks
    }

    /// Build tracks over every particle of every event, in event order.
    ///
    /// Each event is grouped on its own: a parent reference never reaches
    /// into another event, even one carrying the same id.
    pub fn build_for_events(events: &[Event]) -> Vec<Track<'_>> {
        events
            .iter()
            .flat_map(|event| Self::build(event.particles()))
            .collect()
    }
}
