//! Monte Carlo event generator.
//!
//! Each event is produced in three steps:
//! 1. Rejection-sample cosθ from the process's angular density under the
//!    flat envelope M, then draw φ uniformly in [0, 2π).
//! 2. Build back-to-back beams of energy √s/2 along ±z and a back-to-back
//!    outgoing pair with |p| = √s/2 in the sampled direction.
//! 3. Tag all four particles with the event id and append the event.
//!
//! Particle kinds are resolved once, before any sampling. Events already
//! generated stay available when a later event fails.

use crate::event::Event;
use crate::log_event;
use crate::logging::{event_names, LogContext, Stage};
use crate::particle::{Lineage, ParticleInstance, ParticleKind, ParticleRegistry};
use crate::process::ProcessModel;
use hep_common::{Error, EventId, FourMomentum, ParticleId, Result};
use hep_config::settings::DEFAULT_MAX_ATTEMPTS;
use hep_config::ParticleRef;
use rand::Rng;
use serde::Serialize;
use std::f64::consts::TAU;
use std::sync::Arc;

/// Counters of the rejection sampler.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct SamplingStats {
    /// Candidate draws, accepted or not.
    pub attempts: u64,
    /// Accepted draws.
    pub accepted: u64,
}

impl SamplingStats {
    /// Fraction of draws accepted; 0 before the first draw.
    pub fn acceptance_rate(&self) -> f64 {
        if self.attempts == 0 {
            0.0
        } else {
            self.accepted as f64 / self.attempts as f64
        }
    }
}

/// Rejection-sampling event generator over a [`ProcessModel`].
pub struct EventGenerator<'p, P: ProcessModel + ?Sized, R: Rng> {
    process: &'p P,
    incoming: [Arc<ParticleKind>; 2],
    outgoing: [Arc<ParticleKind>; 2],
    rng: R,
    max_attempts: u64,
    events: Vec<Event>,
    next_id: EventId,
    stats: SamplingStats,
    ctx: LogContext,
}

impl<'p, P: ProcessModel + ?Sized, R: Rng> EventGenerator<'p, P, R> {
    /// Create a generator, resolving the process's particle codes.
    ///
    /// Fails with [`Error::UnknownParticle`] when a code is missing from the
    /// registry, and with [`Error::Validation`] when the process envelope or
    /// energy is unusable.
    pub fn new(process: &'p P, registry: &ParticleRegistry, rng: R) -> Result<Self> {
        let m = process.max_weight();
        if !m.is_finite() || m <= 0.0 {
            return Err(Error::validation(
                "process.max_weight",
                m,
                "sampling envelope must be finite and positive",
            ));
        }
        let sqrt_s = process.sqrt_s();
        if !sqrt_s.is_finite() || sqrt_s <= 0.0 {
            return Err(Error::validation(
                "process.sqrt_s",
                sqrt_s,
                "center-of-mass energy must be positive",
            ));
        }

        let resolve = |codes: [i32; 2]| -> Result<[Arc<ParticleKind>; 2]> {
            Ok([
                registry.resolve(&ParticleRef::Pdg(codes[0]))?,
                registry.resolve(&ParticleRef::Pdg(codes[1]))?,
            ])
        };

        Ok(Self {
            incoming: resolve(process.incoming())?,
            outgoing: resolve(process.outgoing())?,
            process,
            rng,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            events: Vec::new(),
            next_id: EventId::FIRST,
            stats: SamplingStats::default(),
            ctx: LogContext::default(),
        })
    }

    /// Cap on candidate draws for a single angle. Zero is treated as one.
    pub fn with_max_attempts(mut self, max_attempts: u64) -> Self {
        self.max_attempts = max_attempts.max(1);
        self
    }

    pub fn with_log_context(mut self, ctx: LogContext) -> Self {
        self.ctx = ctx;
        self
    }

    /// Draw (cosθ, φ) by rejection sampling.
    pub fn sample_angles(&mut self) -> Result<(f64, f64)> {
        let envelope = self.process.max_weight();

        for _ in 0..self.max_attempts {
            self.stats.attempts += 1;
            let cos_theta: f64 = self.rng.random_range(-1.0..=1.0);
            let check: f64 = self.rng.random_range(0.0..=envelope);
            if check <= self.process.differential_cross_section(cos_theta) {
                self.stats.accepted += 1;
                let phi: f64 = self.rng.random_range(0.0..TAU);
                return Ok((cos_theta, phi));
            }
        }

        log_event!(
            self.ctx,
            WARN,
            event_names::SAMPLING_EXHAUSTED,
            Stage::Generate,
            format!(
                "No angle accepted after {} draws; is max_weight a true bound?",
                self.max_attempts
            ),
            max_attempts = self.max_attempts,
            max_weight = envelope
        );
        Err(Error::SamplingExhausted {
            attempts: self.max_attempts,
        })
    }

    /// Generate one event and append it to the event list.
    pub fn generate_event(&mut self) -> Result<&Event> {
        let (cos_theta, phi) = self.sample_angles()?;
        let e_beam = self.process.beam_energy();
        let id = self.next_id;

        let beam_a = FourMomentum::new(e_beam, 0.0, 0.0, e_beam);
        let beam_b = FourMomentum::new(e_beam, 0.0, 0.0, -e_beam);
        let out_a = FourMomentum::from_spherical(e_beam, e_beam, cos_theta, phi);
        let out_b = FourMomentum::new(e_beam, -out_a.px, -out_a.py, -out_a.pz);

        let instance = |index: u32, kind: &Arc<ParticleKind>, p4: FourMomentum, lineage| {
            ParticleInstance::new(ParticleId::new(id, index), Arc::clone(kind), p4, lineage)
        };
        let incoming = vec![
            instance(0, &self.incoming[0], beam_a, Lineage::InitialBeam),
            instance(1, &self.incoming[1], beam_b, Lineage::InitialBeam),
        ];
        let outgoing = vec![
            instance(2, &self.outgoing[0], out_a, Lineage::CollisionProduct),
            instance(3, &self.outgoing[1], out_b, Lineage::CollisionProduct),
        ];

        log_event!(
            self.ctx,
            DEBUG,
            event_names::GENERATE_EVENT,
            Stage::Generate,
            format!("Event {} generated", id),
            event_id = id.0 as u64,
            cos_theta = cos_theta,
            phi = phi
        );

        self.next_id = id.next();
        self.events.push(Event::new(id, incoming, outgoing));
        let last = self.events.len() - 1;
        Ok(&self.events[last])
    }

    /// Generate `n` events.
    ///
    /// On failure the error is returned and every event generated before it
    /// remains in [`EventGenerator::events`].
    pub fn run(&mut self, n: u32) -> Result<&[Event]> {
        let start = self.events.len();

        log_event!(
            self.ctx,
            INFO,
            event_names::GENERATE_STARTED,
            Stage::Generate,
            format!("Generating {} events for {}", n, self.process.name()),
            events = n as u64,
            sqrt_s = self.process.sqrt_s(),
            total_cross_section_nb = self.process.total_cross_section()
        );

        for _ in 0..n {
            self.generate_event()?;
        }

        log_event!(
            self.ctx,
            INFO,
            event_names::GENERATE_FINISHED,
            Stage::Generate,
            format!("Generated {} events", n),
            events = n as u64,
            attempts = self.stats.attempts,
            acceptance_rate = self.stats.acceptance_rate()
        );

        Ok(&self.events[start..])
    }

    /// Every event generated so far, in order.
    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn into_events(self) -> Vec<Event> {
        self.events
    }

    pub fn stats(&self) -> SamplingStats {
        self.stats
    }

    pub fn process(&self) -> &P {
        self.process
    }
}
