//! hep-sim core library.
//!
//! This crate contains the simulation and analysis engine:
//! - Particle kinds, the catalog-backed registry and per-event instances
//! - Pluggable scattering process models
//! - The rejection-sampling Monte Carlo event generator
//! - Lineage-based track reconstruction
//! - Observables, paired significance tests and goodness-of-fit checks
//! - The text event format shared with reference datasets

pub mod config;
pub mod event;
pub mod event_format;
pub mod exit_codes;
pub mod generator;
pub mod goodness_of_fit;
pub mod logging;
pub mod observable;
pub mod particle;
pub mod process;
pub mod significance;
pub mod track;

pub use event::Event;
pub use generator::{EventGenerator, SamplingStats};
pub use particle::{Lineage, ParticleInstance, ParticleKind, ParticleRegistry};
pub use process::{LeptonPairProcess, ProcessModel};
pub use significance::{ComparisonSample, PairedTest, SignificanceLevel, TestResult};
pub use track::{Track, TrackBuilder};

/// Re-export common types
pub use hep_common::{Error, EventId, FourMomentum, ParticleId, Result, RunId};
