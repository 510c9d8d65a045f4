//! Particle species, the catalog registry and per-event particle instances.

pub mod instance;
pub mod kind;
pub mod registry;

pub use instance::{Lineage, ParticleInstance};
pub use kind::{DecayMode, ParticleKind};
pub use registry::ParticleRegistry;
