//! hep-sim common types, IDs, and errors.
//!
//! This crate provides foundational types shared across hep-core modules:
//! - Relativistic four-momentum algebra
//! - Event, particle and run identifiers
//! - The unified error taxonomy
//! - Output format specifications

pub mod error;
pub mod id;
pub mod kinematics;
pub mod output;

pub use error::{Error, Result};
pub use id::{EventId, ParticleId, RunId};
pub use kinematics::FourMomentum;
pub use output::OutputFormat;
