//! hep-sim configuration loading and validation.
//!
//! This crate provides:
//! - Typed records for particles.json, process.json and generator.toml
//! - Field-by-field checking of raw catalog JSON
//! - Semantic validation (masses, branching ratios, descriptor metadata)
//! - Config resolution (CLI → env → XDG → defaults)

pub mod catalog;
pub mod process;
pub mod resolve;
pub mod settings;
pub mod validate;

pub use catalog::{default_catalog, DecayModeRecord, ParticleRecord, ParticleRef};
pub use process::ProcessDescriptor;
pub use resolve::{resolve_config, ConfigPaths, ConfigSource};
pub use settings::GeneratorSettings;
pub use validate::{ValidationError, ValidationResult};
