//! Configuration loading for hep-core.
//!
//! This module handles:
//! - Loading particles.json, process.json and generator.toml
//! - Config resolution order (CLI > env > XDG > defaults)
//! - Field-level and semantic validation via hep-config
//! - Config snapshot generation for run reports

pub use hep_config::resolve::{ConfigPaths, ConfigSource};
pub use hep_config::validate::ValidationError;
pub use hep_config::{GeneratorSettings, ParticleRecord, ProcessDescriptor};

use crate::particle::ParticleRegistry;
use crate::process::LeptonPairProcess;
use hep_config::catalog::parse_catalog;
use hep_config::resolve::resolve_config;
use serde::Serialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur during config loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {path}")]
    NotFound { path: PathBuf },

    #[error("Invalid config file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ValidationError,
    },

    #[error("I/O error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Semantic validation failed: {0}")]
    Validation(#[from] ValidationError),
}

impl ConfigError {
    /// Stable code for structured error output.
    pub fn code(&self) -> u32 {
        match self {
            ConfigError::NotFound { .. } => 70,
            ConfigError::Parse { source, .. } => source.code(),
            ConfigError::Io { .. } => 60,
            ConfigError::Validation(source) => source.code(),
        }
    }
}

/// Configuration resolution options.
#[derive(Debug, Default, Clone)]
pub struct ConfigOptions {
    /// Explicit config directory (highest priority).
    pub config_dir: Option<PathBuf>,
    /// Explicit catalog file path.
    pub catalog_path: Option<PathBuf>,
    /// Explicit process descriptor path.
    pub process_path: Option<PathBuf>,
    /// Explicit generator settings path.
    pub generator_path: Option<PathBuf>,
}

/// Resolved configuration with provenance information.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Validated catalog records.
    pub catalog: Vec<ParticleRecord>,
    pub process: ProcessDescriptor,
    pub settings: GeneratorSettings,
    /// Where each file came from.
    pub paths: ConfigPaths,
}

impl ResolvedConfig {
    /// Build the particle registry from the loaded catalog.
    pub fn registry(&self) -> hep_common::Result<ParticleRegistry> {
        ParticleRegistry::from_records(&self.catalog)
    }

    /// Build the process model, resolving its particles in `registry`.
    pub fn process_model(&self, registry: &ParticleRegistry) -> hep_common::Result<LeptonPairProcess> {
        LeptonPairProcess::from_descriptor(&self.process, registry)
    }

    /// Create a config snapshot for run reports.
    pub fn snapshot(&self) -> ConfigSnapshot {
        ConfigSnapshot {
            catalog_path: self.paths.catalog.clone(),
            catalog_source: self.paths.catalog_source.to_string(),
            particles: self.catalog.len(),
            process_path: self.paths.process.clone(),
            process_source: self.paths.process_source.to_string(),
            process_name: self.process.name.clone(),
            sqrt_s: self.process.sqrt_s,
            generator_path: self.paths.generator.clone(),
            generator_source: self.paths.generator_source.to_string(),
            seed: self.settings.seed,
            events: self.settings.events,
            max_attempts: self.settings.max_attempts,
        }
    }
}

/// Config snapshot for run reports.
#[derive(Debug, Clone, Serialize)]
pub struct ConfigSnapshot {
    pub catalog_path: Option<PathBuf>,
    pub catalog_source: String,
    pub particles: usize,
    pub process_path: Option<PathBuf>,
    pub process_source: String,
    pub process_name: String,
    pub sqrt_s: f64,
    pub generator_path: Option<PathBuf>,
    pub generator_source: String,
    pub seed: Option<u64>,
    pub events: u32,
    pub max_attempts: u64,
}

/// Load configuration with the standard resolution order.
///
/// Resolution order (highest to lowest priority):
/// 1. Explicit file paths (via ConfigOptions)
/// 2. Explicit config directory (via ConfigOptions)
/// 3. Environment variable (HEP_SIM_CONFIG)
/// 4. XDG config home (~/.config/hep-sim/)
/// 5. Built-in defaults
///
/// An explicit file path that does not exist is an error; a missing file in
/// a searched directory falls through to the next source.
pub fn load_config(options: &ConfigOptions) -> Result<ResolvedConfig, ConfigError> {
    let mut paths = resolve_config(options.config_dir.as_deref());
    apply_explicit(&mut paths.catalog, &mut paths.catalog_source, &options.catalog_path)?;
    apply_explicit(&mut paths.process, &mut paths.process_source, &options.process_path)?;
    apply_explicit(
        &mut paths.generator,
        &mut paths.generator_source,
        &options.generator_path,
    )?;

    let catalog = match &paths.catalog {
        Some(path) => load_file(path, parse_catalog)?,
        None => hep_config::default_catalog(),
    };
    let process = match &paths.process {
        Some(path) => load_file(path, ProcessDescriptor::parse)?,
        None => ProcessDescriptor::default(),
    };
    let settings = match &paths.generator {
        Some(path) => load_file(path, GeneratorSettings::parse)?,
        None => GeneratorSettings::default(),
    };

    Ok(ResolvedConfig {
        catalog,
        process,
        settings,
        paths,
    })
}

fn apply_explicit(
    slot: &mut Option<PathBuf>,
    source: &mut ConfigSource,
    explicit: &Option<PathBuf>,
) -> Result<(), ConfigError> {
    if let Some(path) = explicit {
        if !path.is_file() {
            return Err(ConfigError::NotFound { path: path.clone() });
        }
        *slot = Some(path.clone());
        *source = ConfigSource::CliArgument;
    }
    Ok(())
}

fn load_file<T>(
    path: &Path,
    parse: impl FnOnce(&str) -> Result<T, ValidationError>,
) -> Result<T, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|e| ConfigError::Io {
        path: path.to_path_buf(),
        source: e,
    })?;
    parse(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        source: e,
    })
}
