//! Configuration resolution and path discovery.
//!
//! Resolution order: CLI directory → `HEP_SIM_CONFIG` → XDG config → built-in defaults.
//! Each file is resolved independently, so a directory may override only
//! the catalog and leave the process to a later source.

use std::path::{Path, PathBuf};

/// Environment variable naming a config directory.
pub const ENV_CONFIG_DIR: &str = "HEP_SIM_CONFIG";

/// Standard config file names.
pub const CATALOG_FILENAME: &str = "particles.json";
pub const PROCESS_FILENAME: &str = "process.json";
pub const GENERATOR_FILENAME: &str = "generator.toml";

/// Application name for XDG directories.
const APP_NAME: &str = "hep-sim";

/// Discovered configuration file paths.
#[derive(Debug, Clone, Default)]
pub struct ConfigPaths {
    pub catalog: Option<PathBuf>,
    pub process: Option<PathBuf>,
    pub generator: Option<PathBuf>,

    pub catalog_source: ConfigSource,
    pub process_source: ConfigSource,
    pub generator_source: ConfigSource,
}

/// Where a configuration file was found.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ConfigSource {
    /// Directory given on the command line.
    CliArgument,

    /// Directory named by `HEP_SIM_CONFIG`.
    Environment,

    /// Found in the XDG config directory.
    XdgConfig,

    /// Using built-in defaults.
    #[default]
    BuiltinDefault,
}

impl std::fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigSource::CliArgument => write!(f, "CLI argument"),
            ConfigSource::Environment => write!(f, "environment variable"),
            ConfigSource::XdgConfig => write!(f, "XDG config"),
            ConfigSource::BuiltinDefault => write!(f, "builtin default"),
        }
    }
}

/// Resolve all configuration file paths.
pub fn resolve_config(cli_dir: Option<&Path>) -> ConfigPaths {
    let env_dir = std::env::var_os(ENV_CONFIG_DIR).map(PathBuf::from);
    let xdg_dir = xdg_config_dir();

    let candidates: Vec<(PathBuf, ConfigSource)> = [
        (cli_dir.map(Path::to_path_buf), ConfigSource::CliArgument),
        (env_dir, ConfigSource::Environment),
        (xdg_dir, ConfigSource::XdgConfig),
    ]
    .into_iter()
    .filter_map(|(dir, source)| dir.map(|d| (d, source)))
    .collect();

    let (catalog, catalog_source) = resolve_single(&candidates, CATALOG_FILENAME);
    let (process, process_source) = resolve_single(&candidates, PROCESS_FILENAME);
    let (generator, generator_source) = resolve_single(&candidates, GENERATOR_FILENAME);

    ConfigPaths {
        catalog,
        process,
        generator,
        catalog_source,
        process_source,
        generator_source,
    }
}

fn resolve_single(
    candidates: &[(PathBuf, ConfigSource)],
    filename: &str,
) -> (Option<PathBuf>, ConfigSource) {
    for (dir, source) in candidates {
        let path = dir.join(filename);
        if path.is_file() {
            return (Some(path), *source);
        }
    }
    (None, ConfigSource::BuiltinDefault)
}

/// Get the XDG config directory for hep-sim.
pub fn xdg_config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join(APP_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_source_display() {
        assert_eq!(ConfigSource::CliArgument.to_string(), "CLI argument");
        assert_eq!(ConfigSource::Environment.to_string(), "environment variable");
        assert_eq!(ConfigSource::XdgConfig.to_string(), "XDG config");
        assert_eq!(ConfigSource::BuiltinDefault.to_string(), "builtin default");
    }

    #[test]
    fn test_resolve_single_prefers_first_candidate() {
        let first = tempfile::tempdir().expect("tempdir");
        let second = tempfile::tempdir().expect("tempdir");
        std::fs::write(first.path().join(PROCESS_FILENAME), "{}").expect("write");
        std::fs::write(second.path().join(PROCESS_FILENAME), "{}").expect("write");
        std::fs::write(second.path().join(CATALOG_FILENAME), "[]").expect("write");

        let candidates = vec![
            (first.path().to_path_buf(), ConfigSource::CliArgument),
            (second.path().to_path_buf(), ConfigSource::Environment),
        ];

        let (process, source) = resolve_single(&candidates, PROCESS_FILENAME);
        assert_eq!(process, Some(first.path().join(PROCESS_FILENAME)));
        assert_eq!(source, ConfigSource::CliArgument);

        let (catalog, source) = resolve_single(&candidates, CATALOG_FILENAME);
        assert_eq!(catalog, Some(second.path().join(CATALOG_FILENAME)));
        assert_eq!(source, ConfigSource::Environment);

        let (generator, source) = resolve_single(&candidates, GENERATOR_FILENAME);
        assert!(generator.is_none());
        assert_eq!(source, ConfigSource::BuiltinDefault);
    }

    #[test]
    fn test_xdg_config_dir() {
        if let Some(path) = xdg_config_dir() {
            assert!(path.ends_with(APP_NAME));
        }
    }
}
