//! Configuration loading from files and environment
//!
//! Every step takes a config and returns a new one, so the hierarchy reads as
//! a straight chain of transformations.

use std::path::{Path, PathBuf};

use tracing::debug;

use super::types::{ConfigLayer, EngineConfig};
use crate::{Error, Result};

const ENV_STAGE_DEPTH: &str = "SEATING_STAGE_DEPTH";
const ENV_ARTIFACT_PATH: &str = "SEATING_ARTIFACT_PATH";

/// Load configuration from all sources with hierarchy
///
/// # Errors
///
/// Returns error if:
/// - A config file exists but cannot be read or is malformed TOML
/// - An environment override is not a valid value
/// - The merged config fails validation
pub fn load_config() -> Result<EngineConfig> {
    let config = EngineConfig::default();

    let config = match global_config_path() {
        Some(path) if path.exists() => config.merge(load_toml_file(&path)?),
        _ => config,
    };

    let project_path = project_config_path()?;
    let config = if project_path.exists() {
        config.merge(load_toml_file(&project_path)?)
    } else {
        config
    };

    let config = config.apply_env_vars()?;
    config.validate()?;
    debug!(
        stage_depth = config.stage_depth,
        artifact = %config.artifact_path,
        "loaded engine config"
    );
    Ok(config)
}

/// Load defaults overlaid by exactly one file, then the environment.
///
/// Used for `--config`; the global and project files are skipped.
///
/// # Errors
///
/// Same as [`load_config`], plus a missing file is an error here.
pub fn load_config_from(path: &Path) -> Result<EngineConfig> {
    if !path.exists() {
        return Err(Error::invalid_config(format!(
            "config file not found: {}",
            path.display()
        )));
    }
    let config = EngineConfig::default()
        .merge(load_toml_file(path)?)
        .apply_env_vars()?;
    config.validate()?;
    Ok(config)
}

/// Get path to global config file
pub fn global_config_path() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "seating")
        .map(|proj_dirs| proj_dirs.config_dir().join("config.toml"))
}

/// Get path to project config file
///
/// # Errors
///
/// Returns error if current directory cannot be determined
pub fn project_config_path() -> Result<PathBuf> {
    std::env::current_dir()
        .map(|dir| dir.join(".seating").join("config.toml"))
        .map_err(|e| Error::io(format!("Failed to get current directory: {e}")))
}

/// Load a TOML file into a config layer
///
/// # Errors
///
/// Returns `Error::Io` if the file cannot be read and `Error::InvalidConfig`
/// if it is not valid TOML for a config layer.
pub fn load_toml_file(path: &Path) -> Result<ConfigLayer> {
    if path.is_dir() {
        return Err(Error::io(format!(
            "Config path is a directory, not a file: {}",
            path.display()
        )));
    }

    let content = std::fs::read_to_string(path)
        .map_err(|e| Error::io(format!("Failed to read config file {}: {e}", path.display())))?;

    toml::from_str(&content).map_err(|e| {
        Error::invalid_config(format!(
            "Failed to parse config file {}: {e}",
            path.display()
        ))
    })
}

impl EngineConfig {
    /// Apply `SEATING_*` environment overrides
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if an override cannot be parsed.
    pub fn apply_env_vars(self) -> Result<Self> {
        self.apply_env_from(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable source
    ///
    /// # Errors
    ///
    /// Returns `Error::InvalidConfig` if an override cannot be parsed.
    pub fn apply_env_from(mut self, lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        if let Some(value) = lookup(ENV_STAGE_DEPTH) {
            self.stage_depth = value.trim().parse().map_err(|e| {
                Error::invalid_config(format!("Invalid {ENV_STAGE_DEPTH} value '{value}': {e}"))
            })?;
        }

        if let Some(value) = lookup(ENV_ARTIFACT_PATH) {
            if value.trim().is_empty() {
                return Err(Error::invalid_config(format!(
                    "{ENV_ARTIFACT_PATH} cannot be empty - unset the variable or provide a path"
                )));
            }
            self.artifact_path = value;
        }

        Ok(self)
    }
}
