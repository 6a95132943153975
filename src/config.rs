//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Config file: `--config <file>`, else `$XDG_CONFIG_HOME/envkey-source/envkey-source.toml`
//! 3. Environment variables: `ENVKEY_SOURCE_*` prefix
//! 4. Command line flags (applied by the CLI layer)

use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment, Map};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};

use crate::application::ApplicationError;
use crate::domain::expand_env_vars;

/// Client name reported to the fetch collaborator.
pub const CLIENT_NAME: &str = "envkey-source";

/// Unified configuration for envkey-source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Fetch executable (default: envkey-fetch on $PATH)
    pub fetch_command: String,
    /// Encrypted cache directory (default: ~/.envkey/cache)
    pub cache_dir: PathBuf,
    /// Client name sent with fetch requests
    pub client_name: String,
    /// Network timeout per attempt
    pub timeout_seconds: f64,
    /// Retry attempts after a failed request
    pub retries: u8,
    /// Exponential backoff factor between retries
    pub retry_backoff: f64,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            fetch_command: "envkey-fetch".into(),
            cache_dir: default_cache_dir(),
            client_name: CLIENT_NAME.into(),
            timeout_seconds: 10.0,
            retries: 3,
            retry_backoff: 1.0,
        }
    }
}

/// Raw settings for intermediate parsing (`None` → not specified, inherit).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub fetch_command: Option<String>,
    pub cache_dir: Option<PathBuf>,
    pub client_name: Option<String>,
    pub timeout_seconds: Option<f64>,
    pub retries: Option<u8>,
    pub retry_backoff: Option<f64>,
}

/// Get the default cache directory (~/.envkey/cache).
fn default_cache_dir() -> PathBuf {
    directories::BaseDirs::new()
        .map(|dirs| dirs.home_dir().join(".envkey").join("cache"))
        .unwrap_or_else(|| PathBuf::from("~/.envkey/cache"))
}

/// Get the XDG config directory for envkey-source.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "envkey-source").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("envkey-source.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).map_err(|e| ApplicationError::Config {
        message: format!("read {}: {}", path.display(), e),
    })?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Expand shell variables and tilde in path-like fields.
    fn expand_paths(&mut self) {
        let expanded = expand_env_vars(self.cache_dir.to_string_lossy().as_ref());
        self.cache_dir = PathBuf::from(expanded);
        self.fetch_command = expand_env_vars(&self.fetch_command);
    }

    /// Overlay wins for every field it specifies.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            fetch_command: overlay
                .fetch_command
                .clone()
                .unwrap_or_else(|| self.fetch_command.clone()),
            cache_dir: overlay
                .cache_dir
                .clone()
                .unwrap_or_else(|| self.cache_dir.clone()),
            client_name: overlay
                .client_name
                .clone()
                .unwrap_or_else(|| self.client_name.clone()),
            timeout_seconds: overlay.timeout_seconds.unwrap_or(self.timeout_seconds),
            retries: overlay.retries.unwrap_or(self.retries),
            retry_backoff: overlay.retry_backoff.unwrap_or(self.retry_backoff),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `config_file` - Explicit config file; must exist when given.
    ///   Without it the global XDG file is used if present.
    pub fn load(config_file: Option<&Path>) -> Result<Self, ApplicationError> {
        let mut current = Self::default();

        match config_file {
            Some(path) => {
                current = current.merge_with(&load_raw_settings(path)?);
            }
            None => {
                if let Some(global_path) = global_config_path() {
                    if global_path.exists() {
                        current = current.merge_with(&load_raw_settings(&global_path)?);
                    }
                }
            }
        }

        current = current.merge_with(&Self::env_overrides()?);
        current.expand_paths();

        Ok(current)
    }

    /// Read `ENVKEY_SOURCE_*` environment variables.
    fn env_overrides() -> Result<RawSettings, ApplicationError> {
        Self::env_overrides_from(None)
    }

    /// Read `ENVKEY_SOURCE_*` overrides from `vars`, or from the process
    /// environment when `None`.
    ///
    /// Values stay strings; numeric fields are converted on deserialize so
    /// string fields keep their exact text.
    pub(crate) fn env_overrides_from(
        vars: Option<Map<String, String>>,
    ) -> Result<RawSettings, ApplicationError> {
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("ENVKEY_SOURCE")
                    .prefix_separator("_")
                    .source(vars),
            )
            .build()
            .map_err(config_err)?;
        config.try_deserialize().map_err(config_err)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
