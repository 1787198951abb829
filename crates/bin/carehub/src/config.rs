//! Configuration loading: TOML file with environment variable overrides.
//!
//! Looks for `carehub.toml` in the working directory unless a path is given.
//! Every field has a default so the file is optional. Environment variables
//! take precedence over file values.

use std::path::{Path, PathBuf};

use carehub_app::ports::Credentials;
use serde::Deserialize;

const DEFAULT_PATH: &str = "carehub.toml";

/// Top-level configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Backend connection settings.
    pub backend: BackendConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

/// Backend project and data source.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct BackendConfig {
    /// Project identifier issued by the hosted backend.
    pub project_id: String,
    /// Public API key of the project.
    pub public_key: String,
    /// JSON fixture seeding the in-memory tables.
    pub fixture: Option<PathBuf>,
}

#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Filter directive (`RUST_LOG` syntax).
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: "carehub=info,carehub_app=info,carehub_adapter_memory=info".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from `path`, or from `carehub.toml` if present,
    /// then apply environment-variable overrides.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is malformed, or if an explicitly given
    /// file cannot be read.
    pub fn load(path: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::from_file(path, true)?,
            None => Self::from_file(Path::new(DEFAULT_PATH), false)?,
        };
        config.apply_overrides(|key| std::env::var(key).ok());
        Ok(config)
    }

    fn from_file(path: &Path, required: bool) -> Result<Self, ConfigError> {
        match std::fs::read_to_string(path) {
            Ok(content) => toml::from_str(&content).map_err(ConfigError::Parse),
            Err(err) if !required && err.kind() == std::io::ErrorKind::NotFound => {
                Ok(Self::default())
            }
            Err(err) => Err(ConfigError::Io(err)),
        }
    }

    fn apply_overrides(&mut self, var: impl Fn(&str) -> Option<String>) {
        if let Some(val) = var("CAREHUB_PROJECT_ID") {
            self.backend.project_id = val;
        }
        if let Some(val) = var("CAREHUB_PUBLIC_KEY") {
            self.backend.public_key = val;
        }
        if let Some(val) = var("CAREHUB_FIXTURE") {
            self.backend.fixture = Some(PathBuf::from(val));
        }
        if let Some(val) = var("CAREHUB_LOG") {
            self.logging.filter = val;
        }
        if let Some(val) = var("RUST_LOG") {
            self.logging.filter = val;
        }
    }

    /// Credentials the backend client is built with.
    #[must_use]
    pub fn credentials(&self) -> Credentials {
        Credentials::new(&self.backend.project_id, &self.backend.public_key)
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// TOML parse failure.
    #[error("failed to parse config file")]
    Parse(#[from] toml::de::Error),
    /// File I/O failure.
    #[error("failed to read config file")]
    Io(#[from] std::io::Error),
}
