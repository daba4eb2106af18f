//! Configuration: TOML file, defaults for every field, env override for logging.

mod loader_config;
mod logging_config;
mod storage_config;

pub use loader_config::LoaderConfig;
pub use logging_config::LoggingConfig;
pub use storage_config::{JournalMode, StorageConfig, Synchronous};

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::errors::ConfigError;

/// File name looked up under the project root.
pub const CONFIG_FILE_NAME: &str = "tableload.toml";

/// Env var overriding `logging.level`.
pub const LOG_ENV_VAR: &str = "TABLELOAD_LOG";

/// Top-level configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TableloadConfig {
    pub loader: LoaderConfig,
    pub storage: StorageConfig,
    pub logging: LoggingConfig,
}

impl TableloadConfig {
    /// Parse a TOML string. Missing sections and keys take their defaults.
    pub fn from_toml(toml_str: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(toml_str)?)
    }

    /// Load configuration for `root`.
    ///
    /// An explicit path must exist. Otherwise `<root>/tableload.toml` is
    /// read when present and defaults are used when it is not. The
    /// `TABLELOAD_LOG` env var overrides the log level either way.
    pub fn load(root: &Path, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut config = match explicit {
            Some(path) => Self::read_file(path)?,
            None => {
                let path = root.join(CONFIG_FILE_NAME);
                if path.is_file() {
                    Self::read_file(&path)?
                } else {
                    tracing::debug!(root = %root.display(), "no config file, using defaults");
                    Self::default()
                }
            }
        };

        config.apply_log_override(std::env::var(LOG_ENV_VAR).ok());
        Ok(config)
    }

    /// Replace the log level with a non-blank override.
    fn apply_log_override(&mut self, level: Option<String>) {
        if let Some(level) = level.filter(|l| !l.trim().is_empty()) {
            self.logging.level = level;
        }
    }

    fn read_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml(&contents)
    }
}
