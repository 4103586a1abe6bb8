//! Client configuration loading.
//!
//! Priority:
//! 1. Environment variables (`SLIP_API_URL`, `SLIP_CREDENTIALS_PATH`, `SLIP_KEY_STRATEGY`)
//! 2. `~/.config/slip/config.toml`
//! 3. Built-in defaults (`http://127.0.0.1:8000`, UUID keys)

use slip_core::config::{ClientConfig, ConfigFile, normalize_base_url};
use slip_core::error::{Result, SlipError};
use slip_core::idempotency::KeyStrategy;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use crate::paths::SlipPaths;

pub const ENV_API_URL: &str = "SLIP_API_URL";
pub const ENV_CREDENTIALS_PATH: &str = "SLIP_CREDENTIALS_PATH";
pub const ENV_KEY_STRATEGY: &str = "SLIP_KEY_STRATEGY";

/// Resolves a `ClientConfig` from environment, file and defaults.
pub struct ConfigLoader {
    config_path: Option<PathBuf>,
}

impl ConfigLoader {
    /// Loader that reads `config.toml` from the default location.
    pub fn new() -> Self {
        Self {
            config_path: SlipPaths::config_file().ok(),
        }
    }

    /// Loader that reads the given file instead (for testing or `--config`).
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: Some(path.into()),
        }
    }

    /// Loads configuration using the process environment.
    pub fn load(&self) -> Result<ClientConfig> {
        self.load_with_env(|key| std::env::var(key).ok())
    }

    /// Loads configuration using a custom environment lookup.
    pub fn load_with_env<F>(&self, env: F) -> Result<ClientConfig>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match &self.config_path {
            Some(path) => Self::read_file(path)?,
            None => ConfigFile::default(),
        };

        let mut config = ClientConfig::default();

        if let Some(api_url) = non_empty(env(ENV_API_URL)).or(file.api_url) {
            config.api_url = normalize_base_url(&api_url);
        }
        if config.api_url.is_empty() {
            return Err(SlipError::config("api_url must not be empty"));
        }

        config.credentials_path = non_empty(env(ENV_CREDENTIALS_PATH))
            .map(PathBuf::from)
            .or(file.credentials_path);

        if let Some(raw) = non_empty(env(ENV_KEY_STRATEGY)) {
            config.key_strategy = KeyStrategy::from_str(&raw).map_err(|_| {
                SlipError::config(format!("Unknown {}: {}", ENV_KEY_STRATEGY, raw))
            })?;
        } else if let Some(strategy) = file.key_strategy {
            config.key_strategy = strategy;
        }

        tracing::debug!(
            "[ConfigLoader] api_url={}, key_strategy={}",
            config.api_url,
            config.key_strategy
        );

        Ok(config)
    }

    fn read_file(path: &Path) -> Result<ConfigFile> {
        if !path.exists() {
            return Ok(ConfigFile::default());
        }
        let content = fs::read_to_string(path).map_err(|e| {
            SlipError::config(format!(
                "Failed to read configuration file at {}: {}",
                path.display(),
                e
            ))
        })?;
        Ok(toml::from_str(&content)?)
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}
