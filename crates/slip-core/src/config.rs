//! Client configuration model.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::idempotency::KeyStrategy;

/// Backend address used when nothing else is configured.
pub const DEFAULT_API_URL: &str = "http://127.0.0.1:8000";

/// Resolved client configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientConfig {
    /// Base URL of the payroll backend, without trailing slash.
    pub api_url: String,
    /// Where the session token is persisted. `None` uses the default location.
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    #[serde(default)]
    pub key_strategy: KeyStrategy,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_string(),
            credentials_path: None,
            key_strategy: KeyStrategy::default(),
        }
    }
}

impl ClientConfig {
    pub fn with_api_url(mut self, api_url: impl Into<String>) -> Self {
        self.api_url = normalize_base_url(&api_url.into());
        self
    }
}

/// Optional values read from `config.toml`; unset keys fall through.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub api_url: Option<String>,
    #[serde(default)]
    pub credentials_path: Option<PathBuf>,
    #[serde(default)]
    pub key_strategy: Option<KeyStrategy>,
}

/// Strips whitespace and trailing slashes from a base URL.
pub fn normalize_base_url(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
