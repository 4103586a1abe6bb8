//! Unified path management for Slip configuration files.
//!
//! # Directory Structure
//!
//! ```text
//! ~/.config/slip/              # Config directory
//! ├── config.toml              # Client configuration (api_url, ...)
//! └── session.json             # Stored bearer token
//! ```

use std::path::PathBuf;

const APP_DIR: &str = "slip";

/// Errors that can occur during path resolution.
#[derive(Debug)]
pub enum PathError {
    /// Config directory could not be determined.
    ConfigDirNotFound,
}

impl std::fmt::Display for PathError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PathError::ConfigDirNotFound => write!(f, "Cannot find config directory"),
        }
    }
}

impl std::error::Error for PathError {}

impl From<PathError> for slip_core::SlipError {
    fn from(err: PathError) -> Self {
        slip_core::SlipError::config(err.to_string())
    }
}

/// Unified path management for Slip.
pub struct SlipPaths;

impl SlipPaths {
    /// Returns the Slip configuration directory (e.g. `~/.config/slip/`).
    pub fn config_dir() -> Result<PathBuf, PathError> {
        dirs::config_dir()
            .map(|dir| dir.join(APP_DIR))
            .ok_or(PathError::ConfigDirNotFound)
    }

    /// Returns the path to `config.toml`.
    pub fn config_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("config.toml"))
    }

    /// Returns the path to the persisted session token.
    ///
    /// # Security Note
    ///
    /// The file holds a bearer credential and is written with mode 600 on Unix.
    pub fn credentials_file() -> Result<PathBuf, PathError> {
        Ok(Self::config_dir()?.join("session.json"))
    }
}
