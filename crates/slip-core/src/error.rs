//! Error types for the Slip client.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::identity::Role;

/// A shared error type for the entire Slip client.
///
/// Variants follow the failure taxonomy of the client: transport failures,
/// HTTP failures (with the backend's structured `detail` when present),
/// role mismatches at the session guard, and single-flight violations.
#[derive(Error, Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SlipError {
    /// No response was received (connection refused, DNS, TLS, ...)
    #[error("Transport error: {0}")]
    Transport(String),

    /// The backend answered with a non-2xx status
    #[error("{message}")]
    Http {
        status: u16,
        /// Structured `detail` field of the response body, if any
        detail: Option<String>,
        /// Transport-level message, e.g. "Request failed with status code 500"
        message: String,
    },

    /// No session token is stored
    #[error("Not authenticated")]
    Unauthenticated,

    /// The authenticated identity does not carry the required role
    #[error("Forbidden: {required} role required, found {actual}")]
    Forbidden { required: Role, actual: Role },

    /// Another action is already in flight
    #[error("Action '{in_flight}' is already running")]
    Busy { in_flight: String },

    /// Response body did not have the expected shape
    #[error("Decode error: {message}")]
    Decode { message: String },

    /// Credential storage error
    #[error("Storage error: {message}")]
    Storage { message: String },

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal error (should not happen in normal operation)
    #[error("Internal error: {0}")]
    Internal(String),
}

impl SlipError {
    // ============================================================================
    // Constructor helpers
    // ============================================================================

    /// Creates a Transport error
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport(message.into())
    }

    /// Creates an Http error for the given status, with the "Request failed with status code N" message.
    pub fn http(status: u16, detail: Option<String>) -> Self {
        Self::Http {
            status,
            detail,
            message: format!("Request failed with status code {}", status),
        }
    }

    /// Creates a Decode error
    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    /// Creates a Storage error
    pub fn storage(message: impl Into<String>) -> Self {
        Self::Storage {
            message: message.into(),
        }
    }

    /// Creates a Config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    /// Creates an Internal error
    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal(message.into())
    }

    // ============================================================================
    // Type checking methods
    // ============================================================================

    /// Check if the backend rejected the credentials (HTTP 401).
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Http { status: 401, .. })
    }

    /// Check if this is a single-flight rejection
    pub fn is_busy(&self) -> bool {
        matches!(self, Self::Busy { .. })
    }

    /// Check if no response was received
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Transport(_))
    }

    /// Returns the HTTP status, if the backend answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Http { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Human-readable message for run logs and notices.
    ///
    /// Prefers the backend's structured `detail`, otherwise falls back to
    /// the transport-level message.
    pub fn user_message(&self) -> String {
        match self {
            Self::Http {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            Self::Http { message, .. } => message.clone(),
            Self::Transport(message) => message.clone(),
            other => other.to_string(),
        }
    }
}

// ============================================================================
// From implementations for automatic conversion
// ============================================================================

impl From<std::io::Error> for SlipError {
    fn from(err: std::io::Error) -> Self {
        Self::Storage {
            message: format!("{} (kind: {:?})", err, err.kind()),
        }
    }
}

impl From<serde_json::Error> for SlipError {
    fn from(err: serde_json::Error) -> Self {
        Self::Decode {
            message: err.to_string(),
        }
    }
}

impl From<toml::de::Error> for SlipError {
    fn from(err: toml::de::Error) -> Self {
        Self::Config(err.to_string())
    }
}

/// A type alias for `Result<T, SlipError>`.
pub type Result<T> = std::result::Result<T, SlipError>;
