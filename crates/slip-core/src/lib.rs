//! Domain layer for the Slip payroll client.
//!
//! Holds the data model (identity, archive listing, run log, actions) and the
//! trait seams the application layer orchestrates: credential storage, HTTP
//! transport, idempotency key generation and navigation.

pub mod action;
pub mod archive;
pub mod config;
pub mod credential;
pub mod error;
pub mod idempotency;
pub mod identity;
pub mod navigation;
pub mod transport;

// Re-export common error type
pub use error::{Result, SlipError};

pub use action::{ActionKind, RunLog, RunLogEntry};
pub use archive::{ArchiveFile, ArchiveListing};
pub use config::ClientConfig;
pub use credential::CredentialStore;
pub use idempotency::{IdempotencyKeySource, KeyStrategy};
pub use identity::{Identity, Role};
pub use navigation::{Navigator, Notice, Route};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Method};
