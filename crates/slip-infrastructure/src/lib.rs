//! Infrastructure layer for the Slip client: file-backed credential storage,
//! the `reqwest` transport, configuration loading and path management.

pub mod config_loader;
pub mod credential_store;
pub mod http_transport;
pub mod paths;

pub use crate::config_loader::ConfigLoader;
pub use crate::credential_store::{FileCredentialStore, MemoryCredentialStore};
pub use crate::http_transport::ReqwestTransport;
pub use crate::paths::SlipPaths;
