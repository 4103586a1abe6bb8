//! Credential store trait.
//!
//! Defines the interface for holding the single process-wide bearer token.

use crate::error::Result;

/// Holder of the current session token.
///
/// At most one token is current at any time; `None` means unauthenticated.
/// Only login, logout and the session guard write to the store. Reads happen
/// inside the request pipeline.
///
/// # Security Note
///
/// Implementations must never log the token value.
pub trait CredentialStore: Send + Sync {
    /// Replaces the current token.
    fn set(&self, token: &str) -> Result<()>;

    /// Returns the current token, if any.
    fn get(&self) -> Option<String>;

    /// Removes the current token. Clearing an empty store is not an error.
    fn clear(&self) -> Result<()>;

    /// Returns `true` if a token is stored.
    fn is_authenticated(&self) -> bool {
        self.get().is_some()
    }
}
