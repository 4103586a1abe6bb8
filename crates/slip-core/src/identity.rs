//! Identity domain model.
//!
//! Represents the authenticated user as returned by `GET /auth/me`.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Role carried by an identity.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    Manager,
    Employee,
}

/// The current user's identity.
///
/// Fetched fresh on every protected-view entry and owned by the view that
/// requested it. Never cached across navigations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: Role,
}

impl Identity {
    /// "First Last"
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}
