//! Navigation commands.
//!
//! Views never mutate location directly. The session guard and logout issue
//! explicit commands through a `Navigator`, which the presentation layer
//! implements.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Views known to the router.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
pub enum Route {
    /// Unauthenticated entry view.
    #[strum(serialize = "/")]
    Login,
    #[strum(serialize = "/dashboard")]
    Dashboard,
    #[strum(serialize = "/manager")]
    Manager,
}

impl Route {
    pub fn path(&self) -> String {
        self.to_string()
    }
}

/// Blocking, user-facing notice.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    /// Shown when a non-manager enters a manager-only view.
    pub fn managers_only() -> Self {
        Self::new("Managers only.")
    }
}

/// Receives navigation commands.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: Route);

    fn notify(&self, notice: Notice);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn test_route_paths() {
        assert_eq!(Route::Login.path(), "/");
        assert_eq!(Route::Dashboard.path(), "/dashboard");
        assert_eq!(Route::from_str("/manager").unwrap(), Route::Manager);
    }
}
