//! Session guard for protected views.
//!
//! Runs once per view mount:
//!
//! ```text
//! Unchecked --GET /auth/me ok, role matches--> Authorized(identity)
//!     |--fetch failed (network / non-2xx)----> Rejected(Unauthenticated)
//!     '--role mismatch----------------------> Rejected(Forbidden)
//! ```
//!
//! Every rejection clears the credential store and navigates to the
//! unauthenticated entry view. Nothing is retried and nothing is carried over
//! between mounts.

use slip_core::credential::CredentialStore;
use slip_core::error::{Result, SlipError};
use slip_core::identity::{Identity, Role};
use slip_core::navigation::{Navigator, Notice, Route};
use std::sync::Arc;

use crate::pipeline::RequestPipeline;

/// Why a mount was rejected.
#[derive(Debug, Clone, PartialEq)]
pub enum Rejection {
    /// No token, or the identity fetch failed.
    Unauthenticated { reason: String },
    /// The identity does not carry the required role.
    Forbidden { required: Role, actual: Role },
}

impl Rejection {
    pub fn into_error(self) -> SlipError {
        match self {
            Self::Unauthenticated { .. } => SlipError::Unauthenticated,
            Self::Forbidden { required, actual } => SlipError::Forbidden { required, actual },
        }
    }
}

/// State of one protected-view mount.
#[derive(Debug, Clone, PartialEq)]
pub enum GuardState {
    Unchecked,
    Authorized(Identity),
    Rejected(Rejection),
}

impl GuardState {
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authorized(identity) => Some(identity),
            _ => None,
        }
    }

    /// Converts into `Ok(identity)` or the matching `SlipError`.
    pub fn into_result(self) -> Result<Identity> {
        match self {
            Self::Authorized(identity) => Ok(identity),
            Self::Rejected(rejection) => Err(rejection.into_error()),
            Self::Unchecked => Err(SlipError::internal("session guard was not run")),
        }
    }
}

/// Enforces authentication and role requirements on view entry.
pub struct SessionGuard {
    pipeline: Arc<RequestPipeline>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl SessionGuard {
    pub fn new(
        pipeline: Arc<RequestPipeline>,
        credentials: Arc<dyn CredentialStore>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self {
            pipeline,
            credentials,
            navigator,
        }
    }

    /// Runs the guard for a view requiring `required` (or any role if `None`).
    ///
    /// # Returns
    ///
    /// `Authorized` or `Rejected`; never `Unchecked`. Rejections have
    /// already cleared the store and issued the redirect.
    pub async fn enter(&self, required: Option<Role>) -> GuardState {
        if !self.credentials.is_authenticated() {
            tracing::info!("[SessionGuard] No stored session, redirecting to login");
            return self.reject(Rejection::Unauthenticated {
                reason: "no session token".to_string(),
            });
        }

        let identity = match self.pipeline.get_json::<Identity>("/auth/me").await {
            Ok(identity) => identity,
            Err(e) => {
                tracing::info!("[SessionGuard] Identity fetch failed: {}", e);
                return self.reject(Rejection::Unauthenticated {
                    reason: e.user_message(),
                });
            }
        };

        if let Some(required) = required
            && identity.role != required
        {
            tracing::info!(
                "[SessionGuard] {} has role {}, view requires {}",
                identity.email,
                identity.role,
                required
            );
            self.navigator.notify(Self::notice_for(required));
            return self.reject(Rejection::Forbidden {
                required,
                actual: identity.role,
            });
        }

        tracing::debug!(
            "[SessionGuard] Authorized {} ({})",
            identity.email,
            identity.role
        );
        GuardState::Authorized(identity)
    }

    fn notice_for(required: Role) -> Notice {
        match required {
            Role::Manager => Notice::managers_only(),
            Role::Employee => Notice::new("Employees only."),
        }
    }

    fn reject(&self, rejection: Rejection) -> GuardState {
        if let Err(e) = self.credentials.clear() {
            tracing::warn!("[SessionGuard] Failed to clear credentials: {}", e);
        }
        self.navigator.navigate(Route::Login);
        GuardState::Rejected(rejection)
    }
}
