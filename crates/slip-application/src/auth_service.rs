//! Login and logout.
//!
//! Together with the session guard these are the only writers of the
//! credential store.

use serde::{Deserialize, Serialize};
use slip_core::credential::CredentialStore;
use slip_core::error::{Result, SlipError};
use slip_core::navigation::{Navigator, Route};
use std::sync::Arc;

use crate::pipeline::RequestPipeline;

#[derive(Debug, Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Body of a successful `POST /auth/login`.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default = "default_token_type")]
    pub token_type: String,
}

fn default_token_type() -> String {
    "bearer".to_string()
}

pub struct AuthService {
    pipeline: Arc<RequestPipeline>,
    credentials: Arc<dyn CredentialStore>,
    navigator: Arc<dyn Navigator>,
}

impl AuthService {
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

    /// Exchanges credentials for a token and stores it.
    ///
    /// On failure the store is left untouched.
    pub async fn login(&self, email: &str, password: &str) -> Result<()> {
        let body = serde_json::to_value(LoginRequest { email, password })?;
        let response = self.pipeline.post_json("/auth/login", body).await?;

        let token: TokenResponse = serde_json::from_value(response)
            .map_err(|e| SlipError::decode(format!("Unexpected login response: {}", e)))?;
        if !token.token_type.eq_ignore_ascii_case("bearer") {
            return Err(SlipError::decode(format!(
                "Unsupported token type: {}",
                token.token_type
            )));
        }

        self.credentials.set(&token.access_token)?;
        tracing::info!("[AuthService] Logged in as {}", email);
        Ok(())
    }

    /// Clears the session and returns to the login view.
    ///
    /// Requests already in flight are not cancelled.
    pub fn logout(&self) -> Result<()> {
        self.credentials.clear()?;
        self.navigator.navigate(Route::Login);
        tracing::info!("[AuthService] Logged out");
        Ok(())
    }
}
