//! Wiring of the shared collaborators.
//!
//! One `SlipContext` per process: it owns the single credential store and
//! the request pipeline every view goes through.

use slip_core::config::ClientConfig;
use slip_core::credential::CredentialStore;
use slip_core::error::Result;
use slip_core::idempotency::IdempotencyKeySource;
use slip_core::navigation::Navigator;
use slip_core::transport::HttpTransport;
use slip_infrastructure::{FileCredentialStore, ReqwestTransport};
use std::sync::Arc;

use crate::auth_service::AuthService;
use crate::health::HealthCheck;
use crate::pipeline::RequestPipeline;
use crate::session_guard::SessionGuard;

#[derive(Clone)]
pub struct SlipContext {
    pub transport: Arc<dyn HttpTransport>,
    pub credentials: Arc<dyn CredentialStore>,
    pub navigator: Arc<dyn Navigator>,
    pub pipeline: Arc<RequestPipeline>,
}

impl SlipContext {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
        keys: Arc<dyn IdempotencyKeySource>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let pipeline = Arc::new(RequestPipeline::new(
            transport.clone(),
            credentials.clone(),
            keys,
        ));
        Self {
            transport,
            credentials,
            navigator,
            pipeline,
        }
    }

    /// Builds the production context: `reqwest` transport and the durable
    /// file credential store.
    pub fn from_config(config: &ClientConfig, navigator: Arc<dyn Navigator>) -> Result<Self> {
        let credentials = match &config.credentials_path {
            Some(path) => FileCredentialStore::open(path),
            None => FileCredentialStore::open_default()?,
        };
        tracing::debug!(
            "[SlipContext] api_url={}, session file={}",
            config.api_url,
            credentials.path().display()
        );

        Ok(Self::new(
            Arc::new(ReqwestTransport::new(&config.api_url)),
            Arc::new(credentials),
            Arc::new(config.key_strategy),
            navigator,
        ))
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    pub fn session_guard(&self) -> SessionGuard {
        SessionGuard::new(
            self.pipeline.clone(),
            self.credentials.clone(),
            self.navigator.clone(),
        )
    }

    pub fn auth_service(&self) -> AuthService {
        AuthService::new(
            self.pipeline.clone(),
            self.credentials.clone(),
            self.navigator.clone(),
        )
    }

    pub fn health_check(&self) -> HealthCheck {
        HealthCheck::new(self.transport.clone())
    }
}
