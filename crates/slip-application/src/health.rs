//! Backend liveness check.

use serde_json::Value;
use slip_core::error::Result;
use slip_core::transport::{ApiRequest, HttpTransport, IDEMPOTENCY_KEY_HEADER};
use std::sync::Arc;

use crate::pipeline::ensure_success;

/// Static key sent with the check. Informational only; `GET /health` has no
/// side effects to deduplicate.
pub const HEALTH_DEMO_KEY: &str = "demo-key-123";

/// Calls `GET /health` without credentials.
///
/// Bypasses the request pipeline on purpose: the check is unauthenticated.
pub struct HealthCheck {
    transport: Arc<dyn HttpTransport>,
}

impl HealthCheck {
    pub fn new(transport: Arc<dyn HttpTransport>) -> Self {
        Self { transport }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Returns the health payload reported by the backend.
    pub async fn check(&self) -> Result<Value> {
        let request =
            ApiRequest::get("/health").with_header(IDEMPOTENCY_KEY_HEADER, HEALTH_DEMO_KEY);
        let response = ensure_success(self.transport.execute(request).await?)?;
        Ok(response.body)
    }
}
