//! Request pipeline.
//!
//! The single place where outgoing requests get their bearer credential and
//! idempotency key. Call sites build plain `ApiRequest`s and never touch
//! these headers themselves.

use serde::de::DeserializeOwned;
use serde_json::{Value, json};
use slip_core::credential::CredentialStore;
use slip_core::error::{Result, SlipError};
use slip_core::idempotency::IdempotencyKeySource;
use slip_core::transport::{
    AUTHORIZATION_HEADER, ApiRequest, ApiResponse, HttpTransport, IDEMPOTENCY_KEY_HEADER,
};
use std::sync::Arc;

/// Wraps a transport and decorates every request on its way out.
pub struct RequestPipeline {
    transport: Arc<dyn HttpTransport>,
    credentials: Arc<dyn CredentialStore>,
    keys: Arc<dyn IdempotencyKeySource>,
}

impl RequestPipeline {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        credentials: Arc<dyn CredentialStore>,
        keys: Arc<dyn IdempotencyKeySource>,
    ) -> Self {
        Self {
            transport,
            credentials,
            keys,
        }
    }

    pub fn base_url(&self) -> &str {
        self.transport.base_url()
    }

    /// Attaches auth and idempotency headers.
    ///
    /// - `Authorization: Bearer <token>` when a token is stored, nothing otherwise
    /// - `Idempotency-Key: <fresh key>` on every mutating method
    pub fn prepare(&self, mut request: ApiRequest) -> ApiRequest {
        if let Some(token) = self.credentials.get() {
            request.set_header(AUTHORIZATION_HEADER, format!("Bearer {}", token));
        }
        if request.method.is_mutating() {
            request.set_header(IDEMPOTENCY_KEY_HEADER, self.keys.next_key());
        }
        request
    }

    /// Sends a request and maps non-2xx responses to `SlipError::Http`.
    pub async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let request = self.prepare(request);
        let method = request.method;
        let path = request.path.clone();

        let response = self.transport.execute(request).await?;
        if !response.is_success() {
            tracing::debug!(
                "[RequestPipeline] {} {} answered {}",
                method,
                path,
                response.status
            );
        }
        ensure_success(response)
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let response = self.send(ApiRequest::get(path)).await?;
        serde_json::from_value(response.body).map_err(|e| {
            SlipError::decode(format!("Unexpected response from GET {}: {}", path, e))
        })
    }

    /// POST `path` with a JSON body and return the response body.
    pub async fn post_json(&self, path: &str, body: Value) -> Result<Value> {
        let response = self.send(ApiRequest::post(path).with_body(body)).await?;
        Ok(response.body)
    }

    /// POST `path` with an empty JSON object, as used by the manager actions.
    pub async fn post_empty(&self, path: &str) -> Result<Value> {
        self.post_json(path, json!({})).await
    }
}

/// Turns a non-2xx response into `SlipError::Http` carrying the body's detail.
pub(crate) fn ensure_success(response: ApiResponse) -> Result<ApiResponse> {
    if response.is_success() {
        Ok(response)
    } else {
        Err(SlipError::http(response.status, response.detail()))
    }
}
