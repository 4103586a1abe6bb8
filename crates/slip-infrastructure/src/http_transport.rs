//! `reqwest`-backed HTTP transport.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use slip_core::config::normalize_base_url;
use slip_core::error::{Result, SlipError};
use slip_core::transport::{ApiRequest, ApiResponse, HttpTransport, Method};

/// Transport that talks to the payroll backend over HTTP.
///
/// No timeout is configured: requests run to completion or failure.
#[derive(Clone)]
pub struct ReqwestTransport {
    client: Client,
    base_url: String,
}

impl ReqwestTransport {
    /// Creates a new transport for the given base URL.
    pub fn new(base_url: impl AsRef<str>) -> Self {
        Self::with_client(Client::new(), base_url)
    }

    /// Creates a transport around an existing client.
    pub fn with_client(client: Client, base_url: impl AsRef<str>) -> Self {
        Self {
            client,
            base_url: normalize_base_url(base_url.as_ref()),
        }
    }

    fn url_for(&self, path: &str) -> String {
        if path.starts_with('/') {
            format!("{}{}", self.base_url, path)
        } else {
            format!("{}/{}", self.base_url, path)
        }
    }

    fn reqwest_method(method: Method) -> reqwest::Method {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Patch => reqwest::Method::PATCH,
            Method::Delete => reqwest::Method::DELETE,
        }
    }
}

/// Parses a response body into JSON.
///
/// Empty bodies become `Null`; bodies that are not JSON are kept as a string.
pub(crate) fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        let url = self.url_for(&request.path);
        tracing::debug!("[ReqwestTransport] {} {}", request.method, url);

        let mut builder = self
            .client
            .request(Self::reqwest_method(request.method), &url);
        for (name, value) in &request.headers {
            builder = builder.header(name.as_str(), value.as_str());
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(|e| {
            tracing::warn!("[ReqwestTransport] {} {} failed: {}", request.method, url, e);
            SlipError::transport(format!("Network Error: {}", e))
        })?;

        let status = response.status().as_u16();
        let text = response
            .text()
            .await
            .map_err(|e| SlipError::transport(format!("Failed to read response body: {}", e)))?;

        tracing::debug!("[ReqwestTransport] {} {} -> {}", request.method, url, status);

        Ok(ApiResponse::new(status, parse_body(&text)))
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_url_joining() {
        let transport = ReqwestTransport::new("http://127.0.0.1:8000/");
        assert_eq!(transport.base_url(), "http://127.0.0.1:8000");
        assert_eq!(
            transport.url_for("/auth/me"),
            "http://127.0.0.1:8000/auth/me"
        );
        assert_eq!(transport.url_for("archives"), "http://127.0.0.1:8000/archives");
    }

    #[test]
    fn test_parse_body_variants() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  \n"), Value::Null);
        assert_eq!(parse_body(r#"{"rows": 42}"#), json!({"rows": 42}));
        assert_eq!(
            parse_body("Internal Server Error"),
            Value::String("Internal Server Error".to_string())
        );
    }

    #[tokio::test]
    async fn test_unreachable_backend_is_transport_error() {
        // Reserve a free port, then release it so nothing is listening
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let transport = ReqwestTransport::new(format!("http://127.0.0.1:{}", port));
        let result = transport.execute(ApiRequest::get("/health")).await;

        let err = result.unwrap_err();
        assert!(err.is_transport(), "unexpected error: {:?}", err);
    }
}
