//! HTTP transport abstraction.
//!
//! The transport executes fully prepared requests. It never adds headers on
//! its own; authentication and idempotency metadata are attached upstream by
//! the request pipeline.

use async_trait::async_trait;
use serde_json::Value;
use strum::{Display, EnumString};

use crate::error::Result;

pub const AUTHORIZATION_HEADER: &str = "Authorization";
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// HTTP methods used against the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
#[strum(serialize_all = "UPPERCASE")]
pub enum Method {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl Method {
    /// Anything that is not a plain read triggers backend side effects.
    pub fn is_mutating(&self) -> bool {
        !matches!(self, Self::Get)
    }
}

/// A request addressed relative to the backend base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the base URL, starting with `/`
    pub path: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            headers: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    /// Sets a JSON body.
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Adds a header, replacing any existing header of the same name.
    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_header(name, value);
        self
    }

    pub fn set_header(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        self.headers.retain(|(n, _)| !n.eq_ignore_ascii_case(&name));
        self.headers.push((name, value.into()));
    }

    /// Case-insensitive header lookup.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// A response that was received, whatever its status.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiResponse {
    pub status: u16,
    /// Parsed JSON body. Empty bodies are `Null`, non-JSON bodies a JSON string.
    pub body: Value,
}

impl ApiResponse {
    pub fn new(status: u16, body: Value) -> Self {
        Self { status, body }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// Structured error detail from the body, if present.
    ///
    /// Strings are returned as-is; any other non-null value (e.g. a list of
    /// validation errors) is rendered as compact JSON.
    pub fn detail(&self) -> Option<String> {
        match self.body.get("detail") {
            None | Some(Value::Null) => None,
            Some(Value::String(s)) => Some(s.clone()),
            Some(other) => Some(other.to_string()),
        }
    }
}

/// Executes requests against the backend.
///
/// Implementations return `Ok` for every response received (including
/// non-2xx) and `Err(SlipError::Transport)` only when no response arrived.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse>;

    /// Base URL this transport talks to.
    fn base_url(&self) -> &str;
}
