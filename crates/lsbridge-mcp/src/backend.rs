//! HTTP client for the code-intelligence backend.
//!
//! One request per tool invocation, no retries and no caching. Status codes
//! of 400 and above, transport failures and undecodable bodies all come back
//! as [`BackendError`].

use lsbridge_core::config::Config;
use lsbridge_core::error::{BackendError, McpError};
use serde_json::Value;
use std::future::Future;
use std::sync::Arc;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
        }
    }
}

/// How a successful response body should be interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseShape {
    /// Any JSON document.
    Json,
    /// A JSON object whose `source_code` string is the whole result.
    SourceText,
}

/// A fully resolved backend call, derived from validated tool arguments.
#[derive(Debug, Clone, PartialEq)]
pub struct BackendRequest {
    pub method: HttpMethod,
    /// Endpoint path relative to the API prefix.
    pub endpoint: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    pub shape: ResponseShape,
}

impl BackendRequest {
    pub fn get(endpoint: impl Into<String>) -> Self {
        Self {
            method: HttpMethod::Get,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: None,
            shape: ResponseShape::Json,
        }
    }

    pub fn post(endpoint: impl Into<String>, body: Value) -> Self {
        Self {
            method: HttpMethod::Post,
            endpoint: endpoint.into(),
            query: Vec::new(),
            body: Some(body),
            shape: ResponseShape::Json,
        }
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    pub fn with_shape(mut self, shape: ResponseShape) -> Self {
        self.shape = shape;
        self
    }
}

/// Decoded body of a successful backend response.
#[derive(Debug, Clone, PartialEq)]
pub enum BackendPayload {
    Json(Value),
    SourceText(String),
}

pub trait Backend: Send + Sync {
    fn invoke(
        &self,
        request: BackendRequest,
    ) -> impl Future<Output = Result<BackendPayload, BackendError>> + Send;
}

/// Production backend: `reqwest` against `base_url + api_prefix + endpoint`.
#[derive(Clone)]
pub struct HttpBackend {
    client: reqwest::Client,
    config: Arc<Config>,
}

impl HttpBackend {
    pub fn new(config: Arc<Config>) -> Result<Self, McpError> {
        let client = reqwest::Client::builder()
            .user_agent(concat!("lsbridge/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| McpError::BackendSetup(e.to_string()))?;
        Ok(Self { client, config })
    }
}

impl Backend for HttpBackend {
    async fn invoke(&self, request: BackendRequest) -> Result<BackendPayload, BackendError> {
        let url = self.config.endpoint_url(&request.endpoint);
        debug!(method = request.method.as_str(), %url, "backend request");

        let mut builder = match request.method {
            HttpMethod::Get => self.client.get(&url),
            HttpMethod::Post => self.client.post(&url),
        };
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder.send().await.map_err(BackendError::transport)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(BackendError::transport)?;
        debug!(%url, status, bytes = text.len(), "backend response");

        if status >= 400 {
            return Err(BackendError::Status { status, body: text });
        }
        decode_payload(&text, request.shape)
    }
}

/// Interpret a successful response body according to `shape`.
pub fn decode_payload(body: &str, shape: ResponseShape) -> Result<BackendPayload, BackendError> {
    let value: Value = serde_json::from_str(body).map_err(BackendError::decode)?;
    match shape {
        ResponseShape::Json => Ok(BackendPayload::Json(value)),
        ResponseShape::SourceText => value
            .get("source_code")
            .and_then(Value::as_str)
            .map(|text| BackendPayload::SourceText(text.to_string()))
            .ok_or_else(|| BackendError::decode("response has no `source_code` string field")),
    }
}
