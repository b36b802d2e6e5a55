//! Request/response model for the staking-pool backend.
//!
//! - Build GET/PUT requests with URL-encoded query parameters
//! - Submit signed transactions as JSON POST bodies
//! - Read `transactionBase64`, `poolId`, `receiptId` from responses

use std::fmt;

use async_trait::async_trait;
use reqwest::Url;
use serde::Deserialize;
use serde_json::Value;
use pool_types::{is_truthy, PoolError, Result};

pub mod backend_client;

/// Default backend base path.
pub const DEFAULT_API_URL: &str = "http://localhost:3000/api/svm";

/// HTTP methods used by the backend contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Put,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Put => "PUT",
            HttpMethod::Post => "POST",
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Post => reqwest::Method::POST,
        }
    }
}

/// One backend call.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub method: HttpMethod,
    /// Ordered query parameters; sent for every method when present.
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
}

impl ApiRequest {
    pub fn new(endpoint: &str, method: HttpMethod) -> Self {
        Self {
            endpoint: endpoint.to_string(),
            method,
            query: Vec::new(),
            body: None,
        }
    }

    pub fn with_query(mut self, key: &str, value: impl Into<String>) -> Self {
        self.query.push((key.to_string(), value.into()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// First query value for `key`.
    pub fn query_value(&self, key: &str) -> Option<&str> {
        self.query
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Absolute URL of this request under `base_url`.
    pub fn url(&self, base_url: &str) -> Result<Url> {
        let raw = format!("{}/{}", base_url.trim_end_matches('/'), self.endpoint);
        let mut url = Url::parse(&raw)
            .map_err(|e| PoolError::Config(format!("invalid backend url {}: {}", raw, e)))?;
        if !self.query.is_empty() {
            url.query_pairs_mut().extend_pairs(self.query.iter());
        }
        Ok(url)
    }
}

/// Backend response body.
///
/// Any JSON is accepted; the well-known members are read through accessors.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(transparent)]
pub struct ApiResponse {
    pub body: Value,
}

impl ApiResponse {
    pub fn new(body: Value) -> Self {
        Self { body }
    }

    fn member(&self, key: &str) -> Option<&Value> {
        self.body.get(key).filter(|v| is_truthy(v))
    }

    /// Unsigned transaction to sign, if the action has a second phase.
    pub fn transaction_base64(&self) -> Option<&str> {
        self.member("transactionBase64").and_then(Value::as_str)
    }

    /// Pool created by this call, number or string as sent.
    pub fn pool_id(&self) -> Option<&Value> {
        self.member("poolId")
    }

    pub fn receipt_id(&self) -> Option<&Value> {
        self.member("receiptId")
    }
}

/// Transport to the pool backend.
#[async_trait]
pub trait PoolBackend: Send + Sync {
    /// Base URL that request endpoints are appended to.
    fn base_url(&self) -> &str;

    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse>;
}
