//! HTTP client for the staking-pool backend.
//!
//! Endpoints live under `<base>/<endpoint>`, e.g. `/api/svm/join-pool`.
//! Every request carries `Content-Type: application/json`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::header::CONTENT_TYPE;
use tracing::debug;
use pool_types::{PoolError, Result};

use crate::{ApiRequest, ApiResponse, PoolBackend};

/// Backend client.
pub struct BackendClient {
    base_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl BackendClient {
    pub fn new(base_url: &str, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(30_000);
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(base_url: &str, client: reqwest::Client) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            timeout: Duration::from_millis(30_000),
        }
    }
}

#[async_trait]
impl PoolBackend for BackendClient {
    fn base_url(&self) -> &str {
        &self.base_url
    }

    async fn send(&self, request: &ApiRequest) -> Result<ApiResponse> {
        let url = request.url(&self.base_url)?;
        debug!(method = %request.method, %url, "backend request");

        let mut builder = self.client
            .request(request.method.into(), url)
            .header(CONTENT_TYPE, "application/json")
            .timeout(self.timeout);
        if let Some(ref body) = request.body {
            builder = builder.json(body);
        }

        let resp = builder
            .send()
            .await
            .map_err(|e| PoolError::Http(format!("{} {}: {}", request.method, request.endpoint, e)))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(PoolError::Backend {
                status: status.as_u16(),
                body,
            });
        }

        resp.json::<ApiResponse>()
            .await
            .map_err(|e| PoolError::InvalidResponse(format!("{}: {}", request.endpoint, e)))
    }
}
