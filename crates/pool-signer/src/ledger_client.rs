//! JSON-RPC client for the ledger node.
//!
//! Methods:
//! - getLatestBlockhash (commitment: finalized)

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::json;
use solana_sdk::hash::Hash;
use pool_types::{PoolError, Result};

use crate::BlockhashSource;

/// Public devnet endpoint used when no RPC URL is configured.
pub const DEFAULT_RPC_URL: &str = "https://api.devnet.solana.com";

/// JSON-RPC response envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcResponse<T> {
    pub jsonrpc: Option<String>,
    pub id: Option<u64>,
    pub result: Option<T>,
    pub error: Option<RpcErrorObject>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcErrorObject {
    pub code: i64,
    pub message: String,
}

/// Result wrapper carrying the slot the node answered at.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcContextual<T> {
    pub context: RpcContext,
    pub value: T,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RpcContext {
    pub slot: u64,
}

/// Value of `getLatestBlockhash`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LatestBlockhash {
    pub blockhash: String,
    pub last_valid_block_height: u64,
}

/// Ledger node client.
pub struct LedgerClient {
    rpc_url: String,
    client: reqwest::Client,
    timeout: Duration,
}

impl LedgerClient {
    pub fn new(rpc_url: &str, timeout_ms: Option<u64>) -> Self {
        let timeout_ms = timeout_ms.unwrap_or(30_000);
        Self {
            rpc_url: rpc_url.to_string(),
            client: reqwest::Client::builder()
                .timeout(Duration::from_millis(timeout_ms))
                .build()
                .unwrap_or_default(),
            timeout: Duration::from_millis(timeout_ms),
        }
    }

    /// Use a preconfigured HTTP client.
    pub fn with_client(rpc_url: &str, client: reqwest::Client) -> Self {
        Self {
            rpc_url: rpc_url.to_string(),
            client,
            timeout: Duration::from_millis(30_000),
        }
    }

    pub fn rpc_url(&self) -> &str {
        &self.rpc_url
    }

    /// Fetch the latest finalized blockhash.
    ///
    /// POST {"method": "getLatestBlockhash", "params": [{"commitment": "finalized"}]}
    pub async fn get_latest_blockhash(&self) -> Result<LatestBlockhash> {
        let request = json!({
            "jsonrpc": "2.0",
            "id": 1,
            "method": "getLatestBlockhash",
            "params": [{ "commitment": "finalized" }],
        });

        let resp = self.client
            .post(&self.rpc_url)
            .json(&request)
            .timeout(self.timeout)
            .send()
            .await
            .map_err(|e| PoolError::Rpc(format!("request to {} failed: {}", self.rpc_url, e)))?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            return Err(PoolError::Rpc(format!(
                "ledger node returned status {}: {}",
                status, body
            )));
        }

        let body: RpcResponse<RpcContextual<LatestBlockhash>> = resp
            .json()
            .await
            .map_err(|e| PoolError::Rpc(format!("failed to parse ledger response: {}", e)))?;

        if let Some(err) = body.error {
            return Err(PoolError::Rpc(format!("{} (code {})", err.message, err.code)));
        }

        body.result
            .map(|r| r.value)
            .ok_or_else(|| PoolError::Rpc("ledger response has no result".into()))
    }
}

#[async_trait]
impl BlockhashSource for LedgerClient {
    async fn latest_blockhash(&self) -> Result<Hash> {
        let latest = self.get_latest_blockhash().await?;
        Hash::from_str(&latest.blockhash)
            .map_err(|e| PoolError::Rpc(format!("invalid blockhash {}: {}", latest.blockhash, e)))
    }
}
