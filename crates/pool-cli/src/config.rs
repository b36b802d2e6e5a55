//! Runtime configuration shared by `pool-cli` and `sign-tx`.
//!
//! Key precedence: `--keypair` file, then `--private-key` / `SVM_PRIVATE_KEY`,
//! then the key embedded at build time. Ledger endpoint precedence:
//! `--rpc-url` / `SVM_RPC_URL`, then `NEXT_PUBLIC_RPC_URL`, then devnet.

use std::path::PathBuf;

use clap::Args;
use solana_sdk::signature::Keypair;
use pool_signer::keys;
use pool_signer::ledger_client::{LedgerClient, DEFAULT_RPC_URL};
use pool_signer::LocalSigner;
use pool_types::{PoolError, Result};

/// Secret key baked in at build time (`SVM_PRIVATE_KEY=<base58> cargo build`).
pub const EMBEDDED_PRIVATE_KEY: Option<&str> = option_env!("SVM_PRIVATE_KEY");

#[derive(Debug, Clone, Args)]
pub struct SignerArgs {
    /// Ledger node JSON-RPC endpoint used for fresh blockhashes [default: devnet]
    #[arg(long, env = "SVM_RPC_URL")]
    pub rpc_url: Option<String>,

    /// Ledger endpoint under the web app's variable name
    #[arg(long, env = "NEXT_PUBLIC_RPC_URL", hide = true)]
    pub public_rpc_url: Option<String>,

    /// Base58-encoded 64-byte secret key
    #[arg(long, env = "SVM_PRIVATE_KEY", hide_env_values = true)]
    pub private_key: Option<String>,

    /// Keypair file (JSON byte array, as written by solana-keygen)
    #[arg(long, env = "SVM_KEYPAIR_PATH")]
    pub keypair: Option<PathBuf>,

    /// HTTP timeout for backend and ledger requests, in milliseconds
    #[arg(long, env = "POOL_TIMEOUT_MS", default_value_t = 30_000)]
    pub timeout_ms: u64,
}

impl SignerArgs {
    /// Resolve the signing key.
    pub fn load_keypair(&self) -> Result<Keypair> {
        if let Some(ref path) = self.keypair {
            return keys::keypair_from_file(path);
        }
        match self.private_key.as_deref().or(EMBEDDED_PRIVATE_KEY) {
            Some(secret) => keys::keypair_from_base58(secret),
            None => Err(PoolError::Config(
                "no signing key: set SVM_PRIVATE_KEY, --private-key, or --keypair".into(),
            )),
        }
    }

    pub fn ledger_url(&self) -> &str {
        self.rpc_url
            .as_deref()
            .or(self.public_rpc_url.as_deref())
            .unwrap_or(DEFAULT_RPC_URL)
    }

    pub fn signer(&self) -> Result<LocalSigner<LedgerClient>> {
        let keypair = self.load_keypair()?;
        let ledger = LedgerClient::new(self.ledger_url(), Some(self.timeout_ms));
        Ok(LocalSigner::new(keypair, ledger))
    }
}

/// Parse `key=value` as given to `--set`.
pub fn parse_key_val(s: &str) -> std::result::Result<(String, String), String> {
    let (key, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected key=value, got {:?}", s))?;
    if key.trim().is_empty() {
        return Err(format!("empty key in {:?}", s));
    }
    Ok((key.trim().to_string(), value.to_string()))
}
