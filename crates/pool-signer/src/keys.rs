//! Signing key loading.
//!
//! Accepted forms:
//! - base58 string of the 64-byte secret (secret || public), as exported by wallets
//! - JSON byte array file, as written by `solana-keygen`

use std::path::Path;

use solana_sdk::signature::Keypair;
use pool_types::{decode_base58, PoolError, Result};

const KEYPAIR_LEN: usize = 64;

/// Build a key pair from its 64 raw bytes.
pub fn keypair_from_bytes(bytes: &[u8]) -> Result<Keypair> {
    if bytes.len() != KEYPAIR_LEN {
        return Err(PoolError::InvalidKeypair(format!(
            "expected {} bytes, got {}",
            KEYPAIR_LEN,
            bytes.len()
        )));
    }
    Keypair::from_bytes(bytes).map_err(|e| PoolError::InvalidKeypair(e.to_string()))
}

/// Decode a base58-encoded secret key.
pub fn keypair_from_base58(secret: &str) -> Result<Keypair> {
    let bytes = decode_base58(secret)
        .map_err(|e| PoolError::InvalidKeypair(e.to_string()))?;
    keypair_from_bytes(&bytes)
}

/// Read a keypair file holding a JSON array of 64 bytes.
pub fn keypair_from_file(path: &Path) -> Result<Keypair> {
    let contents = std::fs::read_to_string(path).map_err(|e| {
        PoolError::InvalidKeypair(format!("failed to read {}: {}", path.display(), e))
    })?;
    let bytes: Vec<u8> = serde_json::from_str(&contents).map_err(|e| {
        PoolError::InvalidKeypair(format!("failed to parse {}: {}", path.display(), e))
    })?;
    keypair_from_bytes(&bytes)
}
