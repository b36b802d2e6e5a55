use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde_json::Value;
use thiserror::Error;

/// Base64-encoded (standard alphabet, padded) string, as exchanged with the backend.
pub type Base64 = String;

/// Pool CLI error types.
#[derive(Debug, Error)]
pub enum PoolError {
    #[error("invalid base64: {0}")]
    InvalidBase64(String),

    #[error("invalid base58: {0}")]
    InvalidBase58(String),

    #[error("invalid transaction: {0}")]
    InvalidTransaction(String),

    #[error("invalid keypair: {0}")]
    InvalidKeypair(String),

    #[error("key {0} is not a required signer of this transaction")]
    SignerNotRequired(String),

    #[error("ledger rpc failed: {0}")]
    Rpc(String),

    #[error("backend request failed: {0}")]
    Http(String),

    #[error("backend returned status {status}: {body}")]
    Backend { status: u16, body: String },

    #[error("malformed response: {0}")]
    InvalidResponse(String),

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("input closed")]
    InputClosed,

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, PoolError>;

/// Decode a standard base64 string, ignoring surrounding whitespace.
pub fn decode_base64(s: &str) -> Result<Vec<u8>> {
    STANDARD
        .decode(s.trim())
        .map_err(|e| PoolError::InvalidBase64(e.to_string()))
}

/// Encode bytes as standard padded base64.
pub fn encode_base64(bytes: &[u8]) -> Base64 {
    STANDARD.encode(bytes)
}

/// Decode a base58 string (Bitcoin alphabet).
pub fn decode_base58(s: &str) -> Result<Vec<u8>> {
    bs58::decode(s.trim())
        .into_vec()
        .map_err(|e| PoolError::InvalidBase58(e.to_string()))
}

/// Encode bytes as base58 (Bitcoin alphabet).
pub fn encode_base58(bytes: &[u8]) -> String {
    bs58::encode(bytes).into_string()
}

/// Whether a JSON value counts as present for the backend contract.
///
/// `null`, `false`, `0`, and `""` are treated as absent.
pub fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().map_or(true, |f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}
