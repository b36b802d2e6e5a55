//! Body of the signed-transaction POST.
//!
//! Every submission carries `wallet` and `transactionBase64`; the remaining
//! fields come from each action's echo table (`Action::echo_fields`).

use serde_json::{Map, Value};
use pool_api::ApiResponse;

use crate::action::Action;
use crate::prompt::Params;

/// Where an echoed field's value comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EchoSource {
    /// Collected parameter in its typed form (number or bool).
    Typed(&'static str),
    /// Collected parameter as the operator entered it.
    Raw(&'static str),
    /// `poolId` of the first response.
    ResponsePoolId,
    /// `receiptId` of the first response.
    ResponseReceiptId,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EchoField {
    pub key: &'static str,
    pub source: EchoSource,
}

impl EchoField {
    pub const fn new(key: &'static str, source: EchoSource) -> Self {
        Self { key, source }
    }

    pub const fn typed(key: &'static str) -> Self {
        Self::new(key, EchoSource::Typed(key))
    }

    pub const fn raw(key: &'static str) -> Self {
        Self::new(key, EchoSource::Raw(key))
    }

    /// Value to send, or `None` when the source has nothing to offer.
    pub fn resolve(&self, params: &Params, response: &ApiResponse) -> Option<Value> {
        match self.source {
            EchoSource::Typed(key) => params.get(key).map(|p| p.value.clone()),
            EchoSource::Raw(key) => params.get(key).map(|p| Value::String(p.raw.clone())),
            EchoSource::ResponsePoolId => response.pool_id().cloned(),
            EchoSource::ResponseReceiptId => response.receipt_id().cloned(),
        }
    }
}

/// Assemble the POST body for a signed transaction.
pub fn submission_body(
    action: Action,
    wallet: &str,
    signed_tx: &str,
    params: &Params,
    response: &ApiResponse,
) -> Value {
    let mut body = Map::new();
    body.insert("wallet".into(), Value::String(wallet.to_string()));
    body.insert("transactionBase64".into(), Value::String(signed_tx.to_string()));

    for field in action.echo_fields() {
        if let Some(value) = field.resolve(params, response) {
            body.insert(field.key.to_string(), value);
        }
    }
    Value::Object(body)
}
