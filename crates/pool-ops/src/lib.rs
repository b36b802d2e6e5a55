//! Pool action orchestration: menu, parameter collection, backend calls,
//! local signing, and signed-transaction submission.
//!
//! Coordinates between the backend client (`pool-api`) and the signer
//! (`pool-signer`) on behalf of one operator session.

pub mod action;
pub mod console;
pub mod dispatcher;
pub mod echo;
pub mod prompt;
pub mod scripted;

pub use action::{Action, MenuEntry};
pub use console::{Console, PresetConsole, StdConsole};
pub use dispatcher::{ActionOutcome, Dispatcher, Selection, ADMIN_AUTH_MESSAGE};
pub use scripted::ScriptedConsole;

use serde_json::Value;

use crate::prompt::ParamValue;

/// State carried across actions for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    /// Wallet address sent with every request.
    pub wallet: String,
    /// Pool created during this session, as the backend returned it.
    pub pool_id: Option<Value>,
}

impl Session {
    pub fn new(wallet: &str) -> Self {
        Self {
            wallet: wallet.to_string(),
            pool_id: None,
        }
    }

    pub fn with_pool(mut self, pool_id: impl Into<Value>) -> Self {
        self.pool_id = Some(pool_id.into());
        self
    }

    /// Cached pool id as a collected parameter: text for the query string,
    /// the original JSON value for echoed bodies.
    pub fn pool_param(&self) -> Option<ParamValue> {
        self.pool_id.as_ref().map(ParamValue::from_value)
    }
}
