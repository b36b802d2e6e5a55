//! Menu loop and per-action execution.
//!
//! One action runs as:
//! 1. collect pool id (cached or asked) and the action's prompt steps
//! 2. sign `Auth admin` for admin endpoints
//! 3. GET/PUT the endpoint
//! 4. if the response carries `transactionBase64`: sign it, POST it back

use std::sync::Arc;

use serde_json::Value;
use tracing::{error, info, warn};
use pool_api::{ApiRequest, ApiResponse, HttpMethod, PoolBackend};
use pool_signer::TransactionSigner;
use pool_types::{PoolError, Result};

use crate::action::{Action, MenuEntry, MAX_ACTION_ID};
use crate::console::Console;
use crate::echo;
use crate::prompt::{self, ParamValue, Params, POOL_ID_STEP};
use crate::Session;

/// Message signed to authenticate admin endpoints.
pub const ADMIN_AUTH_MESSAGE: &str = "Auth admin";

/// Result of parsing a menu selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Run(Action),
    Exit,
    /// Not a number, or outside 0..=13.
    Invalid,
    /// A known id no longer offered in this session.
    Unavailable,
}

/// How an action ended.
#[derive(Debug, Clone, PartialEq)]
pub enum ActionOutcome {
    /// Single-phase action; no transaction to sign.
    Completed { response: ApiResponse },
    /// Transaction signed and submitted.
    Submitted { response: ApiResponse, submission: ApiResponse },
    /// Admin signature could not be produced; nothing was sent.
    Unauthorized { reason: String },
}

pub struct Dispatcher {
    session: Session,
    backend: Arc<dyn PoolBackend>,
    signer: Arc<dyn TransactionSigner>,
}

impl Dispatcher {
    pub fn new(
        session: Session,
        backend: Arc<dyn PoolBackend>,
        signer: Arc<dyn TransactionSigner>,
    ) -> Self {
        Self { session, backend, signer }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// At most one pool per session.
    pub fn is_available(&self, action: Action) -> bool {
        !(action == Action::CreatePool && self.session.pool_id.is_some())
    }

    /// Current menu, Exit last.
    pub fn menu(&self) -> Vec<MenuEntry> {
        Action::ALL
            .into_iter()
            .filter(|a| self.is_available(*a))
            .map(MenuEntry::Run)
            .chain(std::iter::once(MenuEntry::Exit))
            .collect()
    }

    pub fn select(&self, input: &str) -> Selection {
        let id = match input.trim().parse::<i64>() {
            Ok(id) if (0..=MAX_ACTION_ID).contains(&id) => id,
            _ => return Selection::Invalid,
        };
        if id == 0 {
            return Selection::Exit;
        }
        match Action::from_id(id) {
            Some(action) if self.is_available(action) => Selection::Run(action),
            _ => Selection::Unavailable,
        }
    }

    /// Interactive loop until Exit or end of input.
    ///
    /// Action failures are reported and the loop continues; end of input in
    /// the middle of an action is returned as an error.
    pub async fn run(&mut self, console: &mut dyn Console) -> Result<()> {
        loop {
            console.show("\nAvailable Actions:");
            for entry in self.menu() {
                console.show(&format!("{}. {}", entry.id(), entry.name()));
            }

            let question = format!("\nSelect an action (0-{}): ", MAX_ACTION_ID);
            let input = match console.ask(&question).await {
                Ok(input) => input,
                Err(PoolError::InputClosed) => {
                    console.show("Exiting...");
                    return Ok(());
                }
                Err(e) => return Err(e),
            };

            let action = match self.select(&input) {
                Selection::Run(action) => action,
                Selection::Exit => {
                    console.show("Exiting...");
                    return Ok(());
                }
                Selection::Invalid => {
                    console.show("Invalid choice. Please try again.");
                    continue;
                }
                Selection::Unavailable => {
                    console.show("Invalid action. Please try again.");
                    continue;
                }
            };

            match self.execute(action, console).await {
                Ok(_) => {}
                Err(PoolError::InputClosed) => return Err(PoolError::InputClosed),
                Err(e) => {
                    error!(endpoint = action.endpoint(), error = %e, "action failed");
                    console.show(&format!("Error: {}", e));
                }
            }
        }
    }

    /// Run one action to completion.
    pub async fn execute(&mut self, action: Action, console: &mut dyn Console) -> Result<ActionOutcome> {
        console.show(&format!("\nSelected action: {}", action.name()));

        let params = self.collect_params(action, console).await?;
        let mut request = self.build_request(action, &params);

        if action.is_admin() {
            match self.signer.sign_message(ADMIN_AUTH_MESSAGE) {
                Ok(signature) => request = request.with_query("signature", signature),
                Err(e) => {
                    warn!(endpoint = action.endpoint(), error = %e, "admin signature unavailable");
                    console.show(&format!("Failed to get admin signature: {}", e));
                    return Ok(ActionOutcome::Unauthorized { reason: e.to_string() });
                }
            }
        }

        let response = self.call(&request, console).await?;

        let Some(unsigned) = response.transaction_base64() else {
            return Ok(ActionOutcome::Completed { response });
        };

        console.show("\nSigning transaction...");
        let signed = self.signer.sign_transaction(unsigned).await?;

        if action == Action::CreatePool {
            match response.pool_id() {
                Some(pool_id) => {
                    info!(%pool_id, "pool created, caching for this session");
                    self.session.pool_id = Some(pool_id.clone());
                }
                None => warn!("create-pool response carried no poolId"),
            }
        }

        let body = echo::submission_body(action, &self.session.wallet, &signed, &params, &response);
        console.show("\nSending signed data to backend!");
        let submission = self
            .call(&ApiRequest::new(action.endpoint(), HttpMethod::Post).with_body(body), console)
            .await?;
        info!(endpoint = action.endpoint(), "signed transaction submitted");

        Ok(ActionOutcome::Submitted { response, submission })
    }

    async fn collect_params(&self, action: Action, console: &mut dyn Console) -> Result<Params> {
        let mut params = Params::new();
        if action.needs_pool_id() {
            match self.session.pool_param() {
                Some(pool_id) => {
                    console.show(&format!("Using pool ID: {}", pool_id.raw));
                    params.insert(POOL_ID_STEP.key, pool_id);
                }
                None => prompt::collect(console, &[POOL_ID_STEP], &mut params).await?,
            }
        }
        prompt::collect(console, action.steps(), &mut params).await?;
        Ok(params)
    }

    /// First-phase request: wallet, then parameters in collection order.
    pub fn build_request(&self, action: Action, params: &Params) -> ApiRequest {
        params.iter().fold(
            ApiRequest::new(action.endpoint(), action.method()).with_query("wallet", self.session.wallet.as_str()),
            |request, (key, value)| request.with_query(key, value.query.as_str()),
        )
    }

    async fn call(&self, request: &ApiRequest, console: &mut dyn Console) -> Result<ApiResponse> {
        let url = request.url(self.backend.base_url())?;
        console.show(&format!("\nMaking {} request to: {}", request.method, url));
        if let Some(ref body) = request.body {
            console.show(&format!("With body: {}", pretty(body)));
        }

        let response = self.backend.send(request).await?;
        console.show(&format!("Response: {}", pretty(&response.body)));
        Ok(response)
    }
}

fn pretty(value: &Value) -> String {
    serde_json::to_string_pretty(value).unwrap_or_else(|_| value.to_string())
}
