//! Shared plumbing for the `pool-cli` and `sign-tx` binaries.

pub mod config;

use pool_ops::prompt::{self, Params, PromptStep, ValueKind};
use pool_ops::Console;
use pool_types::{PoolError, Result};
use tracing_subscriber::EnvFilter;

pub use config::SignerArgs;

pub const WALLET_STEP: PromptStep =
    PromptStep::new("wallet", "Enter your wallet address: ", ValueKind::Text);

/// Install the stderr subscriber. `RUST_LOG` overrides the default `warn` level.
pub fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

/// Ask for the session wallet and confirm it back to the operator.
pub async fn ask_wallet(console: &mut dyn Console) -> Result<String> {
    let mut params = Params::new();
    prompt::collect(console, &[WALLET_STEP], &mut params).await?;
    let wallet = params
        .get(WALLET_STEP.key)
        .map(|p| p.raw.clone())
        .ok_or_else(|| PoolError::InvalidInput("wallet address is required".into()))?;
    console.show(&format!("Wallet address set to: {}\n", wallet));
    Ok(wallet)
}
