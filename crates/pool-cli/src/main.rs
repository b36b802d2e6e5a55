use std::process::ExitCode;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use pool_api::backend_client::BackendClient;
use pool_api::DEFAULT_API_URL;
use pool_cli::config::parse_key_val;
use pool_cli::{ask_wallet, init_logging, SignerArgs};
use pool_ops::{Action, ActionOutcome, Dispatcher, PresetConsole, StdConsole};
use pool_ops::Session;
use pool_types::{PoolError, Result};
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "pool-cli", version, about = "Operator client for the staking-pool backend")]
struct Cli {
    /// Backend base URL
    #[arg(long, env = "POOL_API_URL", default_value = DEFAULT_API_URL)]
    api_url: String,

    #[command(flatten)]
    signer: SignerArgs,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run one action without prompting
    Exec {
        /// Wallet address sent with the request
        #[arg(long)]
        wallet: String,

        /// Menu number or endpoint, e.g. `2` or `join-pool`
        action: String,

        /// Parameter value, repeatable: `--set poolId=P1 --set amount=5`
        #[arg(long = "set", value_parser = parse_key_val)]
        set: Vec<(String, String)>,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    match run(cli).await {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let signer = Arc::new(cli.signer.signer()?);
    let backend = Arc::new(BackendClient::new(&cli.api_url, Some(cli.signer.timeout_ms)));
    info!(api_url = %cli.api_url, signer = %signer.pubkey(), "client configured");

    match cli.command {
        None => {
            let mut console = StdConsole::new();
            let wallet = ask_wallet(&mut console).await?;
            let mut dispatcher = Dispatcher::new(Session::new(&wallet), backend, signer);
            dispatcher.run(&mut console).await?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Exec { wallet, action, set }) => {
            let action = Action::parse(&action)
                .ok_or_else(|| PoolError::InvalidInput(format!("unknown action: {}", action)))?;
            let mut console = PresetConsole::new(set);
            let mut dispatcher = Dispatcher::new(Session::new(&wallet), backend, signer);
            match dispatcher.execute(action, &mut console).await? {
                ActionOutcome::Unauthorized { .. } => Ok(ExitCode::FAILURE),
                ActionOutcome::Completed { .. } | ActionOutcome::Submitted { .. } => {
                    Ok(ExitCode::SUCCESS)
                }
            }
        }
    }
}
