//! Sign one backend-built transaction and print it, base64-encoded, on stdout.

use std::process::ExitCode;

use clap::Parser;
use pool_cli::{init_logging, SignerArgs};
use pool_signer::TransactionSigner;
use pool_types::{Base64, Result};

#[derive(Parser, Debug)]
#[command(name = "sign-tx", version, about = "Sign a transaction with the configured key")]
struct Cli {
    /// Base64-encoded unsigned transaction
    tx_base64: Option<String>,

    #[command(flatten)]
    signer: SignerArgs,
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let Some(tx) = cli.tx_base64.as_deref() else {
        eprintln!("Usage: sign-tx <txDataBase64>");
        return ExitCode::FAILURE;
    };

    match sign(&cli.signer, tx).await {
        Ok(signed) => {
            println!("{}", signed);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn sign(args: &SignerArgs, tx: &str) -> Result<Base64> {
    args.signer()?.sign_transaction(tx).await
}
