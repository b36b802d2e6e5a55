//! Local signing for backend-built transactions.
//!
//! Flow: base64 → VersionedTransaction → fresh blockhash → sign → base64
//!
//! Every step is fallible and aborts the whole operation; a transaction is
//! never returned partially updated.

pub mod keys;
pub mod ledger_client;

use async_trait::async_trait;
use solana_sdk::{
    hash::Hash,
    pubkey::Pubkey,
    signature::{Keypair, Signature, Signer},
    transaction::VersionedTransaction,
};
use tracing::debug;
use pool_types::{decode_base64, encode_base64, Base64, PoolError, Result};

/// Source of the recent blockhash patched into transactions before signing.
#[async_trait]
pub trait BlockhashSource: Send + Sync {
    async fn latest_blockhash(&self) -> Result<Hash>;
}

/// Signing capability used by the dispatcher.
#[async_trait]
pub trait TransactionSigner: Send + Sync {
    /// Refresh the blockhash of a base64 transaction, sign it, and re-encode it.
    async fn sign_transaction(&self, tx_base64: &str) -> Result<Base64>;

    /// Detached signature over a UTF-8 message, base58-encoded.
    fn sign_message(&self, message: &str) -> Result<String>;
}

/// Parse a base64 versioned transaction (legacy or v0 message).
pub fn decode_transaction(tx_base64: &str) -> Result<VersionedTransaction> {
    let bytes = decode_base64(tx_base64)?;
    let tx: VersionedTransaction = bincode::deserialize(&bytes)
        .map_err(|e| PoolError::InvalidTransaction(e.to_string()))?;

    let header = tx.message.header();
    if header.num_required_signatures as usize > tx.message.static_account_keys().len() {
        return Err(PoolError::InvalidTransaction(format!(
            "{} required signatures but only {} account keys",
            header.num_required_signatures,
            tx.message.static_account_keys().len()
        )));
    }
    Ok(tx)
}

/// Serialize a versioned transaction to base64.
pub fn encode_transaction(tx: &VersionedTransaction) -> Result<Base64> {
    let bytes = bincode::serialize(tx)
        .map_err(|e| PoolError::InvalidTransaction(e.to_string()))?;
    Ok(encode_base64(&bytes))
}

/// Sign the current message with `keypair`, filling the keypair's signer slot.
///
/// Signatures of other signers are left in place.
pub fn sign_in_place(tx: &mut VersionedTransaction, keypair: &Keypair) -> Result<()> {
    let required = tx.message.header().num_required_signatures as usize;
    let pubkey = keypair.pubkey();
    let index = tx.message
        .static_account_keys()
        .iter()
        .take(required)
        .position(|key| *key == pubkey)
        .ok_or_else(|| PoolError::SignerNotRequired(pubkey.to_string()))?;

    if tx.signatures.len() < required {
        tx.signatures.resize(required, Signature::default());
    }
    tx.signatures[index] = keypair.sign_message(&tx.message.serialize());
    Ok(())
}

/// Signs with a single locally held key pair.
pub struct LocalSigner<B> {
    keypair: Keypair,
    blockhashes: B,
}

impl<B: BlockhashSource> LocalSigner<B> {
    pub fn new(keypair: Keypair, blockhashes: B) -> Self {
        Self { keypair, blockhashes }
    }

    pub fn pubkey(&self) -> Pubkey {
        self.keypair.pubkey()
    }
}

#[async_trait]
impl<B: BlockhashSource> TransactionSigner for LocalSigner<B> {
    async fn sign_transaction(&self, tx_base64: &str) -> Result<Base64> {
        let mut tx = decode_transaction(tx_base64)?;
        debug!(
            signatures = tx.signatures.len(),
            keys = tx.message.static_account_keys().len(),
            "decoded transaction"
        );

        let blockhash = self.blockhashes.latest_blockhash().await?;
        debug!(%blockhash, "refreshing recent blockhash");
        tx.message.set_recent_blockhash(blockhash);

        sign_in_place(&mut tx, &self.keypair)?;
        encode_transaction(&tx)
    }

    fn sign_message(&self, message: &str) -> Result<String> {
        Ok(self.keypair.sign_message(message.as_bytes()).to_string())
    }
}
