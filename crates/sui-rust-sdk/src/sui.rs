//! Main Sui client entry point.

use crate::api::{JsonRpcClient, RpcClient};
use crate::config::SuiConfig;
use crate::dispatch::{self, Dispatcher, ExecutionResult};
use crate::error::{SuiError, SuiResult};
use crate::signer::Signer;
use crate::transaction::{TransactionData, TransactionKind};
use crate::types::{ObjectId, ObjectInfo, ObjectRef, SuiAddress, TransactionDigest};
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;

/// Entry point bundling a configured [`JsonRpcClient`] with the signing
/// and dispatch flow.
///
/// Signers are always passed in per call; the client holds no keys.
///
/// # Example
///
/// ```rust,no_run
/// use sui_rust_sdk::signer::{Ed25519Keypair, Signer};
/// use sui_rust_sdk::transaction::TransactionBuilder;
/// use sui_rust_sdk::types::ObjectId;
/// use sui_rust_sdk::{Sui, SuiConfig};
///
/// #[tokio::main]
/// async fn main() -> anyhow::Result<()> {
///     let sui = Sui::new(SuiConfig::devnet())?;
///     let signer = Signer::from(Ed25519Keypair::generate());
///     let gas_coin = sui.refresh_object_ref(ObjectId::from_hex("0x5e11")?).await?;
///
///     let mut builder = TransactionBuilder::new();
///     let amount = builder.pure(&1_000u64)?;
///     let coin = builder.split_coins(builder.gas(), [amount])?;
///     let recipient = builder.pure(&signer.address())?;
///     builder.transfer_objects([coin.nested(0)], recipient)?;
///     builder
///         .set_sender(signer.address())?
///         .set_gas_payment(vec![gas_coin])?
///         .set_gas_price(1_000)?
///         .set_gas_budget(10_000_000)?;
///     let data = builder.finalize()?;
///
///     let result = sui.sign_and_execute(&signer, &data).await?;
///     println!("{}: {:?}", result.digest, result.status);
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct Sui {
    config: SuiConfig,
    client: Arc<JsonRpcClient>,
}

impl Sui {
    /// Creates a client with the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid or the HTTP client
    /// fails to build.
    pub fn new(config: SuiConfig) -> SuiResult<Self> {
        let client = Arc::new(JsonRpcClient::new(config.clone())?);
        Ok(Self { config, client })
    }

    /// Creates a client for testnet with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn testnet() -> SuiResult<Self> {
        Self::new(SuiConfig::testnet())
    }

    /// Creates a client for devnet with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn devnet() -> SuiResult<Self> {
        Self::new(SuiConfig::devnet())
    }

    /// Creates a client for mainnet with default settings.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn mainnet() -> SuiResult<Self> {
        Self::new(SuiConfig::mainnet())
    }

    /// Creates a client for a local network.
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to build.
    pub fn localnet() -> SuiResult<Self> {
        Self::new(SuiConfig::localnet())
    }

    /// Returns the configuration.
    pub fn config(&self) -> &SuiConfig {
        &self.config
    }

    /// Returns the JSON-RPC client.
    pub fn rpc(&self) -> &JsonRpcClient {
        &self.client
    }

    /// Returns a dispatcher over this client.
    pub fn dispatcher(&self) -> Dispatcher<'_> {
        Dispatcher::new(self.client.as_ref())
    }

    // === Objects ===

    /// Gets the current state of an object.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::NotFound`] if the object does not exist, or a
    /// transport error.
    pub async fn get_object(&self, object_id: ObjectId) -> SuiResult<ObjectInfo> {
        self.client.get_object(object_id).await
    }

    /// Gets the current reference of an object.
    ///
    /// # Errors
    ///
    /// See [`get_object`](Self::get_object).
    pub async fn refresh_object_ref(&self, object_id: ObjectId) -> SuiResult<ObjectRef> {
        dispatch::refresh_object_ref(self.client.as_ref(), object_id).await
    }

    // === Transactions ===

    /// Signs `data` with `signer` and executes it.
    ///
    /// The signer runs before anything is sent; if it fails or is rejected,
    /// the node is never contacted.
    ///
    /// # Errors
    ///
    /// Returns signer errors ([`SuiError::SignerUnavailable`],
    /// [`SuiError::UserRejected`]) or dispatch errors. An on-chain abort is
    /// an `Ok` result with a failure status.
    pub async fn sign_and_execute(
        &self,
        signer: &Signer,
        data: &TransactionData,
    ) -> SuiResult<ExecutionResult> {
        let (tx_bytes, signature) = self.sign(signer, data).await?;
        self.dispatcher().execute(&tx_bytes, &signature).await
    }

    /// Signs `data` with `signer` and simulates it.
    ///
    /// # Errors
    ///
    /// See [`sign_and_execute`](Self::sign_and_execute).
    pub async fn dry_run(&self, signer: &Signer, data: &TransactionData) -> SuiResult<ExecutionResult> {
        let (tx_bytes, signature) = self.sign(signer, data).await?;
        self.dispatcher().dry_run(&tx_bytes, &signature).await
    }

    /// Inspects `data` without signing.
    ///
    /// # Errors
    ///
    /// Returns dispatch errors.
    pub async fn dev_inspect(&self, data: &TransactionData) -> SuiResult<ExecutionResult> {
        self.dispatcher().dev_inspect(&data.to_bcs()?).await
    }

    /// Waits for an executed transaction's effects.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::TransactionTimeout`] if they do not show up within
    /// `timeout` (30 seconds by default).
    pub async fn wait_for_transaction(
        &self,
        digest: &TransactionDigest,
        timeout: Option<Duration>,
    ) -> SuiResult<ExecutionResult> {
        dispatch::wait_for_transaction(self.client.as_ref(), digest, timeout).await
    }

    /// Estimates a gas budget for `kind` sent by `sender`.
    ///
    /// # Errors
    ///
    /// Returns an error if the inspection fails or aborts.
    pub async fn estimate_gas_budget(
        &self,
        sender: SuiAddress,
        kind: &TransactionKind,
        gas_price: u64,
    ) -> SuiResult<u64> {
        dispatch::estimate_gas_budget(self.client.as_ref(), sender, kind, gas_price).await
    }

    async fn sign(
        &self,
        signer: &Signer,
        data: &TransactionData,
    ) -> SuiResult<(Vec<u8>, crate::signer::Signature)> {
        if signer.address() != data.sender() {
            return Err(SuiError::InvalidSignature(format!(
                "signer {} is not the sender {}",
                signer.address(),
                data.sender()
            )));
        }
        let tx_bytes = data.to_bcs()?;
        let signature = signer.sign_transaction(&tx_bytes).await?;
        debug!(sender = %data.sender(), "transaction signed");
        Ok((tx_bytes, signature))
    }
}
