//! Transaction dispatch and result interpretation.
//!
//! A [`Dispatcher`] sends finalized bytes to a node through an explicit
//! [`RpcClient`] and classifies what comes back:
//!
//! - the node answered and the transaction ran: `Ok` with
//!   [`ExecutionStatus::Success`] or [`ExecutionStatus::Failure`];
//! - the node refused it up front: [`SuiError::TransactionRejected`];
//! - no authoritative answer: [`SuiError::Dispatch`]. For Execute the
//!   transaction may still land, so callers should look it up with
//!   [`wait_for_transaction`] rather than resubmit blindly.
//!
//! Nothing here retries a submission.
//!
//! # Example
//!
//! ```rust,no_run
//! use sui_rust_sdk::api::JsonRpcClient;
//! use sui_rust_sdk::dispatch::Dispatcher;
//! use sui_rust_sdk::signer::{Ed25519Keypair, ReadySigner};
//! use sui_rust_sdk::SuiConfig;
//!
//! # async fn run(tx_bytes: Vec<u8>, keypair: Ed25519Keypair) -> sui_rust_sdk::SuiResult<()> {
//! let client = JsonRpcClient::new(SuiConfig::testnet())?;
//! let signature = keypair.sign_transaction(&tx_bytes)?;
//!
//! let dispatcher = Dispatcher::new(&client);
//! let preview = dispatcher.dry_run(&tx_bytes, &signature).await?;
//! if preview.is_success() {
//!     let result = dispatcher.execute(&tx_bytes, &signature).await?;
//!     println!("{}: {:?}", result.digest, result.status);
//! }
//! # Ok(())
//! # }
//! ```

mod abort;
mod effects;

pub use abort::{AbortCategory, AbortReason};
pub use effects::{
    ExecutionResult, ExecutionStatus, GasCostSummary, ReturnValue, TransactionEffects,
};

use crate::api::RpcClient;
use crate::error::{SuiError, SuiResult};
use crate::signer::Signature;
use crate::transaction::{
    GasData, TransactionData, TransactionExpiration, TransactionKind, DEV_INSPECT_GAS_BUDGET,
};
use crate::types::{ObjectId, ObjectRef, SuiAddress, TransactionDigest};
use std::fmt;
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

/// Default time [`wait_for_transaction`] waits.
pub const DEFAULT_TRANSACTION_WAIT_TIMEOUT: Duration = Duration::from_secs(30);

/// Percentage applied to an inspected cost by [`estimate_gas_budget`].
const GAS_BUDGET_MARGIN_PERCENT: u64 = 120;

/// How a transaction is sent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExecutionMode {
    /// Commit on chain. Needs a signature.
    Execute,
    /// Simulate against current state with full validation. Needs a
    /// signature.
    DryRun,
    /// Run without gas or signature checks, returning command results.
    DevInspect,
}

impl ExecutionMode {
    /// Whether this mode refuses to run without a signature.
    pub fn requires_signature(&self) -> bool {
        !matches!(self, ExecutionMode::DevInspect)
    }
}

impl fmt::Display for ExecutionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ExecutionMode::Execute => "execute",
            ExecutionMode::DryRun => "dry run",
            ExecutionMode::DevInspect => "dev inspect",
        };
        f.write_str(s)
    }
}

/// Sends transactions through a borrowed node client.
#[derive(Clone, Copy)]
pub struct Dispatcher<'a> {
    rpc: &'a dyn RpcClient,
}

impl fmt::Debug for Dispatcher<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Dispatcher").finish_non_exhaustive()
    }
}

impl<'a> Dispatcher<'a> {
    /// Creates a dispatcher over `rpc`.
    pub fn new(rpc: &'a dyn RpcClient) -> Self {
        Self { rpc }
    }

    /// Sends `tx_bytes` in `mode` and interprets the response.
    ///
    /// The request is sent exactly once.
    ///
    /// # Errors
    ///
    /// - [`SuiError::MissingSignature`] for Execute or DryRun without a
    ///   signature; nothing is sent.
    /// - [`SuiError::TransactionRejected`] if the node refused the
    ///   transaction without running it.
    /// - [`SuiError::Dispatch`] if no authoritative answer came back.
    pub async fn dispatch(
        &self,
        mode: ExecutionMode,
        tx_bytes: &[u8],
        signature: Option<&Signature>,
    ) -> SuiResult<ExecutionResult> {
        if mode.requires_signature() && signature.is_none() {
            return Err(SuiError::MissingSignature(mode.to_string()));
        }

        let digest = TransactionData::digest_of_bytes(tx_bytes);
        debug!(%digest, ?mode, "dispatching transaction");

        let response = self
            .rpc
            .submit_transaction(tx_bytes, signature, mode)
            .await
            .map_err(|e| {
                let e = e.into_dispatch();
                warn!(%digest, ?mode, error = %e.sanitized_message(), "dispatch failed");
                e
            })?;

        let result = ExecutionResult::from_json(mode, digest, &response)?;
        match &result.status {
            ExecutionStatus::Success => info!(%digest, ?mode, "transaction succeeded"),
            ExecutionStatus::Failure(reason) => {
                info!(%digest, ?mode, reason = %reason, "transaction aborted");
            }
        }
        Ok(result)
    }

    /// Commits a signed transaction.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn execute(&self, tx_bytes: &[u8], signature: &Signature) -> SuiResult<ExecutionResult> {
        self.dispatch(ExecutionMode::Execute, tx_bytes, Some(signature))
            .await
    }

    /// Simulates a signed transaction without committing it.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn dry_run(&self, tx_bytes: &[u8], signature: &Signature) -> SuiResult<ExecutionResult> {
        self.dispatch(ExecutionMode::DryRun, tx_bytes, Some(signature))
            .await
    }

    /// Inspects a transaction; no signature needed.
    ///
    /// # Errors
    ///
    /// See [`dispatch`](Self::dispatch).
    pub async fn dev_inspect(&self, tx_bytes: &[u8]) -> SuiResult<ExecutionResult> {
        self.dispatch(ExecutionMode::DevInspect, tx_bytes, None)
            .await
    }
}

// === Reads ===

/// Fetches the effects of an executed transaction.
///
/// # Errors
///
/// Returns the collaborator's error, or a malformed response error if the
/// result carries no effects.
pub async fn fetch_effects(
    rpc: &dyn RpcClient,
    digest: &TransactionDigest,
) -> SuiResult<ExecutionResult> {
    let response = rpc.get_transaction_effects(digest).await?;
    ExecutionResult::from_json(ExecutionMode::Execute, *digest, &response)
}

/// Polls until a transaction's effects are available.
///
/// Polls with exponential backoff starting at 200ms and doubling up to 2s.
/// An aborted transaction is returned as a [`ExecutionStatus::Failure`]
/// result, like any other.
///
/// # Errors
///
/// Returns [`SuiError::TransactionTimeout`] if the effects did not show up in
/// time, or the first error that does not mean "not known yet".
pub async fn wait_for_transaction(
    rpc: &dyn RpcClient,
    digest: &TransactionDigest,
    timeout: Option<Duration>,
) -> SuiResult<ExecutionResult> {
    let timeout = timeout.unwrap_or(DEFAULT_TRANSACTION_WAIT_TIMEOUT);
    let start = Instant::now();

    let max_interval = Duration::from_secs(2);
    let mut current_interval = Duration::from_millis(200);

    loop {
        match fetch_effects(rpc, digest).await {
            Ok(result) => return Ok(result),
            Err(e) if is_pending(&e) => {
                debug!(%digest, "transaction not known yet");
            }
            Err(e) => return Err(e),
        }

        if start.elapsed() >= timeout {
            return Err(SuiError::TransactionTimeout {
                digest: digest.to_string(),
                timeout_secs: timeout.as_secs(),
            });
        }

        tokio::time::sleep(current_interval).await;
        current_interval = std::cmp::min(current_interval * 2, max_interval);
    }
}

/// Nodes answer lookups of unknown digests with a not-found style error.
fn is_pending(error: &SuiError) -> bool {
    match error {
        SuiError::TransactionRejected { message, .. } => {
            message.contains("Could not find") || message.contains("not found")
        }
        other => other.is_not_found(),
    }
}

/// Fetches the current reference of an object.
///
/// Use this to refresh a stale [`ObjectRef`] before building; references
/// are never refreshed implicitly.
///
/// # Errors
///
/// Returns [`SuiError::NotFound`] if the object does not exist or was
/// deleted.
pub async fn refresh_object_ref(rpc: &dyn RpcClient, object_id: ObjectId) -> SuiResult<ObjectRef> {
    Ok(rpc.get_object(object_id).await?.object_ref)
}

/// Estimates a gas budget by inspecting `kind` as `sender`.
///
/// Returns the inspected computation plus storage cost with a 20% margin.
///
/// # Errors
///
/// Returns [`SuiError::ExecutionFailed`] if the inspection aborts, or any
/// dispatch error.
pub async fn estimate_gas_budget(
    rpc: &dyn RpcClient,
    sender: SuiAddress,
    kind: &TransactionKind,
    gas_price: u64,
) -> SuiResult<u64> {
    let data = TransactionData::new(
        kind.clone(),
        sender,
        GasData {
            payment: Vec::new(),
            owner: sender,
            price: gas_price,
            budget: DEV_INSPECT_GAS_BUDGET,
        },
        TransactionExpiration::None,
    );
    let result = Dispatcher::new(rpc)
        .dev_inspect(&data.to_bcs()?)
        .await?
        .into_success()?;

    let gas = result.effects.gas_used;
    Ok(gas.gross_cost().saturating_mul(GAS_BUDGET_MARGIN_PERCENT) / 100)
}
