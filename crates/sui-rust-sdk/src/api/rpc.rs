//! The node interface the dispatcher depends on.

use crate::dispatch::ExecutionMode;
use crate::error::SuiResult;
use crate::signer::Signature;
use crate::types::{ObjectId, ObjectInfo, TransactionDigest};
use async_trait::async_trait;

/// Remote node operations needed to dispatch transactions.
///
/// Implementations report transport problems as [`SuiError::Http`],
/// [`SuiError::Api`] or [`SuiError::Json`], and a node that refuses a
/// request as [`SuiError::TransactionRejected`]. The dispatcher classifies
/// these; implementations do not need to.
///
/// [`SuiError::Http`]: crate::SuiError::Http
/// [`SuiError::Api`]: crate::SuiError::Api
/// [`SuiError::Json`]: crate::SuiError::Json
/// [`SuiError::TransactionRejected`]: crate::SuiError::TransactionRejected
#[async_trait]
pub trait RpcClient: Send + Sync {
    /// Sends canonical transaction bytes in `mode` and returns the raw
    /// response, which carries `effects`.
    ///
    /// Must send at most one request; callers rely on it for Execute.
    async fn submit_transaction(
        &self,
        tx_bytes: &[u8],
        signature: Option<&Signature>,
        mode: ExecutionMode,
    ) -> SuiResult<serde_json::Value>;

    /// Fetches the latest state of an object.
    async fn get_object(&self, object_id: ObjectId) -> SuiResult<ObjectInfo>;

    /// Fetches an executed transaction with its effects.
    async fn get_transaction_effects(
        &self,
        digest: &TransactionDigest,
    ) -> SuiResult<serde_json::Value>;
}
