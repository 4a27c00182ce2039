//! Signers that ask an operator before every signature.

use crate::error::{SuiError, SuiResult};
use crate::signer::{ReadySigner, Signature};
use crate::transaction::TransactionData;
use crate::types::{SuiAddress, TransactionDigest};
use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, info, warn};

/// What the operator is asked to approve.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SigningRequest {
    /// A transaction, identified by the digest it will have on chain.
    Transaction {
        /// Signing account.
        signer: SuiAddress,
        /// Digest of the transaction bytes.
        digest: TransactionDigest,
    },
    /// An arbitrary personal message.
    PersonalMessage {
        /// Signing account.
        signer: SuiAddress,
        /// Message bytes as the operator will see them.
        message: Vec<u8>,
    },
}

/// The operator's answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Approval {
    /// Go ahead and sign.
    Approve,
    /// Do not sign.
    Reject,
}

/// Asks a human, or any other policy, whether a request may be signed.
#[async_trait]
pub trait SigningApprover: Send + Sync {
    /// Decides on one request.
    async fn review(&self, request: &SigningRequest) -> SuiResult<Approval>;
}

/// A signer that forwards each request to a [`SigningApprover`] first.
///
/// A rejection yields [`SuiError::UserRejected`] and nothing is signed.
/// An approver that fails, or does not answer within the timeout, makes the
/// signer unavailable for that request.
#[derive(Clone)]
pub struct InteractiveSigner {
    inner: Arc<dyn ReadySigner>,
    approver: Arc<dyn SigningApprover>,
    timeout: Duration,
}

impl InteractiveSigner {
    /// How long an approval may take by default.
    pub const DEFAULT_APPROVAL_TIMEOUT: Duration = Duration::from_secs(120);

    /// Wraps `inner` behind `approver`.
    pub fn new(inner: Arc<dyn ReadySigner>, approver: Arc<dyn SigningApprover>) -> Self {
        Self {
            inner,
            approver,
            timeout: Self::DEFAULT_APPROVAL_TIMEOUT,
        }
    }

    /// Sets how long to wait for the approver.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// The address this signer signs for.
    pub fn address(&self) -> SuiAddress {
        self.inner.address()
    }

    /// The wrapped signer, bypassing approval.
    pub fn inner(&self) -> &Arc<dyn ReadySigner> {
        &self.inner
    }

    /// Signs transaction bytes once the approver agrees.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::UserRejected`] if the request is declined, or
    /// [`SuiError::SignerUnavailable`] if the approver fails or times out.
    pub async fn sign_transaction(&self, tx_bytes: &[u8]) -> SuiResult<Signature> {
        let request = SigningRequest::Transaction {
            signer: self.address(),
            digest: TransactionData::digest_of_bytes(tx_bytes),
        };
        self.approve(&request).await?;
        self.inner.sign_transaction(tx_bytes)
    }

    /// Signs a personal message once the approver agrees.
    ///
    /// # Errors
    ///
    /// Same as [`sign_transaction`](Self::sign_transaction).
    pub async fn sign_raw_bytes(&self, message: &[u8]) -> SuiResult<Signature> {
        let request = SigningRequest::PersonalMessage {
            signer: self.address(),
            message: message.to_vec(),
        };
        self.approve(&request).await?;
        self.inner.sign_raw_bytes(message)
    }

    async fn approve(&self, request: &SigningRequest) -> SuiResult<()> {
        debug!(signer = %self.address(), "requesting signing approval");
        let answer = match tokio::time::timeout(self.timeout, self.approver.review(request)).await {
            Ok(Ok(answer)) => answer,
            Ok(Err(e @ (SuiError::SignerUnavailable(_) | SuiError::UserRejected))) => {
                warn!(signer = %self.address(), error = %e, "signing approval failed");
                return Err(e);
            }
            Ok(Err(e)) => {
                warn!(signer = %self.address(), error = %e, "signing approval failed");
                return Err(SuiError::SignerUnavailable(e.to_string()));
            }
            Err(_) => {
                warn!(signer = %self.address(), timeout = ?self.timeout, "signing approval timed out");
                return Err(SuiError::SignerUnavailable(format!(
                    "no approval for {} within {:?}",
                    self.address(),
                    self.timeout
                )));
            }
        };
        match answer {
            Approval::Approve => Ok(()),
            Approval::Reject => {
                info!(signer = %self.address(), "signing request rejected");
                Err(SuiError::UserRejected)
            }
        }
    }
}

impl fmt::Debug for InteractiveSigner {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("InteractiveSigner")
            .field("inner", &self.inner)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}
