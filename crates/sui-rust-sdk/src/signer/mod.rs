//! Signing capabilities.
//!
//! Signing is two-phase. A [`ReadySigner`] holds a usable key and signs
//! synchronously. Keys that live behind a wallet or a remote service are
//! reached through a [`SignerProvider`], which may suspend while it resolves
//! them. [`InteractiveSigner`] adds an operator approval step in front of
//! every signature.
//!
//! [`Signer`] is the closed set of signers the rest of the SDK accepts.
//!
//! # Example
//!
//! ```rust
//! use sui_rust_sdk::signer::{Ed25519Keypair, Signer};
//!
//! # async fn run() -> sui_rust_sdk::SuiResult<()> {
//! let signer = Signer::from(Ed25519Keypair::generate());
//! let signature = signer.sign_transaction(b"tx bytes").await?;
//! assert_eq!(signature.signer_address(), signer.address());
//! # Ok(())
//! # }
//! ```

mod interactive;
mod keypair;
mod provider;
mod signature;

pub use interactive::{Approval, InteractiveSigner, SigningApprover, SigningRequest};
pub use keypair::Ed25519Keypair;
pub use provider::{DeferredSigner, SignerProvider};
pub use signature::Signature;

use crate::crypto::{Intent, SignatureScheme};
use crate::error::{SuiError, SuiResult};
use crate::types::SuiAddress;
use std::fmt;
use std::sync::Arc;

/// A signer with its key at hand.
///
/// Implementors provide the raw [`sign`](Self::sign) primitive over a
/// 32-byte intent digest; the provided methods build the intent message
/// and wrap the result into a [`Signature`].
pub trait ReadySigner: Send + Sync + fmt::Debug {
    /// The address this signer signs for.
    fn address(&self) -> SuiAddress;

    /// The signature scheme.
    fn scheme(&self) -> SignatureScheme;

    /// The public key bytes.
    fn public_key_bytes(&self) -> Vec<u8>;

    /// Signs a Blake2b-256 intent digest and returns the raw signature.
    ///
    /// # Errors
    ///
    /// Remote or hardware-backed signers may fail.
    fn sign(&self, digest: &[u8]) -> SuiResult<Vec<u8>>;

    /// Signs transaction bytes under the transaction intent.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    fn sign_transaction(&self, tx_bytes: &[u8]) -> SuiResult<Signature> {
        let digest = Intent::sui_transaction().signing_digest(tx_bytes);
        Signature::new(self.scheme(), self.sign(&digest)?, self.public_key_bytes())
    }

    /// Signs arbitrary bytes under the personal message intent.
    ///
    /// The bytes are BCS-wrapped as a vector first, so the result can never
    /// be mistaken for a transaction signature.
    ///
    /// # Errors
    ///
    /// Returns an error if signing fails.
    fn sign_raw_bytes(&self, message: &[u8]) -> SuiResult<Signature> {
        let wrapped = bcs::to_bytes(message).map_err(SuiError::bcs)?;
        let digest = Intent::personal_message().signing_digest(&wrapped);
        Signature::new(self.scheme(), self.sign(&digest)?, self.public_key_bytes())
    }
}

/// Any signer the SDK can use.
#[derive(Debug, Clone)]
pub enum Signer {
    /// A key held in memory.
    Keypair(Arc<Ed25519Keypair>),
    /// A key resolved through a provider on first use.
    Deferred(Arc<DeferredSigner>),
    /// A signer that needs operator approval per request.
    Interactive(InteractiveSigner),
}

impl Signer {
    /// The address this signer signs for.
    pub fn address(&self) -> SuiAddress {
        match self {
            Signer::Keypair(keypair) => keypair.address(),
            Signer::Deferred(deferred) => deferred.address(),
            Signer::Interactive(interactive) => interactive.address(),
        }
    }

    /// Returns a ready signer, suspending for deferred keys.
    ///
    /// For interactive signers this returns the wrapped signer without asking
    /// the operator; use [`sign_transaction`](Self::sign_transaction) to keep
    /// the approval step.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::SignerUnavailable`] if a deferred key cannot be
    /// resolved.
    pub async fn resolve(&self) -> SuiResult<Arc<dyn ReadySigner>> {
        match self {
            Signer::Keypair(keypair) => Ok(Arc::clone(keypair) as Arc<dyn ReadySigner>),
            Signer::Deferred(deferred) => deferred.resolve().await,
            Signer::Interactive(interactive) => Ok(Arc::clone(interactive.inner())),
        }
    }

    /// Signs transaction bytes.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::SignerUnavailable`] or [`SuiError::UserRejected`]
    /// depending on the signer kind.
    pub async fn sign_transaction(&self, tx_bytes: &[u8]) -> SuiResult<Signature> {
        match self {
            Signer::Interactive(interactive) => interactive.sign_transaction(tx_bytes).await,
            other => other.resolve().await?.sign_transaction(tx_bytes),
        }
    }

    /// Signs a personal message.
    ///
    /// # Errors
    ///
    /// Same as [`sign_transaction`](Self::sign_transaction).
    pub async fn sign_raw_bytes(&self, message: &[u8]) -> SuiResult<Signature> {
        match self {
            Signer::Interactive(interactive) => interactive.sign_raw_bytes(message).await,
            other => other.resolve().await?.sign_raw_bytes(message),
        }
    }
}

impl From<Ed25519Keypair> for Signer {
    fn from(keypair: Ed25519Keypair) -> Self {
        Signer::Keypair(Arc::new(keypair))
    }
}

impl From<DeferredSigner> for Signer {
    fn from(deferred: DeferredSigner) -> Self {
        Signer::Deferred(Arc::new(deferred))
    }
}

impl From<InteractiveSigner> for Signer {
    fn from(interactive: InteractiveSigner) -> Self {
        Signer::Interactive(interactive)
    }
}
