//! Intent messages.
//!
//! Every signature covers `intent || payload` rather than the bare payload, so
//! a signature produced for one purpose (say, a personal message) can never be
//! replayed as another (a transaction).

use crate::crypto::hash::blake2b256_of;
use serde::{Deserialize, Serialize};

/// What the signed payload is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum IntentScope {
    /// BCS-encoded `TransactionData`.
    TransactionData = 0,
    /// Transaction effects (signed by validators).
    TransactionEffects = 1,
    /// Checkpoint summary (signed by validators).
    CheckpointSummary = 2,
    /// Arbitrary user bytes.
    PersonalMessage = 3,
}

/// A three byte prefix: scope, version, application id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Intent {
    /// Payload kind.
    pub scope: IntentScope,
    /// Intent version, currently always 0.
    pub version: u8,
    /// Application id, 0 for Sui.
    pub app_id: u8,
}

impl Intent {
    /// Intent for signing transaction data.
    pub const fn sui_transaction() -> Self {
        Self {
            scope: IntentScope::TransactionData,
            version: 0,
            app_id: 0,
        }
    }

    /// Intent for signing arbitrary bytes.
    pub const fn personal_message() -> Self {
        Self {
            scope: IntentScope::PersonalMessage,
            version: 0,
            app_id: 0,
        }
    }

    /// Returns the wire prefix.
    pub fn to_bytes(&self) -> [u8; 3] {
        [self.scope as u8, self.version, self.app_id]
    }

    /// Builds the full intent message `prefix || payload`.
    pub fn message(&self, payload: &[u8]) -> Vec<u8> {
        let mut message = Vec::with_capacity(3 + payload.len());
        message.extend_from_slice(&self.to_bytes());
        message.extend_from_slice(payload);
        message
    }

    /// Returns the 32-byte digest that actually gets signed.
    pub fn signing_digest(&self, payload: &[u8]) -> [u8; 32] {
        blake2b256_of([self.to_bytes().as_slice(), payload])
    }
}
