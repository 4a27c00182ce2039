//! Cryptographic primitives for the Sui SDK.
//!
//! Only Ed25519 keys are held locally; other schemes can still be produced
//! by a remote [`ReadySigner`](crate::signer::ReadySigner) as long as it
//! reports the matching [`SignatureScheme`].
//!
//! # Example
//!
//! ```rust
//! use sui_rust_sdk::crypto::{Ed25519PrivateKey, Intent};
//!
//! let private_key = Ed25519PrivateKey::generate();
//! let digest = Intent::personal_message().signing_digest(b"hello world");
//! let signature = private_key.sign(&digest);
//! assert!(private_key.public_key().verify(&digest, &signature).is_ok());
//! ```

mod ed25519;
mod hash;
mod intent;

pub use ed25519::{
    Ed25519PrivateKey, Ed25519PublicKey, ED25519_PRIVATE_KEY_LENGTH, ED25519_PUBLIC_KEY_LENGTH,
    ED25519_SIGNATURE_LENGTH,
};
pub use hash::{blake2b256, blake2b256_of};
pub use intent::{Intent, IntentScope};

use crate::error::{SuiError, SuiResult};
use crate::types::SuiAddress;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Signature schemes and their one-byte flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SignatureScheme {
    /// Ed25519, flag `0x00`.
    Ed25519,
    /// ECDSA over secp256k1, flag `0x01`.
    Secp256k1,
    /// ECDSA over secp256r1, flag `0x02`.
    Secp256r1,
}

impl SignatureScheme {
    /// Returns the flag byte.
    pub fn flag(&self) -> u8 {
        match self {
            SignatureScheme::Ed25519 => 0x00,
            SignatureScheme::Secp256k1 => 0x01,
            SignatureScheme::Secp256r1 => 0x02,
        }
    }

    /// Parses a flag byte.
    pub fn from_flag(flag: u8) -> SuiResult<Self> {
        match flag {
            0x00 => Ok(SignatureScheme::Ed25519),
            0x01 => Ok(SignatureScheme::Secp256k1),
            0x02 => Ok(SignatureScheme::Secp256r1),
            other => Err(SuiError::InvalidSignature(format!(
                "unknown signature scheme flag {other:#04x}"
            ))),
        }
    }

    /// Length of a signature under this scheme.
    pub fn signature_length(&self) -> usize {
        64
    }

    /// Length of a public key under this scheme.
    pub fn public_key_length(&self) -> usize {
        match self {
            SignatureScheme::Ed25519 => ED25519_PUBLIC_KEY_LENGTH,
            SignatureScheme::Secp256k1 | SignatureScheme::Secp256r1 => 33,
        }
    }
}

impl fmt::Display for SignatureScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignatureScheme::Ed25519 => "ed25519",
            SignatureScheme::Secp256k1 => "secp256k1",
            SignatureScheme::Secp256r1 => "secp256r1",
        };
        f.write_str(s)
    }
}

/// Derives an address from a public key.
///
/// The address is Blake2b-256(`flag || public_key`).
pub fn derive_address(scheme: SignatureScheme, public_key: &[u8]) -> SuiAddress {
    SuiAddress::new(blake2b256_of([[scheme.flag()].as_slice(), public_key]))
}
