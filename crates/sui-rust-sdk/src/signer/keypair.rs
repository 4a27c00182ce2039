//! Resident Ed25519 key.

use crate::crypto::{Ed25519PrivateKey, Ed25519PublicKey, SignatureScheme};
use crate::error::SuiResult;
use crate::signer::ReadySigner;
use crate::types::SuiAddress;
use std::fmt;

/// An Ed25519 key held in process memory.
///
/// The private key is wiped when the keypair is dropped.
///
/// # Example
///
/// ```rust
/// use sui_rust_sdk::signer::{Ed25519Keypair, ReadySigner};
///
/// let keypair = Ed25519Keypair::generate();
/// let signature = keypair.sign_transaction(b"tx bytes").unwrap();
/// assert_eq!(signature.signer_address(), keypair.address());
/// ```
#[derive(Clone)]
pub struct Ed25519Keypair {
    private_key: Ed25519PrivateKey,
    public_key: Ed25519PublicKey,
    address: SuiAddress,
}

impl Ed25519Keypair {
    /// Generates a new random keypair.
    pub fn generate() -> Self {
        Self::from_private_key(Ed25519PrivateKey::generate())
    }

    /// Creates a keypair from a private key.
    pub fn from_private_key(private_key: Ed25519PrivateKey) -> Self {
        let public_key = private_key.public_key();
        let address = public_key.to_address();
        Self {
            private_key,
            public_key,
            address,
        }
    }

    /// Creates a keypair from private key bytes.
    pub fn from_private_key_bytes(bytes: &[u8]) -> SuiResult<Self> {
        Ed25519PrivateKey::from_bytes(bytes).map(Self::from_private_key)
    }

    /// Creates a keypair from a private key hex string.
    pub fn from_private_key_hex(hex_str: &str) -> SuiResult<Self> {
        Ed25519PrivateKey::from_hex(hex_str).map(Self::from_private_key)
    }

    /// Returns the public key.
    pub fn public_key(&self) -> &Ed25519PublicKey {
        &self.public_key
    }

    /// Returns a reference to the private key.
    ///
    /// **Warning**: Handle with care to avoid leaking sensitive key material.
    pub fn private_key(&self) -> &Ed25519PrivateKey {
        &self.private_key
    }
}

impl ReadySigner for Ed25519Keypair {
    fn address(&self) -> SuiAddress {
        self.address
    }

    fn scheme(&self) -> SignatureScheme {
        SignatureScheme::Ed25519
    }

    fn public_key_bytes(&self) -> Vec<u8> {
        self.public_key.to_bytes().to_vec()
    }

    fn sign(&self, digest: &[u8]) -> SuiResult<Vec<u8>> {
        Ok(self.private_key.sign(digest).to_vec())
    }
}

impl fmt::Debug for Ed25519Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Ed25519Keypair")
            .field("address", &self.address)
            .field("public_key", &self.public_key)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const TEST_KEY: &str = "0x9bf49a6a0755f953811fce125f2683d50429c3bb49e074147e0089a52eae155f";

    #[test]
    fn test_from_hex_is_stable() {
        let a = Ed25519Keypair::from_private_key_hex(TEST_KEY).unwrap();
        let b = Ed25519Keypair::from_private_key_hex(TEST_KEY).unwrap();
        assert_eq!(a.address(), b.address());
        assert_eq!(a.private_key().to_hex().as_str(), TEST_KEY);
    }

    #[test]
    fn test_debug_redacts_private_key() {
        let keypair = Ed25519Keypair::from_private_key_hex(TEST_KEY).unwrap();
        let debug = format!("{keypair:?}");
        assert!(!debug.contains(&TEST_KEY[2..]));
        assert!(debug.contains("address"));
    }

    #[test]
    fn test_sign_transaction_verifies() {
        let keypair = Ed25519Keypair::generate();
        let signature = keypair.sign_transaction(b"some transaction").unwrap();
        assert!(signature.verify_transaction(b"some transaction").is_ok());
        assert!(signature.verify_raw_bytes(b"some transaction").is_err());
    }

    #[test]
    fn test_sign_raw_bytes_uses_personal_message_intent() {
        let keypair = Ed25519Keypair::generate();
        let signature = keypair.sign_raw_bytes(b"hello").unwrap();
        assert!(signature.verify_raw_bytes(b"hello").is_ok());
        assert!(signature.verify_transaction(b"hello").is_err());
    }
}
