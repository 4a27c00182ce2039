//! Ed25519 keys.
//!
//! Ed25519 is the default signature scheme on Sui (flag `0x00`).

use crate::crypto::{derive_address, SignatureScheme};
use crate::error::{SuiError, SuiResult};
use crate::types::SuiAddress;
use ed25519_dalek::{Signer as DalekSigner, Verifier as DalekVerifier};
use serde::{Deserialize, Serialize};
use std::fmt;
use zeroize::{Zeroize, Zeroizing};

/// Ed25519 private key length in bytes.
pub const ED25519_PRIVATE_KEY_LENGTH: usize = 32;
/// Ed25519 public key length in bytes.
pub const ED25519_PUBLIC_KEY_LENGTH: usize = 32;
/// Ed25519 signature length in bytes.
pub const ED25519_SIGNATURE_LENGTH: usize = 64;

/// An Ed25519 private key.
///
/// The underlying signing key is wiped from memory on drop.
///
/// # Example
///
/// ```rust
/// use sui_rust_sdk::crypto::Ed25519PrivateKey;
///
/// let private_key = Ed25519PrivateKey::generate();
/// let signature = private_key.sign(b"hello");
/// assert!(private_key.public_key().verify(b"hello", &signature).is_ok());
/// ```
#[derive(Clone)]
pub struct Ed25519PrivateKey {
    inner: ed25519_dalek::SigningKey,
}

impl Ed25519PrivateKey {
    /// Generates a new random Ed25519 private key.
    pub fn generate() -> Self {
        let mut csprng = rand::rngs::OsRng;
        Self {
            inner: ed25519_dalek::SigningKey::generate(&mut csprng),
        }
    }

    /// Creates a private key from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> SuiResult<Self> {
        if bytes.len() != ED25519_PRIVATE_KEY_LENGTH {
            return Err(SuiError::InvalidPrivateKey(format!(
                "expected {} bytes, got {}",
                ED25519_PRIVATE_KEY_LENGTH,
                bytes.len()
            )));
        }
        let mut key_bytes = [0u8; ED25519_PRIVATE_KEY_LENGTH];
        key_bytes.copy_from_slice(bytes);
        let inner = ed25519_dalek::SigningKey::from_bytes(&key_bytes);
        key_bytes.zeroize();
        Ok(Self { inner })
    }

    /// Creates a private key from a hex string.
    pub fn from_hex(hex_str: &str) -> SuiResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = Zeroizing::new(hex::decode(hex_str)?);
        Self::from_bytes(&bytes)
    }

    /// Returns the private key as bytes.
    ///
    /// **Warning**: the caller is responsible for not leaking the result.
    pub fn to_bytes(&self) -> Zeroizing<[u8; ED25519_PRIVATE_KEY_LENGTH]> {
        Zeroizing::new(self.inner.to_bytes())
    }

    /// Returns the private key as a hex string.
    pub fn to_hex(&self) -> Zeroizing<String> {
        Zeroizing::new(format!("0x{}", hex::encode(self.inner.to_bytes())))
    }

    /// Returns the corresponding public key.
    pub fn public_key(&self) -> Ed25519PublicKey {
        Ed25519PublicKey {
            inner: self.inner.verifying_key(),
        }
    }

    /// Signs a message and returns the 64-byte signature.
    pub fn sign(&self, message: &[u8]) -> [u8; ED25519_SIGNATURE_LENGTH] {
        self.inner.sign(message).to_bytes()
    }
}

impl fmt::Debug for Ed25519PrivateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PrivateKey([REDACTED])")
    }
}

/// An Ed25519 public key.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Ed25519PublicKey {
    inner: ed25519_dalek::VerifyingKey,
}

impl Ed25519PublicKey {
    /// Creates a public key from raw bytes.
    pub fn from_bytes(bytes: &[u8]) -> SuiResult<Self> {
        if bytes.len() != ED25519_PUBLIC_KEY_LENGTH {
            return Err(SuiError::InvalidPublicKey(format!(
                "expected {} bytes, got {}",
                ED25519_PUBLIC_KEY_LENGTH,
                bytes.len()
            )));
        }
        let mut key_bytes = [0u8; ED25519_PUBLIC_KEY_LENGTH];
        key_bytes.copy_from_slice(bytes);
        let inner = ed25519_dalek::VerifyingKey::from_bytes(&key_bytes)
            .map_err(|e| SuiError::InvalidPublicKey(e.to_string()))?;
        Ok(Self { inner })
    }

    /// Creates a public key from a hex string.
    pub fn from_hex(hex_str: &str) -> SuiResult<Self> {
        let hex_str = hex_str.strip_prefix("0x").unwrap_or(hex_str);
        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(&bytes)
    }

    /// Returns the public key as bytes.
    pub fn to_bytes(&self) -> [u8; ED25519_PUBLIC_KEY_LENGTH] {
        self.inner.to_bytes()
    }

    /// Returns the public key as a hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.inner.to_bytes()))
    }

    /// Verifies a 64-byte signature against a message.
    pub fn verify(&self, message: &[u8], signature: &[u8]) -> SuiResult<()> {
        let signature = ed25519_dalek::Signature::from_slice(signature)
            .map_err(|e| SuiError::InvalidSignature(e.to_string()))?;
        self.inner
            .verify(message, &signature)
            .map_err(|_| SuiError::SignatureVerificationFailed)
    }

    /// Derives the Sui address owned by this key.
    pub fn to_address(&self) -> SuiAddress {
        derive_address(SignatureScheme::Ed25519, &self.to_bytes())
    }
}

impl fmt::Debug for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Ed25519PublicKey({})", self.to_hex())
    }
}

impl fmt::Display for Ed25519PublicKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl Serialize for Ed25519PublicKey {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            serializer.serialize_bytes(&self.inner.to_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Ed25519PublicKey {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = Vec::<u8>::deserialize(deserializer)?;
            Self::from_bytes(&bytes).map_err(serde::de::Error::custom)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_and_sign() {
        let private_key = Ed25519PrivateKey::generate();
        let signature = private_key.sign(b"hello world");
        assert!(private_key
            .public_key()
            .verify(b"hello world", &signature)
            .is_ok());
    }

    #[test]
    fn test_wrong_message_fails() {
        let private_key = Ed25519PrivateKey::generate();
        let signature = private_key.sign(b"hello world");
        assert!(matches!(
            private_key.public_key().verify(b"hello world!", &signature),
            Err(SuiError::SignatureVerificationFailed)
        ));
    }

    #[test]
    fn test_truncated_signature_is_invalid() {
        let private_key = Ed25519PrivateKey::generate();
        let signature = private_key.sign(b"m");
        assert!(matches!(
            private_key.public_key().verify(b"m", &signature[..10]),
            Err(SuiError::InvalidSignature(_))
        ));
    }

    #[test]
    fn test_from_hex_roundtrip() {
        let private_key = Ed25519PrivateKey::generate();
        let restored = Ed25519PrivateKey::from_hex(&private_key.to_hex()).unwrap();
        assert_eq!(*private_key.to_bytes(), *restored.to_bytes());
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert!(Ed25519PrivateKey::from_bytes(&[1u8; 31]).is_err());
        assert!(Ed25519PublicKey::from_bytes(&[1u8; 33]).is_err());
    }

    #[test]
    fn test_debug_is_redacted() {
        let private_key = Ed25519PrivateKey::generate();
        let debug = format!("{private_key:?}");
        assert!(debug.contains("REDACTED"));
        assert!(!debug.contains(&private_key.to_hex()[2..10]));
    }

    #[test]
    fn test_public_key_serialization() {
        let public_key = Ed25519PrivateKey::generate().public_key();
        let json = serde_json::to_string(&public_key).unwrap();
        let restored: Ed25519PublicKey = serde_json::from_str(&json).unwrap();
        assert_eq!(public_key, restored);
    }

    #[test]
    fn test_address_derivation_is_stable() {
        let public_key = Ed25519PrivateKey::generate().public_key();
        let address = public_key.to_address();
        assert!(!address.is_zero());
        assert_eq!(address, public_key.to_address());
    }
}
