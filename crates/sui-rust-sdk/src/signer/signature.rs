//! Serialized user signatures.

use crate::crypto::{derive_address, Ed25519PublicKey, Intent, SignatureScheme};
use crate::error::{SuiError, SuiResult};
use crate::types::SuiAddress;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// A signature together with the scheme and public key that produced it.
///
/// The wire form is `flag || signature || public_key`, base64 encoded in
/// JSON-RPC requests. A signature is detached from the signer: it stays
/// valid for the exact bytes it was made over and can be reused, for example
/// for a dry run followed by execution.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Signature {
    scheme: SignatureScheme,
    signature: Vec<u8>,
    public_key: Vec<u8>,
}

impl Signature {
    /// Assembles a signature, checking component lengths for the scheme.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::InvalidSignature`] or [`SuiError::InvalidPublicKey`]
    /// when a component has the wrong length.
    pub fn new(scheme: SignatureScheme, signature: Vec<u8>, public_key: Vec<u8>) -> SuiResult<Self> {
        if signature.len() != scheme.signature_length() {
            return Err(SuiError::InvalidSignature(format!(
                "{scheme} signature must be {} bytes, got {}",
                scheme.signature_length(),
                signature.len()
            )));
        }
        if public_key.len() != scheme.public_key_length() {
            return Err(SuiError::InvalidPublicKey(format!(
                "{scheme} public key must be {} bytes, got {}",
                scheme.public_key_length(),
                public_key.len()
            )));
        }
        Ok(Self {
            scheme,
            signature,
            public_key,
        })
    }

    /// The signature scheme.
    pub fn scheme(&self) -> SignatureScheme {
        self.scheme
    }

    /// The raw signature bytes.
    pub fn signature_bytes(&self) -> &[u8] {
        &self.signature
    }

    /// The signer's public key bytes.
    pub fn public_key_bytes(&self) -> &[u8] {
        &self.public_key
    }

    /// Address of the account that produced this signature.
    pub fn signer_address(&self) -> SuiAddress {
        derive_address(self.scheme, &self.public_key)
    }

    /// Serializes to `flag || signature || public_key`.
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(1 + self.signature.len() + self.public_key.len());
        bytes.push(self.scheme.flag());
        bytes.extend_from_slice(&self.signature);
        bytes.extend_from_slice(&self.public_key);
        bytes
    }

    /// Parses `flag || signature || public_key`.
    ///
    /// # Errors
    ///
    /// Returns an error for an unknown flag or wrong total length.
    pub fn from_bytes(bytes: &[u8]) -> SuiResult<Self> {
        let (&flag, rest) = bytes
            .split_first()
            .ok_or_else(|| SuiError::InvalidSignature("empty signature".into()))?;
        let scheme = SignatureScheme::from_flag(flag)?;
        let sig_len = scheme.signature_length();
        if rest.len() != sig_len + scheme.public_key_length() {
            return Err(SuiError::InvalidSignature(format!(
                "{scheme} signature must be {} bytes serialized, got {}",
                1 + sig_len + scheme.public_key_length(),
                bytes.len()
            )));
        }
        let (signature, public_key) = rest.split_at(sig_len);
        Self::new(scheme, signature.to_vec(), public_key.to_vec())
    }

    /// Base64 of [`to_bytes`](Self::to_bytes), as sent to nodes.
    pub fn to_base64(&self) -> String {
        base64::encode(self.to_bytes())
    }

    /// Parses the base64 wire form.
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not base64 or not a valid signature.
    pub fn from_base64(encoded: &str) -> SuiResult<Self> {
        Self::from_bytes(&base64::decode(encoded)?)
    }

    /// Verifies the signature over an already hashed intent message.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::SignatureVerificationFailed`] if the signature does
    /// not match, or [`SuiError::InvalidSignature`] for schemes that cannot be
    /// verified locally.
    pub fn verify(&self, digest: &[u8]) -> SuiResult<()> {
        match self.scheme {
            SignatureScheme::Ed25519 => {
                Ed25519PublicKey::from_bytes(&self.public_key)?.verify(digest, &self.signature)
            }
            other => Err(SuiError::InvalidSignature(format!(
                "local verification of {other} signatures is not supported"
            ))),
        }
    }

    /// Verifies the signature over transaction bytes.
    ///
    /// # Errors
    ///
    /// See [`verify`](Self::verify).
    pub fn verify_transaction(&self, tx_bytes: &[u8]) -> SuiResult<()> {
        self.verify(&Intent::sui_transaction().signing_digest(tx_bytes))
    }

    /// Verifies a personal-message signature over `message`.
    ///
    /// # Errors
    ///
    /// See [`verify`](Self::verify).
    pub fn verify_raw_bytes(&self, message: &[u8]) -> SuiResult<()> {
        let wrapped = bcs::to_bytes(message).map_err(SuiError::bcs)?;
        self.verify(&Intent::personal_message().signing_digest(&wrapped))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Signature({}, {})", self.scheme, self.signer_address())
    }
}

impl Serialize for Signature {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base64())
        } else {
            serializer.serialize_bytes(&self.to_bytes())
        }
    }
}

impl<'de> Deserialize<'de> for Signature {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Signature::from_base64(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes: Vec<u8> = serde_bytes::deserialize(deserializer)?;
            Signature::from_bytes(&bytes).map_err(serde::de::Error::custom)
        }
    }
}
