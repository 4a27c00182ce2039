//! 32-byte digests for objects and transactions.

use crate::crypto::blake2b256_of;
use crate::error::{SuiError, SuiResult};
use base58::{FromBase58, ToBase58};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of a digest in bytes.
pub const DIGEST_LENGTH: usize = 32;

/// A 32-byte content digest.
///
/// Nodes display digests in Base58. Hex is accepted as well, but unlike
/// addresses it must be given in full: `0x` followed by exactly 64 hex
/// characters.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Digest([u8; DIGEST_LENGTH]);

/// Digest identifying one version of an object's contents.
pub type ObjectDigest = Digest;

/// Content-derived identifier of a transaction, used by nodes for deduplication.
pub type TransactionDigest = Digest;

impl Digest {
    /// The all-zero digest.
    pub const ZERO: Self = Self([0u8; DIGEST_LENGTH]);

    /// Creates a digest from a byte array.
    pub const fn new(bytes: [u8; DIGEST_LENGTH]) -> Self {
        Self(bytes)
    }

    /// Hashes `name || "::" || bytes`, the domain separated form used for
    /// transaction digests.
    pub fn of_named(name: &str, bytes: &[u8]) -> Self {
        Self(blake2b256_of([name.as_bytes(), b"::".as_slice(), bytes]))
    }

    /// Parses a digest from exactly 64 hex characters.
    pub fn from_hex<T: AsRef<[u8]>>(hex_str: T) -> SuiResult<Self> {
        let hex_str = hex_str.as_ref();
        let hex_str = if hex_str.starts_with(b"0x") || hex_str.starts_with(b"0X") {
            &hex_str[2..]
        } else {
            hex_str
        };

        if hex_str.len() != DIGEST_LENGTH * 2 {
            return Err(SuiError::Encoding(format!(
                "invalid digest length: expected {} hex characters, got {}",
                DIGEST_LENGTH * 2,
                hex_str.len()
            )));
        }

        let bytes = hex::decode(hex_str)?;
        Self::from_bytes(bytes)
    }

    /// Parses a Base58 digest, the form nodes use in JSON responses.
    pub fn from_base58(s: &str) -> SuiResult<Self> {
        let bytes = s
            .from_base58()
            .map_err(|e| SuiError::Encoding(format!("invalid base58 digest: {e:?}")))?;
        Self::from_bytes(bytes)
    }

    /// Creates a digest from a byte slice.
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> SuiResult<Self> {
        let bytes = bytes.as_ref();
        if bytes.len() != DIGEST_LENGTH {
            return Err(SuiError::Encoding(format!(
                "invalid digest length: expected {} bytes, got {}",
                DIGEST_LENGTH,
                bytes.len()
            )));
        }
        let mut digest = [0u8; DIGEST_LENGTH];
        digest.copy_from_slice(bytes);
        Ok(Self(digest))
    }

    /// Returns the digest bytes.
    pub fn as_bytes(&self) -> &[u8; DIGEST_LENGTH] {
        &self.0
    }

    /// Returns the digest as a `0x` prefixed hex string.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Returns the Base58 form.
    pub fn to_base58(&self) -> String {
        self.0.to_base58()
    }
}

impl fmt::Debug for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Digest({})", self.to_base58())
    }
}

impl fmt::Display for Digest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_base58())
    }
}

impl FromStr for Digest {
    type Err = SuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.starts_with("0x") || s.starts_with("0X") {
            Self::from_hex(s)
        } else {
            Self::from_base58(s)
        }
    }
}

impl Serialize for Digest {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_base58())
        } else {
            // Length prefixed on the wire, unlike addresses
            serializer.serialize_bytes(&self.0)
        }
    }
}

impl<'de> Deserialize<'de> for Digest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            s.parse().map_err(serde::de::Error::custom)
        } else {
            let bytes: Vec<u8> = serde_bytes::deserialize(deserializer)?;
            Self::from_bytes(bytes).map_err(serde::de::Error::custom)
        }
    }
}
