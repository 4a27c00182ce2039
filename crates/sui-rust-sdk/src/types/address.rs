//! Account address type.
//!
//! Sui addresses are 32-byte values, displayed as 64 hexadecimal characters
//! with a `0x` prefix. Object ids share the same representation.

use crate::error::{SuiError, SuiResult};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// The length of an address in bytes.
pub const ADDRESS_LENGTH: usize = 32;

/// A 32-byte Sui address.
///
/// An account address is derived from a public key (see
/// [`crate::crypto::derive_address`]). Short forms such as `0x2` are
/// zero-padded on the left when parsed.
///
/// # Example
///
/// ```rust
/// use sui_rust_sdk::SuiAddress;
///
/// let addr = SuiAddress::from_hex("0x2").unwrap();
/// assert_eq!(addr.to_short_string(), "0x2");
/// assert_eq!(addr.to_hex().len(), 66);
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SuiAddress([u8; ADDRESS_LENGTH]);

impl SuiAddress {
    /// The "zero" address (all zeros).
    pub const ZERO: Self = Self([0u8; ADDRESS_LENGTH]);

    /// The Move standard library address (0x1).
    pub const ONE: Self = Self::from_u8(1);

    /// The Sui framework address (0x2).
    pub const TWO: Self = Self::from_u8(2);

    /// Creates an address from a byte array.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }

    const fn from_u8(value: u8) -> Self {
        let mut bytes = [0u8; ADDRESS_LENGTH];
        bytes[ADDRESS_LENGTH - 1] = value;
        Self(bytes)
    }

    /// Creates an address from a hex string (with or without `0x` prefix).
    ///
    /// The hex string must contain between 1 and 64 hex digits.
    pub fn from_hex<T: AsRef<[u8]>>(hex_str: T) -> SuiResult<Self> {
        parse_padded_hex(hex_str.as_ref()).map(Self)
    }

    /// Creates an address from a byte slice.
    pub fn from_bytes<T: AsRef<[u8]>>(bytes: T) -> SuiResult<Self> {
        let bytes = bytes.as_ref();
        if bytes.len() != ADDRESS_LENGTH {
            return Err(SuiError::InvalidAddress(format!(
                "expected {} bytes, got {}",
                ADDRESS_LENGTH,
                bytes.len()
            )));
        }
        let mut address = [0u8; ADDRESS_LENGTH];
        address.copy_from_slice(bytes);
        Ok(Self(address))
    }

    /// Returns the address as a byte slice.
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    /// Returns the address as a byte array.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        self.0
    }

    /// Returns the address as a hex string with `0x` prefix.
    pub fn to_hex(&self) -> String {
        format!("0x{}", hex::encode(self.0))
    }

    /// Returns a short hex string, trimming leading zeros.
    pub fn to_short_string(&self) -> String {
        let hex = hex::encode(self.0);
        let trimmed = hex.trim_start_matches('0');
        if trimmed.is_empty() {
            "0x0".to_string()
        } else {
            format!("0x{trimmed}")
        }
    }

    /// Returns true if this is the zero address.
    pub fn is_zero(&self) -> bool {
        self == &Self::ZERO
    }
}

/// Parses 1 to 64 hex digits into a left zero-padded 32-byte array.
pub(crate) fn parse_padded_hex(hex_str: &[u8]) -> SuiResult<[u8; ADDRESS_LENGTH]> {
    if hex_str.is_empty() {
        return Err(SuiError::InvalidAddress(
            "address cannot be empty".to_string(),
        ));
    }

    let hex_str = if hex_str.starts_with(b"0x") || hex_str.starts_with(b"0X") {
        &hex_str[2..]
    } else {
        hex_str
    };

    let hex_string =
        std::str::from_utf8(hex_str).map_err(|e| SuiError::InvalidAddress(e.to_string()))?;

    if hex_string.is_empty() {
        return Err(SuiError::InvalidAddress(
            "address must contain at least one hex digit".to_string(),
        ));
    }

    if hex_string.len() > ADDRESS_LENGTH * 2 {
        return Err(SuiError::InvalidAddress(format!(
            "address too long: {} characters (max {})",
            hex_string.len(),
            ADDRESS_LENGTH * 2
        )));
    }

    let padded = format!("{hex_string:0>64}");
    let bytes =
        hex::decode(&padded).map_err(|e| SuiError::InvalidAddress(format!("{hex_string}: {e}")))?;

    let mut address = [0u8; ADDRESS_LENGTH];
    address.copy_from_slice(&bytes);
    Ok(address)
}

impl Default for SuiAddress {
    fn default() -> Self {
        Self::ZERO
    }
}

impl fmt::Debug for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SuiAddress({})", self.to_short_string())
    }
}

impl fmt::Display for SuiAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

impl FromStr for SuiAddress {
    type Err = SuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for SuiAddress {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        if serializer.is_human_readable() {
            serializer.serialize_str(&self.to_hex())
        } else {
            // BCS: fixed-size array, no length prefix
            use serde::ser::SerializeTuple;
            let mut tuple = serializer.serialize_tuple(ADDRESS_LENGTH)?;
            for byte in &self.0 {
                tuple.serialize_element(byte)?;
            }
            tuple.end()
        }
    }
}

impl<'de> Deserialize<'de> for SuiAddress {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        if deserializer.is_human_readable() {
            let s = String::deserialize(deserializer)?;
            Self::from_hex(&s).map_err(serde::de::Error::custom)
        } else {
            let bytes = <[u8; ADDRESS_LENGTH]>::deserialize(deserializer)?;
            Ok(Self(bytes))
        }
    }
}

impl From<[u8; ADDRESS_LENGTH]> for SuiAddress {
    fn from(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for SuiAddress {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}
