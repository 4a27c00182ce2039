//! Object identifiers and references.

use crate::error::SuiResult;
use crate::types::address::{parse_padded_hex, ADDRESS_LENGTH};
use crate::types::digest::ObjectDigest;
use crate::types::SuiAddress;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

/// Object version number.
pub type SequenceNumber = u64;

/// A 32-byte object identifier.
///
/// Shares the textual and wire format of [`SuiAddress`].
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct ObjectId(SuiAddress);

impl ObjectId {
    /// The all-zero object id.
    pub const ZERO: Self = Self(SuiAddress::ZERO);

    /// Creates an object id from a byte array.
    pub const fn new(bytes: [u8; ADDRESS_LENGTH]) -> Self {
        Self(SuiAddress::new(bytes))
    }

    /// Parses an object id from hex, zero-padding short forms.
    pub fn from_hex<T: AsRef<[u8]>>(hex_str: T) -> SuiResult<Self> {
        parse_padded_hex(hex_str.as_ref()).map(Self::new)
    }

    /// Returns the id as a byte array.
    pub fn to_bytes(&self) -> [u8; ADDRESS_LENGTH] {
        self.0.to_bytes()
    }

    /// Returns the id as a `0x` prefixed hex string.
    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }

    /// Returns the same bytes viewed as an address.
    pub fn to_address(&self) -> SuiAddress {
        self.0
    }
}

impl From<SuiAddress> for ObjectId {
    fn from(address: SuiAddress) -> Self {
        Self(address)
    }
}

impl fmt::Debug for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectId({})", self.0.to_short_string())
    }
}

impl fmt::Display for ObjectId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl FromStr for ObjectId {
    type Err = crate::error::SuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

impl Serialize for ObjectId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.0.serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for ObjectId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        SuiAddress::deserialize(deserializer).map(Self)
    }
}

/// A specific version of an on-chain object.
///
/// A reference is only usable as an input while it names the object's
/// current version. The SDK never refreshes references on its own; use
/// [`refresh_object_ref`](crate::dispatch::refresh_object_ref) to fetch the
/// latest one explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ObjectRef {
    /// Object identifier.
    pub object_id: ObjectId,
    /// Version number.
    pub version: SequenceNumber,
    /// Content digest at that version.
    pub digest: ObjectDigest,
}

impl ObjectRef {
    /// Creates a new object reference.
    pub fn new(object_id: ObjectId, version: SequenceNumber, digest: ObjectDigest) -> Self {
        Self {
            object_id,
            version,
            digest,
        }
    }

    /// Parses the `{ objectId, version, digest }` JSON shape returned by nodes.
    pub(crate) fn from_json(json: &serde_json::Value) -> Option<Self> {
        let object_id = json
            .get("objectId")
            .and_then(serde_json::Value::as_str)
            .and_then(|s| ObjectId::from_hex(s).ok())?;
        let version = json.get("version").and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
        })?;
        let digest = json
            .get("digest")
            .and_then(serde_json::Value::as_str)
            .and_then(|s| s.parse::<ObjectDigest>().ok())?;
        Some(Self::new(object_id, version, digest))
    }
}

/// Who owns an object.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Owner {
    /// Owned by an account address.
    AddressOwner(SuiAddress),
    /// Owned by another object.
    ObjectOwner(SuiAddress),
    /// Shared object, with the version it became shared at.
    Shared {
        /// Version at which the object became shared.
        initial_shared_version: SequenceNumber,
    },
    /// Frozen, read-only object.
    Immutable,
}

impl Owner {
    /// Parses the node's JSON owner representation.
    pub(crate) fn from_json(json: &serde_json::Value) -> Option<Self> {
        if json.as_str() == Some("Immutable") {
            return Some(Owner::Immutable);
        }
        if let Some(addr) = json.get("AddressOwner").and_then(serde_json::Value::as_str) {
            return SuiAddress::from_hex(addr).ok().map(Owner::AddressOwner);
        }
        if let Some(addr) = json.get("ObjectOwner").and_then(serde_json::Value::as_str) {
            return SuiAddress::from_hex(addr).ok().map(Owner::ObjectOwner);
        }
        let shared = json.get("Shared")?;
        let version = shared.get("initial_shared_version").and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_str().and_then(|s| s.parse().ok()))
        })?;
        Some(Owner::Shared {
            initial_shared_version: version,
        })
    }
}

/// Current state of an object as reported by a node.
#[derive(Debug, Clone, PartialEq)]
pub struct ObjectInfo {
    /// Latest reference.
    pub object_ref: ObjectRef,
    /// Move type, when the node reports it.
    pub type_: Option<String>,
    /// Owner, when the node reports it.
    pub owner: Option<Owner>,
}

impl ObjectInfo {
    /// Parses the `data` object of a `sui_getObject` response.
    pub(crate) fn from_json(data: &serde_json::Value) -> Option<Self> {
        Some(Self {
            object_ref: ObjectRef::from_json(data)?,
            type_: data
                .get("type")
                .and_then(serde_json::Value::as_str)
                .map(ToString::to_string),
            owner: data.get("owner").and_then(Owner::from_json),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn digest_hex() -> String {
        format!("0x{}", "11".repeat(32))
    }

    #[test]
    fn test_object_id_shares_address_format() {
        let id = ObjectId::from_hex("0x5").unwrap();
        assert_eq!(id.to_address(), SuiAddress::from_hex("0x5").unwrap());
        assert_eq!(bcs::to_bytes(&id).unwrap().len(), ADDRESS_LENGTH);
    }

    #[test]
    fn test_object_ref_from_json() {
        let json = serde_json::json!({
            "objectId": "0x5",
            "version": "42",
            "digest": digest_hex(),
        });
        let object_ref = ObjectRef::from_json(&json).unwrap();
        assert_eq!(object_ref.object_id, ObjectId::from_hex("0x5").unwrap());
        assert_eq!(object_ref.version, 42);
        assert_eq!(object_ref.digest.as_bytes(), &[0x11; 32]);
    }

    #[test]
    fn test_object_ref_from_json_missing_digest() {
        let json = serde_json::json!({ "objectId": "0x5", "version": 1 });
        assert!(ObjectRef::from_json(&json).is_none());
    }

    #[test]
    fn test_owner_from_json() {
        assert_eq!(
            Owner::from_json(&serde_json::json!("Immutable")),
            Some(Owner::Immutable)
        );
        assert_eq!(
            Owner::from_json(&serde_json::json!({ "AddressOwner": "0x2" })),
            Some(Owner::AddressOwner(SuiAddress::TWO))
        );
        assert_eq!(
            Owner::from_json(&serde_json::json!({ "Shared": { "initial_shared_version": 7 } })),
            Some(Owner::Shared {
                initial_shared_version: 7
            })
        );
    }

    #[test]
    fn test_object_info_from_json() {
        let json = serde_json::json!({
            "objectId": "0x9",
            "version": 3,
            "digest": digest_hex(),
            "type": "0x2::coin::Coin<0x2::sui::SUI>",
            "owner": { "AddressOwner": "0x1" },
        });
        let info = ObjectInfo::from_json(&json).unwrap();
        assert_eq!(info.object_ref.version, 3);
        assert_eq!(info.type_.as_deref(), Some("0x2::coin::Coin<0x2::sui::SUI>"));
        assert_eq!(info.owner, Some(Owner::AddressOwner(SuiAddress::ONE)));
    }
}
