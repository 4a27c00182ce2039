//! Pure value encoding.
//!
//! A pure argument is a BCS-encoded Move value that is not an object: an
//! integer, a bool, an address, a string, or a vector or option of those.
//! [`encode_pure`] takes a loosely typed JSON value and the Move type it is
//! declared as, checks that the value fits, and produces canonical bytes.
//!
//! # Example
//!
//! ```rust
//! use sui_rust_sdk::transaction::{encode_pure, PureType};
//!
//! let ty: PureType = "vector<u16>".parse().unwrap();
//! let bytes = encode_pure(&serde_json::json!([1, 256]), &ty).unwrap();
//! assert_eq!(bytes, vec![2, 1, 0, 0, 1]);
//!
//! // 256 does not fit in a u8
//! assert!(encode_pure(&serde_json::json!(256), &PureType::U8).is_err());
//! ```

use crate::error::{SuiError, SuiResult};
use crate::types::{StructTag, SuiAddress, TypeTag};
use serde::ser::{Error as _, SerializeSeq};
use serde::{Serialize, Serializer};
use serde_json::Value;
use std::fmt;
use std::str::FromStr;

/// The Move types a pure argument can be declared as.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PureType {
    /// `bool`
    Bool,
    /// `u8`
    U8,
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `u256`
    U256,
    /// `address`, also used for `0x2::object::ID`
    Address,
    /// `0x1::string::String` or `0x1::ascii::String`
    String,
    /// `vector<T>`
    Vector(Box<PureType>),
    /// `0x1::option::Option<T>`
    Option(Box<PureType>),
}

impl PureType {
    /// Shorthand for `vector<T>`.
    pub fn vector(inner: PureType) -> Self {
        PureType::Vector(Box::new(inner))
    }

    /// Shorthand for `0x1::option::Option<T>`.
    pub fn option(inner: PureType) -> Self {
        PureType::Option(Box::new(inner))
    }

    fn from_struct_tag(tag: &StructTag) -> Option<Self> {
        let name = (tag.module.as_str(), tag.name.as_str());
        match (tag.address, name, tag.type_params.as_slice()) {
            (SuiAddress::ONE, ("string" | "ascii", "String"), []) => Some(PureType::String),
            (SuiAddress::ONE, ("option", "Option"), [inner]) => {
                PureType::try_from(inner).ok().map(PureType::option)
            }
            (SuiAddress::TWO, ("object", "ID"), []) => Some(PureType::Address),
            _ => None,
        }
    }
}

impl TryFrom<&TypeTag> for PureType {
    type Error = SuiError;

    fn try_from(tag: &TypeTag) -> Result<Self, Self::Error> {
        let ty = match tag {
            TypeTag::Bool => PureType::Bool,
            TypeTag::U8 => PureType::U8,
            TypeTag::U16 => PureType::U16,
            TypeTag::U32 => PureType::U32,
            TypeTag::U64 => PureType::U64,
            TypeTag::U128 => PureType::U128,
            TypeTag::U256 => PureType::U256,
            TypeTag::Address => PureType::Address,
            TypeTag::Vector(inner) => PureType::vector(PureType::try_from(inner.as_ref())?),
            TypeTag::Struct(tag) => Self::from_struct_tag(tag).ok_or_else(|| {
                SuiError::encoding(format!("'{tag}' is not a pure argument type"))
            })?,
            TypeTag::Signer => {
                return Err(SuiError::encoding("'signer' is not a pure argument type"))
            }
        };
        Ok(ty)
    }
}

impl FromStr for PureType {
    type Err = SuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        PureType::try_from(&s.parse::<TypeTag>()?)
    }
}

impl fmt::Display for PureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PureType::Bool => f.write_str("bool"),
            PureType::U8 => f.write_str("u8"),
            PureType::U16 => f.write_str("u16"),
            PureType::U32 => f.write_str("u32"),
            PureType::U64 => f.write_str("u64"),
            PureType::U128 => f.write_str("u128"),
            PureType::U256 => f.write_str("u256"),
            PureType::Address => f.write_str("address"),
            PureType::String => f.write_str("0x1::string::String"),
            PureType::Vector(inner) => write!(f, "vector<{inner}>"),
            PureType::Option(inner) => write!(f, "0x1::option::Option<{inner}>"),
        }
    }
}

/// Encodes `value` as the canonical BCS bytes of a Move value of type `ty`.
///
/// Integers may be given as JSON numbers or as decimal / `0x` hex strings
/// (large `u128`/`u256` values usually arrive as strings). `vector<u8>` also
/// accepts a string, encoded as its UTF-8 bytes. `null` encodes `None` for
/// option types.
///
/// # Errors
///
/// Returns [`SuiError::Encoding`] when the value does not fit the declared
/// type: out of range or negative integers, malformed addresses, or a JSON
/// shape that does not match.
pub fn encode_pure(value: &Value, ty: &PureType) -> SuiResult<Vec<u8>> {
    bcs::to_bytes(&TypedValue { value, ty }).map_err(|e| SuiError::encoding(e.to_string()))
}

/// A JSON value viewed as a Move value of a declared type.
struct TypedValue<'a> {
    value: &'a Value,
    ty: &'a PureType,
}

impl Serialize for TypedValue<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let value = self.value;
        let ty = self.ty;
        let mismatch = || S::Error::custom(mismatch_message(value, ty));

        match ty {
            PureType::Bool => value.as_bool().ok_or_else(mismatch)?.serialize(serializer),
            PureType::U8 => narrow::<u8>(value).ok_or_else(mismatch)?.serialize(serializer),
            PureType::U16 => narrow::<u16>(value).ok_or_else(mismatch)?.serialize(serializer),
            PureType::U32 => narrow::<u32>(value).ok_or_else(mismatch)?.serialize(serializer),
            PureType::U64 => narrow::<u64>(value).ok_or_else(mismatch)?.serialize(serializer),
            PureType::U128 => parse_u128(value).ok_or_else(mismatch)?.serialize(serializer),
            PureType::U256 => parse_u256(value).ok_or_else(mismatch)?.serialize(serializer),
            PureType::Address => {
                let text = value.as_str().ok_or_else(mismatch)?;
                SuiAddress::from_hex(text)
                    .map_err(|e| S::Error::custom(format!("malformed address '{text}': {e}")))?
                    .serialize(serializer)
            }
            PureType::String => value.as_str().ok_or_else(mismatch)?.serialize(serializer),
            PureType::Vector(inner) => match value {
                Value::Array(items) => {
                    let mut seq = serializer.serialize_seq(Some(items.len()))?;
                    for item in items {
                        seq.serialize_element(&TypedValue { value: item, ty: inner })?;
                    }
                    seq.end()
                }
                Value::String(text) if **inner == PureType::U8 => {
                    serializer.serialize_bytes(text.as_bytes())
                }
                _ => Err(mismatch()),
            },
            PureType::Option(inner) => match value {
                Value::Null => serializer.serialize_none(),
                some => serializer.serialize_some(&TypedValue { value: some, ty: inner }),
            },
        }
    }
}

fn mismatch_message(value: &Value, ty: &PureType) -> String {
    let full = value.to_string();
    let mut shown: String = full.chars().take(64).collect();
    if shown.len() < full.len() {
        shown.push_str("...");
    }
    format!("value {shown} does not fit type {ty}")
}

fn narrow<T: TryFrom<u128>>(value: &Value) -> Option<T> {
    parse_u128(value).and_then(|wide| T::try_from(wide).ok())
}

fn parse_u128(value: &Value) -> Option<u128> {
    match value {
        Value::Number(n) => match n.as_u64() {
            Some(small) => Some(u128::from(small)),
            None => n.to_string().parse::<u128>().ok(),
        },
        Value::String(s) => match s.strip_prefix("0x") {
            Some(hex_digits) => u128::from_str_radix(hex_digits, 16).ok(),
            None => s.parse::<u128>().ok(),
        },
        _ => None,
    }
}

/// Parses a u256 into its 32 little-endian bytes.
fn parse_u256(value: &Value) -> Option<[u8; 32]> {
    let text = match value {
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        _ => return None,
    };

    if let Some(hex_digits) = text.strip_prefix("0x") {
        if hex_digits.is_empty() || hex_digits.len() > 64 {
            return None;
        }
        let mut bytes: [u8; 32] = hex::decode(format!("{hex_digits:0>64}"))
            .ok()?
            .try_into()
            .ok()?;
        bytes.reverse();
        return Some(bytes);
    }

    if text.is_empty() || !text.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    let mut bytes = [0u8; 32];
    for digit in text.bytes().map(|b| u32::from(b - b'0')) {
        let mut carry = digit;
        for byte in bytes.iter_mut() {
            let v = u32::from(*byte) * 10 + carry;
            *byte = (v & 0xff) as u8;
            carry = v >> 8;
        }
        if carry != 0 {
            return None;
        }
    }
    Some(bytes)
}
