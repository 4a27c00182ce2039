//! Move type tags.
//!
//! Type arguments of move calls and the element type of `MakeMoveVec` travel
//! as BCS-encoded [`TypeTag`]s, not as strings.

use crate::error::{SuiError, SuiResult};
use crate::types::SuiAddress;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Longest type tag string accepted by the parser.
const MAX_TYPE_TAG_LENGTH: usize = 1024;
/// Deepest generic nesting accepted by the parser.
const MAX_TYPE_NESTING_DEPTH: usize = 8;

/// A struct type: `address::module::Name<T1, T2>`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StructTag {
    /// Address of the defining package.
    pub address: SuiAddress,
    /// Module name.
    pub module: String,
    /// Struct name.
    pub name: String,
    /// Type parameters.
    pub type_params: Vec<TypeTag>,
}

impl StructTag {
    /// The `0x2::sui::SUI` coin type.
    pub fn sui() -> Self {
        Self {
            address: SuiAddress::TWO,
            module: "sui".to_string(),
            name: "SUI".to_string(),
            type_params: Vec::new(),
        }
    }
}

impl fmt::Display for StructTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}::{}::{}",
            self.address.to_short_string(),
            self.module,
            self.name
        )?;
        if !self.type_params.is_empty() {
            f.write_str("<")?;
            for (i, param) in self.type_params.iter().enumerate() {
                if i > 0 {
                    f.write_str(", ")?;
                }
                write!(f, "{param}")?;
            }
            f.write_str(">")?;
        }
        Ok(())
    }
}

/// A Move type.
///
/// Variant order is the wire order; the sized integers after `Struct` were
/// added to Move later and keep their higher tags.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TypeTag {
    /// `bool`
    Bool,
    /// `u8`
    U8,
    /// `u64`
    U64,
    /// `u128`
    U128,
    /// `address`
    Address,
    /// `signer`
    Signer,
    /// `vector<T>`
    Vector(Box<TypeTag>),
    /// A struct type.
    Struct(Box<StructTag>),
    /// `u16`
    U16,
    /// `u32`
    U32,
    /// `u256`
    U256,
}

impl TypeTag {
    /// `vector<element>`.
    pub fn vector(element: TypeTag) -> Self {
        TypeTag::Vector(Box::new(element))
    }

    /// The `0x2::sui::SUI` coin type.
    pub fn sui() -> Self {
        TypeTag::Struct(Box::new(StructTag::sui()))
    }

    fn parse_with_depth(s: &str, depth: usize) -> SuiResult<Self> {
        if depth > MAX_TYPE_NESTING_DEPTH {
            return Err(SuiError::encoding(format!(
                "type tag nesting deeper than {MAX_TYPE_NESTING_DEPTH} levels"
            )));
        }

        let s = s.trim();
        let tag = match s {
            "bool" => TypeTag::Bool,
            "u8" => TypeTag::U8,
            "u16" => TypeTag::U16,
            "u32" => TypeTag::U32,
            "u64" => TypeTag::U64,
            "u128" => TypeTag::U128,
            "u256" => TypeTag::U256,
            "address" => TypeTag::Address,
            "signer" => TypeTag::Signer,
            _ => match s.strip_prefix("vector<").and_then(|s| s.strip_suffix('>')) {
                Some(inner) => TypeTag::vector(Self::parse_with_depth(inner, depth + 1)?),
                None => Self::parse_struct(s, depth)?,
            },
        };
        Ok(tag)
    }

    fn parse_struct(s: &str, depth: usize) -> SuiResult<Self> {
        let (base, params) = match s.find('<') {
            Some(open) => {
                let inner = s[open + 1..]
                    .strip_suffix('>')
                    .ok_or_else(|| SuiError::encoding(format!("malformed generic type '{s}'")))?;
                (&s[..open], Some(inner))
            }
            None => (s, None),
        };

        let parts: Vec<&str> = base.split("::").collect();
        let [address, module, name] = parts.as_slice() else {
            return Err(SuiError::encoding(format!(
                "'{s}' is not a type (expected address::module::Name)"
            )));
        };
        let address = SuiAddress::from_hex(address)
            .map_err(|e| SuiError::encoding(format!("type '{s}': {e}")))?;
        check_identifier(module)?;
        check_identifier(name)?;

        let type_params = match params {
            Some(params) => Self::parse_params(params, depth + 1)?,
            None => Vec::new(),
        };
        Ok(TypeTag::Struct(Box::new(StructTag {
            address,
            module: (*module).to_string(),
            name: (*name).to_string(),
            type_params,
        })))
    }

    /// Splits on top-level commas only.
    fn parse_params(s: &str, depth: usize) -> SuiResult<Vec<TypeTag>> {
        let mut params = Vec::new();
        let mut nesting = 0usize;
        let mut start = 0;
        for (i, c) in s.char_indices() {
            match c {
                '<' => nesting += 1,
                '>' => {
                    nesting = nesting.checked_sub(1).ok_or_else(|| {
                        SuiError::encoding(format!("unbalanced '>' in type arguments '{s}'"))
                    })?;
                }
                ',' if nesting == 0 => {
                    params.push(Self::parse_with_depth(&s[start..i], depth)?);
                    start = i + 1;
                }
                _ => {}
            }
        }
        if nesting != 0 {
            return Err(SuiError::encoding(format!(
                "unbalanced '<' in type arguments '{s}'"
            )));
        }
        params.push(Self::parse_with_depth(&s[start..], depth)?);
        Ok(params)
    }
}

impl FromStr for TypeTag {
    type Err = SuiError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.len() > MAX_TYPE_TAG_LENGTH {
            return Err(SuiError::encoding(format!(
                "type tag of {} bytes exceeds {MAX_TYPE_TAG_LENGTH}",
                s.len()
            )));
        }
        Self::parse_with_depth(s, 0)
    }
}

impl fmt::Display for TypeTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeTag::Bool => f.write_str("bool"),
            TypeTag::U8 => f.write_str("u8"),
            TypeTag::U16 => f.write_str("u16"),
            TypeTag::U32 => f.write_str("u32"),
            TypeTag::U64 => f.write_str("u64"),
            TypeTag::U128 => f.write_str("u128"),
            TypeTag::U256 => f.write_str("u256"),
            TypeTag::Address => f.write_str("address"),
            TypeTag::Signer => f.write_str("signer"),
            TypeTag::Vector(inner) => write!(f, "vector<{inner}>"),
            TypeTag::Struct(tag) => write!(f, "{tag}"),
        }
    }
}

/// Checks that `ident` is a Move identifier.
pub(crate) fn check_identifier(ident: &str) -> SuiResult<()> {
    let mut chars = ident.chars();
    let valid_start = chars
        .next()
        .is_some_and(|c| c.is_ascii_alphabetic() || c == '_');
    if valid_start && chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        Ok(())
    } else {
        Err(SuiError::encoding(format!(
            "'{ident}' is not a valid Move identifier"
        )))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_primitives_and_vectors() {
        assert_eq!("u64".parse::<TypeTag>().unwrap(), TypeTag::U64);
        assert_eq!(
            " vector<vector<u8>> ".parse::<TypeTag>().unwrap(),
            TypeTag::vector(TypeTag::vector(TypeTag::U8))
        );
        assert!("u7".parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_parse_generic_struct() {
        let tag: TypeTag = "0x2::coin::Coin<0x2::sui::SUI>".parse().unwrap();
        let TypeTag::Struct(coin) = &tag else {
            panic!("expected a struct tag, got {tag:?}");
        };
        assert_eq!(coin.address, SuiAddress::TWO);
        assert_eq!(coin.name, "Coin");
        assert_eq!(coin.type_params, vec![TypeTag::sui()]);
        assert_eq!(tag.to_string(), "0x2::coin::Coin<0x2::sui::SUI>");
    }

    #[test]
    fn test_parse_splits_top_level_commas_only() {
        let tag: TypeTag = "0x2::pair::Pair<0x2::coin::Coin<0x2::sui::SUI>, vector<u64>>"
            .parse()
            .unwrap();
        let TypeTag::Struct(pair) = tag else {
            panic!("expected a struct tag");
        };
        assert_eq!(pair.type_params.len(), 2);
        assert_eq!(pair.type_params[1], TypeTag::vector(TypeTag::U64));
    }

    #[test]
    fn test_parse_rejects_malformed() {
        assert!("0x2::coin".parse::<TypeTag>().is_err());
        assert!("0x2::coin::Coin<u8".parse::<TypeTag>().is_err());
        assert!("0x2::coin::Coin<u8>>".parse::<TypeTag>().is_err());
        assert!("0x2::1coin::Coin".parse::<TypeTag>().is_err());
        assert!("nothex::coin::Coin".parse::<TypeTag>().is_err());

        let deep = format!("{}u8{}", "vector<".repeat(12), ">".repeat(12));
        assert!(deep.parse::<TypeTag>().is_err());
    }

    #[test]
    fn test_wire_tags() {
        assert_eq!(bcs::to_bytes(&TypeTag::Bool).unwrap(), vec![0]);
        assert_eq!(bcs::to_bytes(&TypeTag::U64).unwrap(), vec![2]);
        assert_eq!(bcs::to_bytes(&TypeTag::vector(TypeTag::U8)).unwrap(), vec![6, 1]);
        assert_eq!(bcs::to_bytes(&TypeTag::U16).unwrap(), vec![8]);
        assert_eq!(bcs::to_bytes(&TypeTag::U256).unwrap(), vec![10]);

        let mut sui = vec![7];
        sui.extend_from_slice(SuiAddress::TWO.as_bytes());
        sui.extend_from_slice(&[3, b's', b'u', b'i', 3, b'S', b'U', b'I', 0]);
        assert_eq!(bcs::to_bytes(&TypeTag::sui()).unwrap(), sui);
    }
}
