//! Core Sui types.
//!
//! Addresses, object ids and references, digests, and Move type tags.

mod address;
mod digest;
mod move_types;
mod object;

pub use address::{SuiAddress, ADDRESS_LENGTH};
pub use digest::{Digest, ObjectDigest, TransactionDigest, DIGEST_LENGTH};
pub(crate) use move_types::check_identifier;
pub use move_types::{StructTag, TypeTag};
pub use object::{ObjectId, ObjectInfo, ObjectRef, Owner, SequenceNumber};
