//! Transaction inputs.
//!
//! Pure values and objects are listed once in the transaction's input table
//! and commands refer to them by position with [`Argument::Input`].
//!
//! [`Argument::Input`]: crate::transaction::Argument::Input

use crate::types::{ObjectId, ObjectRef, SequenceNumber};
use serde::{Deserialize, Serialize};
use std::fmt;

/// An entry of the input table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CallArg {
    /// A BCS-encoded value.
    Pure(#[serde(with = "serde_bytes")] Vec<u8>),
    /// An on-chain object.
    Object(ObjectArg),
}

impl CallArg {
    /// Id of the object, for object inputs.
    pub fn object_id(&self) -> Option<ObjectId> {
        match self {
            CallArg::Pure(_) => None,
            CallArg::Object(object) => Some(object.object_id()),
        }
    }
}

impl fmt::Display for CallArg {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallArg::Pure(bytes) => write!(f, "Pure(0x{})", hex::encode(bytes)),
            CallArg::Object(ObjectArg::ImmOrOwnedObject(r)) => {
                write!(f, "Object({}@{})", r.object_id, r.version)
            }
            CallArg::Object(ObjectArg::SharedObject { id, mutable, .. }) => {
                write!(f, "Shared({id}, mutable: {mutable})")
            }
            CallArg::Object(ObjectArg::Receiving(r)) => {
                write!(f, "Receiving({}@{})", r.object_id, r.version)
            }
        }
    }
}

/// How an object enters a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ObjectArg {
    /// An owned or immutable object at a specific version.
    ImmOrOwnedObject(ObjectRef),
    /// A shared object. The node picks the version at execution.
    SharedObject {
        /// Object id.
        id: ObjectId,
        /// Version at which the object became shared.
        initial_shared_version: SequenceNumber,
        /// Whether the transaction writes to it.
        mutable: bool,
    },
    /// An object sent to another object, received by the transaction.
    Receiving(ObjectRef),
}

impl ObjectArg {
    /// Id of the object.
    pub fn object_id(&self) -> ObjectId {
        match self {
            ObjectArg::ImmOrOwnedObject(r) | ObjectArg::Receiving(r) => r.object_id,
            ObjectArg::SharedObject { id, .. } => *id,
        }
    }
}
