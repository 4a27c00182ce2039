//! Transaction construction.
//!
//! A transaction is an input table, an ordered list of [`Command`]s and gas
//! settings. Commands take [`Argument`]s: entries of the input table, the
//! gas coin, or the outputs of earlier commands. [`TransactionBuilder`]
//! collects them and produces an immutable [`TransactionData`] whose BCS
//! bytes are what gets signed and dispatched.

mod argument;
mod builder;
mod command;
mod input;
mod pure;
mod types;

pub use argument::Argument;
pub use builder::{
    CommandHandle, TransactionBuilder, DEV_INSPECT_GAS_BUDGET, DEV_INSPECT_GAS_PRICE,
    MAX_COMMANDS,
};
pub use command::{Command, MoveCall};
pub use input::{CallArg, ObjectArg};
pub use pure::{encode_pure, PureType};
pub use types::{
    GasData, ProgrammableTransaction, TransactionData, TransactionDataV1, TransactionExpiration,
    TransactionKind,
};
