//! Transaction types.

use crate::error::{SuiError, SuiResult};
use crate::transaction::command::Command;
use crate::transaction::input::CallArg;
use crate::types::{Digest, ObjectRef, SuiAddress, TransactionDigest};
use serde::{Deserialize, Serialize};

/// A programmable transaction: an input table plus commands that use it.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgrammableTransaction {
    /// Pure values and objects, referenced by [`Argument::Input`](crate::transaction::Argument::Input).
    pub inputs: Vec<CallArg>,
    /// Commands, executed in order.
    pub commands: Vec<Command>,
}

/// What a transaction does.
///
/// Only programmable transactions can be built by clients; system
/// transaction kinds follow this variant on the wire.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionKind {
    /// A programmable transaction.
    ProgrammableTransaction(ProgrammableTransaction),
}

impl TransactionKind {
    /// Creates a programmable kind.
    pub fn programmable(inputs: Vec<CallArg>, commands: Vec<Command>) -> Self {
        TransactionKind::ProgrammableTransaction(ProgrammableTransaction { inputs, commands })
    }

    /// The input table.
    pub fn inputs(&self) -> &[CallArg] {
        let TransactionKind::ProgrammableTransaction(pt) = self;
        &pt.inputs
    }

    /// The commands, in execution order.
    pub fn commands(&self) -> &[Command] {
        let TransactionKind::ProgrammableTransaction(pt) = self;
        &pt.commands
    }

    /// Serializes the kind to BCS bytes, as sent for inspection.
    ///
    /// # Errors
    ///
    /// Returns an error if BCS serialization fails.
    pub fn to_bcs(&self) -> SuiResult<Vec<u8>> {
        bcs::to_bytes(self).map_err(SuiError::bcs)
    }
}

impl Default for TransactionKind {
    fn default() -> Self {
        TransactionKind::ProgrammableTransaction(ProgrammableTransaction::default())
    }
}

/// Who pays for a transaction and how much.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GasData {
    /// Coins used to pay for gas.
    pub payment: Vec<ObjectRef>,
    /// Owner of the gas coins; the sender unless sponsored.
    pub owner: SuiAddress,
    /// Price per gas unit.
    pub price: u64,
    /// Maximum gas the transaction may consume.
    pub budget: u64,
}

/// When a transaction stops being valid.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransactionExpiration {
    /// Never expires.
    #[default]
    None,
    /// Invalid once this epoch has passed.
    Epoch(u64),
}

/// The fields of a version 1 transaction.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionDataV1 {
    kind: TransactionKind,
    sender: SuiAddress,
    gas_data: GasData,
    expiration: TransactionExpiration,
}

/// A complete, unsigned transaction.
///
/// Only [`TransactionBuilder`](crate::transaction::TransactionBuilder) and
/// [`TransactionData::from_bcs`] produce values of this type, and nothing
/// mutates one afterwards. The BCS encoding is the exact byte string that
/// gets signed and submitted.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TransactionData {
    /// Version 1, the only version nodes accept.
    V1(TransactionDataV1),
}

impl TransactionData {
    pub(crate) fn new(
        kind: TransactionKind,
        sender: SuiAddress,
        gas_data: GasData,
        expiration: TransactionExpiration,
    ) -> Self {
        TransactionData::V1(TransactionDataV1 {
            kind,
            sender,
            gas_data,
            expiration,
        })
    }

    fn v1(&self) -> &TransactionDataV1 {
        let TransactionData::V1(v1) = self;
        v1
    }

    /// Inputs and commands.
    pub fn kind(&self) -> &TransactionKind {
        &self.v1().kind
    }

    /// The sending account.
    pub fn sender(&self) -> SuiAddress {
        self.v1().sender
    }

    /// Gas payment, owner, price and budget.
    pub fn gas_data(&self) -> &GasData {
        &self.v1().gas_data
    }

    /// Expiration.
    pub fn expiration(&self) -> TransactionExpiration {
        self.v1().expiration
    }

    /// Serializes this transaction to its canonical BCS bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if BCS serialization fails.
    pub fn to_bcs(&self) -> SuiResult<Vec<u8>> {
        bcs::to_bytes(self).map_err(SuiError::bcs)
    }

    /// Parses canonical BCS bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if the bytes are not a valid encoding, including
    /// trailing bytes after the transaction.
    pub fn from_bcs(bytes: &[u8]) -> SuiResult<Self> {
        bcs::from_bytes(bytes).map_err(SuiError::bcs)
    }

    /// Computes the transaction digest.
    ///
    /// # Errors
    ///
    /// Returns an error if BCS serialization fails.
    pub fn digest(&self) -> SuiResult<TransactionDigest> {
        Ok(Self::digest_of_bytes(&self.to_bcs()?))
    }

    /// Computes the digest of already encoded transaction bytes.
    pub fn digest_of_bytes(tx_bytes: &[u8]) -> TransactionDigest {
        Digest::of_named("TransactionData", tx_bytes)
    }
}
