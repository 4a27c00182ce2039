//! Transaction builder.

use crate::error::{SuiError, SuiResult};
use crate::transaction::argument::Argument;
use crate::transaction::command::{Command, MoveCall};
use crate::transaction::input::{CallArg, ObjectArg};
use crate::transaction::pure::{encode_pure, PureType};
use crate::transaction::types::{GasData, TransactionData, TransactionExpiration, TransactionKind};
use crate::types::{ObjectId, ObjectInfo, ObjectRef, Owner, SequenceNumber, SuiAddress, TypeTag};
use serde::Serialize;
use tracing::debug;

/// Gas budget assumed for inspection when none was set.
pub const DEV_INSPECT_GAS_BUDGET: u64 = 50_000_000_000;
/// Gas price assumed for inspection when none was set.
pub const DEV_INSPECT_GAS_PRICE: u64 = 1;
/// Maximum number of commands in one transaction.
pub const MAX_COMMANDS: usize = 1024;

/// Handle to a command added to a [`TransactionBuilder`].
///
/// Use it to feed the command's outputs into later commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CommandHandle {
    index: u16,
}

impl CommandHandle {
    /// Position of the command in the transaction.
    pub fn index(&self) -> u16 {
        self.index
    }

    /// The command's (only) output.
    pub fn result(&self) -> Argument {
        Argument::result(self.index)
    }

    /// Output `sub_index` of a command with several outputs.
    pub fn nested(&self, sub_index: u16) -> Argument {
        Argument::nested_result(self.index, sub_index)
    }
}

/// Accumulates inputs, commands and gas settings, then produces
/// [`TransactionData`].
///
/// Pure values and objects go into the input table and come back as
/// [`Argument::Input`]. Each object appears in the table once; adding the
/// same shared object twice keeps one entry, mutable if either use was.
///
/// Setters may be called any number of times before finalization; the last
/// value wins. After a successful [`finalize`](Self::finalize) every mutating
/// call fails with [`SuiError::BuilderFinalized`]. A failed finalization
/// leaves the builder open so the caller can fix it and try again.
///
/// # Example
///
/// ```rust
/// use sui_rust_sdk::transaction::TransactionBuilder;
/// use sui_rust_sdk::types::{ObjectDigest, ObjectId, ObjectRef, SuiAddress};
///
/// let sender = SuiAddress::from_hex("0xa11ce").unwrap();
/// let gas = ObjectRef::new(ObjectId::from_hex("0x9a5").unwrap(), 4, ObjectDigest::new([1; 32]));
///
/// let mut builder = TransactionBuilder::new();
/// let amount = builder.pure(&1_000u64).unwrap();
/// let split = builder.split_coins(builder.gas(), [amount]).unwrap();
/// let recipient = builder.pure(&SuiAddress::from_hex("0xb0b").unwrap()).unwrap();
/// builder.transfer_objects([split.nested(0)], recipient).unwrap();
///
/// builder
///     .set_sender(sender).unwrap()
///     .set_gas_payment(vec![gas]).unwrap()
///     .set_gas_budget(10_000_000).unwrap()
///     .set_gas_price(1_000).unwrap();
///
/// let data = builder.finalize().unwrap();
/// assert_eq!(data.kind().inputs().len(), 2);
/// assert_eq!(data.kind().commands().len(), 2);
/// assert!(builder.finalize().is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct TransactionBuilder {
    inputs: Vec<CallArg>,
    commands: Vec<Command>,
    sender: Option<SuiAddress>,
    gas_payment: Vec<ObjectRef>,
    gas_owner: Option<SuiAddress>,
    gas_budget: Option<u64>,
    gas_price: Option<u64>,
    expiration: TransactionExpiration,
    finalized: bool,
}

impl TransactionBuilder {
    /// Creates an empty builder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether [`finalize`](Self::finalize) has succeeded.
    pub fn is_finalized(&self) -> bool {
        self.finalized
    }

    /// Number of inputs added so far.
    pub fn input_count(&self) -> usize {
        self.inputs.len()
    }

    /// Number of commands added so far.
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    // === Commands ===

    /// Appends a command.
    ///
    /// References are checked at finalization, not here.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::BuilderFinalized`] after finalization, or
    /// [`SuiError::InvalidCommand`] once the command limit is reached.
    pub fn add_command(&mut self, command: impl Into<Command>) -> SuiResult<CommandHandle> {
        self.ensure_open()?;
        let position = self.commands.len();
        if position >= MAX_COMMANDS {
            return Err(SuiError::InvalidCommand {
                command: position,
                reason: format!("a transaction holds at most {MAX_COMMANDS} commands"),
            });
        }
        let index = u16::try_from(position)
            .map_err(|_| SuiError::Internal(format!("command index {position} overflows u16")))?;
        self.commands.push(command.into());
        Ok(CommandHandle { index })
    }

    /// Adds a Move call.
    ///
    /// # Errors
    ///
    /// See [`add_command`](Self::add_command).
    pub fn move_call(&mut self, call: MoveCall) -> SuiResult<CommandHandle> {
        self.add_command(call)
    }

    /// Splits one coin per amount off `coin`.
    ///
    /// # Errors
    ///
    /// See [`add_command`](Self::add_command).
    pub fn split_coins(
        &mut self,
        coin: Argument,
        amounts: impl IntoIterator<Item = Argument>,
    ) -> SuiResult<CommandHandle> {
        self.add_command(Command::SplitCoins {
            coin,
            amounts: amounts.into_iter().collect(),
        })
    }

    /// Merges `sources` into `destination`.
    ///
    /// # Errors
    ///
    /// See [`add_command`](Self::add_command).
    pub fn merge_coins(
        &mut self,
        destination: Argument,
        sources: impl IntoIterator<Item = Argument>,
    ) -> SuiResult<CommandHandle> {
        self.add_command(Command::MergeCoins {
            destination,
            sources: sources.into_iter().collect(),
        })
    }

    /// Transfers `objects` to `recipient`.
    ///
    /// # Errors
    ///
    /// See [`add_command`](Self::add_command).
    pub fn transfer_objects(
        &mut self,
        objects: impl IntoIterator<Item = Argument>,
        recipient: Argument,
    ) -> SuiResult<CommandHandle> {
        self.add_command(Command::TransferObjects {
            objects: objects.into_iter().collect(),
            recipient,
        })
    }

    /// Publishes compiled modules.
    ///
    /// # Errors
    ///
    /// See [`add_command`](Self::add_command).
    pub fn publish(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
    ) -> SuiResult<CommandHandle> {
        self.add_command(Command::Publish {
            modules,
            dependencies,
        })
    }

    /// Upgrades `package` using an authorized `ticket`.
    ///
    /// # Errors
    ///
    /// See [`add_command`](Self::add_command).
    pub fn upgrade(
        &mut self,
        modules: Vec<Vec<u8>>,
        dependencies: Vec<ObjectId>,
        package: ObjectId,
        ticket: Argument,
    ) -> SuiResult<CommandHandle> {
        self.add_command(Command::Upgrade {
            modules,
            dependencies,
            package,
            ticket,
        })
    }

    /// Builds a Move vector out of `elements`.
    ///
    /// # Errors
    ///
    /// See [`add_command`](Self::add_command).
    pub fn make_move_vec(
        &mut self,
        element_type: Option<TypeTag>,
        elements: impl IntoIterator<Item = Argument>,
    ) -> SuiResult<CommandHandle> {
        self.add_command(Command::MakeMoveVec {
            element_type,
            elements: elements.into_iter().collect(),
        })
    }

    // === Inputs ===

    /// BCS-encodes a value as a pure input.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::Encoding`] if the value cannot be serialized, or
    /// [`SuiError::BuilderFinalized`] after finalization.
    pub fn pure<T: Serialize + ?Sized>(&mut self, value: &T) -> SuiResult<Argument> {
        self.ensure_open()?;
        let bytes = bcs::to_bytes(value).map_err(|e| SuiError::encoding(e.to_string()))?;
        self.push_input(CallArg::Pure(bytes))
    }

    /// Encodes a JSON value as a pure input of type `ty`.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::Encoding`] if the value does not fit the type.
    pub fn pure_typed(&mut self, value: &serde_json::Value, ty: &PureType) -> SuiResult<Argument> {
        self.ensure_open()?;
        let bytes = encode_pure(value, ty)?;
        self.push_input(CallArg::Pure(bytes))
    }

    /// An owned or immutable object at a specific version.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::Encoding`] if the object is already an input
    /// with a different reference.
    pub fn object(&mut self, object_ref: ObjectRef) -> SuiResult<Argument> {
        self.add_object(ObjectArg::ImmOrOwnedObject(object_ref))
    }

    /// A shared object.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::Encoding`] if the object is already an input
    /// in another form.
    pub fn shared_object(
        &mut self,
        id: ObjectId,
        initial_shared_version: SequenceNumber,
        mutable: bool,
    ) -> SuiResult<Argument> {
        self.add_object(ObjectArg::SharedObject {
            id,
            initial_shared_version,
            mutable,
        })
    }

    /// An object sent to another object, to be received in this transaction.
    ///
    /// # Errors
    ///
    /// See [`object`](Self::object).
    pub fn receiving_object(&mut self, object_ref: ObjectRef) -> SuiResult<Argument> {
        self.add_object(ObjectArg::Receiving(object_ref))
    }

    /// Adds an object fetched from a node, as shared or owned according to
    /// its owner.
    ///
    /// `mutable` only matters for shared objects.
    ///
    /// # Errors
    ///
    /// See [`object`](Self::object).
    pub fn object_from_info(&mut self, info: &ObjectInfo, mutable: bool) -> SuiResult<Argument> {
        match info.owner {
            Some(Owner::Shared {
                initial_shared_version,
            }) => self.shared_object(info.object_ref.object_id, initial_shared_version, mutable),
            _ => self.object(info.object_ref),
        }
    }

    /// The gas coin.
    pub fn gas(&self) -> Argument {
        Argument::GasCoin
    }

    fn add_object(&mut self, object: ObjectArg) -> SuiResult<Argument> {
        self.ensure_open()?;
        let id = object.object_id();
        for (position, input) in self.inputs.iter_mut().enumerate() {
            let CallArg::Object(current) = input else {
                continue;
            };
            if current.object_id() != id {
                continue;
            }
            match (current, &object) {
                (
                    ObjectArg::SharedObject {
                        initial_shared_version: have,
                        mutable,
                        ..
                    },
                    ObjectArg::SharedObject {
                        initial_shared_version: want,
                        mutable: wants_mutable,
                        ..
                    },
                ) if *have == *want => *mutable |= *wants_mutable,
                (current, object) if *current == *object => {}
                _ => {
                    return Err(SuiError::encoding(format!(
                        "object {id} is already an input with a different reference"
                    )))
                }
            }
            return input_argument(position);
        }
        self.push_input(CallArg::Object(object))
    }

    fn push_input(&mut self, input: CallArg) -> SuiResult<Argument> {
        let argument = input_argument(self.inputs.len())?;
        self.inputs.push(input);
        Ok(argument)
    }

    // === Gas and metadata ===

    /// Sets the sender.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::BuilderFinalized`] after finalization.
    pub fn set_sender(&mut self, sender: SuiAddress) -> SuiResult<&mut Self> {
        self.ensure_open()?;
        self.sender = Some(sender);
        Ok(self)
    }

    /// Replaces the gas payment coins.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::BuilderFinalized`] after finalization.
    pub fn set_gas_payment(&mut self, payment: Vec<ObjectRef>) -> SuiResult<&mut Self> {
        self.ensure_open()?;
        self.gas_payment = payment;
        Ok(self)
    }

    /// Sets the gas budget.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::BuilderFinalized`] after finalization.
    pub fn set_gas_budget(&mut self, budget: u64) -> SuiResult<&mut Self> {
        self.ensure_open()?;
        self.gas_budget = Some(budget);
        Ok(self)
    }

    /// Sets the gas price.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::BuilderFinalized`] after finalization.
    pub fn set_gas_price(&mut self, price: u64) -> SuiResult<&mut Self> {
        self.ensure_open()?;
        self.gas_price = Some(price);
        Ok(self)
    }

    /// Sets a gas sponsor. Without one the sender pays.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::BuilderFinalized`] after finalization.
    pub fn set_gas_owner(&mut self, owner: SuiAddress) -> SuiResult<&mut Self> {
        self.ensure_open()?;
        self.gas_owner = Some(owner);
        Ok(self)
    }

    /// Sets the expiration.
    ///
    /// # Errors
    ///
    /// Returns [`SuiError::BuilderFinalized`] after finalization.
    pub fn set_expiration(&mut self, expiration: TransactionExpiration) -> SuiResult<&mut Self> {
        self.ensure_open()?;
        self.expiration = expiration;
        Ok(self)
    }

    // === Finalization ===

    /// Returns the validated command list without finalizing.
    ///
    /// Useful for estimating gas before a budget is chosen.
    ///
    /// # Errors
    ///
    /// Returns the same command errors as [`finalize`](Self::finalize).
    pub fn kind(&self) -> SuiResult<TransactionKind> {
        self.validate_commands()?;
        Ok(TransactionKind::programmable(
            self.inputs.clone(),
            self.commands.clone(),
        ))
    }

    /// Validates the builder and produces the transaction.
    ///
    /// # Errors
    ///
    /// - [`SuiError::BuilderFinalized`] if called a second time
    /// - [`SuiError::IncompleteTransaction`] if the sender, gas payment,
    ///   budget or price is missing, budget or price is zero, or there are
    ///   no commands
    /// - [`SuiError::InvalidReference`] if a command uses a result that is
    ///   not produced before it, or an input that does not exist
    /// - [`SuiError::InvalidCommand`] for commands with nothing to act on
    pub fn finalize(&mut self) -> SuiResult<TransactionData> {
        self.ensure_open()?;
        let sender = self
            .sender
            .ok_or_else(|| SuiError::incomplete("sender is required"))?;
        if self.gas_payment.is_empty() {
            return Err(SuiError::incomplete("gas payment is required"));
        }
        let budget = self
            .gas_budget
            .ok_or_else(|| SuiError::incomplete("gas budget is required"))?;
        let price = self
            .gas_price
            .ok_or_else(|| SuiError::incomplete("gas price is required"))?;
        self.seal(sender, budget, price)
    }

    /// Produces a transaction for DevInspect.
    ///
    /// Only the sender and the commands are required. A missing budget or
    /// price falls back to [`DEV_INSPECT_GAS_BUDGET`] and
    /// [`DEV_INSPECT_GAS_PRICE`], and the gas payment may be empty. The
    /// builder is finalized afterwards, as with [`finalize`](Self::finalize).
    ///
    /// # Errors
    ///
    /// Same as [`finalize`](Self::finalize), minus the gas requirements.
    pub fn finalize_for_inspection(&mut self) -> SuiResult<TransactionData> {
        self.ensure_open()?;
        let sender = self
            .sender
            .ok_or_else(|| SuiError::incomplete("sender is required"))?;
        let budget = self.gas_budget.unwrap_or(DEV_INSPECT_GAS_BUDGET);
        let price = self.gas_price.unwrap_or(DEV_INSPECT_GAS_PRICE);
        self.seal(sender, budget, price)
    }

    fn seal(&mut self, sender: SuiAddress, budget: u64, price: u64) -> SuiResult<TransactionData> {
        if budget == 0 {
            return Err(SuiError::incomplete("gas budget must be positive"));
        }
        if price == 0 {
            return Err(SuiError::incomplete("gas price must be positive"));
        }
        self.validate_commands()?;

        let data = TransactionData::new(
            TransactionKind::programmable(self.inputs.clone(), self.commands.clone()),
            sender,
            GasData {
                payment: self.gas_payment.clone(),
                owner: self.gas_owner.unwrap_or(sender),
                price,
                budget,
            },
            self.expiration,
        );
        self.finalized = true;
        debug!(
            sender = %sender,
            inputs = self.inputs.len(),
            commands = self.commands.len(),
            budget,
            price,
            "transaction finalized"
        );
        Ok(data)
    }

    fn ensure_open(&self) -> SuiResult<()> {
        if self.finalized {
            Err(SuiError::BuilderFinalized)
        } else {
            Ok(())
        }
    }

    fn validate_commands(&self) -> SuiResult<()> {
        if self.commands.is_empty() {
            return Err(SuiError::incomplete("at least one command is required"));
        }
        for (position, command) in self.commands.iter().enumerate() {
            command.check_shape(position)?;
            for argument in command.arguments() {
                self.check_reference(position, argument)?;
            }
        }
        Ok(())
    }

    fn check_reference(&self, position: usize, argument: &Argument) -> SuiResult<()> {
        let invalid = |reason: String| SuiError::InvalidReference {
            command: position,
            reason,
        };
        let (index, sub_index) = match *argument {
            Argument::GasCoin => return Ok(()),
            Argument::Input(input) if usize::from(input) < self.inputs.len() => return Ok(()),
            Argument::Input(input) => {
                return Err(invalid(format!(
                    "input {input} does not exist, the transaction has {}",
                    self.inputs.len()
                )))
            }
            Argument::Result(index) => (index, None),
            Argument::NestedResult(index, sub) => (index, Some(sub)),
        };
        let target = usize::from(index);

        if target >= position {
            return Err(invalid(format!(
                "result of command {target} is not available before command {position}"
            )));
        }

        let producer = &self.commands[target];
        match (sub_index, producer.result_arity()) {
            (Some(sub), Some(arity)) if usize::from(sub) >= arity => Err(invalid(format!(
                "{} at {target} yields {arity} result(s), sub-index {sub} is out of range",
                producer.name()
            ))),
            (None, Some(0)) => Err(invalid(format!(
                "{} at {target} yields no result",
                producer.name()
            ))),
            _ => Ok(()),
        }
    }
}

fn input_argument(position: usize) -> SuiResult<Argument> {
    u16::try_from(position)
        .map(Argument::Input)
        .map_err(|_| SuiError::encoding(format!("input table is full at {position} entries")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ObjectDigest;

    fn gas_coin() -> ObjectRef {
        ObjectRef::new(
            ObjectId::from_hex("0x5a5").unwrap(),
            11,
            ObjectDigest::new([2; 32]),
        )
    }

    fn other_coin() -> ObjectRef {
        ObjectRef::new(
            ObjectId::from_hex("0xc01").unwrap(),
            3,
            ObjectDigest::new([8; 32]),
        )
    }

    fn ready_builder() -> TransactionBuilder {
        let mut builder = TransactionBuilder::new();
        builder
            .set_sender(SuiAddress::ONE)
            .unwrap()
            .set_gas_payment(vec![gas_coin()])
            .unwrap()
            .set_gas_budget(1_000_000)
            .unwrap()
            .set_gas_price(750)
            .unwrap();
        builder
    }

    fn split_and_transfer(builder: &mut TransactionBuilder) {
        let amount = builder.pure(&100u64).unwrap();
        let split = builder.split_coins(builder.gas(), [amount]).unwrap();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder
            .transfer_objects([split.nested(0)], recipient)
            .unwrap();
    }

    #[test]
    fn test_builder_missing_fields() {
        let mut builder = TransactionBuilder::new();
        split_and_transfer(&mut builder);
        let err = builder.finalize().unwrap_err();
        assert!(matches!(err, SuiError::IncompleteTransaction(ref m) if m.contains("sender")));
        assert!(!builder.is_finalized());

        builder.set_sender(SuiAddress::ONE).unwrap();
        let err = builder.finalize().unwrap_err();
        assert!(matches!(err, SuiError::IncompleteTransaction(ref m) if m.contains("payment")));
    }

    #[test]
    fn test_zero_budget_and_price_rejected() {
        let mut builder = ready_builder();
        split_and_transfer(&mut builder);
        builder.set_gas_budget(0).unwrap();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::IncompleteTransaction(_))
        ));

        builder.set_gas_budget(10).unwrap().set_gas_price(0).unwrap();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::IncompleteTransaction(_))
        ));
    }

    #[test]
    fn test_no_commands() {
        let mut builder = ready_builder();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::IncompleteTransaction(_))
        ));
    }

    #[test]
    fn test_last_setter_wins() {
        let mut builder = ready_builder();
        split_and_transfer(&mut builder);
        builder
            .set_gas_budget(5)
            .unwrap()
            .set_gas_budget(9)
            .unwrap()
            .set_sender(SuiAddress::TWO)
            .unwrap();
        let data = builder.finalize().unwrap();
        assert_eq!(data.gas_data().budget, 9);
        assert_eq!(data.sender(), SuiAddress::TWO);
        assert_eq!(data.gas_data().owner, SuiAddress::TWO);
    }

    #[test]
    fn test_sponsor_owner() {
        let mut builder = ready_builder();
        split_and_transfer(&mut builder);
        let sponsor = SuiAddress::from_hex("0x5905").unwrap();
        builder.set_gas_owner(sponsor).unwrap();
        let data = builder.finalize().unwrap();
        assert_eq!(data.gas_data().owner, sponsor);
        assert_eq!(data.sender(), SuiAddress::ONE);
    }

    #[test]
    fn test_forward_reference_rejected() {
        let mut builder = ready_builder();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder
            .transfer_objects([Argument::result(1)], recipient)
            .unwrap();
        let amount = builder.pure(&1u64).unwrap();
        builder.split_coins(builder.gas(), [amount]).unwrap();

        let err = builder.finalize().unwrap_err();
        assert!(matches!(err, SuiError::InvalidReference { command: 0, .. }));
        assert!(!builder.is_finalized());
    }

    #[test]
    fn test_self_reference_rejected() {
        let mut builder = ready_builder();
        builder
            .merge_coins(builder.gas(), [Argument::result(0)])
            .unwrap();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::InvalidReference { command: 0, .. })
        ));
    }

    #[test]
    fn test_sub_index_out_of_range() {
        let mut builder = ready_builder();
        let amount = builder.pure(&1u64).unwrap();
        let split = builder.split_coins(builder.gas(), [amount]).unwrap();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder
            .transfer_objects([split.nested(1)], recipient)
            .unwrap();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::InvalidReference { command: 1, .. })
        ));
    }

    #[test]
    fn test_result_of_command_without_outputs() {
        let mut builder = ready_builder();
        let coin = builder.object(other_coin()).unwrap();
        let merge = builder.merge_coins(builder.gas(), [coin]).unwrap();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder
            .transfer_objects([merge.result()], recipient)
            .unwrap();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::InvalidReference { command: 1, .. })
        ));
    }

    #[test]
    fn test_move_call_results_unchecked() {
        let mut builder = ready_builder();
        let call = builder
            .move_call(MoveCall::new("0x2::coin::zero").unwrap().type_arg(TypeTag::sui()))
            .unwrap();
        let recipient = builder.pure(&SuiAddress::TWO).unwrap();
        builder
            .transfer_objects([call.nested(3)], recipient)
            .unwrap();
        assert!(builder.finalize().is_ok());
    }

    #[test]
    fn test_empty_command_rejected() {
        let mut builder = ready_builder();
        builder.split_coins(builder.gas(), Vec::<Argument>::new()).unwrap();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::InvalidCommand { command: 0, .. })
        ));
    }

    #[test]
    fn test_finalize_once() {
        let mut builder = ready_builder();
        split_and_transfer(&mut builder);
        let data = builder.finalize().unwrap();
        assert!(builder.is_finalized());

        assert!(matches!(builder.finalize(), Err(SuiError::BuilderFinalized)));
        assert!(matches!(
            builder.set_gas_budget(1),
            Err(SuiError::BuilderFinalized)
        ));
        assert!(matches!(
            builder.split_coins(Argument::GasCoin, Vec::<Argument>::new()),
            Err(SuiError::BuilderFinalized)
        ));
        assert!(matches!(
            builder.finalize_for_inspection(),
            Err(SuiError::BuilderFinalized)
        ));
        assert_eq!(data.gas_data().budget, 1_000_000);
    }

    #[test]
    fn test_finalized_bytes_roundtrip() {
        let mut builder = ready_builder();
        split_and_transfer(&mut builder);
        builder
            .set_expiration(TransactionExpiration::Epoch(40))
            .unwrap();
        let data = builder.finalize().unwrap();
        let bytes = data.to_bcs().unwrap();
        let decoded = TransactionData::from_bcs(&bytes).unwrap();
        assert_eq!(decoded, data);
        assert_eq!(decoded.to_bcs().unwrap(), bytes);
    }

    #[test]
    fn test_finalize_for_inspection_defaults() {
        let mut builder = TransactionBuilder::new();
        split_and_transfer(&mut builder);
        builder.set_sender(SuiAddress::ONE).unwrap();
        let data = builder.finalize_for_inspection().unwrap();
        assert_eq!(data.gas_data().budget, DEV_INSPECT_GAS_BUDGET);
        assert_eq!(data.gas_data().price, DEV_INSPECT_GAS_PRICE);
        assert!(data.gas_data().payment.is_empty());
        assert!(builder.is_finalized());
    }

    #[test]
    fn test_finalize_for_inspection_still_needs_sender() {
        let mut builder = TransactionBuilder::new();
        split_and_transfer(&mut builder);
        assert!(matches!(
            builder.finalize_for_inspection(),
            Err(SuiError::IncompleteTransaction(_))
        ));
    }

    #[test]
    fn test_kind_does_not_finalize() {
        let mut builder = TransactionBuilder::new();
        split_and_transfer(&mut builder);
        let kind = builder.kind().unwrap();
        assert_eq!(kind.commands().len(), 2);
        assert_eq!(kind.inputs().len(), 2);
        assert!(!builder.is_finalized());
        builder.make_move_vec(Some(TypeTag::U64), Vec::<Argument>::new()).unwrap();
        assert_eq!(builder.command_count(), 3);
    }

    #[test]
    fn test_inputs_are_numbered_in_order() {
        let mut builder = ready_builder();
        assert_eq!(builder.pure(&1u64).unwrap(), Argument::Input(0));
        assert_eq!(builder.object(other_coin()).unwrap(), Argument::Input(1));
        assert_eq!(builder.pure(&1u64).unwrap(), Argument::Input(2));
        assert_eq!(builder.input_count(), 3);
    }

    #[test]
    fn test_objects_are_deduplicated() {
        let mut builder = ready_builder();
        let first = builder.object(other_coin()).unwrap();
        assert_eq!(builder.object(other_coin()).unwrap(), first);
        assert_eq!(builder.input_count(), 1);

        let mut stale = other_coin();
        stale.version = 2;
        assert!(matches!(builder.object(stale), Err(SuiError::Encoding(_))));
        assert!(matches!(
            builder.shared_object(stale.object_id, 1, true),
            Err(SuiError::Encoding(_))
        ));
    }

    #[test]
    fn test_shared_object_mutability_is_merged() {
        let clock = ObjectId::from_hex("0x6").unwrap();
        let mut builder = ready_builder();
        let read = builder.shared_object(clock, 1, false).unwrap();
        let write = builder.shared_object(clock, 1, true).unwrap();
        assert_eq!(read, write);

        let again = builder.shared_object(clock, 1, false).unwrap();
        assert_eq!(again, read);
        builder
            .move_call(MoveCall::new("0x2::clock::timestamp_ms").unwrap().arg(read))
            .unwrap();
        let data = builder.finalize().unwrap();
        assert_eq!(
            data.kind().inputs(),
            &[CallArg::Object(ObjectArg::SharedObject {
                id: clock,
                initial_shared_version: 1,
                mutable: true,
            })]
        );
    }

    #[test]
    fn test_object_from_info_picks_shared_form() {
        let mut builder = ready_builder();
        let shared = ObjectInfo {
            object_ref: ObjectRef::new(ObjectId::from_hex("0x6").unwrap(), 90, ObjectDigest::new([3; 32])),
            type_: Some("0x2::clock::Clock".to_string()),
            owner: Some(Owner::Shared {
                initial_shared_version: 1,
            }),
        };
        let owned = ObjectInfo {
            object_ref: other_coin(),
            type_: None,
            owner: Some(Owner::AddressOwner(SuiAddress::ONE)),
        };
        builder.object_from_info(&shared, false).unwrap();
        builder.object_from_info(&owned, true).unwrap();
        assert!(matches!(
            builder.inputs[0],
            CallArg::Object(ObjectArg::SharedObject {
                initial_shared_version: 1,
                mutable: false,
                ..
            })
        ));
        assert_eq!(
            builder.inputs[1],
            CallArg::Object(ObjectArg::ImmOrOwnedObject(other_coin()))
        );
    }

    #[test]
    fn test_missing_input_rejected() {
        let mut builder = ready_builder();
        builder
            .transfer_objects([builder.gas()], Argument::Input(0))
            .unwrap();
        assert!(matches!(
            builder.finalize(),
            Err(SuiError::InvalidReference { command: 0, .. })
        ));
    }

    #[test]
    fn test_inputs_closed_after_finalize() {
        let mut builder = ready_builder();
        split_and_transfer(&mut builder);
        builder.finalize().unwrap();
        assert!(matches!(builder.pure(&1u8), Err(SuiError::BuilderFinalized)));
        assert!(matches!(
            builder.object(other_coin()),
            Err(SuiError::BuilderFinalized)
        ));
    }
}
