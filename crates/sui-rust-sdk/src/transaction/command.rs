//! The closed set of transaction commands.
//!
//! Commands are plain data. Nothing is checked against the on-chain target
//! of a move call; wrong arity or types come back from the node as an abort.

use crate::error::{SuiError, SuiResult};
use crate::transaction::argument::Argument;
use crate::types::{check_identifier, ObjectId, TypeTag};
use serde::{Deserialize, Serialize};
use std::fmt;

/// A call to a Move function.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MoveCall {
    /// Package containing the module.
    pub package: ObjectId,
    /// Module name.
    pub module: String,
    /// Function name.
    pub function: String,
    /// Type arguments.
    pub type_arguments: Vec<TypeTag>,
    /// Value arguments.
    pub arguments: Vec<Argument>,
}

impl MoveCall {
    /// Creates a call from a `package::module::function` target.
    ///
    /// # Example
    ///
    /// ```rust
    /// use sui_rust_sdk::transaction::{Argument, MoveCall};
    /// use sui_rust_sdk::types::TypeTag;
    ///
    /// let call = MoveCall::new("0x2::coin::value")
    ///     .unwrap()
    ///     .type_arg(TypeTag::sui())
    ///     .arg(Argument::GasCoin);
    /// assert_eq!(call.module, "coin");
    /// ```
    pub fn new(target: &str) -> SuiResult<Self> {
        let mut parts = target.splitn(3, "::");
        let (package, module, function) = match (parts.next(), parts.next(), parts.next()) {
            (Some(p), Some(m), Some(f)) => (p, m, f),
            _ => {
                return Err(SuiError::encoding(format!(
                    "move call target '{target}' is not package::module::function"
                )))
            }
        };

        let package = ObjectId::from_hex(package)
            .map_err(|e| SuiError::encoding(format!("move call target '{target}': {e}")))?;
        check_identifier(module)?;
        check_identifier(function)?;

        Ok(Self {
            package,
            module: module.to_string(),
            function: function.to_string(),
            type_arguments: Vec::new(),
            arguments: Vec::new(),
        })
    }

    /// Adds a type argument.
    #[must_use]
    pub fn type_arg(mut self, type_argument: TypeTag) -> Self {
        self.type_arguments.push(type_argument);
        self
    }

    /// Adds a value argument.
    #[must_use]
    pub fn arg(mut self, argument: Argument) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Adds several value arguments.
    #[must_use]
    pub fn args(mut self, arguments: impl IntoIterator<Item = Argument>) -> Self {
        self.arguments.extend(arguments);
        self
    }

    /// Returns `package::module::function` with the short package form.
    pub fn target(&self) -> String {
        format!(
            "{}::{}::{}",
            self.package.to_address().to_short_string(),
            self.module,
            self.function
        )
    }
}

/// One step of a programmable transaction.
///
/// Variant order is the wire order.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Command {
    /// Call a Move function.
    MoveCall(Box<MoveCall>),
    /// Send objects to a recipient.
    TransferObjects {
        /// Objects to send.
        objects: Vec<Argument>,
        /// Recipient address as a pure input or a result.
        recipient: Argument,
    },
    /// Split `amounts.len()` new coins off `coin`.
    SplitCoins {
        /// Coin to split.
        coin: Argument,
        /// One amount per produced coin.
        amounts: Vec<Argument>,
    },
    /// Merge `sources` into `destination`.
    MergeCoins {
        /// Coin receiving the balance.
        destination: Argument,
        /// Coins consumed.
        sources: Vec<Argument>,
    },
    /// Publish a new package; yields its upgrade capability.
    Publish {
        /// Compiled modules.
        modules: Vec<Vec<u8>>,
        /// Packages the modules link against.
        dependencies: Vec<ObjectId>,
    },
    /// Build a `vector<T>` out of `elements`.
    MakeMoveVec {
        /// Element type; may be omitted when elements are objects.
        element_type: Option<TypeTag>,
        /// Vector elements.
        elements: Vec<Argument>,
    },
    /// Upgrade a package; yields an upgrade receipt.
    Upgrade {
        /// Compiled modules.
        modules: Vec<Vec<u8>>,
        /// Packages the modules link against.
        dependencies: Vec<ObjectId>,
        /// Package being upgraded.
        package: ObjectId,
        /// Upgrade ticket authorizing the upgrade.
        ticket: Argument,
    },
}

impl Command {
    /// Returns a short name for logs and errors.
    pub fn name(&self) -> &'static str {
        match self {
            Command::MoveCall(_) => "move_call",
            Command::SplitCoins { .. } => "split_coins",
            Command::MergeCoins { .. } => "merge_coins",
            Command::TransferObjects { .. } => "transfer_objects",
            Command::Publish { .. } => "publish",
            Command::Upgrade { .. } => "upgrade",
            Command::MakeMoveVec { .. } => "make_move_vec",
        }
    }

    /// Returns every argument of the command, in wire order.
    pub fn arguments(&self) -> Vec<&Argument> {
        match self {
            Command::MoveCall(call) => call.arguments.iter().collect(),
            Command::SplitCoins { coin, amounts } => {
                std::iter::once(coin).chain(amounts.iter()).collect()
            }
            Command::MergeCoins {
                destination,
                sources,
            } => std::iter::once(destination).chain(sources.iter()).collect(),
            Command::TransferObjects { objects, recipient } => {
                objects.iter().chain(std::iter::once(recipient)).collect()
            }
            Command::Publish { .. } => Vec::new(),
            Command::Upgrade { ticket, .. } => vec![ticket],
            Command::MakeMoveVec { elements, .. } => elements.iter().collect(),
        }
    }

    /// Number of outputs this command produces, when known client-side.
    ///
    /// Move calls return whatever the target function returns, which the
    /// client does not know, so they report `None`.
    pub fn result_arity(&self) -> Option<usize> {
        match self {
            Command::MoveCall(_) => None,
            Command::SplitCoins { amounts, .. } => Some(amounts.len()),
            Command::MergeCoins { .. } | Command::TransferObjects { .. } => Some(0),
            Command::Publish { .. } | Command::Upgrade { .. } | Command::MakeMoveVec { .. } => {
                Some(1)
            }
        }
    }

    /// Rejects commands that cannot do anything.
    pub(crate) fn check_shape(&self, position: usize) -> SuiResult<()> {
        let reason = match self {
            Command::SplitCoins { amounts, .. } if amounts.is_empty() => {
                "split_coins needs at least one amount"
            }
            Command::MergeCoins { sources, .. } if sources.is_empty() => {
                "merge_coins needs at least one source coin"
            }
            Command::TransferObjects { objects, .. } if objects.is_empty() => {
                "transfer_objects needs at least one object"
            }
            Command::Publish { modules, .. } | Command::Upgrade { modules, .. }
                if modules.is_empty() =>
            {
                "no modules to publish"
            }
            Command::MakeMoveVec {
                element_type: None,
                elements,
            } if elements.is_empty() => "an empty vector needs an element type",
            _ => return Ok(()),
        };
        Err(SuiError::InvalidCommand {
            command: position,
            reason: reason.to_string(),
        })
    }
}

impl From<MoveCall> for Command {
    fn from(call: MoveCall) -> Self {
        Command::MoveCall(Box::new(call))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::MoveCall(call) => write!(f, "move_call({})", call.target()),
            other => f.write_str(other.name()),
        }
    }
}
