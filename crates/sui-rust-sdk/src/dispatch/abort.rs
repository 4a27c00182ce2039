//! Interpretation of on-chain abort messages.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Broad classes of execution failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AbortCategory {
    /// A Move `abort` with a code.
    MoveAbort,
    /// The budget did not cover execution.
    InsufficientGas,
    /// A coin was split or paid beyond its balance.
    InsufficientCoinBalance,
    /// An argument did not fit the command it was passed to.
    CommandArgumentError,
    /// The called function does not exist or is not callable.
    FunctionNotFound,
    /// Type arguments were wrong in number or kind.
    TypeArgumentError,
    /// Anything else.
    Other,
}

impl AbortCategory {
    fn from_message(message: &str) -> Self {
        let head = message.trim_start();
        if head.starts_with("MoveAbort") {
            Self::MoveAbort
        } else if head.starts_with("InsufficientGas") {
            Self::InsufficientGas
        } else if head.starts_with("InsufficientCoinBalance") {
            Self::InsufficientCoinBalance
        } else if head.starts_with("CommandArgumentError") {
            Self::CommandArgumentError
        } else if head.starts_with("FunctionNotFound")
            || head.starts_with("NonEntryFunctionInvoked")
        {
            Self::FunctionNotFound
        } else if head.starts_with("TypeArgumentError") || head.starts_with("TypeArityMismatch") {
            Self::TypeArgumentError
        } else {
            Self::Other
        }
    }
}

/// Why a transaction that ran did not succeed.
///
/// Parsed from the node's status message, e.g.
/// `MoveAbort(MoveLocation { module: ModuleId { address: 0x2, name: Identifier("coin") }, function: 3, instruction: 9, function_name: Some("split") }, 0) in command 1`.
/// Fields that cannot be recovered are `None`; `message` always keeps the
/// original text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbortReason {
    /// Failure class.
    pub category: AbortCategory,
    /// The node's message, unmodified.
    pub message: String,
    /// Move abort code, for [`AbortCategory::MoveAbort`].
    pub abort_code: Option<u64>,
    /// `address::module::function` where the abort happened.
    pub location: Option<String>,
    /// Index of the failing command.
    pub command: Option<usize>,
}

impl AbortReason {
    /// Parses a failure message.
    pub fn parse(message: &str) -> Self {
        let category = AbortCategory::from_message(message);
        let abort_code = match category {
            AbortCategory::MoveAbort => parse_abort_code(message),
            _ => None,
        };
        Self {
            category,
            message: message.to_string(),
            abort_code,
            location: parse_location(message),
            command: parse_command_index(message),
        }
    }

    /// Short text for end users.
    pub fn user_message(&self) -> String {
        match self.category {
            AbortCategory::MoveAbort => match (self.abort_code, &self.location) {
                (Some(code), Some(location)) => format!("Aborted in {location} with code {code}"),
                (Some(code), None) => format!("Aborted with code {code}"),
                _ => "Aborted by a Move function".to_string(),
            },
            AbortCategory::InsufficientGas => {
                "Transaction ran out of gas; try a larger budget".to_string()
            }
            AbortCategory::InsufficientCoinBalance => "Coin balance is too low".to_string(),
            AbortCategory::CommandArgumentError => {
                "An argument does not match what the command expects".to_string()
            }
            AbortCategory::FunctionNotFound => "Function not found or not callable".to_string(),
            AbortCategory::TypeArgumentError => "Type arguments are invalid".to_string(),
            AbortCategory::Other => self.message.clone(),
        }
    }

    /// Whether a larger budget could help.
    pub fn is_out_of_gas(&self) -> bool {
        self.category == AbortCategory::InsufficientGas
    }
}

impl fmt::Display for AbortReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.message)
    }
}

/// `... in command 3` at the end of the message.
fn parse_command_index(message: &str) -> Option<usize> {
    let (_, tail) = message.rsplit_once(" in command ")?;
    tail.trim().parse().ok()
}

/// The number after the location struct: `MoveAbort(MoveLocation {..}, 7)`.
fn parse_abort_code(message: &str) -> Option<u64> {
    let (_, tail) = message.rsplit_once("}, ")?;
    let code = tail.split(')').next()?.trim();
    code.parse().ok()
}

fn parse_location(message: &str) -> Option<String> {
    let address = field(message, "address: ", &[',', ' ', '}'])?;
    let module = field(message, "name: Identifier(\"", &['"'])?;
    let address = if address.starts_with("0x") {
        address.to_string()
    } else {
        format!("0x{address}")
    };
    match field(message, "function_name: Some(\"", &['"']) {
        Some(function) => Some(format!("{address}::{module}::{function}")),
        None => Some(format!("{address}::{module}")),
    }
}

fn field<'a>(message: &'a str, prefix: &str, terminators: &[char]) -> Option<&'a str> {
    let start = message.find(prefix)? + prefix.len();
    let rest = &message[start..];
    let end = rest.find(terminators).unwrap_or(rest.len());
    (end > 0).then(|| &rest[..end])
}
