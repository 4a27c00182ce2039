//! Command arguments.

use serde::{Deserialize, Serialize};
use std::fmt;

/// An input to a command.
///
/// Pure values and objects are referenced by their position in the input
/// table. `Result` and `NestedResult` refer to outputs of an earlier command
/// in the same transaction; the nested form picks one output when a command
/// produces several (for example one coin per amount of a split).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Argument {
    /// The coin paying for gas.
    GasCoin,
    /// Entry of the input table.
    Input(u16),
    /// The whole output of an earlier command.
    Result(u16),
    /// One output of an earlier command.
    NestedResult(u16, u16),
}

impl Argument {
    /// The whole output of command `index`.
    pub fn result(index: u16) -> Self {
        Argument::Result(index)
    }

    /// Output `sub_index` of command `index`.
    pub fn nested_result(index: u16, sub_index: u16) -> Self {
        Argument::NestedResult(index, sub_index)
    }

    /// Returns the index of the command this argument depends on, if any.
    pub fn referenced_command(&self) -> Option<u16> {
        match self {
            Argument::Result(index) | Argument::NestedResult(index, _) => Some(*index),
            Argument::GasCoin | Argument::Input(_) => None,
        }
    }
}

impl fmt::Display for Argument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Argument::GasCoin => f.write_str("GasCoin"),
            Argument::Input(index) => write!(f, "Input({index})"),
            Argument::Result(index) => write!(f, "Result({index})"),
            Argument::NestedResult(index, sub) => write!(f, "Result({index}, {sub})"),
        }
    }
}
