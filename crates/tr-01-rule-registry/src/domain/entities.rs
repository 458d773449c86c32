//! Registry entities.

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// A whitelisted rule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRecord {
    /// Unique, non-empty rule name.
    pub name: String,
    /// Unique, non-null rule contract address.
    pub address: Address,
    /// Opaque ABI description of the rule contract.
    pub abi: String,
}

/// Slot of a rule in the backing list.
///
/// Slot 0 is valid, so presence is carried by `exists` and never inferred
/// from the index value.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct RuleIndex {
    /// Position in the rule list.
    pub index: usize,
    /// Whether the slot is occupied.
    pub exists: bool,
}

impl RuleIndex {
    /// An occupied slot.
    #[must_use]
    pub const fn at(index: usize) -> Self {
        Self {
            index,
            exists: true,
        }
    }
}
