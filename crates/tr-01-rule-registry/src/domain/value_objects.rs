//! Registry value objects.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use shared_types::Address;

/// One-shot transfer permissions, keyed by the account funds move out of.
///
/// An account sets its own flag right before it triggers a transfer batch.
#[derive(Debug, Default, Clone)]
pub struct AllowedTransfers {
    flags: HashMap<Address, bool>,
}

impl AllowedTransfers {
    /// Sets `account`'s flag.
    pub fn allow(&mut self, account: Address) {
        self.flags.insert(account, true);
    }

    /// Clears `account`'s flag.
    pub fn disallow(&mut self, account: Address) {
        self.flags.insert(account, false);
    }

    /// Whether `account`'s flag is set.
    #[must_use]
    pub fn is_allowed(&self, account: &Address) -> bool {
        self.flags.get(account).copied().unwrap_or(false)
    }
}

/// Registry deployment configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryConfig {
    /// Address the registry is deployed at. It is the `spender` of every
    /// `transferFrom` the registry performs.
    pub address: Address,
}

impl RegistryConfig {
    /// Config for a registry at `address`.
    #[must_use]
    pub const fn at(address: Address) -> Self {
        Self { address }
    }
}
