//! The rule whitelist.

use std::collections::HashMap;

use shared_types::{keccak256, Address, Hash};

use super::entities::{RuleIndex, RuleRecord};
use crate::errors::RegistryError;

/// Append-only list of rules indexed by name hash and by address.
#[derive(Debug, Default)]
pub struct RuleBook {
    rules: Vec<RuleRecord>,
    by_name_hash: HashMap<Hash, RuleIndex>,
    by_address: HashMap<Address, RuleIndex>,
}

impl RuleBook {
    /// Validates a registration without mutating anything.
    ///
    /// # Errors
    ///
    /// Empty name or ABI, null address, or a name/address already taken.
    pub fn check_registration(
        &self,
        name: &str,
        address: Address,
        abi: &str,
    ) -> Result<(), RegistryError> {
        if name.is_empty() {
            return Err(RegistryError::EmptyRuleName);
        }
        if address.is_zero() {
            return Err(RegistryError::NullRuleAddress);
        }
        if abi.is_empty() {
            return Err(RegistryError::EmptyRuleAbi);
        }
        if self.name_index(name).exists {
            return Err(RegistryError::DuplicateRuleName);
        }
        if self.address_index(&address).exists {
            return Err(RegistryError::DuplicateRuleAddress);
        }
        Ok(())
    }

    /// Appends a rule and returns its slot.
    ///
    /// # Errors
    ///
    /// See [`RuleBook::check_registration`].
    pub fn register(
        &mut self,
        name: &str,
        address: Address,
        abi: &str,
    ) -> Result<usize, RegistryError> {
        self.check_registration(name, address, abi)?;

        let index = self.rules.len();
        self.rules.push(RuleRecord {
            name: name.to_string(),
            address,
            abi: abi.to_string(),
        });
        self.by_name_hash
            .insert(keccak256(name.as_bytes()), RuleIndex::at(index));
        self.by_address.insert(address, RuleIndex::at(index));
        Ok(index)
    }

    /// Index entry for `name` (absent entries have `exists == false`).
    #[must_use]
    pub fn name_index(&self, name: &str) -> RuleIndex {
        self.by_name_hash
            .get(&keccak256(name.as_bytes()))
            .copied()
            .unwrap_or_default()
    }

    /// Index entry for `address`.
    #[must_use]
    pub fn address_index(&self, address: &Address) -> RuleIndex {
        self.by_address.get(address).copied().unwrap_or_default()
    }

    /// Whether `address` is a registered rule.
    #[must_use]
    pub fn is_rule(&self, address: &Address) -> bool {
        self.address_index(address).exists
    }

    /// Rule at slot `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&RuleRecord> {
        self.rules.get(index)
    }

    /// Rule registered under `name`.
    #[must_use]
    pub fn by_name(&self, name: &str) -> Option<&RuleRecord> {
        let entry = self.name_index(name);
        entry.exists.then(|| self.rules.get(entry.index)).flatten()
    }

    /// Rule registered at `address`.
    #[must_use]
    pub fn by_address(&self, address: &Address) -> Option<&RuleRecord> {
        let entry = self.address_index(address);
        entry.exists.then(|| self.rules.get(entry.index)).flatten()
    }

    /// Number of registered rules.
    #[must_use]
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// True when no rule is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// All rules in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &RuleRecord> {
        self.rules.iter()
    }

    pub(crate) fn name_entries(&self) -> impl Iterator<Item = (&Hash, &RuleIndex)> {
        self.by_name_hash.iter()
    }

    pub(crate) fn address_entries(&self) -> impl Iterator<Item = (&Address, &RuleIndex)> {
        self.by_address.iter()
    }
}
