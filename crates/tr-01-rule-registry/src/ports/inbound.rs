//! # Driving Ports (API - Inbound)
//!
//! Every state-changing operation takes the immediate `caller` explicitly.

use shared_types::{Address, U256};

use crate::domain::RuleRecord;
use crate::errors::RegistryError;

/// Primary API of the rule registry.
pub trait RuleRegistryApi: Send + Sync {
    /// Whitelists a rule. Worker only. Returns the rule's slot.
    ///
    /// # Errors
    ///
    /// `OnlyWorker`, or a precondition on name/address/abi.
    fn register_rule(
        &self,
        caller: Address,
        name: &str,
        address: Address,
        abi: &str,
    ) -> Result<usize, RegistryError>;

    /// Sets the caller's one-shot transfer flag.
    fn allow_transfers(&self, caller: Address);

    /// Clears the caller's one-shot transfer flag.
    fn disallow_transfers(&self, caller: Address);

    /// Moves `amounts[i]` from `from` to `tos[i]` after every global
    /// constraint accepted the batch. Registered rules only.
    ///
    /// All-or-nothing; `from`'s flag is cleared only on success.
    ///
    /// # Errors
    ///
    /// `OnlyRule`, `TransfersNotAllowed`, `LengthMismatch`,
    /// `ConstraintsNotFulfilled`, or a token failure.
    fn execute_transfers(
        &self,
        caller: Address,
        from: Address,
        tos: &[Address],
        amounts: &[U256],
    ) -> Result<(), RegistryError>;

    /// Moves `amount` from the caller to `to`, without constraint checks.
    ///
    /// # Errors
    ///
    /// `TransfersNotAllowed` or a token failure.
    fn process_transfer(
        &self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), RegistryError>;

    /// Batch form of [`RuleRegistryApi::process_transfer`].
    ///
    /// # Errors
    ///
    /// `TransfersNotAllowed`, `LengthMismatch` or a token failure.
    fn process_transfers(
        &self,
        caller: Address,
        tos: &[Address],
        amounts: &[U256],
    ) -> Result<(), RegistryError>;

    /// Appends a global constraint. Worker only.
    ///
    /// # Errors
    ///
    /// `OnlyWorker`, `NullConstraint` or `DuplicateConstraint`.
    fn add_global_constraint(
        &self,
        caller: Address,
        constraint: Address,
    ) -> Result<(), RegistryError>;

    /// Removes a global constraint (swap-with-last). Worker only.
    ///
    /// # Errors
    ///
    /// `OnlyWorker` or `MissingConstraint`.
    fn remove_global_constraint(
        &self,
        caller: Address,
        constraint: Address,
    ) -> Result<(), RegistryError>;

    /// Evaluates every global constraint in order, stopping at the first
    /// rejection.
    ///
    /// # Errors
    ///
    /// `LengthMismatch`, or `ConstraintNotCallable` when a constraint
    /// address resolves to nothing.
    fn check_global_constraints(
        &self,
        from: Address,
        tos: &[Address],
        amounts: &[U256],
    ) -> Result<bool, RegistryError>;

    // === Queries ===

    /// Number of registered rules.
    fn rule_count(&self) -> usize;

    /// Rule at slot `index`.
    fn rule(&self, index: usize) -> Option<RuleRecord>;

    /// Rule registered under `name`.
    fn rule_by_name(&self, name: &str) -> Option<RuleRecord>;

    /// Rule registered at `address`.
    fn rule_by_address(&self, address: Address) -> Option<RuleRecord>;

    /// Whether `address` is a registered rule.
    fn is_rule(&self, address: Address) -> bool;

    /// Number of global constraints.
    fn global_constraint_count(&self) -> usize;

    /// Global constraints in evaluation order.
    fn global_constraints(&self) -> Vec<Address>;

    /// Whether `account`'s one-shot flag is currently set.
    fn are_transfers_allowed(&self, account: Address) -> bool;
}
