//! Global constraint implementations and their directory.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{Address, U256};

use crate::ports::outbound::{ConstraintDirectory, GlobalConstraint};

/// Maps constraint addresses to deployed constraints.
#[derive(Default)]
pub struct InMemoryConstraintDirectory {
    deployed: RwLock<HashMap<Address, Arc<dyn GlobalConstraint>>>,
}

impl InMemoryConstraintDirectory {
    /// Empty directory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys `constraint` at `address`, replacing whatever was there.
    pub fn deploy(&self, address: Address, constraint: Arc<dyn GlobalConstraint>) {
        self.deployed.write().insert(address, constraint);
    }

    /// Removes the constraint at `address`.
    pub fn undeploy(&self, address: &Address) {
        self.deployed.write().remove(address);
    }
}

impl ConstraintDirectory for InMemoryConstraintDirectory {
    fn resolve(&self, address: &Address) -> Option<Arc<dyn GlobalConstraint>> {
        self.deployed.read().get(address).cloned()
    }
}

/// Accepts or rejects every batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixedConstraint {
    accept: bool,
}

impl FixedConstraint {
    /// Always accepts.
    #[must_use]
    pub const fn accept() -> Self {
        Self { accept: true }
    }

    /// Always rejects.
    #[must_use]
    pub const fn reject() -> Self {
        Self { accept: false }
    }
}

impl GlobalConstraint for FixedConstraint {
    fn check(&self, _from: Address, _tos: &[Address], _amounts: &[U256]) -> bool {
        self.accept
    }
}

/// Rejects a batch whose total exceeds `cap`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MaxAmountConstraint {
    cap: U256,
}

impl MaxAmountConstraint {
    /// Constraint capping each batch at `cap`.
    #[must_use]
    pub const fn new(cap: U256) -> Self {
        Self { cap }
    }
}

impl GlobalConstraint for MaxAmountConstraint {
    fn check(&self, _from: Address, _tos: &[Address], amounts: &[U256]) -> bool {
        amounts
            .iter()
            .try_fold(U256::zero(), |total, amount| total.checked_add(*amount))
            .is_some_and(|total| total <= self.cap)
    }
}
