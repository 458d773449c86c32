//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the registry depends on:
//! - the token it moves funds on ([`TokenLedger`], re-exported from
//!   `shared-types`)
//! - the organization deciding who is a worker
//! - the global constraints, resolved by address

use std::sync::Arc;

use shared_types::{Address, U256};

pub use shared_types::{LedgerCheckpoint, TokenLedger};

/// Access control deciding who may administer the registry.
pub trait WorkerOrganization: Send + Sync {
    /// Whether `account` currently holds the worker role.
    fn is_worker(&self, account: &Address) -> bool;
}

/// A pluggable predicate over a proposed transfer batch.
///
/// `tos` and `amounts` always have equal length when a constraint is
/// consulted.
pub trait GlobalConstraint: Send + Sync {
    /// Returns `true` to accept the batch.
    fn check(&self, from: Address, tos: &[Address], amounts: &[U256]) -> bool;
}

/// Looks up the constraint deployed at an address.
pub trait ConstraintDirectory: Send + Sync {
    /// The constraint at `address`, if any.
    fn resolve(&self, address: &Address) -> Option<Arc<dyn GlobalConstraint>>;
}
