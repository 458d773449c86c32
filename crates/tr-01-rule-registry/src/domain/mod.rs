//! # Domain Layer for the Rule Registry
//!
//! Pure state with no I/O and no locks. The service wraps it in a
//! `RwLock` and drives the outbound ports.
//!
//! ## Contents
//!
//! - **entities**: `RuleRecord` and its existence-flagged `RuleIndex`
//! - **rules**: `RuleBook`, the append-only rule list with its two indexes
//! - **constraints**: `GlobalConstraintSet` (linear dedup, swap-remove)
//! - **value_objects**: `AllowedTransfers` flags and `RegistryConfig`
//! - **invariants**: structural checks over the above

mod constraints;
mod entities;
mod invariants;
mod rules;
mod value_objects;

pub use constraints::*;
pub use entities::*;
pub use invariants::*;
pub use rules::*;
pub use value_objects::*;

/// Everything the registry stores.
#[derive(Debug, Default)]
pub struct RegistryState {
    /// Registered rules.
    pub rules: RuleBook,
    /// Global constraints, in evaluation order.
    pub constraints: GlobalConstraintSet,
    /// One-shot transfer permissions.
    pub allowed: AllowedTransfers,
}
