//! # Rule Registry (tr-01)
//!
//! Whitelist of rules allowed to move tokens out of a holder account, the
//! global constraints every constrained transfer batch must satisfy, and
//! the transfer entry points themselves.
//!
//! ## Architecture Role
//!
//! ```text
//! [Token Holder] ──allowTransfers()──→ [Rule Registry]
//!       │                                     ↑
//!       └──signed call──→ [Rule] ──executeTransfers(from, tos, amounts)
//!                                             │
//!                                  every GlobalConstraint.check()
//!                                             ↓
//!                                 [Token].transferFrom(...) × n
//! ```
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Rule name and address are unique; slot 0 is valid | `domain/rules.rs` (`RuleIndex::exists`) |
//! | Constraint set has no duplicates | `domain/constraints.rs` |
//! | Batches are all-or-nothing | `service.rs` (`transfer_batch` ledger checkpoint) |
//! | One constrained batch per `allowTransfers()` | `service.rs` (flag cleared on success) |
//!
//! A constraint or token failure inside `execute_transfers` leaves the
//! holder's flag set. The holder clears it with `disallowTransfers()`.

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

pub use adapters::{
    FixedConstraint, InMemoryConstraintDirectory, InMemoryToken, MaxAmountConstraint,
    StaticOrganization, TransferRule,
};
pub use domain::{GlobalConstraintSet, RegistryConfig, RuleIndex, RuleRecord};
pub use errors::RegistryError;
pub use ports::inbound::RuleRegistryApi;
pub use ports::outbound::{ConstraintDirectory, GlobalConstraint, WorkerOrganization};
pub use service::RuleRegistryService;
