//! # Adapters
//!
//! In-memory collaborators and ABI call adapters:
//! - [`InMemoryToken`]: journaled EIP-20 ledger
//! - [`StaticOrganization`]: worker set
//! - [`InMemoryConstraintDirectory`], [`FixedConstraint`], [`MaxAmountConstraint`]
//! - [`TransferRule`]: a rule contract forwarding `transferFrom` into the registry
//! - `contract`: the registry's own ABI surface (`impl Contract`)

mod constraints;
mod contract;
mod organization;
mod token;
mod transfer_rule;

pub use constraints::{FixedConstraint, InMemoryConstraintDirectory, MaxAmountConstraint};
pub use contract::signatures;
pub use organization::StaticOrganization;
pub use token::InMemoryToken;
pub use transfer_rule::TransferRule;
