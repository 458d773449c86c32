//! # Shared Types Crate
//!
//! Primitives shared by the rule registry (`tr-01`) and the token holder
//! (`tr-02`).
//!
//! ## Contents
//!
//! - **Value objects**: `Address`, `Hash`, `Selector`, `Bytes`, `EcdsaSignature`, `U256`
//! - **Hashing**: Keccak-256 and function selectors
//! - **ABI**: word codec for call payloads (`abi::encode_call`, `abi::AbiReader`)
//! - **Contract port**: the `Contract` trait every callable component implements
//! - **Token port**: the journaled `TokenLedger` both contracts depend on
//! - **Errors**: `Revert` (reason-carrying call failure) and `AbiError`

pub mod abi;
pub mod contract;
pub mod entities;
pub mod errors;
pub mod hashing;
pub mod token;

pub use contract::Contract;
pub use entities::*;
pub use errors::{AbiError, ErrorKind, Revert};
pub use hashing::{keccak256, selector};
pub use token::{ExecutionScope, LedgerCheckpoint, TokenLedger};
