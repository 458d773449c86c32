//! # Domain Layer for the Token Holder
//!
//! Pure logic: session records, the EIP-1077 message layout and signer
//! recovery. No locks, no I/O.

mod ecdsa;
mod entities;
mod invariants;
mod message;
mod sessions;

pub use ecdsa::*;
pub use entities::*;
pub use invariants::*;
pub use message::*;
pub use sessions::*;
