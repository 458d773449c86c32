//! # Contract Call Port
//!
//! The uniform way one component invokes another by address. Rules, the
//! rule registry and the redemption gateway all answer calls through this
//! trait, which lets a signed payload target any of them.

use crate::entities::{Address, Bytes, U256};
use crate::errors::Revert;

/// A callable contract.
///
/// `caller` is the immediate sender of the call (`msg.sender`); `data` is the
/// ABI-encoded calldata including the 4-byte selector.
pub trait Contract: Send + Sync {
    /// Executes a call and returns its raw return data.
    ///
    /// # Errors
    ///
    /// Returns `Revert` when the callee rejects the call. The caller decides
    /// whether the revert propagates or is captured as a status flag.
    fn call(&self, caller: Address, value: U256, data: &[u8]) -> Result<Bytes, Revert>;
}
