//! # Hashing
//!
//! Keccak-256 helpers used for message hashes, name indexes and
//! function selectors.

use crate::entities::{Hash, Selector};
use sha3::{Digest, Keccak256};

/// Keccak-256 of `data`.
#[must_use]
pub fn keccak256(data: &[u8]) -> Hash {
    let mut hasher = Keccak256::new();
    hasher.update(data);
    let result = hasher.finalize();
    let mut hash = [0u8; 32];
    hash.copy_from_slice(&result);
    Hash(hash)
}

/// First four bytes of `keccak256(signature)`, e.g.
/// `selector("transfer(address,uint256)") == 0xa9059cbb`.
#[must_use]
pub fn selector(signature: &str) -> Selector {
    let hash = keccak256(signature.as_bytes());
    Selector::from_calldata(hash.as_bytes())
}
