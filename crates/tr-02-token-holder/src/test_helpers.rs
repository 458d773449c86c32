//! Ephemeral key signing for tests.
//!
//! Built for unit tests and, behind the `test-helpers` feature, for the
//! cross-crate scenario suite.

#![allow(clippy::expect_used)]

use k256::ecdsa::SigningKey;
use shared_types::{Address, EcdsaSignature, Hash, Selector, U256};

use crate::domain::{address_from_verifying_key, message_hash};

/// Fresh secp256k1 key and its address.
pub fn generate_ephemeral_key() -> (SigningKey, Address) {
    let key = SigningKey::random(&mut rand::thread_rng());
    let address = address_from_verifying_key(key.verifying_key());
    (key, address)
}

/// Signs a prehashed message, low-S, with `v` in `{27, 28}`.
pub fn sign_hash(hash: &Hash, key: &SigningKey) -> EcdsaSignature {
    let (signature, recovery_id) = key
        .sign_prehash_recoverable(hash.as_bytes())
        .expect("signing failed");

    let (signature, recid) = match signature.normalize_s() {
        // Negating s flips the parity of R's y coordinate.
        Some(normalized) => (normalized, recovery_id.to_byte() ^ 1),
        None => (signature, recovery_id.to_byte()),
    };

    let bytes = signature.to_bytes();
    let mut r = [0u8; 32];
    let mut s = [0u8; 32];
    r.copy_from_slice(&bytes[..32]);
    s.copy_from_slice(&bytes[32..]);
    EcdsaSignature::new(recid + 27, r, s)
}

/// Signs the message hash the holder at `holder` computes for this call.
pub fn sign_call(
    holder: Address,
    call_prefix: Selector,
    to: Address,
    data: &[u8],
    nonce: U256,
    key: &SigningKey,
) -> EcdsaSignature {
    sign_hash(&message_hash(holder, to, data, nonce, call_prefix), key)
}
