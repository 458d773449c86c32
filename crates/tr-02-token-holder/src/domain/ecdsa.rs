//! # Signer Recovery (secp256k1)
//!
//! - **Malleability (EIP-2)**: S above half the curve order is rejected.
//!   Raw `ecrecover` accepts both forms; here only the low one recovers.
//! - **Recovery id**: v may be 0/1 or 27/28
//! - Constant-time S comparison via `subtle`; the 64-byte signature buffer is
//!   zeroized after parsing

use k256::ecdsa::{RecoveryId, Signature, VerifyingKey};
use subtle::Choice;
use thiserror::Error;
use zeroize::Zeroize;

use shared_types::{keccak256, Address, EcdsaSignature, Hash};

/// Half of the secp256k1 curve order, rounded down.
/// floor(n/2) where n = 0xFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFFEBAAEDCE6AF48A03BBFD25E8CD0364141
const SECP256K1_HALF_ORDER: [u8; 32] = [
    0x7F, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
    0x5D, 0x57, 0x6E, 0x73, 0x57, 0xA4, 0x50, 0x1D, 0xDF, 0xE9, 0x2F, 0x46, 0x68, 0x1B, 0x20, 0xA0,
];

/// Why a signer could not be recovered.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum RecoveryError {
    #[error("invalid recovery id: {0}")]
    InvalidRecoveryId(u8),

    #[error("malleable signature (high S)")]
    MalleableSignature,

    #[error("invalid signature encoding")]
    InvalidFormat,

    #[error("public key recovery failed")]
    RecoveryFailed,
}

/// Recovers the address that produced `signature` over `message_hash`.
///
/// # Errors
///
/// See [`RecoveryError`].
pub fn recover_signer(
    message_hash: &Hash,
    signature: &EcdsaSignature,
) -> Result<Address, RecoveryError> {
    let recovery_id = parse_recovery_id(signature.v)?;

    if !is_low_s(&signature.s) {
        return Err(RecoveryError::MalleableSignature);
    }

    let mut sig_bytes = [0u8; 64];
    sig_bytes[..32].copy_from_slice(&signature.r);
    sig_bytes[32..].copy_from_slice(&signature.s);
    let parsed = Signature::from_slice(&sig_bytes);
    sig_bytes.zeroize();
    let sig = parsed.map_err(|_| RecoveryError::InvalidFormat)?;

    let recovered_key =
        VerifyingKey::recover_from_prehash(message_hash.as_bytes(), &sig, recovery_id)
            .map_err(|_| RecoveryError::RecoveryFailed)?;

    Ok(address_from_verifying_key(&recovered_key))
}

/// Ethereum address of a public key: last 20 bytes of
/// `keccak256(uncompressed_point[1..])`.
#[must_use]
pub fn address_from_verifying_key(key: &VerifyingKey) -> Address {
    let point = key.to_encoded_point(false);
    let hash = keccak256(&point.as_bytes()[1..]);
    let mut address = [0u8; 20];
    address.copy_from_slice(&hash.as_bytes()[12..]);
    Address::new(address)
}

fn parse_recovery_id(v: u8) -> Result<RecoveryId, RecoveryError> {
    let id = match v {
        0 | 27 => 0,
        1 | 28 => 1,
        _ => return Err(RecoveryError::InvalidRecoveryId(v)),
    };

    RecoveryId::try_from(id).map_err(|_| RecoveryError::InvalidRecoveryId(v))
}

/// `s <= floor(n/2)`, compared in constant time.
fn is_low_s(s: &[u8; 32]) -> bool {
    let mut less = Choice::from(0u8);
    let mut greater = Choice::from(0u8);

    for (s_byte, h_byte) in s.iter().zip(SECP256K1_HALF_ORDER.iter()) {
        let not_decided = !(less | greater);
        let byte_less = Choice::from(u8::from(s_byte < h_byte));
        let byte_greater = Choice::from(u8::from(s_byte > h_byte));

        less |= not_decided & byte_less;
        greater |= not_decided & byte_greater;
    }

    (!greater).into()
}
