//! EIP-1077 executable transaction hash.
//!
//! ```text
//! keccak256(
//!     0x19 ‖ 0x00 ‖ holder ‖ to ‖ uint8(0) ‖ keccak256(data) ‖ nonce(uint256)
//!     ‖ uint8(0) ‖ uint8(0) ‖ uint8(0) ‖ callPrefix(bytes4) ‖ uint8(0) ‖ bytes32(0)
//! )
//! ```
//!
//! The zero fields are reserved (value, gas price, gas limit, gas token,
//! operation type, extra hash) and must stay zero for signatures produced
//! by external signers to verify.

use shared_types::abi::uint_word;
use shared_types::{keccak256, selector, Address, Hash, Selector, U256};

/// Signature whose selector tags `executeRule` authorizations.
pub const EXECUTE_RULE_SIGNATURE: &str =
    "executeRule(address,bytes,uint256,uint8,bytes32,bytes32)";

/// Signature whose selector tags `revertRedemption` authorizations.
pub const REVERT_REDEMPTION_SIGNATURE: &str =
    "revertRedemption(bytes32,uint256,uint8,bytes32,bytes32)";

/// Wallet payload that authorizes a session once confirmed.
pub const AUTHORIZE_SESSION_SIGNATURE: &str = "authorizeSession(address,uint256,uint256)";

/// Wallet payload that revokes a session.
pub const REVOKE_SESSION_SIGNATURE: &str = "revokeSession(address)";

/// Gateway call made by `revertRedemption`.
pub const GATEWAY_REVERT_REDEMPTION_SIGNATURE: &str = "revertRedemption(bytes32)";

/// Length of the packed preimage.
pub const MESSAGE_PREIMAGE_LEN: usize = 147;

/// Call prefix of `executeRule`.
#[must_use]
pub fn execute_rule_call_prefix() -> Selector {
    selector(EXECUTE_RULE_SIGNATURE)
}

/// Call prefix of `revertRedemption`.
#[must_use]
pub fn revert_redemption_call_prefix() -> Selector {
    selector(REVERT_REDEMPTION_SIGNATURE)
}

/// Packed preimage of the message hash.
#[must_use]
pub fn message_preimage(
    holder: Address,
    to: Address,
    data: &[u8],
    nonce: U256,
    call_prefix: Selector,
) -> Vec<u8> {
    let mut packed = Vec::with_capacity(MESSAGE_PREIMAGE_LEN);
    packed.push(0x19);
    packed.push(0x00);
    packed.extend_from_slice(holder.as_bytes());
    packed.extend_from_slice(to.as_bytes());
    packed.push(0); // value
    packed.extend_from_slice(keccak256(data).as_bytes());
    packed.extend_from_slice(&uint_word(nonce));
    packed.extend_from_slice(&[0, 0, 0]); // gas price, gas limit, gas token
    packed.extend_from_slice(call_prefix.as_bytes());
    packed.push(0); // operation type
    packed.extend_from_slice(Hash::ZERO.as_bytes()); // extra hash
    packed
}

/// Hash an ephemeral key signs to authorize one call.
#[must_use]
pub fn message_hash(
    holder: Address,
    to: Address,
    data: &[u8],
    nonce: U256,
    call_prefix: Selector,
) -> Hash {
    keccak256(&message_preimage(holder, to, data, nonce, call_prefix))
}
