//! # Driving Ports (API - Inbound)

use shared_types::{Address, EcdsaSignature, Hash, Selector, U256};

use crate::domain::{EphemeralKeyRecord, ExecutionReceipt};
use crate::errors::HolderError;

/// Primary API of the token holder.
pub trait TokenHolderApi: Send + Sync {
    // === Session management ===

    /// Queues an `authorizeSession` call in the multisig wallet, confirms it
    /// as `caller`, and runs it once enough wallets confirmed. Wallet only.
    /// Returns the wallet transaction id.
    ///
    /// # Errors
    ///
    /// `OnlyWallet`, `NullKey`, `KeyExists` or `ExpirationNotInFuture`.
    fn submit_authorize_session(
        &self,
        caller: Address,
        ephemeral_key: Address,
        spending_limit: U256,
        expiration_height: u64,
    ) -> Result<u64, HolderError>;

    /// Authorizes a key. Only reachable through a confirmed wallet
    /// transaction (the caller must be the holder itself).
    ///
    /// # Errors
    ///
    /// `OnlyMultisig`, `NullKey`, `KeyExists` or `ExpirationNotInFuture`.
    fn authorize_session(
        &self,
        caller: Address,
        ephemeral_key: Address,
        spending_limit: U256,
        expiration_height: u64,
    ) -> Result<(), HolderError>;

    /// Revokes an authorized key. Wallet only.
    ///
    /// # Errors
    ///
    /// `OnlyWallet` or `KeyNotAuthorized`.
    fn revoke_session(&self, caller: Address, ephemeral_key: Address) -> Result<(), HolderError>;

    /// Adds `caller`'s confirmation to wallet transaction `id` and runs it
    /// once confirmed. Returns whether it ran successfully in this call.
    ///
    /// # Errors
    ///
    /// `OnlyWallet` or a wallet rejection.
    fn confirm_transaction(&self, caller: Address, id: u64) -> Result<bool, HolderError>;

    // === Signed execution ===

    /// Verifies a signed call, opens a bounded allowance to the registry,
    /// calls `to` with `data`, then closes the allowance. A failing target
    /// is reported through `status`, not as an error.
    ///
    /// # Errors
    ///
    /// `ToIsToken`, `InactiveKey`, `InvalidNonce`, or a collaborator fault
    /// before the target was called.
    fn execute_rule(
        &self,
        caller: Address,
        value: U256,
        to: Address,
        data: &[u8],
        nonce: U256,
        signature: EcdsaSignature,
    ) -> Result<ExecutionReceipt, HolderError>;

    /// Verifies a signed call and forwards `revertRedemption(hash)` to the
    /// token's gateway. A failing gateway call is reported through `status`.
    ///
    /// # Errors
    ///
    /// `InactiveKey` or `InvalidNonce`.
    fn revert_redemption(
        &self,
        caller: Address,
        value: U256,
        redeem_message_hash: Hash,
        nonce: U256,
        signature: EcdsaSignature,
    ) -> Result<ExecutionReceipt, HolderError>;

    // === Queries ===

    /// Record of `ephemeral_key` (default `NotAuthorized` record if unknown).
    fn ephemeral_key(&self, ephemeral_key: Address) -> EphemeralKeyRecord;

    /// Authorized and unexpired at the current height.
    fn is_key_active(&self, ephemeral_key: Address) -> bool;

    /// The hash a key must sign for a call with these components.
    fn message_hash(&self, call_prefix: Selector, to: Address, data: &[u8], nonce: U256) -> Hash;

    /// Holder address.
    fn address(&self) -> Address;

    /// Token address.
    fn token_address(&self) -> Address;

    /// Registry address.
    fn registry_address(&self) -> Address;
}
