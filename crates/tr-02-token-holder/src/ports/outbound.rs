//! # Driven Ports (SPI - Outbound)
//!
//! Collaborators the token holder depends on. None of them is implemented
//! here; in-memory adapters live in `crate::adapters`.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Bytes, Revert, U256};

pub use shared_types::{LedgerCheckpoint, TokenLedger};

// =============================================================================
// RULE REGISTRY
// =============================================================================

/// The registry's one-shot transfer flag, as seen from the holder.
pub trait TransferGate: Send + Sync {
    /// Registry address; the spender of the holder's allowance.
    fn address(&self) -> Address;

    /// `allowTransfers()` on behalf of `holder`.
    ///
    /// # Errors
    ///
    /// Returns `Revert` when the registry rejects the call.
    fn allow_transfers(&self, holder: Address) -> Result<(), Revert>;

    /// `disallowTransfers()` on behalf of `holder`.
    ///
    /// # Errors
    ///
    /// Returns `Revert` when the registry rejects the call.
    fn disallow_transfers(&self, holder: Address) -> Result<(), Revert>;
}

// =============================================================================
// MULTISIG WALLET
// =============================================================================

/// A transaction queued in the multisig wallet.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct WalletTransaction {
    /// Transaction id.
    pub id: u64,
    /// Call target.
    pub destination: Address,
    /// Calldata.
    pub data: Vec<u8>,
    /// Set once the call has run successfully.
    pub executed: bool,
}

/// Multisig administration of the holder.
pub trait MultiSigWallet: Send + Sync {
    /// Whether `account` is one of the wallets.
    fn is_wallet(&self, account: &Address) -> bool;

    /// Queues a call and returns its id.
    fn add_transaction(&self, destination: Address, data: Vec<u8>) -> u64;

    /// Records `confirmer`'s confirmation. Returns the transaction when it
    /// is now confirmed by enough wallets and not yet executed.
    ///
    /// # Errors
    ///
    /// Unknown transaction, or `confirmer` already confirmed it.
    fn confirm_transaction(
        &self,
        confirmer: Address,
        id: u64,
    ) -> Result<Option<WalletTransaction>, Revert>;

    /// Records the outcome of executing transaction `id`.
    fn record_execution(&self, id: u64, success: bool);
}

// =============================================================================
// CALLS AND CLOCK
// =============================================================================

/// Routes a call to whatever contract lives at an address.
pub trait CallDispatcher: Send + Sync {
    /// Calls `to` as `caller`. A call to an address without code succeeds
    /// with empty return data.
    ///
    /// # Errors
    ///
    /// Returns the callee's `Revert`.
    fn dispatch(
        &self,
        caller: Address,
        to: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Bytes, Revert>;
}

/// Source of the current block height.
pub trait BlockClock: Send + Sync {
    /// Current block height.
    fn current_height(&self) -> u64;
}
