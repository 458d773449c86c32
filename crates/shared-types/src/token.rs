//! # Token Ledger Port
//!
//! The fungible-token primitive both the rule registry (which moves funds)
//! and the token holder (which grants allowances) depend on.
//!
//! The ledger is journaled: a caller takes a [`LedgerCheckpoint`] before a
//! group of mutations and either commits or reverts to it. Checkpoints nest;
//! reverting an outer checkpoint also discards everything committed inside
//! it.
//!
//! The journal is one stack per ledger, so frames opened by different
//! threads must not interleave. Every entry point that opens a checkpoint
//! holds [`TokenLedger::enter`] for its whole duration; the scope is
//! re-entrant, so a target calling back into the holder or the registry on
//! the same thread passes straight through.

use parking_lot::ReentrantMutexGuard;

use crate::entities::{Address, U256};
use crate::errors::Revert;

/// Exclusive, re-entrant hold on the ledger's execution frames.
pub type ExecutionScope<'a> = ReentrantMutexGuard<'a, ()>;

/// Position in the ledger journal returned by [`TokenLedger::checkpoint`].
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub struct LedgerCheckpoint(pub usize);

/// EIP-20 style token with an added journal.
pub trait TokenLedger: Send + Sync {
    /// Address of the token contract.
    fn address(&self) -> Address;

    /// Gateway that handles redemptions for this token.
    fn co_gateway(&self) -> Address;

    /// Balance of `account`.
    fn balance_of(&self, account: Address) -> U256;

    /// Amount `spender` may still move out of `owner`.
    fn allowance(&self, owner: Address, spender: Address) -> U256;

    /// Sets the allowance of `spender` over `owner`'s funds to `amount`.
    ///
    /// # Errors
    ///
    /// Returns `Revert` if the token refuses the approval.
    fn approve(&self, owner: Address, spender: Address, amount: U256) -> Result<(), Revert>;

    /// Moves `amount` from `from` to `to` on behalf of `spender`, consuming
    /// allowance.
    ///
    /// # Errors
    ///
    /// Fails with "Insufficient balance." or "Insufficient allowance.".
    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Revert>;

    /// Blocks until no other thread is inside an execution frame.
    fn enter(&self) -> ExecutionScope<'_>;

    /// Opens a checkpoint.
    fn checkpoint(&self) -> LedgerCheckpoint;

    /// Undoes every mutation made since `checkpoint` and closes it.
    fn revert_to(&self, checkpoint: LedgerCheckpoint);

    /// Closes `checkpoint`, keeping its mutations.
    fn commit(&self, checkpoint: LedgerCheckpoint);
}
