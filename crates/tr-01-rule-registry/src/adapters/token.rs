//! Journaled in-memory token.

use parking_lot::{ReentrantMutex, RwLock};
use std::collections::HashMap;

use shared_types::{Address, ExecutionScope, LedgerCheckpoint, Revert, TokenLedger, U256};

#[derive(Debug, Clone, Copy)]
enum JournalEntry {
    Balance {
        account: Address,
        previous: U256,
    },
    Allowance {
        owner: Address,
        spender: Address,
        previous: U256,
    },
}

#[derive(Debug, Default)]
struct LedgerState {
    balances: HashMap<Address, U256>,
    allowances: HashMap<(Address, Address), U256>,
    journal: Vec<JournalEntry>,
    open_checkpoints: usize,
}

impl LedgerState {
    fn balance(&self, account: &Address) -> U256 {
        self.balances.get(account).copied().unwrap_or_default()
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.allowances
            .get(&(owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn set_balance(&mut self, account: Address, value: U256) {
        let previous = self.balance(&account);
        if self.open_checkpoints > 0 {
            self.journal.push(JournalEntry::Balance { account, previous });
        }
        self.balances.insert(account, value);
    }

    fn set_allowance(&mut self, owner: Address, spender: Address, value: U256) {
        let previous = self.allowance(owner, spender);
        if self.open_checkpoints > 0 {
            self.journal.push(JournalEntry::Allowance {
                owner,
                spender,
                previous,
            });
        }
        self.allowances.insert((owner, spender), value);
    }

    fn close_checkpoint(&mut self) {
        self.open_checkpoints = self.open_checkpoints.saturating_sub(1);
        if self.open_checkpoints == 0 {
            self.journal.clear();
        }
    }
}

/// EIP-20 token kept in memory.
///
/// `transfer_from` checks balance before allowance and consumes allowance.
/// Mutations are journaled only while a checkpoint is open, and every
/// mutation waits for other threads' execution frames to close.
#[derive(Debug)]
pub struct InMemoryToken {
    address: Address,
    co_gateway: Address,
    execution: ReentrantMutex<()>,
    state: RwLock<LedgerState>,
}

impl InMemoryToken {
    /// Token at `address` whose redemptions go through `co_gateway`.
    #[must_use]
    pub fn new(address: Address, co_gateway: Address) -> Self {
        Self {
            address,
            co_gateway,
            execution: ReentrantMutex::new(()),
            state: RwLock::new(LedgerState::default()),
        }
    }

    /// Credits `amount` to `account`.
    ///
    /// # Errors
    ///
    /// Fails on balance overflow.
    pub fn mint(&self, account: Address, amount: U256) -> Result<(), Revert> {
        let _scope = self.enter();
        let mut state = self.state.write();
        let balance = state
            .balance(&account)
            .checked_add(amount)
            .ok_or_else(|| Revert::new("Balance overflow."))?;
        state.set_balance(account, balance);
        Ok(())
    }

    /// Sum of all balances.
    #[must_use]
    pub fn total_supply(&self) -> U256 {
        self.state
            .read()
            .balances
            .values()
            .fold(U256::zero(), |acc, b| acc.saturating_add(*b))
    }
}

impl TokenLedger for InMemoryToken {
    fn address(&self) -> Address {
        self.address
    }

    fn co_gateway(&self) -> Address {
        self.co_gateway
    }

    fn balance_of(&self, account: Address) -> U256 {
        self.state.read().balance(&account)
    }

    fn allowance(&self, owner: Address, spender: Address) -> U256 {
        self.state.read().allowance(owner, spender)
    }

    fn approve(&self, owner: Address, spender: Address, amount: U256) -> Result<(), Revert> {
        let _scope = self.enter();
        self.state.write().set_allowance(owner, spender, amount);
        Ok(())
    }

    fn transfer_from(
        &self,
        spender: Address,
        from: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), Revert> {
        let _scope = self.enter();
        let mut state = self.state.write();

        let from_balance = state.balance(&from);
        if from_balance < amount {
            return Err(Revert::new("Insufficient balance."));
        }
        let allowance = state.allowance(from, spender);
        if allowance < amount {
            return Err(Revert::new("Insufficient allowance."));
        }

        let to_balance = if from == to {
            None
        } else {
            Some(
                state
                    .balance(&to)
                    .checked_add(amount)
                    .ok_or_else(|| Revert::new("Balance overflow."))?,
            )
        };

        state.set_allowance(from, spender, allowance - amount);
        if let Some(to_balance) = to_balance {
            state.set_balance(from, from_balance - amount);
            state.set_balance(to, to_balance);
        }
        Ok(())
    }

    fn enter(&self) -> ExecutionScope<'_> {
        self.execution.lock()
    }

    fn checkpoint(&self) -> LedgerCheckpoint {
        let _scope = self.enter();
        let mut state = self.state.write();
        state.open_checkpoints += 1;
        LedgerCheckpoint(state.journal.len())
    }

    fn revert_to(&self, checkpoint: LedgerCheckpoint) {
        let _scope = self.enter();
        let mut state = self.state.write();
        while state.journal.len() > checkpoint.0 {
            match state.journal.pop() {
                Some(JournalEntry::Balance { account, previous }) => {
                    state.balances.insert(account, previous);
                }
                Some(JournalEntry::Allowance {
                    owner,
                    spender,
                    previous,
                }) => {
                    state.allowances.insert((owner, spender), previous);
                }
                None => break,
            }
        }
        state.close_checkpoint();
    }

    fn commit(&self, _checkpoint: LedgerCheckpoint) {
        let _scope = self.enter();
        self.state.write().close_checkpoint();
    }
}
