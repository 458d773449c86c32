//! Multisig wallet kept in memory.

use parking_lot::RwLock;
use std::collections::{HashMap, HashSet};

use shared_types::{Address, Revert};

use crate::ports::outbound::{MultiSigWallet, WalletTransaction};

#[derive(Debug, Default)]
struct WalletState {
    transactions: Vec<WalletTransaction>,
    confirmations: HashMap<u64, HashSet<Address>>,
}

/// `required`-of-n multisig over a fixed wallet set.
#[derive(Debug)]
pub struct InMemoryMultiSigWallet {
    wallets: HashSet<Address>,
    required: usize,
    state: RwLock<WalletState>,
}

impl InMemoryMultiSigWallet {
    /// Wallet set needing `required` confirmations per transaction.
    pub fn new(wallets: impl IntoIterator<Item = Address>, required: usize) -> Self {
        Self {
            wallets: wallets.into_iter().collect(),
            required: required.max(1),
            state: RwLock::new(WalletState::default()),
        }
    }

    /// Transaction `id`, if queued.
    #[must_use]
    pub fn transaction(&self, id: u64) -> Option<WalletTransaction> {
        self.state.read().transactions.get(id_index(id)?).cloned()
    }

    /// Number of wallets that confirmed `id`.
    #[must_use]
    pub fn confirmation_count(&self, id: u64) -> usize {
        self.state
            .read()
            .confirmations
            .get(&id)
            .map_or(0, HashSet::len)
    }

    /// Number of queued transactions.
    #[must_use]
    pub fn transaction_count(&self) -> usize {
        self.state.read().transactions.len()
    }
}

fn id_index(id: u64) -> Option<usize> {
    usize::try_from(id).ok()
}

impl MultiSigWallet for InMemoryMultiSigWallet {
    fn is_wallet(&self, account: &Address) -> bool {
        self.wallets.contains(account)
    }

    fn add_transaction(&self, destination: Address, data: Vec<u8>) -> u64 {
        let mut state = self.state.write();
        let id = state.transactions.len() as u64;
        state.transactions.push(WalletTransaction {
            id,
            destination,
            data,
            executed: false,
        });
        id
    }

    fn confirm_transaction(
        &self,
        confirmer: Address,
        id: u64,
    ) -> Result<Option<WalletTransaction>, Revert> {
        let mut state = self.state.write();
        let transaction = id_index(id)
            .and_then(|index| state.transactions.get(index))
            .cloned()
            .ok_or_else(|| Revert::new("Transaction does not exist."))?;

        let confirmations = state.confirmations.entry(id).or_default();
        if !confirmations.insert(confirmer) {
            return Err(Revert::new("Transaction is confirmed by this wallet."));
        }

        let ready = confirmations.len() >= self.required && !transaction.executed;
        Ok(ready.then_some(transaction))
    }

    fn record_execution(&self, id: u64, success: bool) {
        if !success {
            return;
        }
        let mut state = self.state.write();
        if let Some(transaction) = id_index(id).and_then(|index| state.transactions.get_mut(index)) {
            transaction.executed = true;
        }
    }
}
