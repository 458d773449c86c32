//! Worker set.

use parking_lot::RwLock;
use std::collections::HashSet;

use shared_types::Address;

use crate::ports::outbound::WorkerOrganization;

/// Organization with an explicit, mutable set of workers.
#[derive(Debug, Default)]
pub struct StaticOrganization {
    workers: RwLock<HashSet<Address>>,
}

impl StaticOrganization {
    /// Organization whose workers are `workers`.
    pub fn new(workers: impl IntoIterator<Item = Address>) -> Self {
        Self {
            workers: RwLock::new(workers.into_iter().collect()),
        }
    }

    /// Grants the worker role.
    pub fn add_worker(&self, worker: Address) {
        self.workers.write().insert(worker);
    }

    /// Revokes the worker role.
    pub fn remove_worker(&self, worker: &Address) {
        self.workers.write().remove(worker);
    }
}

impl WorkerOrganization for StaticOrganization {
    fn is_worker(&self, account: &Address) -> bool {
        self.workers.read().contains(account)
    }
}
