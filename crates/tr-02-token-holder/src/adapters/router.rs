//! Address-to-contract routing.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::Arc;

use shared_types::{Address, Bytes, Contract, Revert, U256};
use tracing::trace;

use crate::ports::outbound::CallDispatcher;

/// Dispatches calls to contracts registered by address.
///
/// Addresses without a contract behave like externally owned accounts:
/// the call succeeds and returns nothing.
#[derive(Default)]
pub struct ContractRouter {
    contracts: RwLock<HashMap<Address, Arc<dyn Contract>>>,
}

impl ContractRouter {
    /// Empty router.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deploys `contract` at `address`.
    pub fn register(&self, address: Address, contract: Arc<dyn Contract>) {
        self.contracts.write().insert(address, contract);
    }
}

impl CallDispatcher for ContractRouter {
    fn dispatch(
        &self,
        caller: Address,
        to: Address,
        value: U256,
        data: &[u8],
    ) -> Result<Bytes, Revert> {
        // Clone out so the map is not locked while the callee runs.
        let contract = self.contracts.read().get(&to).cloned();
        match contract {
            Some(contract) => contract.call(caller, value, data),
            None => {
                trace!(to = %to, "Call to address without code");
                Ok(Bytes::new())
            }
        }
    }
}
