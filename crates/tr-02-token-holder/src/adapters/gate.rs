//! Registry transfer flag reached through its ABI.

use std::sync::Arc;

use shared_types::abi::encode_call;
use shared_types::{selector, Address, Contract, Revert, U256};

use crate::ports::outbound::TransferGate;

const ALLOW_TRANSFERS: &str = "allowTransfers()";
const DISALLOW_TRANSFERS: &str = "disallowTransfers()";

/// [`TransferGate`] that calls `allowTransfers()` / `disallowTransfers()`
/// on a registry contract, with the holder as caller.
pub struct ContractTransferGate {
    address: Address,
    registry: Arc<dyn Contract>,
}

impl ContractTransferGate {
    /// Gate onto the registry deployed at `address`.
    pub fn new(address: Address, registry: Arc<dyn Contract>) -> Self {
        Self { address, registry }
    }

    fn call(&self, holder: Address, signature: &str) -> Result<(), Revert> {
        self.registry
            .call(holder, U256::zero(), &encode_call(selector(signature), &[]))
            .map(|_| ())
    }
}

impl TransferGate for ContractTransferGate {
    fn address(&self) -> Address {
        self.address
    }

    fn allow_transfers(&self, holder: Address) -> Result<(), Revert> {
        self.call(holder, ALLOW_TRANSFERS)
    }

    fn disallow_transfers(&self, holder: Address) -> Result<(), Revert> {
        self.call(holder, DISALLOW_TRANSFERS)
    }
}
