//! Redemption gateway.

use parking_lot::RwLock;
use std::collections::HashSet;

use shared_types::abi::{split_selector, AbiReader};
use shared_types::{selector, AbiError, Address, Bytes, Contract, Hash, Revert, U256};
use tracing::info;

use crate::domain::GATEWAY_REVERT_REDEMPTION_SIGNATURE;

#[derive(Debug, Default)]
struct GatewayState {
    pending: HashSet<Hash>,
    reverted: Vec<(Address, Hash)>,
}

/// Gateway tracking pending redemptions and accepting
/// `revertRedemption(bytes32)` for them.
#[derive(Debug, Default)]
pub struct InMemoryGateway {
    state: RwLock<GatewayState>,
}

impl InMemoryGateway {
    /// Gateway without pending redemptions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Marks `redeem_message_hash` as a pending redemption.
    pub fn add_redemption(&self, redeem_message_hash: Hash) {
        self.state.write().pending.insert(redeem_message_hash);
    }

    /// Whether `redeem_message_hash` is pending.
    #[must_use]
    pub fn is_pending(&self, redeem_message_hash: &Hash) -> bool {
        self.state.read().pending.contains(redeem_message_hash)
    }

    /// `(caller, hash)` for every accepted revert, in order.
    #[must_use]
    pub fn reverted(&self) -> Vec<(Address, Hash)> {
        self.state.read().reverted.clone()
    }
}

impl Contract for InMemoryGateway {
    fn call(&self, caller: Address, _value: U256, data: &[u8]) -> Result<Bytes, Revert> {
        let (function, args) = split_selector(data)?;
        if function != selector(GATEWAY_REVERT_REDEMPTION_SIGNATURE) {
            return Err(AbiError::UnknownSelector(function.0).into());
        }
        let hash = AbiReader::new(args).fixed_bytes(0)?;

        let mut state = self.state.write();
        if !state.pending.remove(&hash) {
            return Err(Revert::new("Redeem message hash is unknown."));
        }
        state.reverted.push((caller, hash));
        info!(caller = %caller, redeem_message_hash = %hash, "Redemption reverted");
        Ok(Bytes::new())
    }
}
