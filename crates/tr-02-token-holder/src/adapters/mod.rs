//! # Adapters
//!
//! In-memory collaborators plus the holder's own ABI surface.

mod clock;
mod contract;
mod gate;
mod gateway;
mod router;
mod wallet;

pub use clock::ManualClock;
pub use contract::{
    authorize_session_calldata, execute_rule_calldata, revert_redemption_calldata,
    revoke_session_calldata,
};
pub use gate::ContractTransferGate;
pub use gateway::InMemoryGateway;
pub use router::ContractRouter;
pub use wallet::InMemoryMultiSigWallet;
