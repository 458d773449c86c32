//! # Ports
//!
//! - **inbound**: `TokenHolderApi`, called by wallets and relayers
//! - **outbound**: token, registry gate, multisig wallet, call dispatch, clock

pub mod inbound;
pub mod outbound;
