//! Token holder entities.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, U256};

/// Lifecycle of an ephemeral key.
///
/// `NotAuthorized → Authorized → Revoked`; nothing leaves `Revoked` and
/// nothing returns to `NotAuthorized`. Expiry is not a state: it is
/// derived from the record's height at check time.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AuthorizationStatus {
    #[default]
    NotAuthorized,
    Authorized,
    Revoked,
}

/// Per-key session bookkeeping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EphemeralKeyRecord {
    /// Allowance granted to the registry for each execution.
    pub spending_limit: U256,
    /// Last consumed nonce; starts at 0.
    pub nonce: U256,
    /// The key is inactive once the chain reaches this height.
    pub expiration_height: u64,
    /// Lifecycle status.
    pub status: AuthorizationStatus,
}

impl EphemeralKeyRecord {
    /// Authorized and not yet expired at `height`.
    #[must_use]
    pub fn is_active(&self, height: u64) -> bool {
        self.status == AuthorizationStatus::Authorized && self.expiration_height > height
    }
}

/// Result of a successful verification.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VerifiedCall {
    /// Hash the key signed.
    pub message_hash: Hash,
    /// Recovered signer.
    pub ephemeral_key: Address,
    /// Nonce consumed by this call.
    pub nonce: U256,
    /// The key's spending limit at verification time.
    pub spending_limit: U256,
}

/// What a signed execution produced.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExecutionReceipt {
    /// Hash the key signed.
    pub message_hash: Hash,
    /// Recovered signer.
    pub ephemeral_key: Address,
    /// Nonce consumed.
    pub nonce: U256,
    /// Whether the target call succeeded.
    pub status: bool,
}

/// Holder deployment configuration.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct HolderConfig {
    /// Address the holder account is deployed at. It is the signing domain
    /// of every message hash.
    pub address: Address,
}

impl HolderConfig {
    /// Config for a holder at `address`.
    #[must_use]
    pub const fn at(address: Address) -> Self {
        Self { address }
    }
}
