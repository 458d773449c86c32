//! # Token Holder (tr-02)
//!
//! Account that owns a token balance and lets short-lived ephemeral keys
//! spend it through whitelisted rules.
//!
//! ## Components
//!
//! - **Session manager**: multisig-administered authorization and
//!   revocation of ephemeral keys.
//! - **Executable transaction verifier**: EIP-1077 message hash, signer
//!   recovery, strictly sequential nonces.
//! - **Rule executor**: opens a one-shot, bounded allowance to the rule
//!   registry around each signed call and always closes it again.
//!
//! ## Architecture Role
//!
//! ```text
//! [Relayer] ──executeRule(to, data, nonce, v, r, s)──→ [Token Holder]
//!                                                          │ verify + nonce
//!                                  allowTransfers() ←──────┤
//!                                  approve(limit)   ←──────┤
//!                                                          ↓
//!                                          [Rule] ──→ [Rule Registry] ──→ [Token]
//! [Wallets] ──submit/confirm/revoke──→ [Token Holder]
//! ```
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | Nonces advance by exactly one | `domain/sessions.rs` (`consume_nonce`) |
//! | Nonce stored before any outbound call | `service.rs` (`verify`) |
//! | Revoked is terminal | `domain/sessions.rs` |
//! | Allowance and flag closed after every execution | `service.rs` (`execute_rule`) |
//! | Signed calls cannot target the token | `service.rs` (`execute_rule`) |

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod adapters;
pub mod domain;
pub mod errors;
pub mod ports;
pub mod service;

#[cfg(any(test, feature = "test-helpers"))]
pub mod test_helpers;

pub use adapters::{
    ContractRouter, ContractTransferGate, InMemoryGateway, InMemoryMultiSigWallet, ManualClock,
};
pub use domain::{
    execute_rule_call_prefix, revert_redemption_call_prefix, AuthorizationStatus,
    EphemeralKeyRecord, ExecutionReceipt, HolderConfig,
};
pub use errors::HolderError;
pub use ports::inbound::TokenHolderApi;
pub use ports::outbound::{BlockClock, CallDispatcher, MultiSigWallet, TransferGate, WalletTransaction};
pub use service::TokenHolderService;
