//! Session invariants.

use shared_types::U256;

use super::AuthorizationStatus;

/// Nonces are sequential and gapless: only `stored + 1` is accepted.
#[must_use]
pub fn invariant_next_nonce(stored: U256, claimed: U256) -> bool {
    stored.checked_add(U256::one()) == Some(claimed)
}

/// Authorization requires an expiration strictly in the future.
#[must_use]
pub const fn invariant_expiration_in_future(expiration_height: u64, current_height: u64) -> bool {
    expiration_height > current_height
}

/// Allowed status transitions.
#[must_use]
pub fn invariant_status_transition(from: AuthorizationStatus, to: AuthorizationStatus) -> bool {
    matches!(
        (from, to),
        (AuthorizationStatus::NotAuthorized, AuthorizationStatus::Authorized)
            | (AuthorizationStatus::Authorized, AuthorizationStatus::Revoked)
    )
}
