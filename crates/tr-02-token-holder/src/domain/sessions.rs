//! Ephemeral key sessions.

use std::collections::HashMap;

use shared_types::{Address, U256};

use super::entities::{AuthorizationStatus, EphemeralKeyRecord};
use super::invariants::{
    invariant_expiration_in_future, invariant_next_nonce, invariant_status_transition,
};
use crate::errors::HolderError;

/// Every key the holder has ever seen. Records are never deleted.
#[derive(Debug, Default)]
pub struct SessionBook {
    keys: HashMap<Address, EphemeralKeyRecord>,
}

impl SessionBook {
    /// Record for `key` (a default `NotAuthorized` record when unknown).
    #[must_use]
    pub fn record(&self, key: &Address) -> EphemeralKeyRecord {
        self.keys.get(key).copied().unwrap_or_default()
    }

    /// Preconditions shared by submission and authorization.
    ///
    /// # Errors
    ///
    /// `NullKey`, `KeyExists` or `ExpirationNotInFuture`.
    pub fn check_authorizable(
        &self,
        key: &Address,
        expiration_height: u64,
        current_height: u64,
    ) -> Result<(), HolderError> {
        if key.is_zero() {
            return Err(HolderError::NullKey);
        }
        let status = self.record(key).status;
        if !invariant_status_transition(status, AuthorizationStatus::Authorized) {
            return Err(HolderError::KeyExists);
        }
        if !invariant_expiration_in_future(expiration_height, current_height) {
            return Err(HolderError::ExpirationNotInFuture);
        }
        Ok(())
    }

    /// Authorizes `key` with a fresh nonce.
    ///
    /// # Errors
    ///
    /// See [`SessionBook::check_authorizable`].
    pub fn authorize(
        &mut self,
        key: Address,
        spending_limit: U256,
        expiration_height: u64,
        current_height: u64,
    ) -> Result<(), HolderError> {
        self.check_authorizable(&key, expiration_height, current_height)?;
        self.keys.insert(
            key,
            EphemeralKeyRecord {
                spending_limit,
                nonce: U256::zero(),
                expiration_height,
                status: AuthorizationStatus::Authorized,
            },
        );
        Ok(())
    }

    /// Revokes an authorized key, expired or not.
    ///
    /// # Errors
    ///
    /// `KeyNotAuthorized` unless the key is currently `Authorized`.
    pub fn revoke(&mut self, key: &Address) -> Result<(), HolderError> {
        let record = self
            .keys
            .get_mut(key)
            .filter(|record| {
                invariant_status_transition(record.status, AuthorizationStatus::Revoked)
            })
            .ok_or(HolderError::KeyNotAuthorized)?;
        record.status = AuthorizationStatus::Revoked;
        Ok(())
    }

    /// Checks that `key` is active and `nonce` is the next one, then stores
    /// it. Returns the updated record.
    ///
    /// # Errors
    ///
    /// `InactiveKey` or `InvalidNonce`.
    pub fn consume_nonce(
        &mut self,
        key: &Address,
        nonce: U256,
        current_height: u64,
    ) -> Result<EphemeralKeyRecord, HolderError> {
        let record = self
            .keys
            .get_mut(key)
            .filter(|record| record.is_active(current_height))
            .ok_or(HolderError::InactiveKey)?;
        if !invariant_next_nonce(record.nonce, nonce) {
            return Err(HolderError::InvalidNonce);
        }
        record.nonce = nonce;
        Ok(*record)
    }

    /// Puts back the nonce a call consumed, when the call is undone as a
    /// whole.
    pub fn restore_nonce(&mut self, key: &Address, consumed: U256) {
        if let Some(record) = self.keys.get_mut(key) {
            if record.nonce == consumed {
                record.nonce = consumed.saturating_sub(U256::one());
            }
        }
    }
}
