//! # Session Administration
//!
//! Multisig-confirmed authorization, revocation and expiry of ephemeral keys.

#[cfg(test)]
mod tests {
    use shared_bus::{ContractEvent, EventFilter, EventTopic};
    use shared_types::{ErrorKind, U256};
    use tr_02_token_holder::test_helpers::generate_ephemeral_key;
    use tr_02_token_holder::{AuthorizationStatus, HolderError, TokenHolderApi};

    use crate::fixtures::addresses::*;
    use crate::fixtures::World;

    #[test]
    fn test_two_of_three_wallet_authorization() {
        let world = World::builder().with_required_confirmations(2).build();
        let (_, key) = generate_ephemeral_key();
        let expiration = world.height() + 50;

        let id = world
            .holder
            .submit_authorize_session(WALLET_A, key, U256::from(200), expiration)
            .unwrap();
        assert!(!world.holder.is_key_active(key));
        assert_eq!(world.wallet.confirmation_count(id), 1);

        assert_eq!(world.holder.confirm_transaction(WALLET_C, id), Ok(true));
        assert!(world.holder.is_key_active(key));
        assert!(world.wallet.transaction(id).unwrap().executed);

        // Already executed: a late confirmation runs nothing.
        assert_eq!(world.holder.confirm_transaction(WALLET_B, id), Ok(false));
    }

    #[test]
    fn test_authorized_key_can_spend_after_threshold() {
        let world = World::builder().with_required_confirmations(2).build();
        let session = world.authorize_key(200, 50);

        assert!(world.transfer(&session, ALICE, 20, 1).unwrap().status);
        assert_eq!(world.balance(ALICE), U256::from(20));
    }

    #[test]
    fn test_non_wallet_cannot_confirm() {
        let world = World::builder().with_required_confirmations(2).build();
        let (_, key) = generate_ephemeral_key();
        let id = world
            .holder
            .submit_authorize_session(WALLET_A, key, U256::one(), world.height() + 1)
            .unwrap();

        let err = world.holder.confirm_transaction(ALICE, id).unwrap_err();
        assert_eq!(err, HolderError::OnlyWallet);
        assert!(!world.holder.is_key_active(key));
    }

    #[test]
    fn test_competing_submissions_for_one_key() {
        // Both pass the submission check; only the first to execute wins.
        let world = World::builder().with_required_confirmations(2).build();
        let (_, key) = generate_ephemeral_key();
        let expiration = world.height() + 10;

        let first = world
            .holder
            .submit_authorize_session(WALLET_A, key, U256::from(1), expiration)
            .unwrap();
        let second = world
            .holder
            .submit_authorize_session(WALLET_B, key, U256::from(2), expiration)
            .unwrap();

        assert_eq!(world.holder.confirm_transaction(WALLET_C, first), Ok(true));
        assert_eq!(world.holder.confirm_transaction(WALLET_C, second), Ok(false));
        assert!(!world.wallet.transaction(second).unwrap().executed);
        assert_eq!(world.holder.ephemeral_key(key).spending_limit, U256::from(1));
    }

    #[test]
    fn test_revoked_key_cannot_execute() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        world.holder.revoke_session(WALLET_B, session.address).unwrap();

        let err = world.transfer(&session, ALICE, 50, 1).unwrap_err();

        assert_eq!(err, HolderError::InactiveKey);
        assert_eq!(err.kind(), ErrorKind::Authorization);
        assert_eq!(world.balance(HOLDER), U256::from(500));
        assert_eq!(
            world.holder.ephemeral_key(session.address).status,
            AuthorizationStatus::Revoked
        );
    }

    #[test]
    fn test_revoked_key_cannot_be_reauthorized() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        world.holder.revoke_session(WALLET_A, session.address).unwrap();

        assert_eq!(
            world.holder.submit_authorize_session(
                WALLET_A,
                session.address,
                U256::from(200),
                world.height() + 50
            ),
            Err(HolderError::KeyExists)
        );
    }

    #[test]
    fn test_key_expires_at_its_height() {
        let world = World::new();
        let session = world.authorize_key(200, 50);

        world.clock.advance(49);
        assert!(world.transfer(&session, ALICE, 1, 1).unwrap().status);

        world.clock.advance(1);
        assert_eq!(
            world.transfer(&session, ALICE, 1, 2),
            Err(HolderError::InactiveKey)
        );

        // Expired but never revoked: still revocable.
        world.holder.revoke_session(WALLET_A, session.address).unwrap();
    }

    #[test]
    fn test_session_events() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        world.holder.revoke_session(WALLET_A, session.address).unwrap();

        let events = world
            .bus
            .history_matching(&EventFilter::topics(vec![EventTopic::Sessions]));
        assert_eq!(
            events,
            vec![
                ContractEvent::SessionAuthorizationSubmitted {
                    holder: HOLDER,
                    transaction_id: 0,
                    ephemeral_key: session.address,
                    spending_limit: U256::from(200),
                    expiration_height: world.height() + 50,
                },
                ContractEvent::SessionRevoked {
                    holder: HOLDER,
                    ephemeral_key: session.address,
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_relayer_sees_revocation_live() {
        let world = World::new();
        let mut subscription = world
            .bus
            .subscribe(EventFilter::topics(vec![EventTopic::Sessions]));
        let session = world.authorize_key(200, 50);
        world.holder.revoke_session(WALLET_A, session.address).unwrap();

        let first = subscription.recv().await.unwrap();
        assert!(matches!(first, ContractEvent::SessionAuthorizationSubmitted { .. }));
        let second = subscription.recv().await.unwrap();
        assert_eq!(
            second,
            ContractEvent::SessionRevoked {
                holder: HOLDER,
                ephemeral_key: session.address,
            }
        );
    }
}
