//! # Rules and Global Constraints
//!
//! Registry administration and the constrained / unconstrained transfer
//! paths as seen from a signed execution.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use shared_types::abi::{encode_call, Token};
    use shared_types::{selector, Address, ErrorKind, U256};
    use tr_01_rule_registry::adapters::signatures;
    use tr_01_rule_registry::{
        FixedConstraint, MaxAmountConstraint, RegistryError, RuleRegistryApi,
    };

    use crate::fixtures::addresses::*;
    use crate::fixtures::{World, TRANSFER_RULE_NAME};

    const REJECTING: Address = Address::repeat_byte(0xc1);
    const CAP: Address = Address::repeat_byte(0xc2);

    #[test]
    fn test_rejecting_constraint_blocks_signed_transfer() {
        let world = World::new();
        world.add_constraint(REJECTING, Arc::new(FixedConstraint::reject()));
        let session = world.authorize_key(200, 50);

        let receipt = world.transfer(&session, ALICE, 50, 1).unwrap();

        assert!(!receipt.status);
        assert_eq!(world.balance(HOLDER), U256::from(500));
        assert_eq!(world.balance(ALICE), U256::zero());
        // The registry leaves the flag set on failure; the holder clears it.
        assert!(world.allowance_closed());
    }

    #[test]
    fn test_constraint_rejection_reason_and_stuck_flag() {
        let world = World::new();
        world.add_constraint(REJECTING, Arc::new(FixedConstraint::reject()));
        world.registry.allow_transfers(HOLDER);

        let err = world
            .registry
            .execute_transfers(TRANSFER_RULE, HOLDER, &[ALICE], &[U256::from(50)])
            .unwrap_err();

        assert_eq!(err, RegistryError::ConstraintsNotFulfilled);
        assert_eq!(err.to_string(), "Constraints not fulfilled.");
        assert_eq!(err.kind(), ErrorKind::Constraint);
        assert!(world.registry.are_transfers_allowed(HOLDER));
    }

    #[test]
    fn test_cap_constraint() {
        let world = World::new();
        world.add_constraint(CAP, Arc::new(MaxAmountConstraint::new(U256::from(100))));
        let session = world.authorize_key(200, 50);

        assert!(world.transfer(&session, ALICE, 100, 1).unwrap().status);
        assert!(!world.transfer(&session, ALICE, 101, 2).unwrap().status);
        assert_eq!(world.balance(ALICE), U256::from(100));
    }

    #[test]
    fn test_removed_constraint_no_longer_applies() {
        let world = World::new();
        world.add_constraint(REJECTING, Arc::new(FixedConstraint::reject()));
        world.add_constraint(CAP, Arc::new(MaxAmountConstraint::new(U256::from(100))));
        world
            .registry
            .remove_global_constraint(WORKER, REJECTING)
            .unwrap();

        // Swap-remove moved the cap into the first slot.
        assert_eq!(world.registry.global_constraints(), vec![CAP]);

        let session = world.authorize_key(200, 50);
        assert!(world.transfer(&session, ALICE, 60, 1).unwrap().status);
    }

    #[test]
    fn test_unconstrained_path_ignores_constraints() {
        let world = World::new();
        world.add_constraint(REJECTING, Arc::new(FixedConstraint::reject()));
        let session = world.authorize_key(200, 50);
        let data = encode_call(
            selector(signatures::PROCESS_TRANSFERS),
            &[
                Token::AddressArray(vec![ALICE, BOB]),
                Token::UintArray(vec![U256::from(10), U256::from(20)]),
            ],
        );

        assert!(world.execute(&session, REGISTRY, &data, 1).unwrap().status);
        assert_eq!(world.balance(ALICE), U256::from(10));
        assert_eq!(world.balance(BOB), U256::from(20));
        assert!(world.allowance_closed());
    }

    #[test]
    fn test_mismatched_batch_is_rejected_whole() {
        let world = World::new();
        world.registry.allow_transfers(HOLDER);

        let err = world
            .registry
            .process_transfers(HOLDER, &[ALICE, BOB], &[U256::from(10)])
            .unwrap_err();
        assert_eq!(err.kind(), ErrorKind::LengthMismatch);
        assert_eq!(
            err.to_string(),
            "'to' and 'amount' transfer arrays' lengths are not equal."
        );
        assert_eq!(world.balance(ALICE), U256::zero());
    }

    #[test]
    fn test_duplicate_rule_registration() {
        let world = World::new();

        assert_eq!(
            world
                .registry
                .register_rule(WORKER, TRANSFER_RULE_NAME, Address::repeat_byte(0x30), "abi"),
            Err(RegistryError::DuplicateRuleName)
        );
        assert_eq!(
            world
                .registry
                .register_rule(WORKER, "other", TRANSFER_RULE, "abi"),
            Err(RegistryError::DuplicateRuleAddress)
        );
        assert_eq!(world.registry.rule_count(), 1);
        assert_eq!(
            world.registry.rule_by_name(TRANSFER_RULE_NAME).unwrap().address,
            TRANSFER_RULE
        );
    }

    #[test]
    fn test_revoked_worker_loses_administration() {
        let world = World::new();
        world.organization.remove_worker(&WORKER);

        assert_eq!(
            world.registry.add_global_constraint(WORKER, CAP),
            Err(RegistryError::OnlyWorker)
        );
    }

    #[test]
    fn test_unregistered_rule_cannot_move_funds() {
        let world = World::new();
        world.registry.allow_transfers(HOLDER);

        let err = world
            .registry
            .execute_transfers(ALICE, HOLDER, &[ALICE], &[U256::from(1)])
            .unwrap_err();
        assert_eq!(err, RegistryError::OnlyRule);
        assert_eq!(err.kind(), ErrorKind::Authorization);
    }
}
