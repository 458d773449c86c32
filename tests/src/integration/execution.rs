//! # Signed Rule Execution
//!
//! Relayer → holder → rule → registry → token, and the allowance window
//! around it.

#[cfg(test)]
mod tests {
    use shared_bus::ContractEvent;
    use shared_types::abi::{encode_call, Token};
    use shared_types::{selector, ErrorKind, Selector, TokenLedger, U256};
    use tr_01_rule_registry::adapters::signatures;
    use tr_01_rule_registry::TransferRule;
    use tr_02_token_holder::{execute_rule_call_prefix, HolderError, TokenHolderApi};

    use crate::fixtures::addresses::*;
    use crate::fixtures::World;

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_signed_transfer_through_rule() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let data = TransferRule::transfer_from_calldata(HOLDER, ALICE, U256::from(50));

        let receipt = world.execute(&session, TRANSFER_RULE, &data, 1).unwrap();

        assert!(receipt.status);
        assert_eq!(world.balance(ALICE), U256::from(50));
        assert_eq!(world.balance(HOLDER), U256::from(450));
        assert_eq!(world.holder.ephemeral_key(session.address).nonce, U256::one());
        assert!(world.allowance_closed());

        assert_eq!(
            world.rule_executions(),
            vec![ContractEvent::RuleExecuted {
                holder: HOLDER,
                to: TRANSFER_RULE,
                function_selector: selector("transferFrom(address,address,uint256)"),
                ephemeral_key: session.address,
                nonce: U256::one(),
                message_hash: world.holder.message_hash(
                    execute_rule_call_prefix(),
                    TRANSFER_RULE,
                    &data,
                    U256::one(),
                ),
                status: true,
            }]
        );
    }

    #[test]
    fn test_sequential_nonces() {
        let world = World::new();
        let session = world.authorize_key(200, 50);

        for nonce in 1..=3 {
            assert!(world.transfer(&session, BOB, 10, nonce).unwrap().status);
        }

        assert_eq!(world.balance(BOB), U256::from(30));
        assert_eq!(world.holder.ephemeral_key(session.address).nonce, U256::from(3));
        assert_eq!(world.rule_executions().len(), 3);
    }

    #[test]
    fn test_signed_call_straight_to_registry() {
        // The unconstrained path: the holder's own flag lets it move funds.
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let data = encode_call(
            selector(signatures::PROCESS_TRANSFER),
            &[Token::Address(ALICE), Token::Uint(U256::from(30))],
        );

        let receipt = world.execute(&session, REGISTRY, &data, 1).unwrap();

        assert!(receipt.status);
        assert_eq!(world.balance(ALICE), U256::from(30));
        assert!(world.allowance_closed());
    }

    // =========================================================================
    // REPORTED FAILURES
    // =========================================================================

    #[test]
    fn test_spending_limit_bounds_one_execution() {
        let world = World::new();
        let session = world.authorize_key(200, 50);

        // Balance covers it; the allowance does not.
        let receipt = world.transfer(&session, ALICE, 300, 1).unwrap();

        assert!(!receipt.status);
        assert_eq!(world.balance(HOLDER), U256::from(500));
        assert_eq!(world.balance(ALICE), U256::zero());
        assert_eq!(world.holder.ephemeral_key(session.address).nonce, U256::one());
        assert!(world.allowance_closed());
    }

    #[test]
    fn test_failed_call_does_not_block_next_nonce() {
        let world = World::new();
        let session = world.authorize_key(200, 50);

        assert!(!world.transfer(&session, ALICE, 1_000, 1).unwrap().status);
        assert!(world.transfer(&session, ALICE, 100, 2).unwrap().status);

        assert_eq!(world.balance(ALICE), U256::from(100));
        let statuses: Vec<bool> = world
            .rule_executions()
            .into_iter()
            .map(|event| match event {
                ContractEvent::RuleExecuted { status, .. } => status,
                _ => unreachable!("filtered to rule executions"),
            })
            .collect();
        assert_eq!(statuses, vec![false, true]);
    }

    #[test]
    fn test_unknown_function_on_rule_reports_failure() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let data = encode_call(selector("burn(uint256)"), &[Token::Uint(U256::one())]);

        let receipt = world.execute(&session, TRANSFER_RULE, &data, 1).unwrap();

        assert!(!receipt.status);
        match &world.rule_executions()[0] {
            ContractEvent::RuleExecuted {
                function_selector, ..
            } => assert_eq!(*function_selector, selector("burn(uint256)")),
            other => panic!("unexpected event {other:?}"),
        }
    }

    #[test]
    fn test_short_payload_selector_is_zero_padded() {
        let world = World::new();
        let session = world.authorize_key(200, 50);

        world.execute(&session, ALICE, &[0xab, 0xcd], 1).unwrap();

        match &world.rule_executions()[0] {
            ContractEvent::RuleExecuted {
                function_selector, ..
            } => assert_eq!(*function_selector, Selector::from_calldata(&[0xab, 0xcd])),
            other => panic!("unexpected event {other:?}"),
        }
    }

    // =========================================================================
    // REJECTIONS
    // =========================================================================

    #[test]
    fn test_token_is_not_a_valid_target() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let approve = encode_call(
            selector("approve(address,uint256)"),
            &[Token::Address(ALICE), Token::Uint(U256::from(500))],
        );

        let err = world.execute(&session, TOKEN, &approve, 1).unwrap_err();

        assert_eq!(err, HolderError::ToIsToken);
        assert_eq!(err.kind(), ErrorKind::Precondition);
        assert_eq!(world.token.allowance(HOLDER, ALICE), U256::zero());
        assert_eq!(world.holder.ephemeral_key(session.address).nonce, U256::zero());
    }

    #[test]
    fn test_rejection_leaves_no_event() {
        let world = World::new();
        let session = world.authorize_key(200, 50);

        assert!(world.transfer(&session, ALICE, 10, 5).is_err());
        assert!(world.rule_executions().is_empty());
        assert!(world.allowance_closed());
        assert_eq!(world.balance(ALICE), U256::zero());
    }
}
