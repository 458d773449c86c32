//! # Signature Replay
//!
//! A signed call authorizes exactly one action: one holder, one target,
//! one payload, one operation, one nonce.

#[cfg(test)]
mod tests {
    use shared_types::abi::{encode_call, Token};
    use shared_types::{selector, Address, EcdsaSignature, ErrorKind, Hash, U256};
    use tr_01_rule_registry::TransferRule;
    use tr_02_token_holder::test_helpers::sign_call;
    use tr_02_token_holder::{
        execute_rule_call_prefix, revert_redemption_call_prefix, HolderError, TokenHolderApi,
    };

    use crate::fixtures::addresses::*;
    use crate::fixtures::World;

    /// secp256k1 group order.
    const SECP256K1_ORDER: [u8; 32] = [
        0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF, 0xFF,
        0xFE, 0xBA, 0xAE, 0xDC, 0xE6, 0xAF, 0x48, 0xA0, 0x3B, 0xBF, 0xD2, 0x5E, 0x8C, 0xD0, 0x36,
        0x41, 0x41,
    ];

    /// The other valid signature for the same message: `(r, n - s)` with
    /// the recovery id flipped.
    fn malleate(signature: EcdsaSignature) -> EcdsaSignature {
        let order = U256::from_big_endian(&SECP256K1_ORDER);
        let s = U256::from_big_endian(&signature.s);
        let mut high_s = [0u8; 32];
        (order - s).to_big_endian(&mut high_s);
        let v = if signature.v == 27 { 28 } else { 27 };
        EcdsaSignature::new(v, signature.r, high_s)
    }

    fn transfer_data(amount: u64) -> Vec<u8> {
        TransferRule::transfer_from_calldata(HOLDER, ALICE, U256::from(amount))
    }

    #[test]
    fn test_replayed_nonce_is_rejected() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let data = transfer_data(50);
        let signature = world.sign_execute(&session, TRANSFER_RULE, &data, 1);

        world
            .holder
            .execute_rule(RELAYER, U256::zero(), TRANSFER_RULE, &data, U256::one(), signature)
            .unwrap();
        let err = world
            .holder
            .execute_rule(BOB, U256::zero(), TRANSFER_RULE, &data, U256::one(), signature)
            .unwrap_err();

        assert_eq!(err, HolderError::InvalidNonce);
        assert_eq!(err.kind(), ErrorKind::Nonce);
        assert_eq!(world.balance(ALICE), U256::from(50));
        assert_eq!(world.balance(HOLDER), U256::from(450));
    }

    #[test]
    fn test_signature_is_bound_to_holder() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let data = transfer_data(50);
        let other_holder = Address::repeat_byte(0x99);
        let signature = sign_call(
            other_holder,
            execute_rule_call_prefix(),
            TRANSFER_RULE,
            &data,
            U256::one(),
            &session.key,
        );

        assert_eq!(
            world
                .holder
                .execute_rule(RELAYER, U256::zero(), TRANSFER_RULE, &data, U256::one(), signature),
            Err(HolderError::InactiveKey)
        );
    }

    #[test]
    fn test_signature_is_bound_to_payload() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let signature = world.sign_execute(&session, TRANSFER_RULE, &transfer_data(5), 1);

        // Relayer inflates the amount.
        let tampered = transfer_data(200);
        assert_eq!(
            world.holder.execute_rule(
                RELAYER,
                U256::zero(),
                TRANSFER_RULE,
                &tampered,
                U256::one(),
                signature
            ),
            Err(HolderError::InactiveKey)
        );
        assert_eq!(world.balance(ALICE), U256::zero());
    }

    #[test]
    fn test_signature_is_bound_to_target() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let data = transfer_data(5);
        let signature = world.sign_execute(&session, TRANSFER_RULE, &data, 1);

        assert_eq!(
            world
                .holder
                .execute_rule(RELAYER, U256::zero(), REGISTRY, &data, U256::one(), signature),
            Err(HolderError::InactiveKey)
        );
    }

    #[test]
    fn test_signature_is_bound_to_operation() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let hash = Hash::new([0x61; 32]);
        world.gateway.add_redemption(hash);
        let data = encode_call(
            selector("revertRedemption(bytes32)"),
            &[Token::FixedBytes(hash)],
        );

        // Signed for revertRedemption, submitted as executeRule to the gateway.
        let signature = world.sign(&session, revert_redemption_call_prefix(), GATEWAY, &data, 1);
        assert_eq!(
            world
                .holder
                .execute_rule(RELAYER, U256::zero(), GATEWAY, &data, U256::one(), signature),
            Err(HolderError::InactiveKey)
        );
        assert!(world.gateway.is_pending(&hash));
    }

    #[test]
    fn test_malleated_signature_is_rejected() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let data = transfer_data(50);
        let signature = world.sign_execute(&session, TRANSFER_RULE, &data, 1);

        assert_eq!(
            world.holder.execute_rule(
                RELAYER,
                U256::zero(),
                TRANSFER_RULE,
                &data,
                U256::one(),
                malleate(signature)
            ),
            Err(HolderError::InactiveKey)
        );
        assert!(world
            .holder
            .execute_rule(RELAYER, U256::zero(), TRANSFER_RULE, &data, U256::one(), signature)
            .unwrap()
            .status);
    }

    #[test]
    fn test_racing_relayers_get_one_success() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let data = transfer_data(50);
        let signature = world.sign_execute(&session, TRANSFER_RULE, &data, 1);

        let results: Vec<_> = std::thread::scope(|scope| {
            let handles: Vec<_> = [RELAYER, BOB]
                .into_iter()
                .map(|relayer| {
                    let world = &world;
                    let data = &data;
                    scope.spawn(move || {
                        world.holder.execute_rule(
                            relayer,
                            U256::zero(),
                            TRANSFER_RULE,
                            data,
                            U256::one(),
                            signature,
                        )
                    })
                })
                .collect();
            handles
                .into_iter()
                .map(|handle| handle.join().unwrap())
                .collect()
        });

        assert_eq!(results.iter().filter(|result| result.is_ok()).count(), 1);
        assert!(results.contains(&Err(HolderError::InvalidNonce)));
        assert_eq!(world.balance(ALICE), U256::from(50));
    }
}
