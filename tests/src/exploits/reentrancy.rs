//! # Reentrancy During the Allowance Window
//!
//! While a signed call runs, the holder's registry flag is set and the
//! registry holds an allowance. These targets try to abuse that window.

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use parking_lot::Mutex;
    use shared_types::{Address, Bytes, Contract, EcdsaSignature, Revert, U256};
    use tr_01_rule_registry::{RegistryError, RuleRegistryApi};
    use tr_02_token_holder::{ExecutionReceipt, HolderError, TokenHolderApi};

    use crate::fixtures::addresses::*;
    use crate::fixtures::{Holder, Registry, World};

    const ATTACKER: Address = Address::repeat_byte(0xa0);

    /// Replays the signed call it is invoked by, from inside that call.
    struct ReplayingTarget {
        holder: Arc<Holder>,
        pending: Mutex<Option<(Vec<u8>, EcdsaSignature)>>,
        observed: Mutex<Option<Result<ExecutionReceipt, HolderError>>>,
    }

    impl Contract for ReplayingTarget {
        fn call(&self, _caller: Address, _value: U256, _data: &[u8]) -> Result<Bytes, Revert> {
            let pending = self.pending.lock().take();
            if let Some((payload, signature)) = pending {
                let result = self.holder.execute_rule(
                    ATTACKER,
                    U256::zero(),
                    ATTACKER,
                    &payload,
                    U256::one(),
                    signature,
                );
                *self.observed.lock() = Some(result);
            }
            Ok(Bytes::new())
        }
    }

    /// Tries to pull holder funds to itself through the registry.
    struct DrainingTarget {
        registry: Arc<Registry>,
        observed: Mutex<Vec<RegistryError>>,
    }

    impl Contract for DrainingTarget {
        fn call(&self, _caller: Address, _value: U256, _data: &[u8]) -> Result<Bytes, Revert> {
            let attempts = [
                self.registry
                    .execute_transfers(ATTACKER, HOLDER, &[ATTACKER], &[U256::from(10)]),
                self.registry
                    .process_transfer(ATTACKER, ATTACKER, U256::from(10)),
            ];
            self.observed
                .lock()
                .extend(attempts.into_iter().filter_map(Result::err));
            Ok(Bytes::new())
        }
    }

    /// A whitelisted rule that runs two constrained batches per call.
    struct DoubleDipRule {
        registry: Arc<Registry>,
        second: Mutex<Option<Result<(), RegistryError>>>,
    }

    impl Contract for DoubleDipRule {
        fn call(&self, _caller: Address, _value: U256, _data: &[u8]) -> Result<Bytes, Revert> {
            self.registry
                .execute_transfers(ATTACKER, HOLDER, &[BOB], &[U256::from(10)])?;
            let second = self
                .registry
                .execute_transfers(ATTACKER, HOLDER, &[BOB], &[U256::from(10)]);
            *self.second.lock() = Some(second);
            Ok(Bytes::new())
        }
    }

    #[test]
    fn test_reentrant_replay_sees_consumed_nonce() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let payload = b"\x12\x34\x56\x78".to_vec();
        let signature = world.sign_execute(&session, ATTACKER, &payload, 1);

        let target = Arc::new(ReplayingTarget {
            holder: world.holder.clone(),
            pending: Mutex::new(Some((payload.clone(), signature))),
            observed: Mutex::new(None),
        });
        world.router.register(ATTACKER, target.clone());

        let receipt = world.execute(&session, ATTACKER, &payload, 1).unwrap();

        assert!(receipt.status);
        assert_eq!(*target.observed.lock(), Some(Err(HolderError::InvalidNonce)));
        assert_eq!(world.rule_executions().len(), 1);
        assert!(world.allowance_closed());
    }

    #[test]
    fn test_unregistered_target_cannot_spend_the_window() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let target = Arc::new(DrainingTarget {
            registry: world.registry.clone(),
            observed: Mutex::new(Vec::new()),
        });
        world.router.register(ATTACKER, target.clone());

        assert!(world.execute(&session, ATTACKER, b"", 1).unwrap().status);

        assert_eq!(
            *target.observed.lock(),
            vec![RegistryError::OnlyRule, RegistryError::TransfersNotAllowed]
        );
        assert_eq!(world.balance(ATTACKER), U256::zero());
        assert_eq!(world.balance(HOLDER), U256::from(500));
    }

    #[test]
    fn test_one_constrained_batch_per_window() {
        let world = World::new();
        let rule = Arc::new(DoubleDipRule {
            registry: world.registry.clone(),
            second: Mutex::new(None),
        });
        world
            .registry
            .register_rule(WORKER, "double-dip", ATTACKER, "abi")
            .unwrap();
        world.router.register(ATTACKER, rule.clone());
        let session = world.authorize_key(200, 50);

        assert!(world.execute(&session, ATTACKER, b"", 1).unwrap().status);

        assert_eq!(
            *rule.second.lock(),
            Some(Err(RegistryError::TransfersNotAllowed))
        );
        assert_eq!(world.balance(BOB), U256::from(10));
        assert!(world.allowance_closed());
    }
}
