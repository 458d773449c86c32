//! # Concurrent Invocations
//!
//! Every signed call opens ledger checkpoints and a transfer window on the
//! registry. Calls relayed from different threads must neither undo each
//! other's committed transfers nor close each other's windows.

#[cfg(test)]
mod tests {
    use std::sync::mpsc::{self, Receiver, Sender};
    use std::sync::Arc;
    use std::thread;
    use std::time::Duration;

    use parking_lot::Mutex;
    use shared_bus::ContractEvent;
    use shared_types::{Address, Bytes, Contract, Revert, U256};
    use tr_01_rule_registry::{RuleRegistryApi, TransferRule};
    use tr_02_token_holder::test_helpers::{generate_ephemeral_key, sign_call};
    use tr_02_token_holder::{execute_rule_call_prefix, TokenHolderApi};

    use crate::fixtures::addresses::*;
    use crate::fixtures::{Registry, World};

    const STALLING: Address = Address::repeat_byte(0xd0);
    const STALL: Duration = Duration::from_millis(100);

    /// Announces that it is running, stalls, then optionally moves funds
    /// and finally succeeds or reverts.
    struct StallingTarget {
        entered: Mutex<Option<Sender<()>>>,
        transfer: Option<Arc<Registry>>,
        fail: bool,
    }

    impl StallingTarget {
        fn new(transfer: Option<Arc<Registry>>, fail: bool) -> (Arc<Self>, Receiver<()>) {
            let (entered, rx) = mpsc::channel();
            let target = Arc::new(Self {
                entered: Mutex::new(Some(entered)),
                transfer,
                fail,
            });
            (target, rx)
        }
    }

    impl Contract for StallingTarget {
        fn call(&self, _caller: Address, _value: U256, _data: &[u8]) -> Result<Bytes, Revert> {
            if let Some(entered) = self.entered.lock().take() {
                let _ = entered.send(());
            }
            thread::sleep(STALL);
            if let Some(registry) = &self.transfer {
                registry.execute_transfers(STALLING, HOLDER, &[BOB], &[U256::from(10)])?;
            }
            if self.fail {
                Err(Revert::new("stalled"))
            } else {
                Ok(Bytes::new())
            }
        }
    }

    #[test]
    fn test_failed_call_does_not_undo_another_holders_transfer() {
        let world = World::new();
        let session = world.authorize_key(200, 50);
        let (target, entered) = StallingTarget::new(None, true);
        world.router.register(STALLING, target);

        let second = world.deploy_holder(SECOND_HOLDER, 500);
        let (key, ephemeral_key) = generate_ephemeral_key();
        second
            .submit_authorize_session(WALLET_A, ephemeral_key, U256::from(200), world.height() + 50)
            .unwrap();
        let data = TransferRule::transfer_from_calldata(SECOND_HOLDER, ALICE, U256::from(50));
        let signature = sign_call(
            SECOND_HOLDER,
            execute_rule_call_prefix(),
            TRANSFER_RULE,
            &data,
            U256::one(),
            &key,
        );

        let (stalled, transferred) = thread::scope(|threads| {
            let world = &world;
            let session = &session;
            let stalled = threads.spawn(move || world.execute(session, STALLING, b"", 1));

            entered.recv().unwrap();
            let transferred = second
                .execute_rule(RELAYER, U256::zero(), TRANSFER_RULE, &data, U256::one(), signature)
                .unwrap();
            (stalled.join().unwrap().unwrap(), transferred)
        });

        assert!(!stalled.status);
        assert!(transferred.status);
        assert_eq!(world.balance(ALICE), U256::from(50));
        assert_eq!(world.balance(SECOND_HOLDER), U256::from(450));
        assert_eq!(world.balance(HOLDER), U256::from(500));

        let second_status: Vec<bool> = world
            .rule_executions()
            .into_iter()
            .filter_map(|event| match event {
                ContractEvent::RuleExecuted { holder, status, .. } if holder == SECOND_HOLDER => {
                    Some(status)
                }
                _ => None,
            })
            .collect();
        assert_eq!(second_status, vec![true]);
    }

    #[test]
    fn test_window_cannot_be_closed_from_another_thread() {
        let world = World::new();
        let (target, entered) = StallingTarget::new(Some(world.registry.clone()), false);
        world
            .registry
            .register_rule(WORKER, "stalling", STALLING, "abi")
            .unwrap();
        world.router.register(STALLING, target);
        let session = world.authorize_key(200, 50);

        let receipt = thread::scope(|threads| {
            let world = &world;
            let session = &session;
            let running = threads.spawn(move || world.execute(session, STALLING, b"", 1));

            entered.recv().unwrap();
            // Waits for the open window to finish instead of cutting it short.
            world.registry.disallow_transfers(HOLDER);
            running.join().unwrap().unwrap()
        });

        assert!(receipt.status);
        assert_eq!(world.balance(BOB), U256::from(10));
        assert!(world.allowance_closed());
    }
}
