//! # Token Holder Service
//!
//! Session manager, executable transaction verifier and rule executor
//! behind one API.
//!
//! ## `execute_rule` sequence
//!
//! ```text
//! verify (nonce stored) ─→ allowTransfers() ─→ approve(registry, limit)
//!        ─→ call target (failure captured as status)
//!        ─→ approve(registry, 0) ─→ disallowTransfers() ─→ RuleExecuted
//! ```
//!
//! A fault while opening or closing the allowance undoes the whole
//! invocation, nonce included. A failing target only undoes its own ledger
//! effects.
//!
//! ## Locking
//!
//! Sessions sit behind one `RwLock`, released before any outbound call so
//! the target may call back into the holder. Signed calls and wallet
//! execution hold the ledger's execution scope from start to finish, so
//! their checkpoints never interleave with another thread's.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use rules_telemetry::{
    metric_inc, RULE_EXECUTIONS, SESSIONS_AUTHORIZED, SESSIONS_REVOKED, VERIFICATION_FAILURES,
};
use shared_bus::{ContractEvent, EventPublisher};
use shared_types::abi::{encode_call, Token};
use shared_types::{selector, Address, Contract, EcdsaSignature, Hash, Selector, U256};

use crate::adapters::authorize_session_calldata;
use crate::domain::{
    execute_rule_call_prefix, message_hash, recover_signer, revert_redemption_call_prefix,
    EphemeralKeyRecord, ExecutionReceipt, HolderConfig, SessionBook, VerifiedCall,
    GATEWAY_REVERT_REDEMPTION_SIGNATURE,
};
use crate::errors::HolderError;
use crate::ports::inbound::TokenHolderApi;
use crate::ports::outbound::{
    BlockClock, CallDispatcher, LedgerCheckpoint, MultiSigWallet, TokenLedger, TransferGate,
};

const CONTRACT: &str = "token_holder";

/// Token Holder Service.
///
/// ## Dependencies
///
/// - `T: TokenLedger` - token the holder owns a balance of
/// - `G: TransferGate` - registry transfer flag
/// - `W: MultiSigWallet` - wallet administration
/// - `D: CallDispatcher` - reaches rule, registry and gateway contracts
/// - `B: BlockClock` - current height for expiry
/// - `E: EventPublisher` - audit trail
pub struct TokenHolderService<T, G, W, D, B, E>
where
    T: TokenLedger,
    G: TransferGate,
    W: MultiSigWallet,
    D: CallDispatcher,
    B: BlockClock,
    E: EventPublisher,
{
    config: HolderConfig,
    sessions: RwLock<SessionBook>,
    token: Arc<T>,
    gate: Arc<G>,
    wallet: Arc<W>,
    dispatcher: Arc<D>,
    clock: Arc<B>,
    events: Arc<E>,
}

impl<T, G, W, D, B, E> TokenHolderService<T, G, W, D, B, E>
where
    T: TokenLedger,
    G: TransferGate,
    W: MultiSigWallet,
    D: CallDispatcher,
    B: BlockClock,
    E: EventPublisher,
{
    pub fn new(
        config: HolderConfig,
        token: Arc<T>,
        gate: Arc<G>,
        wallet: Arc<W>,
        dispatcher: Arc<D>,
        clock: Arc<B>,
        events: Arc<E>,
    ) -> Self {
        info!(
            holder = %config.address,
            token = %token.address(),
            registry = %gate.address(),
            "Token holder created"
        );
        Self {
            config,
            sessions: RwLock::new(SessionBook::default()),
            token,
            gate,
            wallet,
            dispatcher,
            clock,
            events,
        }
    }

    fn reject(&self, operation: &'static str, err: HolderError) -> HolderError {
        rules_telemetry::log_revert!(CONTRACT, operation, err, kind = ?err.kind());
        err
    }

    fn only_wallet(&self, caller: &Address, operation: &'static str) -> Result<(), HolderError> {
        if self.wallet.is_wallet(caller) {
            Ok(())
        } else {
            Err(self.reject(operation, HolderError::OnlyWallet))
        }
    }

    /// Authenticates a signed call and stores its nonce.
    fn verify(
        &self,
        operation: &'static str,
        call_prefix: Selector,
        to: Address,
        data: &[u8],
        nonce: U256,
        signature: &EcdsaSignature,
    ) -> Result<VerifiedCall, HolderError> {
        let message_hash = message_hash(self.config.address, to, data, nonce, call_prefix);

        // An unrecoverable signature yields the null signer, which is never active.
        let ephemeral_key = recover_signer(&message_hash, signature).unwrap_or_else(|err| {
            debug!(error = %err, "Signer recovery failed");
            Address::ZERO
        });

        let height = self.clock.current_height();
        let record = self
            .sessions
            .write()
            .consume_nonce(&ephemeral_key, nonce, height)
            .map_err(|err| {
                metric_inc!(VERIFICATION_FAILURES, &[err.metric_label()]);
                self.reject(operation, err)
            })?;

        debug!(key = %ephemeral_key, nonce = %nonce, "Signed call verified");
        Ok(VerifiedCall {
            message_hash,
            ephemeral_key,
            nonce,
            spending_limit: record.spending_limit,
        })
    }

    /// Undoes an `execute_rule` invocation that hit a fault.
    fn unwind(&self, frame: LedgerCheckpoint, verified: &VerifiedCall, err: HolderError) -> HolderError {
        self.token.revert_to(frame);
        if let Err(revert) = self.gate.disallow_transfers(self.config.address) {
            warn!(reason = %revert, "Could not clear the transfer flag while unwinding");
        }
        self.sessions
            .write()
            .restore_nonce(&verified.ephemeral_key, verified.nonce);
        self.reject("execute_rule", err)
    }

    /// Calls `to`, keeping its ledger effects only when it succeeds.
    fn call_target(&self, to: Address, value: U256, data: &[u8]) -> bool {
        let checkpoint = self.token.checkpoint();
        match self.dispatcher.dispatch(self.config.address, to, value, data) {
            Ok(_) => {
                self.token.commit(checkpoint);
                true
            }
            Err(revert) => {
                self.token.revert_to(checkpoint);
                debug!(to = %to, reason = %revert, "Target call failed");
                false
            }
        }
    }
}

impl<T, G, W, D, B, E> TokenHolderApi for TokenHolderService<T, G, W, D, B, E>
where
    T: TokenLedger,
    G: TransferGate,
    W: MultiSigWallet,
    D: CallDispatcher,
    B: BlockClock,
    E: EventPublisher,
{
    #[instrument(skip(self), fields(caller = %caller, key = %ephemeral_key))]
    fn submit_authorize_session(
        &self,
        caller: Address,
        ephemeral_key: Address,
        spending_limit: U256,
        expiration_height: u64,
    ) -> Result<u64, HolderError> {
        self.only_wallet(&caller, "submit_authorize_session")?;
        let height = self.clock.current_height();
        self.sessions
            .read()
            .check_authorizable(&ephemeral_key, expiration_height, height)
            .map_err(|e| self.reject("submit_authorize_session", e))?;

        let payload = authorize_session_calldata(ephemeral_key, spending_limit, expiration_height);
        let transaction_id = self.wallet.add_transaction(self.config.address, payload);

        info!(transaction_id, "Session authorization submitted");
        self.events.publish(ContractEvent::SessionAuthorizationSubmitted {
            holder: self.config.address,
            transaction_id,
            ephemeral_key,
            spending_limit,
            expiration_height,
        });

        self.confirm_transaction(caller, transaction_id)?;
        Ok(transaction_id)
    }

    #[instrument(skip(self), fields(caller = %caller, key = %ephemeral_key))]
    fn authorize_session(
        &self,
        caller: Address,
        ephemeral_key: Address,
        spending_limit: U256,
        expiration_height: u64,
    ) -> Result<(), HolderError> {
        if caller != self.config.address {
            return Err(self.reject("authorize_session", HolderError::OnlyMultisig));
        }
        let height = self.clock.current_height();
        self.sessions
            .write()
            .authorize(ephemeral_key, spending_limit, expiration_height, height)
            .map_err(|e| self.reject("authorize_session", e))?;

        metric_inc!(SESSIONS_AUTHORIZED);
        info!(
            spending_limit = %spending_limit,
            expiration_height,
            "Session authorized"
        );
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, key = %ephemeral_key))]
    fn revoke_session(&self, caller: Address, ephemeral_key: Address) -> Result<(), HolderError> {
        self.only_wallet(&caller, "revoke_session")?;
        self.sessions
            .write()
            .revoke(&ephemeral_key)
            .map_err(|e| self.reject("revoke_session", e))?;

        metric_inc!(SESSIONS_REVOKED);
        info!("Session revoked");
        self.events.publish(ContractEvent::SessionRevoked {
            holder: self.config.address,
            ephemeral_key,
        });
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller))]
    fn confirm_transaction(&self, caller: Address, id: u64) -> Result<bool, HolderError> {
        self.only_wallet(&caller, "confirm_transaction")?;
        let _scope = self.token.enter();
        let ready = self
            .wallet
            .confirm_transaction(caller, id)
            .map_err(|revert| self.reject("confirm_transaction", HolderError::Wallet(revert)))?;

        let Some(transaction) = ready else {
            debug!(id, "Confirmation recorded");
            return Ok(false);
        };

        let outcome = if transaction.destination == self.config.address {
            self.call(self.config.address, U256::zero(), &transaction.data)
        } else {
            self.dispatcher.dispatch(
                self.config.address,
                transaction.destination,
                U256::zero(),
                &transaction.data,
            )
        };

        let executed = match outcome {
            Ok(_) => true,
            Err(revert) => {
                warn!(id, reason = %revert, "Wallet transaction failed");
                false
            }
        };
        self.wallet.record_execution(id, executed);
        Ok(executed)
    }

    #[instrument(skip(self, data, signature), fields(caller = %caller, to = %to, nonce = %nonce))]
    fn execute_rule(
        &self,
        caller: Address,
        value: U256,
        to: Address,
        data: &[u8],
        nonce: U256,
        signature: EcdsaSignature,
    ) -> Result<ExecutionReceipt, HolderError> {
        if to == self.token.address() {
            return Err(self.reject("execute_rule", HolderError::ToIsToken));
        }
        let _scope = self.token.enter();
        let verified = self.verify(
            "execute_rule",
            execute_rule_call_prefix(),
            to,
            data,
            nonce,
            &signature,
        )?;

        let holder = self.config.address;
        let registry = self.gate.address();
        let frame = self.token.checkpoint();

        if let Err(revert) = self.gate.allow_transfers(holder) {
            return Err(self.unwind(frame, &verified, HolderError::Registry(revert)));
        }
        if let Err(revert) = self.token.approve(holder, registry, verified.spending_limit) {
            return Err(self.unwind(frame, &verified, HolderError::Token(revert)));
        }

        let status = self.call_target(to, value, data);

        // Cleanup runs whatever the target did.
        if let Err(revert) = self.token.approve(holder, registry, U256::zero()) {
            return Err(self.unwind(frame, &verified, HolderError::Token(revert)));
        }
        if let Err(revert) = self.gate.disallow_transfers(holder) {
            return Err(self.unwind(frame, &verified, HolderError::Registry(revert)));
        }
        self.token.commit(frame);

        metric_inc!(RULE_EXECUTIONS, &[if status { "success" } else { "call_failed" }]);
        info!(key = %verified.ephemeral_key, status, "Rule executed");
        self.events.publish(ContractEvent::RuleExecuted {
            holder,
            to,
            function_selector: Selector::from_calldata(data),
            ephemeral_key: verified.ephemeral_key,
            nonce: verified.nonce,
            message_hash: verified.message_hash,
            status,
        });

        Ok(ExecutionReceipt {
            message_hash: verified.message_hash,
            ephemeral_key: verified.ephemeral_key,
            nonce: verified.nonce,
            status,
        })
    }

    #[instrument(skip(self, signature), fields(caller = %caller, nonce = %nonce))]
    fn revert_redemption(
        &self,
        caller: Address,
        value: U256,
        redeem_message_hash: Hash,
        nonce: U256,
        signature: EcdsaSignature,
    ) -> Result<ExecutionReceipt, HolderError> {
        let gateway = self.token.co_gateway();
        let data = encode_call(
            selector(GATEWAY_REVERT_REDEMPTION_SIGNATURE),
            &[Token::FixedBytes(redeem_message_hash)],
        );
        let _scope = self.token.enter();
        let verified = self.verify(
            "revert_redemption",
            revert_redemption_call_prefix(),
            gateway,
            &data,
            nonce,
            &signature,
        )?;

        let status = self.call_target(gateway, value, &data);

        info!(key = %verified.ephemeral_key, redeem_message_hash = %redeem_message_hash, status, "Redemption revert forwarded");
        self.events.publish(ContractEvent::RedemptionReverted {
            holder: self.config.address,
            redeem_message_hash,
            ephemeral_key: verified.ephemeral_key,
            status,
        });

        Ok(ExecutionReceipt {
            message_hash: verified.message_hash,
            ephemeral_key: verified.ephemeral_key,
            nonce: verified.nonce,
            status,
        })
    }

    fn ephemeral_key(&self, ephemeral_key: Address) -> EphemeralKeyRecord {
        self.sessions.read().record(&ephemeral_key)
    }

    fn is_key_active(&self, ephemeral_key: Address) -> bool {
        self.sessions
            .read()
            .record(&ephemeral_key)
            .is_active(self.clock.current_height())
    }

    fn message_hash(&self, call_prefix: Selector, to: Address, data: &[u8], nonce: U256) -> Hash {
        message_hash(self.config.address, to, data, nonce, call_prefix)
    }

    fn address(&self) -> Address {
        self.config.address
    }

    fn token_address(&self) -> Address {
        self.token.address()
    }

    fn registry_address(&self) -> Address {
        self.gate.address()
    }
}
