//! # Rule Registry Service
//!
//! Wires the registry domain to its ports.
//!
//! ## Transfer paths
//!
//! - [`RuleRegistryApi::execute_transfers`]: registered rules only; every
//!   global constraint must accept the batch; all-or-nothing through a
//!   ledger checkpoint; clears the holder's flag on success only.
//! - [`RuleRegistryApi::process_transfer`] / `process_transfers`: anyone
//!   whose own flag is set; no constraint checks; the flag is left for the
//!   holder to clear.
//!
//! ## Locking
//!
//! State sits behind one `RwLock`. The lock is never held across a call
//! into a global constraint or the token, so either may call back into the
//! registry. Flag changes and transfer batches run inside the ledger's
//! execution scope.

use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

use rules_telemetry::{metric_inc, CONSTRAINT_REJECTIONS, TRANSFER_BATCHES};
use shared_bus::{ContractEvent, EventPublisher};
use shared_types::{Address, U256};

use crate::domain::{invariant_batch_lengths_match, RegistryConfig, RegistryState, RuleRecord};
use crate::errors::RegistryError;
use crate::ports::inbound::RuleRegistryApi;
use crate::ports::outbound::{ConstraintDirectory, TokenLedger, WorkerOrganization};

const CONTRACT: &str = "rule_registry";

/// Rule Registry Service.
///
/// ## Dependencies
///
/// - `T: TokenLedger` - token the registry moves funds on
/// - `O: WorkerOrganization` - worker role for administration
/// - `C: ConstraintDirectory` - resolves global constraint addresses
/// - `E: EventPublisher` - audit trail
pub struct RuleRegistryService<T, O, C, E>
where
    T: TokenLedger,
    O: WorkerOrganization,
    C: ConstraintDirectory,
    E: EventPublisher,
{
    config: RegistryConfig,
    state: RwLock<RegistryState>,
    token: Arc<T>,
    organization: Arc<O>,
    constraints: Arc<C>,
    events: Arc<E>,
}

impl<T, O, C, E> RuleRegistryService<T, O, C, E>
where
    T: TokenLedger,
    O: WorkerOrganization,
    C: ConstraintDirectory,
    E: EventPublisher,
{
    pub fn new(
        config: RegistryConfig,
        token: Arc<T>,
        organization: Arc<O>,
        constraints: Arc<C>,
        events: Arc<E>,
    ) -> Self {
        info!(registry = %config.address, token = %token.address(), "Rule registry created");
        Self {
            config,
            state: RwLock::new(RegistryState::default()),
            token,
            organization,
            constraints,
            events,
        }
    }

    /// Address the registry is deployed at.
    pub fn address(&self) -> Address {
        self.config.address
    }

    /// Address of the token the registry moves funds on.
    pub fn token_address(&self) -> Address {
        self.token.address()
    }

    fn reject(&self, operation: &'static str, err: RegistryError) -> RegistryError {
        rules_telemetry::log_revert!(CONTRACT, operation, err, kind = ?err.kind());
        err
    }

    fn only_worker(&self, caller: &Address, operation: &'static str) -> Result<(), RegistryError> {
        if self.organization.is_worker(caller) {
            Ok(())
        } else {
            Err(self.reject(operation, RegistryError::OnlyWorker))
        }
    }

    fn require_allowed(&self, account: &Address, operation: &'static str) -> Result<(), RegistryError> {
        if self.state.read().allowed.is_allowed(account) {
            Ok(())
        } else {
            Err(self.reject(operation, RegistryError::TransfersNotAllowed))
        }
    }

    /// Runs `transferFrom` for every pair under one ledger checkpoint.
    fn transfer_batch(
        &self,
        from: Address,
        tos: &[Address],
        amounts: &[U256],
    ) -> Result<(), RegistryError> {
        let checkpoint = self.token.checkpoint();
        for (to, amount) in tos.iter().zip(amounts) {
            if let Err(revert) = self
                .token
                .transfer_from(self.config.address, from, *to, *amount)
            {
                self.token.revert_to(checkpoint);
                warn!(from = %from, to = %to, amount = %amount, reason = %revert, "Transfer batch rolled back");
                return Err(RegistryError::Token(revert));
            }
        }
        self.token.commit(checkpoint);
        Ok(())
    }
}

impl<T, O, C, E> RuleRegistryApi for RuleRegistryService<T, O, C, E>
where
    T: TokenLedger,
    O: WorkerOrganization,
    C: ConstraintDirectory,
    E: EventPublisher,
{
    #[instrument(skip(self, abi), fields(caller = %caller, rule = %address))]
    fn register_rule(
        &self,
        caller: Address,
        name: &str,
        address: Address,
        abi: &str,
    ) -> Result<usize, RegistryError> {
        self.only_worker(&caller, "register_rule")?;

        let index = self
            .state
            .write()
            .rules
            .register(name, address, abi)
            .map_err(|e| self.reject("register_rule", e))?;

        info!(index, name, "Rule registered");
        self.events.publish(ContractEvent::RuleRegistered {
            registry: self.config.address,
            worker: caller,
            rule_name: name.to_string(),
            rule_address: address,
        });
        Ok(index)
    }

    fn allow_transfers(&self, caller: Address) {
        let _scope = self.token.enter();
        self.state.write().allowed.allow(caller);
        debug!(account = %caller, "Transfers allowed");
    }

    fn disallow_transfers(&self, caller: Address) {
        let _scope = self.token.enter();
        self.state.write().allowed.disallow(caller);
        debug!(account = %caller, "Transfers disallowed");
    }

    #[instrument(skip(self, tos, amounts), fields(caller = %caller, from = %from, batch = tos.len()))]
    fn execute_transfers(
        &self,
        caller: Address,
        from: Address,
        tos: &[Address],
        amounts: &[U256],
    ) -> Result<(), RegistryError> {
        let _scope = self.token.enter();
        if !self.state.read().rules.is_rule(&caller) {
            return Err(self.reject("execute_transfers", RegistryError::OnlyRule));
        }
        self.require_allowed(&from, "execute_transfers")?;

        let accepted = self
            .check_global_constraints(from, tos, amounts)
            .map_err(|e| self.reject("execute_transfers", e))?;
        if !accepted {
            metric_inc!(CONSTRAINT_REJECTIONS);
            return Err(self.reject("execute_transfers", RegistryError::ConstraintsNotFulfilled));
        }

        // A failed batch leaves `from`'s flag set.
        self.transfer_batch(from, tos, amounts)
            .map_err(|e| self.reject("execute_transfers", e))?;
        self.state.write().allowed.disallow(from);

        metric_inc!(TRANSFER_BATCHES, &["execute"]);
        info!("Transfers executed");
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, to = %to))]
    fn process_transfer(
        &self,
        caller: Address,
        to: Address,
        amount: U256,
    ) -> Result<(), RegistryError> {
        self.process_transfers(caller, &[to], &[amount])
    }

    #[instrument(skip(self, tos, amounts), fields(caller = %caller, batch = tos.len()))]
    fn process_transfers(
        &self,
        caller: Address,
        tos: &[Address],
        amounts: &[U256],
    ) -> Result<(), RegistryError> {
        let _scope = self.token.enter();
        self.require_allowed(&caller, "process_transfers")?;
        if !invariant_batch_lengths_match(tos, amounts) {
            return Err(self.reject("process_transfers", RegistryError::LengthMismatch));
        }

        self.transfer_batch(caller, tos, amounts)
            .map_err(|e| self.reject("process_transfers", e))?;

        metric_inc!(TRANSFER_BATCHES, &["process"]);
        info!("Transfers processed");
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, constraint = %constraint))]
    fn add_global_constraint(
        &self,
        caller: Address,
        constraint: Address,
    ) -> Result<(), RegistryError> {
        self.only_worker(&caller, "add_global_constraint")?;
        self.state
            .write()
            .constraints
            .add(constraint)
            .map_err(|e| self.reject("add_global_constraint", e))?;

        info!("Global constraint added");
        self.events.publish(ContractEvent::GlobalConstraintAdded {
            registry: self.config.address,
            global_constraint: constraint,
        });
        Ok(())
    }

    #[instrument(skip(self), fields(caller = %caller, constraint = %constraint))]
    fn remove_global_constraint(
        &self,
        caller: Address,
        constraint: Address,
    ) -> Result<(), RegistryError> {
        self.only_worker(&caller, "remove_global_constraint")?;
        self.state
            .write()
            .constraints
            .remove(&constraint)
            .map_err(|e| self.reject("remove_global_constraint", e))?;

        info!("Global constraint removed");
        self.events.publish(ContractEvent::GlobalConstraintRemoved {
            registry: self.config.address,
            global_constraint: constraint,
        });
        Ok(())
    }

    fn check_global_constraints(
        &self,
        from: Address,
        tos: &[Address],
        amounts: &[U256],
    ) -> Result<bool, RegistryError> {
        if !invariant_batch_lengths_match(tos, amounts) {
            return Err(RegistryError::LengthMismatch);
        }

        let constraints = self.state.read().constraints.as_slice().to_vec();
        for address in constraints {
            let constraint = self
                .constraints
                .resolve(&address)
                .ok_or(RegistryError::ConstraintNotCallable)?;
            if !constraint.check(from, tos, amounts) {
                debug!(constraint = %address, from = %from, "Global constraint rejected batch");
                return Ok(false);
            }
        }
        Ok(true)
    }

    fn rule_count(&self) -> usize {
        self.state.read().rules.len()
    }

    fn rule(&self, index: usize) -> Option<RuleRecord> {
        self.state.read().rules.get(index).cloned()
    }

    fn rule_by_name(&self, name: &str) -> Option<RuleRecord> {
        self.state.read().rules.by_name(name).cloned()
    }

    fn rule_by_address(&self, address: Address) -> Option<RuleRecord> {
        self.state.read().rules.by_address(&address).cloned()
    }

    fn is_rule(&self, address: Address) -> bool {
        self.state.read().rules.is_rule(&address)
    }

    fn global_constraint_count(&self) -> usize {
        self.state.read().constraints.len()
    }

    fn global_constraints(&self) -> Vec<Address> {
        self.state.read().constraints.as_slice().to_vec()
    }

    fn are_transfers_allowed(&self, account: Address) -> bool {
        self.state.read().allowed.is_allowed(&account)
    }
}
