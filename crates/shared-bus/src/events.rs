//! # Contract Events
//!
//! Every event the token holder and the rule registry emit. Together they
//! form the durable audit trail of sessions, rule executions and registry
//! administration.

use serde::{Deserialize, Serialize};
use shared_types::{Address, Hash, Selector, U256};

/// All events that can be published to the event bus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContractEvent {
    // =========================================================================
    // TOKEN HOLDER: SESSION MANAGEMENT
    // =========================================================================
    /// An ephemeral-key authorization was submitted to the multisig wallet.
    SessionAuthorizationSubmitted {
        /// Holder account that owns the session.
        holder: Address,
        /// Wallet transaction id carrying the `authorizeSession` payload.
        transaction_id: u64,
        /// Key being authorized.
        ephemeral_key: Address,
        /// Allowance granted to the registry per execution.
        spending_limit: U256,
        /// Height after which the key is inactive.
        expiration_height: u64,
    },

    /// An ephemeral key was revoked.
    SessionRevoked {
        /// Holder account that owned the session.
        holder: Address,
        /// The revoked key.
        ephemeral_key: Address,
    },

    // =========================================================================
    // TOKEN HOLDER: SIGNED EXECUTION
    // =========================================================================
    /// A signed rule execution completed (successfully or not).
    RuleExecuted {
        /// Holder account the rule ran for.
        holder: Address,
        /// Call target.
        to: Address,
        /// First four bytes of the payload.
        function_selector: Selector,
        /// Key that signed the call.
        ephemeral_key: Address,
        /// Nonce consumed by the call.
        nonce: U256,
        /// EIP-1077 message hash that was signed.
        message_hash: Hash,
        /// Whether the target call succeeded.
        status: bool,
    },

    /// A signed redemption revert was forwarded to the gateway.
    RedemptionReverted {
        /// Holder account.
        holder: Address,
        /// Redemption being reverted.
        redeem_message_hash: Hash,
        /// Key that signed the call.
        ephemeral_key: Address,
        /// Whether the gateway call succeeded.
        status: bool,
    },

    // =========================================================================
    // RULE REGISTRY
    // =========================================================================
    /// A rule was whitelisted.
    RuleRegistered {
        /// Registry that accepted the rule.
        registry: Address,
        /// Worker that registered it.
        worker: Address,
        /// Unique rule name.
        rule_name: String,
        /// Unique rule address.
        rule_address: Address,
    },

    /// A global constraint was appended to the constraint set.
    GlobalConstraintAdded {
        /// Registry holding the set.
        registry: Address,
        /// Constraint address.
        global_constraint: Address,
    },

    /// A global constraint was removed from the constraint set.
    GlobalConstraintRemoved {
        /// Registry holding the set.
        registry: Address,
        /// Constraint address.
        global_constraint: Address,
    },
}

impl ContractEvent {
    /// Get the topic for this event (for filtering).
    #[must_use]
    pub fn topic(&self) -> EventTopic {
        match self {
            Self::SessionAuthorizationSubmitted { .. } | Self::SessionRevoked { .. } => {
                EventTopic::Sessions
            }
            Self::RuleExecuted { .. } => EventTopic::RuleExecution,
            Self::RedemptionReverted { .. } => EventTopic::Redemption,
            Self::RuleRegistered { .. } => EventTopic::Rules,
            Self::GlobalConstraintAdded { .. } | Self::GlobalConstraintRemoved { .. } => {
                EventTopic::GlobalConstraints
            }
        }
    }

    /// Get the emitting contract address.
    #[must_use]
    pub fn emitter(&self) -> Address {
        match self {
            Self::SessionAuthorizationSubmitted { holder, .. }
            | Self::SessionRevoked { holder, .. }
            | Self::RuleExecuted { holder, .. }
            | Self::RedemptionReverted { holder, .. } => *holder,
            Self::RuleRegistered { registry, .. }
            | Self::GlobalConstraintAdded { registry, .. }
            | Self::GlobalConstraintRemoved { registry, .. } => *registry,
        }
    }
}

/// Event topics for subscription filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventTopic {
    /// Session submission / revocation.
    Sessions,
    /// Signed rule executions.
    RuleExecution,
    /// Signed redemption reverts.
    Redemption,
    /// Rule registration.
    Rules,
    /// Global constraint set changes.
    GlobalConstraints,
    /// Wildcard.
    All,
}

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Emitting contracts to include. Empty means all emitters.
    pub emitters: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            emitters: Vec::new(),
        }
    }

    /// Create a filter for events from specific contracts.
    #[must_use]
    pub fn from_emitters(emitters: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            emitters,
        }
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &ContractEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let emitter_match = self.emitters.is_empty() || self.emitters.contains(&event.emitter());

        topic_match && emitter_match
    }
}
