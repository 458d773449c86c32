//! # Shared Bus - Contract Event Bus
//!
//! Carries the events emitted by the token holder and the rule registry.
//!
//! ```text
//! ┌──────────────┐   publish()   ┌──────────────┐  subscribe()  ┌──────────────┐
//! │ Token Holder │ ────────────► │  Event Bus   │ ────────────► │   Relayer /  │
//! │ Rule Registry│               │  (+history)  │               │   Auditor    │
//! └──────────────┘               └──────────────┘               └──────────────┘
//! ```
//!
//! Live subscribers receive events through a broadcast channel; the bus
//! also keeps the full history so the audit trail survives subscribers
//! that come and go.

// Allow in tests
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

pub mod events;
pub mod publisher;
pub mod subscriber;

// Re-export main types
pub use events::{ContractEvent, EventFilter, EventTopic};
pub use publisher::{EventPublisher, InMemoryEventBus};
pub use subscriber::{Subscription, SubscriptionError};

/// Maximum events to buffer per subscriber before older ones are dropped.
pub const DEFAULT_CHANNEL_CAPACITY: usize = 1000;
