//! # Ports
//!
//! - **inbound**: `RuleRegistryApi`, what rules, holders and workers call
//! - **outbound**: the collaborators the registry depends on

pub mod inbound;
pub mod outbound;
