//! # Token-Rules Test Suite
//!
//! Cross-crate scenarios for the token holder and the rule registry.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs     # World: token + registry + holder + wallet + router
//! ├── integration/    # End-to-end flows
//! │   ├── sessions.rs
//! │   ├── execution.rs
//! │   ├── constraints.rs
//! │   └── redemption.rs
//! └── exploits/       # Attack simulations
//!     ├── concurrency.rs
//!     ├── replay.rs
//!     └── reentrancy.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p tr-tests
//! cargo test -p tr-tests integration::
//! cargo test -p tr-tests exploits::
//! cargo bench -p tr-tests
//! ```

#![cfg_attr(test, allow(clippy::unwrap_used))]
