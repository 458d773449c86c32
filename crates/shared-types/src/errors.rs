//! # Error Types
//!
//! Errors shared by every component that performs or answers a contract call.

use thiserror::Error;

/// A failed contract call carrying the textual reason surfaced to the caller.
///
/// This is the common currency of the `Contract` port: component-specific
/// errors convert into it at the call boundary.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("{reason}")]
pub struct Revert {
    /// Human-readable revert reason.
    pub reason: String,
}

impl Revert {
    /// Creates a revert with the given reason.
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

/// Classes every contract rejection falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Null, empty or duplicate arguments.
    Precondition,
    /// Caller lacks the required role, or the signing key is not active.
    Authorization,
    /// Nonce mismatch.
    Nonce,
    /// A global constraint rejected the batch.
    Constraint,
    /// Parallel arrays of unequal length.
    LengthMismatch,
    /// A collaborator failed (token, malformed calldata).
    Fault,
}

/// Errors from decoding ABI-encoded calldata.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AbiError {
    /// Calldata is shorter than the layout requires.
    #[error("calldata too short: need {needed} bytes, have {available}")]
    OutOfBounds { needed: usize, available: usize },

    /// An address word has non-zero high-order bytes.
    #[error("dirty address word at offset {offset}")]
    InvalidAddress { offset: usize },

    /// An offset or length word does not fit in memory.
    #[error("offset or length overflow at {offset}")]
    Overflow { offset: usize },

    /// The selector is not understood by the callee.
    #[error("unknown function selector 0x{}", hex_selector(.0))]
    UnknownSelector([u8; 4]),
}

fn hex_selector(selector: &[u8; 4]) -> String {
    selector.iter().map(|b| format!("{b:02x}")).collect()
}

impl From<AbiError> for Revert {
    fn from(err: AbiError) -> Self {
        Revert::new(err.to_string())
    }
}
