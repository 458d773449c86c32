//! # Error Types
//!
//! Every way a registry call can be rejected. The `Display` text of each
//! variant is the exact revert reason surfaced to the caller.

use shared_types::{AbiError, ErrorKind, Revert};
use thiserror::Error;

/// Errors returned by registry operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("Only whitelisted worker is allowed to call.")]
    OnlyWorker,

    #[error("Only registered rule is allowed to call.")]
    OnlyRule,

    #[error("Rule name is empty.")]
    EmptyRuleName,

    #[error("Rule address is null.")]
    NullRuleAddress,

    #[error("Rule ABI is empty.")]
    EmptyRuleAbi,

    #[error("Rule with the specified name already exists.")]
    DuplicateRuleName,

    #[error("Rule with the specified address already exists.")]
    DuplicateRuleAddress,

    #[error("Transfers from the address are not allowed.")]
    TransfersNotAllowed,

    #[error("'to' and 'amount' transfer arrays' lengths are not equal.")]
    LengthMismatch,

    #[error("Constraints not fulfilled.")]
    ConstraintsNotFulfilled,

    #[error("Constraint to add is null.")]
    NullConstraint,

    #[error("Constraint to add already exists.")]
    DuplicateConstraint,

    #[error("Constraint to remove does not exist.")]
    MissingConstraint,

    #[error("Global constraint is not callable.")]
    ConstraintNotCallable,

    /// The token rejected a transfer.
    #[error("{0}")]
    Token(Revert),

    /// Calldata could not be decoded.
    #[error(transparent)]
    Abi(#[from] AbiError),
}

impl RegistryError {
    /// Taxonomy class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OnlyWorker | Self::OnlyRule | Self::TransfersNotAllowed => {
                ErrorKind::Authorization
            }
            Self::EmptyRuleName
            | Self::NullRuleAddress
            | Self::EmptyRuleAbi
            | Self::DuplicateRuleName
            | Self::DuplicateRuleAddress
            | Self::NullConstraint
            | Self::DuplicateConstraint
            | Self::MissingConstraint => ErrorKind::Precondition,
            Self::LengthMismatch => ErrorKind::LengthMismatch,
            Self::ConstraintsNotFulfilled => ErrorKind::Constraint,
            Self::ConstraintNotCallable | Self::Token(_) | Self::Abi(_) => ErrorKind::Fault,
        }
    }
}

impl From<RegistryError> for Revert {
    fn from(err: RegistryError) -> Self {
        match err {
            RegistryError::Token(revert) => revert,
            other => Revert::new(other.to_string()),
        }
    }
}
