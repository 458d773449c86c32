//! # Error Types
//!
//! Rejections raised by the session manager, the executable transaction
//! verifier and the rule executor. `Display` is the exact revert reason.

use shared_types::{AbiError, ErrorKind, Revert};
use thiserror::Error;

/// Errors returned by token holder operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum HolderError {
    #[error("Only wallet is allowed to call.")]
    OnlyWallet,

    #[error("Only multisig is allowed to call.")]
    OnlyMultisig,

    #[error("Ephemeral key is null.")]
    NullKey,

    #[error("Ephemeral key exists.")]
    KeyExists,

    #[error("Expiration height is lte to the current block height.")]
    ExpirationNotInFuture,

    #[error("Ephemeral key is not authorized.")]
    KeyNotAuthorized,

    #[error("Ephemeral key is not active.")]
    InactiveKey,

    #[error("The next nonce is not provided.")]
    InvalidNonce,

    #[error("'to' address is the token address.")]
    ToIsToken,

    /// The multisig wallet rejected a confirmation.
    #[error("{0}")]
    Wallet(Revert),

    /// The rule registry refused to toggle the transfer flag.
    #[error("{0}")]
    Registry(Revert),

    /// The token refused an approval.
    #[error("{0}")]
    Token(Revert),

    /// Calldata could not be decoded.
    #[error(transparent)]
    Abi(#[from] AbiError),
}

impl HolderError {
    /// Taxonomy class of this error.
    #[must_use]
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::OnlyWallet | Self::OnlyMultisig | Self::InactiveKey => ErrorKind::Authorization,
            Self::NullKey
            | Self::KeyExists
            | Self::ExpirationNotInFuture
            | Self::KeyNotAuthorized
            | Self::ToIsToken => ErrorKind::Precondition,
            Self::InvalidNonce => ErrorKind::Nonce,
            Self::Wallet(_) | Self::Registry(_) | Self::Token(_) | Self::Abi(_) => ErrorKind::Fault,
        }
    }

    /// Label used for the verification failure metric.
    #[must_use]
    pub fn metric_label(&self) -> &'static str {
        match self {
            Self::InactiveKey => "inactive_key",
            Self::InvalidNonce => "bad_nonce",
            _ => "other",
        }
    }
}

impl From<HolderError> for Revert {
    fn from(err: HolderError) -> Self {
        match err {
            HolderError::Wallet(revert) | HolderError::Registry(revert) | HolderError::Token(revert) => {
                revert
            }
            other => Revert::new(other.to_string()),
        }
    }
}
