//! # Domain Errors

use shared_types::{CodedError, ErrorCode, Height, Identity, TransferError};
use thiserror::Error;

/// Registry failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// Identity already holds a registration.
    #[error("indexer already registered: {indexer}")]
    AlreadyRegistered { indexer: Identity },

    /// Identity has never registered.
    #[error("indexer not registered: {indexer}")]
    NotRegistered { indexer: Identity },

    /// Indexer is registered but deactivated.
    #[error("indexer inactive: {indexer}")]
    Inactive { indexer: Identity },

    /// Block height does not exceed the indexer's last accepted height.
    #[error("block height {height} does not follow last indexed height {last} for {indexer}")]
    InvalidBlockSequence {
        indexer: Identity,
        height: Height,
        last: Height,
    },

    /// Bond transfer failed; nothing was registered.
    #[error("bond transfer failed: {0}")]
    BondTransfer(#[from] TransferError),
}

impl CodedError for RegistryError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::AlreadyRegistered { .. } => ErrorCode::AlreadyRegistered,
            Self::NotRegistered { .. } => ErrorCode::IndexerNotRegistered,
            Self::Inactive { .. } => ErrorCode::NotAuthorized,
            Self::InvalidBlockSequence { .. } => ErrorCode::InvalidBlockSequence,
            Self::BondTransfer(_) => ErrorCode::InsufficientPayment,
        }
    }
}
