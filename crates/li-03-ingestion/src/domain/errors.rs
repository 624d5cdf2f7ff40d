//! # Domain Errors

use li_01_indexer_registry::RegistryError;
use li_02_index_store::StoreError;
use shared_types::{CodedError, ErrorCode};
use thiserror::Error;

/// Ingestion failures. Registry and store errors pass through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IngestionError {
    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Store(#[from] StoreError),

    /// Batch exceeds the configured maximum.
    #[error("batch of {actual} exceeds maximum of {max}")]
    BatchTooLarge { max: usize, actual: usize },
}

impl CodedError for IngestionError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::Registry(e) => e.code(),
            Self::Store(e) => e.code(),
            Self::BatchTooLarge { .. } => ErrorCode::BatchTooLarge,
        }
    }
}
