//! # Domain Errors

use shared_types::{CodedError, ErrorCode, Height};
use thiserror::Error;

/// Store failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// No block has been committed at this height.
    #[error("no block indexed at height {height}")]
    BlockNotFound { height: Height },
}

impl CodedError for StoreError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::BlockNotFound { .. } => ErrorCode::InvalidBlock,
        }
    }
}
