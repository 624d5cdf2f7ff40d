//! # Node Errors

use li_03_ingestion::IngestionError;
use li_04_query_metering::MeteringError;
use li_05_admin_control::AdminError;
use shared_types::{CodedError, ErrorCode};
use thiserror::Error;

/// Failure of one routed request.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NodeError {
    #[error("unknown method: {0}")]
    UnknownMethod(String),

    /// Parameters did not match the method's shape or field limits.
    #[error("invalid params for {method}: {reason}")]
    InvalidParams { method: String, reason: String },

    #[error("malformed request: {0}")]
    MalformedRequest(String),

    #[error("failed to encode result: {0}")]
    Serialization(String),

    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    #[error(transparent)]
    Metering(#[from] MeteringError),

    #[error(transparent)]
    Admin(#[from] AdminError),
}

impl CodedError for NodeError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::UnknownMethod(_) | Self::MalformedRequest(_) | Self::Serialization(_) => {
                ErrorCode::InvalidQuery
            }
            Self::InvalidParams { .. } => ErrorCode::InvalidField,
            Self::Ingestion(e) => e.code(),
            Self::Metering(e) => e.code(),
            Self::Admin(e) => e.code(),
        }
    }
}
