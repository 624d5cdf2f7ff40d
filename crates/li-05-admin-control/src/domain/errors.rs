//! # Domain Errors

use li_01_indexer_registry::RegistryError;
use li_04_query_metering::MeteringError;
use shared_types::{CodedError, ErrorCode, Identity};
use thiserror::Error;

/// Administrative failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AdminError {
    /// Caller is not the owner.
    #[error("caller {caller} is not the owner")]
    NotAuthorized { caller: Identity },

    /// Service is paused.
    #[error("service is paused")]
    ServicePaused,

    #[error(transparent)]
    Registry(#[from] RegistryError),

    #[error(transparent)]
    Metering(#[from] MeteringError),
}

impl CodedError for AdminError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::NotAuthorized { .. } => ErrorCode::NotAuthorized,
            Self::ServicePaused => ErrorCode::ServicePaused,
            Self::Registry(e) => e.code(),
            Self::Metering(e) => e.code(),
        }
    }
}
