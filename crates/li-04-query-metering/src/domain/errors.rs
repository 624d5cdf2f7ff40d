//! # Domain Errors

use shared_types::{Amount, CodedError, ErrorCode, Height, Identity, Timestamp, TransferError};
use thiserror::Error;

/// Metering failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeteringError {
    /// Caller is not the configured result store.
    #[error("caller {caller} may not write the query cache")]
    NotAuthorized { caller: Identity },

    /// Reader has used up the current slot's quota.
    #[error("rate limit of {limit} per slot exceeded by {reader} in slot {slot}")]
    RateLimitExceeded {
        reader: Identity,
        slot: Timestamp,
        limit: u32,
    },

    /// Range start lies after its end.
    #[error("invalid range: start {start} > end {end}")]
    InvalidTimeRange { start: Height, end: Height },

    /// Requested more results than a single query may return.
    #[error("too many results: {requested} > {max}")]
    TooManyResults { requested: u64, max: u64 },

    /// Fee transfer failed; nothing was recorded.
    #[error("fee payment failed: {0}")]
    Payment(#[from] TransferError),

    /// Withdrawal larger than the fees still held.
    #[error("withdrawal of {requested} exceeds available fees {available}")]
    WithdrawalExceedsFees { requested: Amount, available: Amount },
}

impl CodedError for MeteringError {
    fn code(&self) -> ErrorCode {
        match self {
            Self::NotAuthorized { .. } => ErrorCode::NotAuthorized,
            Self::RateLimitExceeded { .. } => ErrorCode::RateLimitExceeded,
            Self::InvalidTimeRange { .. } => ErrorCode::InvalidTimeRange,
            Self::TooManyResults { .. } => ErrorCode::TooManyResults,
            Self::Payment(_) => ErrorCode::InsufficientPayment,
            Self::WithdrawalExceedsFees { .. } => ErrorCode::WithdrawalExceedsFees,
        }
    }
}
