//! # Error Codes
//!
//! Caller-visible error kinds. Every component error maps onto exactly one
//! [`ErrorCode`]; callers see the outcome of an operation as either a result
//! value or a single code, never a partial success.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Error kinds surfaced to callers, with stable numeric codes.
///
/// Codes 100..=110 keep their historical order; later codes were added for
/// registration, referential and administrative failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    NotAuthorized,
    InvalidBlockSequence,
    /// Reserved.
    InvalidTransactionReference,
    /// Reserved.
    IndexNotFound,
    /// Reserved.
    InvalidQuery,
    IndexerNotRegistered,
    /// A value transfer failed (insufficient funds or rejected by the ledger).
    InsufficientPayment,
    RateLimitExceeded,
    InvalidTimeRange,
    TooManyResults,
    /// Reserved.
    InvalidContractAddress,
    AlreadyRegistered,
    /// A record references a block height that has not been committed.
    InvalidBlock,
    /// A bounded field is out of range.
    InvalidField,
    BatchTooLarge,
    ServicePaused,
    WithdrawalExceedsFees,
}

impl ErrorCode {
    /// Numeric code.
    pub const fn as_u32(self) -> u32 {
        match self {
            Self::NotAuthorized => 100,
            Self::InvalidBlockSequence => 101,
            Self::InvalidTransactionReference => 102,
            Self::IndexNotFound => 103,
            Self::InvalidQuery => 104,
            Self::IndexerNotRegistered => 105,
            Self::InsufficientPayment => 106,
            Self::RateLimitExceeded => 107,
            Self::InvalidTimeRange => 108,
            Self::TooManyResults => 109,
            Self::InvalidContractAddress => 110,
            Self::AlreadyRegistered => 111,
            Self::InvalidBlock => 112,
            Self::InvalidField => 113,
            Self::BatchTooLarge => 114,
            Self::ServicePaused => 115,
            Self::WithdrawalExceedsFees => 116,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} ({})", self, self.as_u32())
    }
}

/// Implemented by every component error.
pub trait CodedError: std::error::Error {
    /// The caller-visible kind of this error.
    fn code(&self) -> ErrorCode;
}

/// Serializable error for the request surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorPayload {
    pub error_type: ErrorCode,
    pub code: u32,
    pub message: String,
}

impl ErrorPayload {
    /// Build a payload from any coded error.
    pub fn from_error<E: CodedError + ?Sized>(err: &E) -> Self {
        let error_type = err.code();
        Self {
            error_type,
            code: error_type.as_u32(),
            message: err.to_string(),
        }
    }

    /// Build a payload from a code and message.
    pub fn new(error_type: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            error_type,
            code: error_type.as_u32(),
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_codes_are_unique() {
        let all = [
            ErrorCode::NotAuthorized,
            ErrorCode::InvalidBlockSequence,
            ErrorCode::InvalidTransactionReference,
            ErrorCode::IndexNotFound,
            ErrorCode::InvalidQuery,
            ErrorCode::IndexerNotRegistered,
            ErrorCode::InsufficientPayment,
            ErrorCode::RateLimitExceeded,
            ErrorCode::InvalidTimeRange,
            ErrorCode::TooManyResults,
            ErrorCode::InvalidContractAddress,
            ErrorCode::AlreadyRegistered,
            ErrorCode::InvalidBlock,
            ErrorCode::InvalidField,
            ErrorCode::BatchTooLarge,
            ErrorCode::ServicePaused,
            ErrorCode::WithdrawalExceedsFees,
        ];
        let codes: std::collections::HashSet<u32> = all.iter().map(|c| c.as_u32()).collect();
        assert_eq!(codes.len(), all.len());
    }

    #[test]
    fn test_display_shows_name_and_number() {
        assert_eq!(ErrorCode::RateLimitExceeded.to_string(), "RateLimitExceeded (107)");
        assert_eq!(ErrorCode::NotAuthorized.to_string(), "NotAuthorized (100)");
    }

    #[test]
    fn test_payload_serializes_snake_case() {
        let payload = ErrorPayload::new(ErrorCode::RateLimitExceeded, "slow down");
        let json = serde_json::to_value(&payload).unwrap();
        assert_eq!(json["error_type"], "rate_limit_exceeded");
        assert_eq!(json["code"], 107);
    }
}
