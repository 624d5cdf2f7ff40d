//! # Core Entities
//!
//! Identity and hash primitives shared across components.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// A 32-byte ledger hash (block hash, parent hash, transaction hash, topic).
pub type Hash = [u8; 32];

/// A 20-byte digest keying the query result cache.
pub type QueryKey = [u8; 20];

/// Host clock value. Also used as the rate-limit time slot.
pub type Timestamp = u64;

/// Block height on the external ledger.
pub type Height = u64;

/// Amount in ledger minor units.
pub type Amount = u64;

/// Opaque, globally unique, comparable principal.
///
/// Used for indexers, readers, senders, recipients and contract addresses.
/// Rendered as `0x`-prefixed lowercase hex.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Identity(pub [u8; 20]);

impl Identity {
    /// Byte length of an identity.
    pub const LEN: usize = 20;

    /// Create an identity from raw bytes.
    pub const fn new(bytes: [u8; 20]) -> Self {
        Self(bytes)
    }

    /// Raw bytes.
    pub fn as_bytes(&self) -> &[u8; 20] {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Identity({})", self)
    }
}

/// Failure to parse an [`Identity`] from text.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum IdentityParseError {
    /// Not valid hex.
    #[error("identity is not valid hex: {0}")]
    InvalidHex(String),
    /// Wrong byte length.
    #[error("identity must be {expected} bytes, got {actual}")]
    WrongLength { expected: usize, actual: usize },
}

impl FromStr for Identity {
    type Err = IdentityParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let bytes = hex::decode(s.trim_start_matches("0x"))
            .map_err(|e| IdentityParseError::InvalidHex(e.to_string()))?;
        let arr: [u8; 20] = bytes
            .as_slice()
            .try_into()
            .map_err(|_| IdentityParseError::WrongLength {
                expected: Self::LEN,
                actual: bytes.len(),
            })?;
        Ok(Self(arr))
    }
}

impl TryFrom<String> for Identity {
    type Error = IdentityParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Identity> for String {
    fn from(id: Identity) -> Self {
        id.to_string()
    }
}

/// Per-call context supplied by the host.
///
/// `now` is read exactly once per call and is the single clock value used for
/// timestamps, rate-limit slots and cache expiry within that call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallContext {
    /// Identity invoking the operation.
    pub caller: Identity,
    /// Host clock value for this call.
    pub now: Timestamp,
}

impl CallContext {
    /// Create a call context.
    pub fn new(caller: Identity, now: Timestamp) -> Self {
        Self { caller, now }
    }
}
