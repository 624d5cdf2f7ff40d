//! # Bounded Ledger Fields
//!
//! Length-checked string and byte fields. The limits are part of the
//! interoperable record format and are enforced at construction, so a value of
//! one of these types is always within bounds.
//!
//! | Alias | Limit | Used for |
//! |-------|-------|----------|
//! | [`Name64`] | 64 chars | indexer name, contract name, function name, event type |
//! | [`Label32`] | 32 chars | transaction type, contract type, transfer type, address type |
//! | [`EventData`] | 256 bytes | event payload |
//! | [`Memo`] | 64 bytes | token transfer memo |
//! | [`Topics`] | 4 hashes | event topics |

use crate::entities::Hash;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use std::fmt;
use thiserror::Error;

/// Maximum number of topics attached to one event.
pub const MAX_TOPICS: usize = 4;

/// Field construction failures.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FieldError {
    /// Value exceeds its maximum length.
    #[error("value too long: {actual} > {max}")]
    TooLong { max: usize, actual: usize },
    /// More than [`MAX_TOPICS`] topics.
    #[error("too many topics: {actual} > {max}")]
    TooManyTopics { max: usize, actual: usize },
    /// Byte field is not valid hex.
    #[error("invalid hex: {0}")]
    InvalidHex(String),
}

/// A string of at most `N` characters.
#[derive(Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedString<const N: usize>(String);

impl<const N: usize> BoundedString<N> {
    /// Maximum length in characters.
    pub const MAX: usize = N;

    /// Create a bounded string, failing if it exceeds `N` characters.
    pub fn new(value: impl Into<String>) -> Result<Self, FieldError> {
        let value = value.into();
        let actual = value.chars().count();
        if actual > N {
            return Err(FieldError::TooLong { max: N, actual });
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn into_inner(self) -> String {
        self.0
    }
}

impl<const N: usize> fmt::Display for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl<const N: usize> fmt::Debug for BoundedString<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}", self.0)
    }
}

impl<const N: usize> TryFrom<String> for BoundedString<N> {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> TryFrom<&str> for BoundedString<N> {
    type Error = FieldError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl<const N: usize> From<BoundedString<N>> for String {
    fn from(value: BoundedString<N>) -> Self {
        value.0
    }
}

/// A byte buffer of at most `N` bytes, serialized as hex.
#[derive(Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BoundedBytes<const N: usize>(Vec<u8>);

impl<const N: usize> BoundedBytes<N> {
    /// Maximum length in bytes.
    pub const MAX: usize = N;

    /// Create a bounded byte buffer, failing if it exceeds `N` bytes.
    pub fn new(value: impl Into<Vec<u8>>) -> Result<Self, FieldError> {
        let value = value.into();
        if value.len() > N {
            return Err(FieldError::TooLong {
                max: N,
                actual: value.len(),
            });
        }
        Ok(Self(value))
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<const N: usize> fmt::Debug for BoundedBytes<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(&self.0))
    }
}

impl<const N: usize> TryFrom<String> for BoundedBytes<N> {
    type Error = FieldError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        let bytes = hex::decode(value.trim_start_matches("0x"))
            .map_err(|e| FieldError::InvalidHex(e.to_string()))?;
        Self::new(bytes)
    }
}

impl<const N: usize> From<BoundedBytes<N>> for String {
    fn from(value: BoundedBytes<N>) -> Self {
        format!("0x{}", hex::encode(value.0))
    }
}

/// Indexer, contract, function and event-type names.
pub type Name64 = BoundedString<64>;

/// Transaction, contract, transfer and address type labels.
pub type Label32 = BoundedString<32>;

/// Event payload bytes.
pub type EventData = BoundedBytes<256>;

/// Token transfer memo bytes.
pub type Memo = BoundedBytes<64>;

/// Ordered event topics, at most [`MAX_TOPICS`], stored verbatim.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
#[serde(transparent)]
pub struct Topics(#[serde_as(as = "Vec<Hex>")] Vec<Hash>);

impl Topics {
    /// Create a topic list, failing above [`MAX_TOPICS`] entries.
    pub fn new(topics: Vec<Hash>) -> Result<Self, FieldError> {
        if topics.len() > MAX_TOPICS {
            return Err(FieldError::TooManyTopics {
                max: MAX_TOPICS,
                actual: topics.len(),
            });
        }
        Ok(Self(topics))
    }

    pub fn as_slice(&self) -> &[Hash] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'de> Deserialize<'de> for Topics {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw: Vec<Hash> = serde_with::As::<Vec<Hex>>::deserialize(deserializer)?;
        Topics::new(raw).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounded_string_at_limit() {
        let s = "a".repeat(64);
        assert!(Name64::new(s).is_ok());
    }

    #[test]
    fn test_bounded_string_over_limit() {
        let err = Label32::new("x".repeat(33)).unwrap_err();
        assert_eq!(err, FieldError::TooLong { max: 32, actual: 33 });
    }

    #[test]
    fn test_bounded_string_counts_chars_not_bytes() {
        // 32 two-byte characters
        let s = "é".repeat(32);
        assert!(Label32::new(s).is_ok());
    }

    #[test]
    fn test_event_data_limit() {
        assert!(EventData::new(vec![0u8; 256]).is_ok());
        assert!(EventData::new(vec![0u8; 257]).is_err());
    }

    #[test]
    fn test_memo_hex_serde() {
        let memo = Memo::new(vec![0xde, 0xad]).unwrap();
        let json = serde_json::to_string(&memo).unwrap();
        assert_eq!(json, "\"0xdead\"");
        let back: Memo = serde_json::from_str(&json).unwrap();
        assert_eq!(back, memo);
    }

    #[test]
    fn test_bounded_string_rejects_long_json() {
        let json = format!("\"{}\"", "n".repeat(65));
        assert!(serde_json::from_str::<Name64>(&json).is_err());
    }

    #[test]
    fn test_topics_limit() {
        assert!(Topics::new(vec![[1u8; 32]; 4]).is_ok());
        let err = Topics::new(vec![[1u8; 32]; 5]).unwrap_err();
        assert_eq!(err, FieldError::TooManyTopics { max: 4, actual: 5 });
    }

    #[test]
    fn test_topics_preserve_order() {
        let topics = Topics::new(vec![[3u8; 32], [1u8; 32], [2u8; 32]]).unwrap();
        assert_eq!(topics.as_slice()[0], [3u8; 32]);
        assert_eq!(topics.as_slice()[2], [2u8; 32]);
    }
}
