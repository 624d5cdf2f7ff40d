//! # Domain Entities

use super::value_objects::ReputationScore;
use serde::{Deserialize, Serialize};
use shared_types::{Amount, Height, Name64, Timestamp};
use std::fmt;

/// Kind of indexer, declared at registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IndexerType {
    Full,
    Specialized,
    Archive,
}

impl fmt::Display for IndexerType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Specialized => write!(f, "specialized"),
            Self::Archive => write!(f, "archive"),
        }
    }
}

/// A registered indexer.
///
/// Created once by registration and never deleted. Counters and reputation
/// change only through successful ingestion; `active` changes only through
/// the admin toggle.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexerRecord {
    pub name: Name64,
    pub indexer_type: IndexerType,
    /// Bond debited at registration. Never refunded.
    pub bond_amount: Amount,
    pub active: bool,
    pub blocks_indexed: u64,
    /// Height of the last block accepted from this indexer (0 before the first).
    pub last_indexed_height: Height,
    pub reputation_score: ReputationScore,
    pub registered_at: Timestamp,
}

impl IndexerRecord {
    /// A freshly registered, active indexer with zeroed counters.
    pub fn new(
        name: Name64,
        indexer_type: IndexerType,
        bond_amount: Amount,
        reputation: ReputationScore,
        registered_at: Timestamp,
    ) -> Self {
        Self {
            name,
            indexer_type,
            bond_amount,
            active: true,
            blocks_indexed: 0,
            last_indexed_height: 0,
            reputation_score: reputation,
            registered_at,
        }
    }

    /// Whether `height` may follow this indexer's last accepted block.
    pub fn accepts_height(&self, height: Height) -> bool {
        height > self.last_indexed_height
    }
}
