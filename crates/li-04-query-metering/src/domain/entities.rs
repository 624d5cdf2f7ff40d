//! # Domain Entities
//!
//! Per-reader statistics, cache entries and the descriptors returned to
//! readers.

use li_02_index_store::AddressActivityRecord;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{Amount, Hash, Height, Identity, Name64, QueryKey, Timestamp};

/// Metered query id. The first id handed out is 1.
pub type QueryId = u64;

/// Per-reader query statistics.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryStatsRecord {
    pub total_queries: u64,
    pub successful_queries: u64,
    pub failed_queries: u64,
    pub premium_queries: u64,
    pub last_query_slot: Timestamp,
    pub queries_this_slot: u32,
    pub total_fees_paid: Amount,
}

impl QueryStatsRecord {
    /// Whether one more query fits in `slot`.
    pub fn within_limit(&self, slot: Timestamp, limit: u32) -> bool {
        !(self.last_query_slot == slot && self.queries_this_slot >= limit)
    }

    /// Copy of `self` after one charged query in `slot`.
    pub fn charged(&self, slot: Timestamp, fee: Amount, premium: bool, success: bool) -> Self {
        let queries_this_slot = if self.last_query_slot == slot {
            self.queries_this_slot.saturating_add(1)
        } else {
            1
        };
        Self {
            total_queries: self.total_queries + 1,
            successful_queries: self.successful_queries + u64::from(success),
            failed_queries: self.failed_queries + u64::from(!success),
            premium_queries: self.premium_queries + u64::from(premium),
            last_query_slot: slot,
            queries_this_slot,
            total_fees_paid: self.total_fees_paid.saturating_add(fee),
        }
    }
}

/// Cached result descriptor.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryCacheEntry {
    #[serde_as(as = "Hex")]
    pub result_digest: Hash,
    pub result_count: u64,
    pub cached_at: Timestamp,
    pub expires_at: Timestamp,
    pub hit_count: u64,
}

impl QueryCacheEntry {
    /// Live strictly before `expires_at`.
    pub fn is_live(&self, now: Timestamp) -> bool {
        now < self.expires_at
    }
}

/// Block range query acknowledgment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RangeQueryDescriptor {
    pub query_id: QueryId,
    pub start: Height,
    pub end: Height,
    /// `end - start`.
    pub result_count: u64,
    /// Distinct committed heights within `[start, end]`.
    pub indexed_blocks: u64,
}

/// Premium query acknowledgment.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PremiumQueryDescriptor {
    pub query_id: QueryId,
    pub query_type: Name64,
    pub estimated_results: u64,
    /// Cache key for this query's results.
    #[serde_as(as = "Hex")]
    pub query_key: QueryKey,
}

/// Address activity lookup; `activity` is the zero default for an address
/// never observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressActivityDescriptor {
    pub query_id: QueryId,
    pub address: Identity,
    pub activity: AddressActivityRecord,
}

/// Echo of an event query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventQueryDescriptor {
    pub query_id: QueryId,
    pub contract: Identity,
    pub event_type: Option<Name64>,
    pub from_block: Height,
    pub to_block: Height,
}

/// Echo of a token transfer query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransferQueryDescriptor {
    pub query_id: QueryId,
    pub token: Identity,
    pub from: Option<Identity>,
    pub to: Option<Identity>,
    pub from_block: Height,
    pub to_block: Height,
}

/// Engine-wide totals.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeteringStats {
    pub total_queries_processed: u64,
    pub next_query_id: QueryId,
    pub readers: u64,
    pub cache_entries: u64,
    pub fees_collected: Amount,
    pub fees_withdrawn: Amount,
    pub basic_fee: Amount,
    pub premium_fee: Amount,
}
