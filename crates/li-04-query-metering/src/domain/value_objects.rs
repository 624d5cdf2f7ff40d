//! # Value Objects

use serde::{Deserialize, Serialize};
use shared_types::{Amount, Timestamp};

pub const DEFAULT_BASIC_FEE: Amount = 100_000;
pub const DEFAULT_PREMIUM_FEE: Amount = 500_000;
pub const DEFAULT_RATE_LIMIT_PER_SLOT: u32 = 10;
pub const DEFAULT_MAX_RESULTS: u64 = 100;
pub const DEFAULT_CACHE_LIFETIME: Timestamp = 144;
pub const DEFAULT_CACHE_CAPACITY: usize = 10_000;

/// Metering configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MeteringConfig {
    /// Fee for ordinary metered queries.
    pub basic_fee: Amount,
    /// Fee for premium queries.
    pub premium_fee: Amount,
    /// Queries one reader may run in one time slot.
    pub rate_limit_per_slot: u32,
    /// Largest range width or premium result count.
    pub max_results: u64,
    /// Time units a cache entry stays live.
    pub cache_lifetime: Timestamp,
    /// Most cache entries held; the least recently used is dropped first.
    pub cache_capacity: usize,
}

impl Default for MeteringConfig {
    fn default() -> Self {
        Self {
            basic_fee: DEFAULT_BASIC_FEE,
            premium_fee: DEFAULT_PREMIUM_FEE,
            rate_limit_per_slot: DEFAULT_RATE_LIMIT_PER_SLOT,
            max_results: DEFAULT_MAX_RESULTS,
            cache_lifetime: DEFAULT_CACHE_LIFETIME,
            cache_capacity: DEFAULT_CACHE_CAPACITY,
        }
    }
}

impl MeteringConfig {
    /// Free queries and a generous limit, for tests that are not about
    /// payment.
    pub fn for_testing() -> Self {
        Self {
            basic_fee: 0,
            premium_fee: 0,
            rate_limit_per_slot: 1_000,
            ..Self::default()
        }
    }
}
