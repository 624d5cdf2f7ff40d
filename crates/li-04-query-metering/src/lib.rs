//! # LI-04 Query Metering Engine
//!
//! Rate limits, charges and counts reader queries, and keeps a time-bounded
//! cache of query result descriptors.
//!
//! **Component:** 4
//!
//! The engine never materializes result sets. A metered query returns a
//! descriptor (query id and result count); exact-key lookups also return the
//! stored record.
//!
//! ## Metered Query Sequence
//!
//! ```text
//! rate limit ──▶ parameter checks ──▶ fee transfer ──▶ stats update ──▶ query id
//! ```
//!
//! Any failure before the fee transfer completes leaves every counter
//! untouched.
//!
//! ## Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | `queries_this_slot <= rate_limit_per_slot` | check before charge |
//! | Range width `<= max_results` | `TooManyResults` |
//! | `start <= end` | `InvalidTimeRange` |
//! | Cache entry absent once `now >= expires_at` | computed on read |
//! | Only the result store writes the cache | `cache_put` caller check |
//! | At most `cache_capacity` cache entries | `LruCache` eviction |
//! | Query ids never reused | single `next_query_id` counter |

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    AddressActivityDescriptor, EventQueryDescriptor, MeteringConfig, MeteringError,
    MeteringStats, PremiumQueryDescriptor, QueryCacheEntry, QueryId, QueryStatsRecord,
    RangeQueryDescriptor, TokenTransferQueryDescriptor,
};
pub use ports::QueryMeteringApi;
pub use service::QueryMeter;
