//! # Inbound Ports

use crate::domain::{
    AddressActivityDescriptor, EventQueryDescriptor, MeteringError, MeteringStats,
    PremiumQueryDescriptor, QueryCacheEntry, QueryStatsRecord, RangeQueryDescriptor,
    TokenTransferQueryDescriptor,
};
use li_02_index_store::ContractRecord;
use shared_types::{Amount, CallContext, Hash, Height, Identity, Name64, QueryKey, Timestamp};

/// Query Metering API. `ctx.caller` is the reader and pays the fee;
/// `ctx.now` is the rate-limit slot.
pub trait QueryMeteringApi {
    /// False iff the reader already ran the slot's quota in `slot`.
    fn check_rate_limit(&self, reader: &Identity, slot: Timestamp) -> bool;

    /// Transfer `fee` from the reader to the treasury, then update the
    /// reader's statistics.
    fn charge_and_record(
        &mut self,
        ctx: CallContext,
        fee: Amount,
        premium: bool,
        success: bool,
    ) -> Result<(), MeteringError>;

    fn query_blocks_by_height_range(
        &mut self,
        ctx: CallContext,
        start: Height,
        end: Height,
    ) -> Result<RangeQueryDescriptor, MeteringError>;

    fn premium_query(
        &mut self,
        ctx: CallContext,
        query_type: Name64,
        params: &[u8],
        max_results: u64,
    ) -> Result<PremiumQueryDescriptor, MeteringError>;

    fn query_address_activity(
        &mut self,
        ctx: CallContext,
        address: Identity,
    ) -> Result<AddressActivityDescriptor, MeteringError>;

    /// Unmetered contract lookup.
    fn query_contract_info(&self, address: &Identity) -> Option<ContractRecord>;

    fn query_events(
        &mut self,
        ctx: CallContext,
        contract: Identity,
        event_type: Option<Name64>,
        from_block: Height,
        to_block: Height,
    ) -> Result<EventQueryDescriptor, MeteringError>;

    fn query_token_transfers(
        &mut self,
        ctx: CallContext,
        token: Identity,
        from: Option<Identity>,
        to: Option<Identity>,
        from_block: Height,
        to_block: Height,
    ) -> Result<TokenTransferQueryDescriptor, MeteringError>;

    /// Store or overwrite a cache entry expiring `cache_lifetime` after
    /// `ctx.now`. Only the result store may write.
    fn cache_put(
        &mut self,
        ctx: CallContext,
        key: QueryKey,
        result_digest: Hash,
        result_count: u64,
    ) -> Result<QueryCacheEntry, MeteringError>;

    /// Live entry for `key`, counting the hit.
    fn cache_get(&mut self, now: Timestamp, key: &QueryKey) -> Option<QueryCacheEntry>;

    /// Reader statistics, zero for an unknown reader.
    fn query_stats(&self, reader: &Identity) -> QueryStatsRecord;

    fn metering_stats(&self) -> MeteringStats;
}
