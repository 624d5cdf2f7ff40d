//! # Query Metering Service

#[cfg(test)]
mod tests;

use crate::domain::{
    AddressActivityDescriptor, EventQueryDescriptor, MeteringConfig, MeteringError,
    MeteringStats, PremiumQueryDescriptor, QueryCacheEntry, QueryId, QueryStatsRecord,
    RangeQueryDescriptor, TokenTransferQueryDescriptor,
};
use crate::ports::QueryMeteringApi;
use li_02_index_store::{ContractRecord, IndexStoreReader, SharedIndexStore};
use shared_types::{
    query_digest, Amount, CallContext, Hash, Height, Identity, LedgerTransfer, Name64, QueryKey,
    Timestamp,
};
use lru::LruCache;
use std::collections::HashMap;
use std::num::NonZeroUsize;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// The Query Metering Engine.
pub struct QueryMeter {
    config: MeteringConfig,
    /// Account that receives fees.
    treasury: Identity,
    /// Only identity allowed to write the cache.
    result_store: Identity,
    ledger: Arc<dyn LedgerTransfer>,
    store: SharedIndexStore,

    stats: HashMap<Identity, QueryStatsRecord>,
    cache: LruCache<QueryKey, QueryCacheEntry>,
    next_query_id: QueryId,
    total_queries_processed: u64,
    fees_collected: Amount,
    fees_withdrawn: Amount,
}

impl QueryMeter {
    pub fn new(
        config: MeteringConfig,
        treasury: Identity,
        result_store: Identity,
        ledger: Arc<dyn LedgerTransfer>,
        store: SharedIndexStore,
    ) -> Self {
        let capacity = NonZeroUsize::new(config.cache_capacity).unwrap_or(NonZeroUsize::MIN);
        Self {
            config,
            treasury,
            result_store,
            ledger,
            store,
            stats: HashMap::new(),
            cache: LruCache::new(capacity),
            next_query_id: 1,
            total_queries_processed: 0,
            fees_collected: 0,
            fees_withdrawn: 0,
        }
    }

    pub fn config(&self) -> &MeteringConfig {
        &self.config
    }

    /// Replace both fees. Authorization is the caller's concern.
    pub fn set_fees(&mut self, basic_fee: Amount, premium_fee: Amount) {
        self.config.basic_fee = basic_fee;
        self.config.premium_fee = premium_fee;
        info!(basic_fee, premium_fee, "query fees updated");
    }

    /// Fees collected and not yet withdrawn.
    pub fn available_fees(&self) -> Amount {
        self.fees_collected - self.fees_withdrawn
    }

    /// Pay `amount` of collected fees from the treasury to `recipient`.
    /// Authorization is the caller's concern. Returns the fees still held.
    pub fn withdraw_fees(
        &mut self,
        amount: Amount,
        recipient: &Identity,
    ) -> Result<Amount, MeteringError> {
        let available = self.available_fees();
        if amount > available {
            return Err(MeteringError::WithdrawalExceedsFees {
                requested: amount,
                available,
            });
        }
        self.ledger.transfer(amount, &self.treasury, recipient)?;
        self.fees_withdrawn += amount;
        info!(amount, %recipient, "fees withdrawn");
        Ok(self.available_fees())
    }

    fn ensure_rate_limit(&self, ctx: &CallContext) -> Result<(), MeteringError> {
        if self.check_rate_limit(&ctx.caller, ctx.now) {
            return Ok(());
        }
        warn!(reader = %ctx.caller, slot = ctx.now, "rate limit exceeded");
        Err(MeteringError::RateLimitExceeded {
            reader: ctx.caller,
            slot: ctx.now,
            limit: self.config.rate_limit_per_slot,
        })
    }

    fn ensure_range(start: Height, end: Height) -> Result<(), MeteringError> {
        if start > end {
            return Err(MeteringError::InvalidTimeRange { start, end });
        }
        Ok(())
    }

    fn ensure_result_count(&self, requested: u64) -> Result<(), MeteringError> {
        if requested > self.config.max_results {
            return Err(MeteringError::TooManyResults {
                requested,
                max: self.config.max_results,
            });
        }
        Ok(())
    }

    /// Charge, record, and hand out a query id. Preconditions are already
    /// checked when this runs.
    fn complete(&mut self, ctx: CallContext, premium: bool) -> Result<QueryId, MeteringError> {
        let fee = if premium {
            self.config.premium_fee
        } else {
            self.config.basic_fee
        };
        self.charge_and_record(ctx, fee, premium, true)?;

        let query_id = self.next_query_id;
        self.next_query_id += 1;
        self.total_queries_processed += 1;
        debug!(reader = %ctx.caller, query_id, fee, premium, "query metered");
        Ok(query_id)
    }
}

impl QueryMeteringApi for QueryMeter {
    fn check_rate_limit(&self, reader: &Identity, slot: Timestamp) -> bool {
        self.stats
            .get(reader)
            .map_or(true, |s| s.within_limit(slot, self.config.rate_limit_per_slot))
    }

    fn charge_and_record(
        &mut self,
        ctx: CallContext,
        fee: Amount,
        premium: bool,
        success: bool,
    ) -> Result<(), MeteringError> {
        // The treasury paying itself moves nothing, so nothing is collected.
        let charged = if ctx.caller == self.treasury {
            0
        } else {
            self.ledger.transfer(fee, &ctx.caller, &self.treasury)?;
            fee
        };
        self.fees_collected = self.fees_collected.saturating_add(charged);

        let current = self.stats.get(&ctx.caller).cloned().unwrap_or_default();
        let updated = current.charged(ctx.now, charged, premium, success);
        self.stats.insert(ctx.caller, updated);
        Ok(())
    }

    fn query_blocks_by_height_range(
        &mut self,
        ctx: CallContext,
        start: Height,
        end: Height,
    ) -> Result<RangeQueryDescriptor, MeteringError> {
        self.ensure_rate_limit(&ctx)?;
        Self::ensure_range(start, end)?;
        let result_count = end - start;
        self.ensure_result_count(result_count)?;

        let indexed_blocks = self.store.read().blocks_in_range_count(start, end);
        let query_id = self.complete(ctx, false)?;
        Ok(RangeQueryDescriptor {
            query_id,
            start,
            end,
            result_count,
            indexed_blocks,
        })
    }

    fn premium_query(
        &mut self,
        ctx: CallContext,
        query_type: Name64,
        params: &[u8],
        max_results: u64,
    ) -> Result<PremiumQueryDescriptor, MeteringError> {
        self.ensure_rate_limit(&ctx)?;
        self.ensure_result_count(max_results)?;

        let query_key = query_digest(query_type.as_str(), params);
        let query_id = self.complete(ctx, true)?;
        Ok(PremiumQueryDescriptor {
            query_id,
            query_type,
            estimated_results: max_results,
            query_key,
        })
    }

    fn query_address_activity(
        &mut self,
        ctx: CallContext,
        address: Identity,
    ) -> Result<AddressActivityDescriptor, MeteringError> {
        self.ensure_rate_limit(&ctx)?;
        let query_id = self.complete(ctx, false)?;
        let activity = self
            .store
            .read()
            .address_activity(&address)
            .cloned()
            .unwrap_or_default();
        Ok(AddressActivityDescriptor {
            query_id,
            address,
            activity,
        })
    }

    fn query_contract_info(&self, address: &Identity) -> Option<ContractRecord> {
        self.store.read().contract(address).cloned()
    }

    fn query_events(
        &mut self,
        ctx: CallContext,
        contract: Identity,
        event_type: Option<Name64>,
        from_block: Height,
        to_block: Height,
    ) -> Result<EventQueryDescriptor, MeteringError> {
        self.ensure_rate_limit(&ctx)?;
        Self::ensure_range(from_block, to_block)?;
        let query_id = self.complete(ctx, false)?;
        Ok(EventQueryDescriptor {
            query_id,
            contract,
            event_type,
            from_block,
            to_block,
        })
    }

    fn query_token_transfers(
        &mut self,
        ctx: CallContext,
        token: Identity,
        from: Option<Identity>,
        to: Option<Identity>,
        from_block: Height,
        to_block: Height,
    ) -> Result<TokenTransferQueryDescriptor, MeteringError> {
        self.ensure_rate_limit(&ctx)?;
        Self::ensure_range(from_block, to_block)?;
        let query_id = self.complete(ctx, false)?;
        Ok(TokenTransferQueryDescriptor {
            query_id,
            token,
            from,
            to,
            from_block,
            to_block,
        })
    }

    fn cache_put(
        &mut self,
        ctx: CallContext,
        key: QueryKey,
        result_digest: Hash,
        result_count: u64,
    ) -> Result<QueryCacheEntry, MeteringError> {
        if ctx.caller != self.result_store {
            warn!(caller = %ctx.caller, "cache write refused");
            return Err(MeteringError::NotAuthorized { caller: ctx.caller });
        }
        let now = ctx.now;
        let entry = QueryCacheEntry {
            result_digest,
            result_count,
            cached_at: now,
            expires_at: now.saturating_add(self.config.cache_lifetime),
            hit_count: 0,
        };
        self.cache.put(key, entry.clone());
        debug!(key = %hex::encode(key), expires_at = entry.expires_at, "query result cached");
        Ok(entry)
    }

    fn cache_get(&mut self, now: Timestamp, key: &QueryKey) -> Option<QueryCacheEntry> {
        if !self.cache.peek(key).is_some_and(|e| e.is_live(now)) {
            return None;
        }
        let entry = self.cache.get_mut(key)?;
        entry.hit_count += 1;
        Some(entry.clone())
    }

    fn query_stats(&self, reader: &Identity) -> QueryStatsRecord {
        self.stats.get(reader).cloned().unwrap_or_default()
    }

    fn metering_stats(&self) -> MeteringStats {
        MeteringStats {
            total_queries_processed: self.total_queries_processed,
            next_query_id: self.next_query_id,
            readers: self.stats.len() as u64,
            cache_entries: self.cache.len() as u64,
            fees_collected: self.fees_collected,
            fees_withdrawn: self.fees_withdrawn,
            basic_fee: self.config.basic_fee,
            premium_fee: self.config.premium_fee,
        }
    }
}
