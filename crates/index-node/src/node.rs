//! # Index Node
//!
//! Owns every component and applies the pause flag.
//!
//! ## Locking
//!
//! | State | Lock | Writers |
//! |-------|------|---------|
//! | ingestion pipeline (registry inside) | `Mutex` | ingestion calls, indexer toggles |
//! | query meter | `Mutex` | metered queries, fee administration |
//! | derived index store | `RwLock` (shared) | ingestion only |
//! | admin controller | `RwLock` | `set_paused`, report tickets |
//!
//! Calls take the admin lock before any component lock and hold it until the
//! component call finishes, so a pause never lands halfway through an
//! operation.

use crate::config::NodeConfig;
use crate::errors::NodeError;
use li_01_indexer_registry::{IndexerRecord, IndexerRegistry, IndexerRegistryApi, IndexerType};
use li_02_index_store::{
    shared_store, ContractRecord, IndexStoreReader, IndexStoreStats, RecordId, SharedIndexStore,
};
use li_03_ingestion::{
    BlockSubmission, ContractSubmission, EventSubmission, IngestionApi, IngestionPipeline,
    TokenTransferSubmission, TransactionSubmission,
};
use li_04_query_metering::{
    AddressActivityDescriptor, EventQueryDescriptor, MeteringStats, PremiumQueryDescriptor,
    QueryCacheEntry, QueryMeter, QueryMeteringApi, QueryStatsRecord, RangeQueryDescriptor,
    TokenTransferQueryDescriptor,
};
use li_05_admin_control::{AdminController, AnalyticsReportTicket};
use parking_lot::{Mutex, RwLock};
use shared_types::{
    Amount, CallContext, Hash, Height, Identity, InMemoryLedger, LedgerTransfer, Name64, QueryKey,
    Timestamp,
};
use std::sync::Arc;
use tracing::info;

/// The running service.
pub struct IndexNode {
    store: SharedIndexStore,
    ingestion: Mutex<IngestionPipeline>,
    meter: Mutex<QueryMeter>,
    admin: RwLock<AdminController>,
}

impl IndexNode {
    /// Wire the components against `ledger`.
    pub fn new(config: &NodeConfig, ledger: Arc<dyn LedgerTransfer>) -> Self {
        let store = shared_store();
        let registry =
            IndexerRegistry::new(config.registry.clone(), config.treasury, ledger.clone());
        let ingestion =
            IngestionPipeline::new(config.ingestion.clone(), registry, store.clone());
        let meter = QueryMeter::new(
            config.metering.clone(),
            config.treasury,
            config.result_store,
            ledger,
            store.clone(),
        );

        info!(owner = %config.owner, treasury = %config.treasury, "index node initialized");
        Self {
            store,
            ingestion: Mutex::new(ingestion),
            meter: Mutex::new(meter),
            admin: RwLock::new(AdminController::new(config.owner)),
        }
    }

    /// Wire the components against an in-memory ledger seeded from
    /// `genesis_balances`.
    pub fn with_in_memory_ledger(config: &NodeConfig) -> (Self, Arc<InMemoryLedger>) {
        let ledger = Arc::new(InMemoryLedger::with_balances(
            config.genesis_balances.iter().map(|b| (b.account, b.amount)),
        ));
        (Self::new(config, ledger.clone()), ledger)
    }

    pub fn store(&self) -> &SharedIndexStore {
        &self.store
    }

    pub fn is_paused(&self) -> bool {
        self.admin.read().is_paused()
    }

    /// Run `f` on the pipeline unless paused.
    fn ingest<T, F>(&self, f: F) -> Result<T, NodeError>
    where
        F: FnOnce(&mut IngestionPipeline) -> Result<T, li_03_ingestion::IngestionError>,
    {
        let admin = self.admin.read();
        admin.ensure_not_paused()?;
        let result = f(&mut *self.ingestion.lock())?;
        drop(admin);
        Ok(result)
    }

    /// Run `f` on the meter unless paused.
    fn metered<T, F>(&self, f: F) -> Result<T, NodeError>
    where
        F: FnOnce(&mut QueryMeter) -> Result<T, li_04_query_metering::MeteringError>,
    {
        let admin = self.admin.read();
        admin.ensure_not_paused()?;
        let result = f(&mut *self.meter.lock())?;
        drop(admin);
        Ok(result)
    }

    // --- Registry ---------------------------------------------------------

    /// Registration stays open while paused.
    pub fn register(
        &self,
        ctx: CallContext,
        name: Name64,
        indexer_type: IndexerType,
    ) -> Result<IndexerRecord, NodeError> {
        Ok(self.ingestion.lock().register(ctx, name, indexer_type)?)
    }

    pub fn indexer(&self, indexer: &Identity) -> Option<IndexerRecord> {
        self.ingestion.lock().registry().get_indexer(indexer).cloned()
    }

    // --- Ingestion --------------------------------------------------------

    pub fn index_block(&self, ctx: CallContext, block: BlockSubmission) -> Result<RecordId, NodeError> {
        self.ingest(|p| p.index_block(ctx, block))
    }

    pub fn index_transaction(
        &self,
        ctx: CallContext,
        tx: TransactionSubmission,
    ) -> Result<RecordId, NodeError> {
        self.ingest(|p| p.index_transaction(ctx, tx))
    }

    pub fn index_event(&self, ctx: CallContext, event: EventSubmission) -> Result<RecordId, NodeError> {
        self.ingest(|p| p.index_event(ctx, event))
    }

    pub fn index_token_transfer(
        &self,
        ctx: CallContext,
        transfer: TokenTransferSubmission,
    ) -> Result<RecordId, NodeError> {
        self.ingest(|p| p.index_token_transfer(ctx, transfer))
    }

    pub fn index_contract(
        &self,
        ctx: CallContext,
        contract: ContractSubmission,
    ) -> Result<Identity, NodeError> {
        self.ingest(|p| p.index_contract(ctx, contract))
    }

    pub fn batch_index_transactions(
        &self,
        ctx: CallContext,
        txs: Vec<TransactionSubmission>,
    ) -> Result<usize, NodeError> {
        self.ingest(|p| p.batch_index_transactions(ctx, txs))
    }

    pub fn store_stats(&self) -> IndexStoreStats {
        self.store.read().stats()
    }

    // --- Queries ----------------------------------------------------------

    pub fn query_blocks_by_height_range(
        &self,
        ctx: CallContext,
        start: Height,
        end: Height,
    ) -> Result<RangeQueryDescriptor, NodeError> {
        self.metered(|m| m.query_blocks_by_height_range(ctx, start, end))
    }

    pub fn premium_query(
        &self,
        ctx: CallContext,
        query_type: Name64,
        params: &[u8],
        max_results: u64,
    ) -> Result<PremiumQueryDescriptor, NodeError> {
        self.metered(|m| m.premium_query(ctx, query_type, params, max_results))
    }

    pub fn query_address_activity(
        &self,
        ctx: CallContext,
        address: Identity,
    ) -> Result<AddressActivityDescriptor, NodeError> {
        self.metered(|m| m.query_address_activity(ctx, address))
    }

    /// Unmetered; available while paused.
    pub fn query_contract_info(&self, address: &Identity) -> Option<ContractRecord> {
        self.store.read().contract(address).cloned()
    }

    pub fn query_events(
        &self,
        ctx: CallContext,
        contract: Identity,
        event_type: Option<Name64>,
        from_block: Height,
        to_block: Height,
    ) -> Result<EventQueryDescriptor, NodeError> {
        self.metered(|m| m.query_events(ctx, contract, event_type, from_block, to_block))
    }

    pub fn query_token_transfers(
        &self,
        ctx: CallContext,
        token: Identity,
        from: Option<Identity>,
        to: Option<Identity>,
        from_block: Height,
        to_block: Height,
    ) -> Result<TokenTransferQueryDescriptor, NodeError> {
        self.metered(|m| m.query_token_transfers(ctx, token, from, to, from_block, to_block))
    }

    /// Result store only; closed while paused.
    pub fn cache_put(
        &self,
        ctx: CallContext,
        key: QueryKey,
        result_digest: Hash,
        result_count: u64,
    ) -> Result<QueryCacheEntry, NodeError> {
        self.metered(|m| m.cache_put(ctx, key, result_digest, result_count))
    }

    pub fn cache_get(&self, now: Timestamp, key: &QueryKey) -> Option<QueryCacheEntry> {
        self.meter.lock().cache_get(now, key)
    }

    pub fn query_stats(&self, reader: &Identity) -> QueryStatsRecord {
        self.meter.lock().query_stats(reader)
    }

    pub fn metering_stats(&self) -> MeteringStats {
        self.meter.lock().metering_stats()
    }

    // --- Administration ---------------------------------------------------

    pub fn update_fees(
        &self,
        ctx: CallContext,
        basic_fee: Amount,
        premium_fee: Amount,
    ) -> Result<(), NodeError> {
        let admin = self.admin.read();
        Ok(admin.update_fees(ctx, &mut *self.meter.lock(), basic_fee, premium_fee)?)
    }

    pub fn toggle_indexer(&self, ctx: CallContext, indexer: &Identity) -> Result<bool, NodeError> {
        let admin = self.admin.read();
        let mut ingestion = self.ingestion.lock();
        Ok(admin.toggle_indexer(ctx, ingestion.registry_mut(), indexer)?)
    }

    pub fn withdraw_fees(
        &self,
        ctx: CallContext,
        amount: Amount,
        recipient: &Identity,
    ) -> Result<Amount, NodeError> {
        let admin = self.admin.read();
        Ok(admin.withdraw_fees(ctx, &mut *self.meter.lock(), amount, recipient)?)
    }

    pub fn set_paused(&self, ctx: CallContext, paused: bool) -> Result<(), NodeError> {
        Ok(self.admin.write().set_paused(ctx, paused)?)
    }

    pub fn trigger_analytics_report(
        &self,
        ctx: CallContext,
    ) -> Result<AnalyticsReportTicket, NodeError> {
        Ok(self.admin.write().trigger_analytics_report(ctx)?)
    }
}
