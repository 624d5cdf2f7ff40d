//! # Ingestion Service
//!
//! [`IngestionPipeline`] is the single writer of the derived index store. Each
//! operation checks the registry first, then takes the store write lock for
//! the duration of its validation and commit.


use crate::domain::{
    BlockSubmission, ContractSubmission, EventSubmission, IngestionConfig, IngestionError,
    TokenTransferSubmission, TransactionSubmission,
};
use crate::ports::IngestionApi;
use li_01_indexer_registry::{IndexerRecord, IndexerRegistry, IndexerRegistryApi, IndexerType};
use li_02_index_store::{IndexStoreWriter, RecordId, SharedIndexStore};
use shared_types::{CallContext, Identity, Name64};
use tracing::{debug, info, warn};

/// The Ingestion Pipeline.
pub struct IngestionPipeline {
    config: IngestionConfig,
    registry: IndexerRegistry,
    store: SharedIndexStore,
}

impl IngestionPipeline {
    pub fn new(config: IngestionConfig, registry: IndexerRegistry, store: SharedIndexStore) -> Self {
        Self {
            config,
            registry,
            store,
        }
    }

    pub fn config(&self) -> &IngestionConfig {
        &self.config
    }

    pub fn registry(&self) -> &IndexerRegistry {
        &self.registry
    }

    /// Mutable registry access for owner-gated administration.
    pub fn registry_mut(&mut self) -> &mut IndexerRegistry {
        &mut self.registry
    }

    pub fn store(&self) -> &SharedIndexStore {
        &self.store
    }
}

impl IngestionApi for IngestionPipeline {
    fn register(
        &mut self,
        ctx: CallContext,
        name: Name64,
        indexer_type: IndexerType,
    ) -> Result<IndexerRecord, IngestionError> {
        Ok(self.registry.register(ctx, name, indexer_type)?.clone())
    }

    fn index_block(
        &mut self,
        ctx: CallContext,
        block: BlockSubmission,
    ) -> Result<RecordId, IngestionError> {
        let indexer = ctx.caller;
        let height = block.height;
        self.registry.check_active(&indexer)?;
        if let Err(e) = self.registry.check_block_sequence(&indexer, height) {
            warn!(%indexer, height, "out-of-sequence block rejected");
            return Err(e.into());
        }

        let id = self.store.write().commit_block(block.into_record(&ctx));
        self.registry.record_block(&indexer, height)?;

        info!(%indexer, height, id, "block indexed");
        Ok(id)
    }

    fn index_transaction(
        &mut self,
        ctx: CallContext,
        tx: TransactionSubmission,
    ) -> Result<RecordId, IngestionError> {
        self.registry.check_registered(&ctx.caller)?;
        let id = self.store.write().commit_transaction(tx.into_record(&ctx))?;
        debug!(indexer = %ctx.caller, id, "transaction indexed");
        Ok(id)
    }

    fn index_event(
        &mut self,
        ctx: CallContext,
        event: EventSubmission,
    ) -> Result<RecordId, IngestionError> {
        self.registry.check_registered(&ctx.caller)?;
        let id = self.store.write().commit_event(event.into_record(&ctx));
        debug!(indexer = %ctx.caller, id, "event indexed");
        Ok(id)
    }

    fn index_token_transfer(
        &mut self,
        ctx: CallContext,
        transfer: TokenTransferSubmission,
    ) -> Result<RecordId, IngestionError> {
        self.registry.check_registered(&ctx.caller)?;
        let id = self
            .store
            .write()
            .commit_token_transfer(transfer.into_record(&ctx));
        debug!(indexer = %ctx.caller, id, "token transfer indexed");
        Ok(id)
    }

    fn index_contract(
        &mut self,
        ctx: CallContext,
        contract: ContractSubmission,
    ) -> Result<Identity, IngestionError> {
        self.registry.check_registered(&ctx.caller)?;
        let (address, record) = contract.into_record(&ctx);
        self.store.write().upsert_contract(address, record);
        debug!(indexer = %ctx.caller, contract = %address, "contract indexed");
        Ok(address)
    }

    fn batch_index_transactions(
        &mut self,
        ctx: CallContext,
        txs: Vec<TransactionSubmission>,
    ) -> Result<usize, IngestionError> {
        self.registry.check_registered(&ctx.caller)?;
        if txs.len() > self.config.max_batch_size {
            return Err(IngestionError::BatchTooLarge {
                max: self.config.max_batch_size,
                actual: txs.len(),
            });
        }

        let mut store = self.store.write();
        for tx in &txs {
            store.check_block_exists(tx.height)?;
        }
        let count = txs.len();
        for tx in txs {
            store.commit_transaction(tx.into_record(&ctx))?;
        }

        info!(indexer = %ctx.caller, count, "transaction batch indexed");
        Ok(count)
    }
}
