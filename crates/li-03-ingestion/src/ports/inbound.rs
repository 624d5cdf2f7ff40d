//! # Inbound Ports

use crate::domain::{
    BlockSubmission, ContractSubmission, EventSubmission, IngestionError, TokenTransferSubmission,
    TransactionSubmission,
};
use li_01_indexer_registry::{IndexerRecord, IndexerType};
use li_02_index_store::RecordId;
use shared_types::{CallContext, Identity, Name64};

/// Ingestion API. `ctx.caller` is the submitting indexer.
pub trait IngestionApi {
    /// Register the caller as an indexer, debiting the bond.
    fn register(
        &mut self,
        ctx: CallContext,
        name: Name64,
        indexer_type: IndexerType,
    ) -> Result<IndexerRecord, IngestionError>;

    fn index_block(
        &mut self,
        ctx: CallContext,
        block: BlockSubmission,
    ) -> Result<RecordId, IngestionError>;

    fn index_transaction(
        &mut self,
        ctx: CallContext,
        tx: TransactionSubmission,
    ) -> Result<RecordId, IngestionError>;

    fn index_event(
        &mut self,
        ctx: CallContext,
        event: EventSubmission,
    ) -> Result<RecordId, IngestionError>;

    fn index_token_transfer(
        &mut self,
        ctx: CallContext,
        transfer: TokenTransferSubmission,
    ) -> Result<RecordId, IngestionError>;

    /// Upsert a contract, returning its address.
    fn index_contract(
        &mut self,
        ctx: CallContext,
        contract: ContractSubmission,
    ) -> Result<Identity, IngestionError>;

    /// Commit every transaction or none; returns the number committed.
    fn batch_index_transactions(
        &mut self,
        ctx: CallContext,
        txs: Vec<TransactionSubmission>,
    ) -> Result<usize, IngestionError>;
}
