//! # Inbound Ports
//!
//! Read and write halves of the derived index store. Splitting them lets the
//! query side hold a read guard while only the ingestion side ever takes the
//! write lock.

use crate::domain::{
    AddressActivityRecord, BlockRecord, ContractRecord, EventRecord, IndexStoreStats, RecordId,
    StoreError, TokenTransferRecord, TransactionRecord,
};
use shared_types::{Amount, Hash, Height, Identity};

/// Read-only lookups.
pub trait IndexStoreReader {
    /// Block by id.
    fn block(&self, id: RecordId) -> Option<&BlockRecord>;

    /// Earliest committed block at `height`.
    fn block_at_height(&self, height: Height) -> Option<&BlockRecord>;

    fn has_block_at_height(&self, height: Height) -> bool;

    /// Number of distinct committed heights in `[start, end]`.
    fn blocks_in_range_count(&self, start: Height, end: Height) -> u64;

    fn transaction(&self, id: RecordId) -> Option<&TransactionRecord>;

    /// Earliest committed transaction with this hash.
    fn transaction_by_hash(&self, tx_hash: &Hash) -> Option<(RecordId, &TransactionRecord)>;

    fn event(&self, id: RecordId) -> Option<&EventRecord>;

    fn token_transfer(&self, id: RecordId) -> Option<&TokenTransferRecord>;

    fn contract(&self, address: &Identity) -> Option<&ContractRecord>;

    /// Activity record, if the address has ever been observed.
    fn address_activity(&self, address: &Identity) -> Option<&AddressActivityRecord>;

    /// Highest block height ever committed.
    fn current_indexed_height(&self) -> Height;

    fn stats(&self) -> IndexStoreStats;
}

/// Commits. Every method either fully applies or returns an error having
/// changed nothing.
pub trait IndexStoreWriter: IndexStoreReader {
    /// Append a block and raise `current_indexed_height`.
    fn commit_block(&mut self, block: BlockRecord) -> RecordId;

    /// Fails `BlockNotFound` unless a block exists at `height`.
    fn check_block_exists(&self, height: Height) -> Result<(), StoreError>;

    /// Append a transaction after checking its block reference, then update
    /// sender/recipient activity and the called contract's statistics.
    fn commit_transaction(&mut self, tx: TransactionRecord) -> Result<RecordId, StoreError>;

    fn commit_event(&mut self, event: EventRecord) -> RecordId;

    /// Append a transfer and note the token in the recipient's holdings.
    fn commit_token_transfer(&mut self, transfer: TokenTransferRecord) -> RecordId;

    /// Insert or replace a contract, keeping existing call statistics.
    fn upsert_contract(&mut self, address: Identity, contract: ContractRecord);

    /// Observe one transaction touching `address`.
    fn update_address_activity(
        &mut self,
        address: Identity,
        height: Height,
        amount: Option<Amount>,
        is_sender: bool,
    );
}
