//! # Derived Index Store
//!
//! In-memory implementation of [`IndexStoreReader`] and [`IndexStoreWriter`].
//!
//! Sequential tables live in `BTreeMap`s keyed by record id so iteration is in
//! commit order. Blocks are reached by height only through `blocks_by_height`,
//! never by treating a height as a block id.

use crate::domain::{
    AddressActivityRecord, BlockRecord, ContractRecord, EventRecord, IndexStoreStats, RecordId,
    Sequence, StoreError, TokenTransferRecord, TransactionRecord,
};
use crate::ports::{IndexStoreReader, IndexStoreWriter};
use shared_types::{Amount, Hash, Height, Identity};
use std::collections::{BTreeMap, HashMap, HashSet};
use tracing::debug;

/// The canonical derived indexes.
#[derive(Debug, Default)]
pub struct DerivedIndexStore {
    blocks: BTreeMap<RecordId, BlockRecord>,
    transactions: BTreeMap<RecordId, TransactionRecord>,
    events: BTreeMap<RecordId, EventRecord>,
    token_transfers: BTreeMap<RecordId, TokenTransferRecord>,
    contracts: HashMap<Identity, ContractRecord>,
    address_activity: HashMap<Identity, AddressActivityRecord>,

    block_seq: Sequence,
    transaction_seq: Sequence,
    event_seq: Sequence,
    transfer_seq: Sequence,

    /// height -> block ids in commit order
    blocks_by_height: BTreeMap<Height, Vec<RecordId>>,
    tx_by_hash: HashMap<Hash, RecordId>,
    /// contract -> senders that have called it
    contract_callers: HashMap<Identity, HashSet<Identity>>,

    current_indexed_height: Height,
}

impl DerivedIndexStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn record_contract_call(&mut self, contract: Identity, caller: Identity, height: Height) {
        let Some(existing) = self.contracts.get(&contract) else {
            return;
        };
        let new_caller = self
            .contract_callers
            .entry(contract)
            .or_default()
            .insert(caller);
        let updated = existing.called_at(height, new_caller);
        self.contracts.insert(contract, updated);
    }
}

impl IndexStoreReader for DerivedIndexStore {
    fn block(&self, id: RecordId) -> Option<&BlockRecord> {
        self.blocks.get(&id)
    }

    fn block_at_height(&self, height: Height) -> Option<&BlockRecord> {
        self.blocks_by_height
            .get(&height)
            .and_then(|ids| ids.first())
            .and_then(|id| self.blocks.get(id))
    }

    fn has_block_at_height(&self, height: Height) -> bool {
        self.blocks_by_height.contains_key(&height)
    }

    fn blocks_in_range_count(&self, start: Height, end: Height) -> u64 {
        if start > end {
            return 0;
        }
        self.blocks_by_height.range(start..=end).count() as u64
    }

    fn transaction(&self, id: RecordId) -> Option<&TransactionRecord> {
        self.transactions.get(&id)
    }

    fn transaction_by_hash(&self, tx_hash: &Hash) -> Option<(RecordId, &TransactionRecord)> {
        let id = *self.tx_by_hash.get(tx_hash)?;
        self.transactions.get(&id).map(|tx| (id, tx))
    }

    fn event(&self, id: RecordId) -> Option<&EventRecord> {
        self.events.get(&id)
    }

    fn token_transfer(&self, id: RecordId) -> Option<&TokenTransferRecord> {
        self.token_transfers.get(&id)
    }

    fn contract(&self, address: &Identity) -> Option<&ContractRecord> {
        self.contracts.get(address)
    }

    fn address_activity(&self, address: &Identity) -> Option<&AddressActivityRecord> {
        self.address_activity.get(address)
    }

    fn current_indexed_height(&self) -> Height {
        self.current_indexed_height
    }

    fn stats(&self) -> IndexStoreStats {
        IndexStoreStats {
            blocks: self.blocks.len() as u64,
            transactions: self.transactions.len() as u64,
            events: self.events.len() as u64,
            token_transfers: self.token_transfers.len() as u64,
            contracts: self.contracts.len() as u64,
            addresses: self.address_activity.len() as u64,
            next_block_id: self.block_seq.peek(),
            next_transaction_id: self.transaction_seq.peek(),
            next_event_id: self.event_seq.peek(),
            next_transfer_id: self.transfer_seq.peek(),
            current_indexed_height: self.current_indexed_height,
        }
    }
}

impl IndexStoreWriter for DerivedIndexStore {
    fn commit_block(&mut self, block: BlockRecord) -> RecordId {
        let id = self.block_seq.allocate();
        let height = block.height;
        self.blocks_by_height.entry(height).or_default().push(id);
        self.blocks.insert(id, block);
        self.current_indexed_height = self.current_indexed_height.max(height);
        debug!(id, height, "block committed");
        id
    }

    fn check_block_exists(&self, height: Height) -> Result<(), StoreError> {
        if self.has_block_at_height(height) {
            Ok(())
        } else {
            Err(StoreError::BlockNotFound { height })
        }
    }

    fn commit_transaction(&mut self, tx: TransactionRecord) -> Result<RecordId, StoreError> {
        self.check_block_exists(tx.height)?;

        let id = self.transaction_seq.allocate();
        let (sender, recipient, height, amount) = (tx.sender, tx.recipient, tx.height, tx.amount);
        let contract = tx.contract_address;
        self.tx_by_hash.entry(tx.tx_hash).or_insert(id);
        self.transactions.insert(id, tx);

        self.update_address_activity(sender, height, amount, true);
        if let Some(contract) = contract {
            if let Some(activity) = self.address_activity.get(&sender) {
                let updated = activity.with_contract_call();
                self.address_activity.insert(sender, updated);
            }
            self.record_contract_call(contract, sender, height);
        }
        if let Some(recipient) = recipient {
            self.update_address_activity(recipient, height, amount, false);
        }

        debug!(id, height, sender = %sender, "transaction committed");
        Ok(id)
    }

    fn commit_event(&mut self, event: EventRecord) -> RecordId {
        let id = self.event_seq.allocate();
        debug!(id, height = event.height, contract = %event.contract_address, "event committed");
        self.events.insert(id, event);
        id
    }

    fn commit_token_transfer(&mut self, transfer: TokenTransferRecord) -> RecordId {
        let id = self.transfer_seq.allocate();
        if let Some(activity) = self.address_activity.get(&transfer.to) {
            let updated = activity.with_token(transfer.token_contract);
            self.address_activity.insert(transfer.to, updated);
        }
        debug!(id, height = transfer.height, token = %transfer.token_contract, "token transfer committed");
        self.token_transfers.insert(id, transfer);
        id
    }

    fn upsert_contract(&mut self, address: Identity, contract: ContractRecord) {
        let deployer = contract.deployer;
        let record = match self.contracts.get(&address) {
            Some(existing) => existing.merged_with(contract),
            None => {
                if let Some(activity) = self.address_activity.get(&deployer) {
                    let updated = activity.with_contract_deployed();
                    self.address_activity.insert(deployer, updated);
                }
                contract
            }
        };
        self.contracts.insert(address, record);
        debug!(contract = %address, deployer = %deployer, "contract upserted");
    }

    fn update_address_activity(
        &mut self,
        address: Identity,
        height: Height,
        amount: Option<Amount>,
        is_sender: bool,
    ) {
        let updated = match self.address_activity.get(&address) {
            Some(current) => current.observed(height, amount, is_sender),
            None => AddressActivityRecord::first_seen(height).observed(height, amount, is_sender),
        };
        self.address_activity.insert(address, updated);
    }
}
