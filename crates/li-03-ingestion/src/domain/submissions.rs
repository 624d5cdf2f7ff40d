//! # Submissions
//!
//! What an indexer sends. The pipeline stamps `indexed_by` / `indexed_at`
//! from the call context when turning a submission into a stored record.

use li_02_index_store::{
    BlockRecord, ContractRecord, EventRecord, TokenTransferRecord, TransactionRecord,
};
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{
    Amount, CallContext, EventData, Hash, Height, Identity, Label32, Memo, Name64, Timestamp,
    Topics,
};

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockSubmission {
    pub height: Height,
    #[serde_as(as = "Hex")]
    pub block_hash: Hash,
    #[serde_as(as = "Hex")]
    pub parent_hash: Hash,
    pub timestamp: Timestamp,
    #[serde(default)]
    pub miner: Option<Identity>,
    pub tx_count: u64,
    pub total_fees: Amount,
    pub size: u64,
    pub difficulty: u64,
}

impl BlockSubmission {
    pub fn into_record(self, ctx: &CallContext) -> BlockRecord {
        BlockRecord {
            height: self.height,
            block_hash: self.block_hash,
            parent_hash: self.parent_hash,
            timestamp: self.timestamp,
            miner: self.miner,
            tx_count: self.tx_count,
            total_fees: self.total_fees,
            size: self.size,
            difficulty: self.difficulty,
            indexed_by: ctx.caller,
            indexed_at: ctx.now,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionSubmission {
    #[serde_as(as = "Hex")]
    pub tx_hash: Hash,
    pub height: Height,
    pub tx_type: Label32,
    pub sender: Identity,
    #[serde(default)]
    pub recipient: Option<Identity>,
    #[serde(default)]
    pub amount: Option<Amount>,
    pub fee: Amount,
    pub nonce: u64,
    #[serde(default)]
    pub contract_address: Option<Identity>,
    #[serde(default)]
    pub function_name: Option<Name64>,
    pub success: bool,
    #[serde(default)]
    pub error_code: Option<u64>,
    pub events_count: u64,
}

impl TransactionSubmission {
    pub fn into_record(self, ctx: &CallContext) -> TransactionRecord {
        TransactionRecord {
            tx_hash: self.tx_hash,
            height: self.height,
            tx_type: self.tx_type,
            sender: self.sender,
            recipient: self.recipient,
            amount: self.amount,
            fee: self.fee,
            nonce: self.nonce,
            contract_address: self.contract_address,
            function_name: self.function_name,
            success: self.success,
            error_code: self.error_code,
            events_count: self.events_count,
            indexed_at: ctx.now,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventSubmission {
    #[serde_as(as = "Hex")]
    pub tx_hash: Hash,
    pub tx_index: u64,
    pub height: Height,
    pub contract_address: Identity,
    pub event_type: Name64,
    #[serde(default)]
    pub event_data: EventData,
    #[serde(default)]
    pub topics: Topics,
}

impl EventSubmission {
    pub fn into_record(self, ctx: &CallContext) -> EventRecord {
        EventRecord {
            tx_hash: self.tx_hash,
            tx_index: self.tx_index,
            height: self.height,
            contract_address: self.contract_address,
            event_type: self.event_type,
            event_data: self.event_data,
            topics: self.topics,
            indexed_at: ctx.now,
        }
    }
}

#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransferSubmission {
    #[serde_as(as = "Hex")]
    pub tx_hash: Hash,
    pub height: Height,
    pub token_contract: Identity,
    pub from: Identity,
    pub to: Identity,
    pub amount: Amount,
    #[serde(default)]
    pub memo: Option<Memo>,
    pub transfer_type: Label32,
}

impl TokenTransferSubmission {
    pub fn into_record(self, ctx: &CallContext) -> TokenTransferRecord {
        TokenTransferRecord {
            tx_hash: self.tx_hash,
            height: self.height,
            token_contract: self.token_contract,
            from: self.from,
            to: self.to,
            amount: self.amount,
            memo: self.memo,
            transfer_type: self.transfer_type,
            indexed_at: ctx.now,
        }
    }
}

/// Contract deployment. Call statistics start at zero and are kept across
/// re-submissions of the same address.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractSubmission {
    pub address: Identity,
    pub deployer: Identity,
    pub name: Name64,
    pub deployed_at_height: Height,
    #[serde_as(as = "Hex")]
    pub source_hash: Hash,
    pub contract_type: Label32,
}

impl ContractSubmission {
    /// Split into the contract key and its record; `deployed_at_time` is the
    /// call's clock value.
    pub fn into_record(self, ctx: &CallContext) -> (Identity, ContractRecord) {
        let record = ContractRecord {
            deployer: self.deployer,
            name: self.name,
            deployed_at_height: self.deployed_at_height,
            deployed_at_time: ctx.now,
            source_hash: self.source_hash,
            total_calls: 0,
            unique_callers: 0,
            last_call_height: 0,
            contract_type: self.contract_type,
            active: true,
        };
        (self.address, record)
    }
}
