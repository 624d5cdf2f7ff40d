//! # Domain Entities
//!
//! Derived records. Sequential records are immutable once committed; contract
//! and address activity records are replaced whole, by copying the current
//! value and overwriting fields, so no partially-updated record is ever
//! visible.

use super::sequence::RecordId;
use serde::{Deserialize, Serialize};
use serde_with::{hex::Hex, serde_as};
use shared_types::{
    Amount, EventData, Hash, Height, Identity, Label32, Memo, Name64, Timestamp, Topics,
};
use std::collections::BTreeSet;

/// Maximum number of token contracts tracked per address.
pub const MAX_TOKENS_HELD: usize = 20;

/// Address type assigned to addresses on first observation.
pub const DEFAULT_ADDRESS_TYPE: &str = "standard";

/// An indexed block.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BlockRecord {
    pub height: Height,
    #[serde_as(as = "Hex")]
    pub block_hash: Hash,
    #[serde_as(as = "Hex")]
    pub parent_hash: Hash,
    pub timestamp: Timestamp,
    pub miner: Option<Identity>,
    pub tx_count: u64,
    pub total_fees: Amount,
    pub size: u64,
    pub difficulty: u64,
    pub indexed_by: Identity,
    pub indexed_at: Timestamp,
}

/// An indexed transaction. `height` always names a committed block.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionRecord {
    #[serde_as(as = "Hex")]
    pub tx_hash: Hash,
    pub height: Height,
    pub tx_type: Label32,
    pub sender: Identity,
    pub recipient: Option<Identity>,
    pub amount: Option<Amount>,
    pub fee: Amount,
    pub nonce: u64,
    pub contract_address: Option<Identity>,
    pub function_name: Option<Name64>,
    pub success: bool,
    pub error_code: Option<u64>,
    pub events_count: u64,
    pub indexed_at: Timestamp,
}

/// An indexed contract event.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EventRecord {
    #[serde_as(as = "Hex")]
    pub tx_hash: Hash,
    pub tx_index: u64,
    pub height: Height,
    pub contract_address: Identity,
    pub event_type: Name64,
    pub event_data: EventData,
    pub topics: Topics,
    pub indexed_at: Timestamp,
}

/// An indexed token transfer.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenTransferRecord {
    #[serde_as(as = "Hex")]
    pub tx_hash: Hash,
    pub height: Height,
    pub token_contract: Identity,
    pub from: Identity,
    pub to: Identity,
    pub amount: Amount,
    pub memo: Option<Memo>,
    pub transfer_type: Label32,
    pub indexed_at: Timestamp,
}

/// A deployed contract, one per contract identity.
#[serde_as]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContractRecord {
    pub deployer: Identity,
    pub name: Name64,
    pub deployed_at_height: Height,
    pub deployed_at_time: Timestamp,
    #[serde_as(as = "Hex")]
    pub source_hash: Hash,
    pub total_calls: u64,
    pub unique_callers: u64,
    pub last_call_height: Height,
    pub contract_type: Label32,
    pub active: bool,
}

impl ContractRecord {
    /// Copy of `incoming` carrying over the call statistics of `self`.
    pub fn merged_with(&self, incoming: ContractRecord) -> ContractRecord {
        ContractRecord {
            total_calls: self.total_calls,
            unique_callers: self.unique_callers,
            last_call_height: self.last_call_height,
            ..incoming
        }
    }

    /// Copy of `self` after one call at `height`.
    pub fn called_at(&self, height: Height, new_caller: bool) -> ContractRecord {
        ContractRecord {
            total_calls: self.total_calls + 1,
            unique_callers: self.unique_callers + u64::from(new_caller),
            last_call_height: self.last_call_height.max(height),
            ..self.clone()
        }
    }
}

/// Rolling per-address activity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddressActivityRecord {
    pub first_seen_height: Height,
    pub last_seen_height: Height,
    pub tx_count: u64,
    pub sent_amount: Amount,
    pub received_amount: Amount,
    pub contract_calls: u64,
    pub contracts_deployed: u64,
    pub tokens_held: BTreeSet<Identity>,
    pub nft_count: u64,
    pub address_type: Label32,
}

impl Default for AddressActivityRecord {
    fn default() -> Self {
        Self {
            first_seen_height: 0,
            last_seen_height: 0,
            tx_count: 0,
            sent_amount: 0,
            received_amount: 0,
            contract_calls: 0,
            contracts_deployed: 0,
            tokens_held: BTreeSet::new(),
            nft_count: 0,
            address_type: Label32::new(DEFAULT_ADDRESS_TYPE).unwrap_or_default(),
        }
    }
}

impl AddressActivityRecord {
    /// Zero record for an address first observed at `height`.
    pub fn first_seen(height: Height) -> Self {
        Self {
            first_seen_height: height,
            last_seen_height: height,
            ..Self::default()
        }
    }

    /// Copy of `self` after observing one transaction.
    ///
    /// `amount` accumulates into `sent_amount` or `received_amount` depending
    /// on direction; a missing amount only counts the transaction.
    pub fn observed(&self, height: Height, amount: Option<Amount>, is_sender: bool) -> Self {
        let mut next = self.clone();
        next.last_seen_height = height;
        next.tx_count += 1;
        if let Some(amount) = amount {
            if is_sender {
                next.sent_amount = next.sent_amount.saturating_add(amount);
            } else {
                next.received_amount = next.received_amount.saturating_add(amount);
            }
        }
        next
    }

    /// Copy of `self` with one more contract call.
    pub fn with_contract_call(&self) -> Self {
        Self {
            contract_calls: self.contract_calls + 1,
            ..self.clone()
        }
    }

    /// Copy of `self` with one more deployed contract.
    pub fn with_contract_deployed(&self) -> Self {
        Self {
            contracts_deployed: self.contracts_deployed + 1,
            ..self.clone()
        }
    }

    /// Copy of `self` holding `token`, unless the set is already full.
    pub fn with_token(&self, token: Identity) -> Self {
        let mut next = self.clone();
        if next.tokens_held.len() < MAX_TOKENS_HELD {
            next.tokens_held.insert(token);
        }
        next
    }
}

/// Table sizes and next ids.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IndexStoreStats {
    pub blocks: u64,
    pub transactions: u64,
    pub events: u64,
    pub token_transfers: u64,
    pub contracts: u64,
    pub addresses: u64,
    pub next_block_id: RecordId,
    pub next_transaction_id: RecordId,
    pub next_event_id: RecordId,
    pub next_transfer_id: RecordId,
    pub current_indexed_height: Height,
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOKEN: Identity = Identity::new([0x70; 20]);

    #[test]
    fn test_first_seen_seeds_heights() {
        let record = AddressActivityRecord::first_seen(42);
        assert_eq!(record.first_seen_height, 42);
        assert_eq!(record.last_seen_height, 42);
        assert_eq!(record.tx_count, 0);
        assert_eq!(record.address_type.as_str(), DEFAULT_ADDRESS_TYPE);
    }

    #[test]
    fn test_observed_accumulates_by_direction() {
        let base = AddressActivityRecord::first_seen(10);
        let sent = base.observed(11, Some(100), true);
        assert_eq!(sent.sent_amount, 100);
        assert_eq!(sent.received_amount, 0);
        assert_eq!(sent.last_seen_height, 11);
        assert_eq!(sent.first_seen_height, 10);

        let received = sent.observed(12, Some(30), false);
        assert_eq!(received.sent_amount, 100);
        assert_eq!(received.received_amount, 30);
        assert_eq!(received.tx_count, 2);
    }

    #[test]
    fn test_observed_without_amount_only_counts() {
        let record = AddressActivityRecord::first_seen(1).observed(1, None, true);
        assert_eq!(record.tx_count, 1);
        assert_eq!(record.sent_amount, 0);
    }

    #[test]
    fn test_observed_leaves_source_untouched() {
        let base = AddressActivityRecord::first_seen(1);
        let _ = base.observed(2, Some(5), true);
        assert_eq!(base.tx_count, 0);
    }

    #[test]
    fn test_tokens_held_is_capped() {
        let mut record = AddressActivityRecord::first_seen(1);
        for i in 0..25u8 {
            record = record.with_token(Identity::new([i; 20]));
        }
        assert_eq!(record.tokens_held.len(), MAX_TOKENS_HELD);
        // Re-adding a held token is a no-op
        let held = *record.tokens_held.iter().next().unwrap();
        assert_eq!(record.with_token(held).tokens_held.len(), MAX_TOKENS_HELD);
        assert!(!record.with_token(TOKEN).tokens_held.contains(&TOKEN));
    }

    #[test]
    fn test_contract_merge_keeps_call_stats() {
        let existing = ContractRecord {
            deployer: Identity::new([1; 20]),
            name: Name64::new("old").unwrap(),
            deployed_at_height: 5,
            deployed_at_time: 50,
            source_hash: [0; 32],
            total_calls: 9,
            unique_callers: 3,
            last_call_height: 77,
            contract_type: Label32::new("token").unwrap(),
            active: true,
        };
        let incoming = ContractRecord {
            name: Name64::new("new").unwrap(),
            total_calls: 0,
            unique_callers: 0,
            last_call_height: 0,
            active: false,
            ..existing.clone()
        };

        let merged = existing.merged_with(incoming);
        assert_eq!(merged.name.as_str(), "new");
        assert!(!merged.active);
        assert_eq!(merged.total_calls, 9);
        assert_eq!(merged.unique_callers, 3);
        assert_eq!(merged.last_call_height, 77);
    }
}
