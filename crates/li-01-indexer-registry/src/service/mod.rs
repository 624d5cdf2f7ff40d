//! # Indexer Registry Service
//!
//! Owns every [`IndexerRecord`] and the ledger handle used to debit bonds.

#[cfg(test)]
mod tests;

use crate::domain::{
    IndexerRecord, IndexerType, RegistryConfig, RegistryError, ReputationOutcome,
    ReputationScore,
};
use crate::ports::IndexerRegistryApi;
use shared_types::{CallContext, Height, Identity, LedgerTransfer, Name64};
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// The Indexer Registry.
pub struct IndexerRegistry {
    config: RegistryConfig,
    /// Account that receives bonds.
    treasury: Identity,
    ledger: Arc<dyn LedgerTransfer>,
    indexers: BTreeMap<Identity, IndexerRecord>,
}

impl IndexerRegistry {
    /// Create an empty registry.
    pub fn new(config: RegistryConfig, treasury: Identity, ledger: Arc<dyn LedgerTransfer>) -> Self {
        Self {
            config,
            treasury,
            ledger,
            indexers: BTreeMap::new(),
        }
    }

    pub fn config(&self) -> &RegistryConfig {
        &self.config
    }

    /// Iterate over all indexers in identity order.
    pub fn iter(&self) -> impl Iterator<Item = (&Identity, &IndexerRecord)> {
        self.indexers.iter()
    }

    fn record_mut(&mut self, indexer: &Identity) -> Result<&mut IndexerRecord, RegistryError> {
        self.indexers
            .get_mut(indexer)
            .ok_or(RegistryError::NotRegistered { indexer: *indexer })
    }
}

impl IndexerRegistryApi for IndexerRegistry {
    fn register(
        &mut self,
        ctx: CallContext,
        name: Name64,
        indexer_type: IndexerType,
    ) -> Result<&IndexerRecord, RegistryError> {
        let indexer = ctx.caller;
        if self.indexers.contains_key(&indexer) {
            return Err(RegistryError::AlreadyRegistered { indexer });
        }

        // Bond first: a failed transfer leaves the registry untouched.
        self.ledger
            .transfer(self.config.bond_amount, &indexer, &self.treasury)?;

        let record = IndexerRecord::new(
            name,
            indexer_type,
            self.config.bond_amount,
            self.config.initial_score(),
            ctx.now,
        );
        info!(
            %indexer,
            name = %record.name,
            kind = %indexer_type,
            bond = record.bond_amount,
            "indexer registered"
        );

        Ok(self.indexers.entry(indexer).or_insert(record))
    }

    fn get_indexer(&self, indexer: &Identity) -> Option<&IndexerRecord> {
        self.indexers.get(indexer)
    }

    fn indexer_count(&self) -> usize {
        self.indexers.len()
    }

    fn check_registered(&self, indexer: &Identity) -> Result<&IndexerRecord, RegistryError> {
        self.indexers
            .get(indexer)
            .ok_or(RegistryError::NotRegistered { indexer: *indexer })
    }

    fn check_active(&self, indexer: &Identity) -> Result<&IndexerRecord, RegistryError> {
        let record = self.check_registered(indexer)?;
        if !record.active {
            return Err(RegistryError::Inactive { indexer: *indexer });
        }
        Ok(record)
    }

    fn check_block_sequence(&self, indexer: &Identity, height: Height) -> Result<(), RegistryError> {
        let record = self.check_registered(indexer)?;
        if !record.accepts_height(height) {
            return Err(RegistryError::InvalidBlockSequence {
                indexer: *indexer,
                height,
                last: record.last_indexed_height,
            });
        }
        Ok(())
    }

    fn record_block(&mut self, indexer: &Identity, height: Height) -> Result<(), RegistryError> {
        self.check_block_sequence(indexer, height)?;

        let config = self.config.clone();
        let record = self.record_mut(indexer)?;
        record.blocks_indexed += 1;
        record.last_indexed_height = height;
        record.reputation_score = record
            .reputation_score
            .adjust(ReputationOutcome::Success, &config);

        debug!(
            %indexer,
            height,
            blocks = record.blocks_indexed,
            reputation = record.reputation_score.value(),
            "block credited to indexer"
        );
        Ok(())
    }

    fn is_active(&self, indexer: &Identity) -> bool {
        self.indexers.get(indexer).is_some_and(|r| r.active)
    }

    fn set_active(&mut self, indexer: &Identity, active: bool) -> Result<(), RegistryError> {
        let record = self.record_mut(indexer)?;
        record.active = active;
        info!(%indexer, active, "indexer activity set");
        Ok(())
    }

    fn toggle_active(&mut self, indexer: &Identity) -> Result<bool, RegistryError> {
        let active = !self.check_registered(indexer)?.active;
        self.set_active(indexer, active)?;
        Ok(active)
    }

    fn adjust_reputation(
        &mut self,
        indexer: &Identity,
        outcome: ReputationOutcome,
    ) -> Result<ReputationScore, RegistryError> {
        let config = self.config.clone();
        let record = self.record_mut(indexer)?;
        record.reputation_score = record.reputation_score.adjust(outcome, &config);
        Ok(record.reputation_score)
    }
}
