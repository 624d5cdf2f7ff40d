//! # Inbound Ports
//!
//! API exposed by the Indexer Registry.

use crate::domain::{IndexerRecord, IndexerType, RegistryError, ReputationOutcome, ReputationScore};
use shared_types::{CallContext, Height, Identity, Name64};

/// Indexer Registry API.
///
/// `check_*` methods are read-only precondition checks; callers run them
/// before committing anything so a failure leaves no trace.
pub trait IndexerRegistryApi {
    /// Register `ctx.caller`, debiting the configured bond.
    fn register(
        &mut self,
        ctx: CallContext,
        name: Name64,
        indexer_type: IndexerType,
    ) -> Result<&IndexerRecord, RegistryError>;

    /// Look up an indexer.
    fn get_indexer(&self, indexer: &Identity) -> Option<&IndexerRecord>;

    /// Number of registered indexers.
    fn indexer_count(&self) -> usize;

    /// Fails `NotRegistered` unless the identity is registered.
    fn check_registered(&self, indexer: &Identity) -> Result<&IndexerRecord, RegistryError>;

    /// Fails `NotRegistered` or `Inactive`.
    fn check_active(&self, indexer: &Identity) -> Result<&IndexerRecord, RegistryError>;

    /// Fails unless `height` may be the indexer's next accepted block.
    fn check_block_sequence(&self, indexer: &Identity, height: Height) -> Result<(), RegistryError>;

    /// Record an accepted block: bump `blocks_indexed`, set
    /// `last_indexed_height`, and reward reputation.
    fn record_block(&mut self, indexer: &Identity, height: Height) -> Result<(), RegistryError>;

    /// Whether the identity is registered and active.
    fn is_active(&self, indexer: &Identity) -> bool;

    /// Set the activity flag.
    fn set_active(&mut self, indexer: &Identity, active: bool) -> Result<(), RegistryError>;

    /// Flip the activity flag, returning the new value.
    fn toggle_active(&mut self, indexer: &Identity) -> Result<bool, RegistryError>;

    /// Saturating reputation update.
    fn adjust_reputation(
        &mut self,
        indexer: &Identity,
        outcome: ReputationOutcome,
    ) -> Result<ReputationScore, RegistryError>;
}
