//! # LI-02 Derived Index Store
//!
//! Canonical derived indexes built from indexer submissions.
//!
//! **Component:** 2 (leaf)
//!
//! ## Tables
//!
//! | Table | Key | Mutability |
//! |-------|-----|------------|
//! | blocks | sequential block id | append-only |
//! | transactions | sequential transaction id | append-only |
//! | events | sequential event id | append-only |
//! | token transfers | sequential transfer id | append-only |
//! | contracts | contract identity | upsert |
//! | address activity | address identity | additive |
//!
//! Secondary indexes: `height → block ids` and `tx hash → transaction id`.
//!
//! ## Invariants
//!
//! - Sequential ids start at 1, strictly increase, and are never reused. Each
//!   table owns its own sequence.
//! - `current_indexed_height` never decreases.
//! - A transaction is committed only if a block at its height exists.
//!
//! ## Concurrency
//!
//! Share the store as [`SharedIndexStore`]: one writer (the ingestion
//! pipeline) takes the write lock per operation, readers (query metering) take
//! the read lock.

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod store;

use parking_lot::RwLock;
use std::sync::Arc;

pub use domain::{
    AddressActivityRecord, BlockRecord, ContractRecord, EventRecord, IndexStoreStats, RecordId,
    Sequence, StoreError, TokenTransferRecord, TransactionRecord, DEFAULT_ADDRESS_TYPE,
    MAX_TOKENS_HELD,
};
pub use ports::{IndexStoreReader, IndexStoreWriter};
pub use store::DerivedIndexStore;

/// Store handle shared between the ingestion writer and query readers.
pub type SharedIndexStore = Arc<RwLock<DerivedIndexStore>>;

/// Create an empty shared store.
pub fn shared_store() -> SharedIndexStore {
    Arc::new(RwLock::new(DerivedIndexStore::new()))
}
