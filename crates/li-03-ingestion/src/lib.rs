//! # LI-03 Ingestion Pipeline
//!
//! Validates indexer submissions against the registry and the store, then
//! commits them as derived records.
//!
//! **Component:** 3
//!
//! ## Indexer State Machine
//!
//! ```text
//! Unregistered ──register──▶ Active ◀──toggle──▶ Inactive
//! ```
//!
//! There is no deregistered state.
//!
//! ## Caller Requirements
//!
//! | Operation | Registered | Active | Other precondition |
//! |-----------|:----------:|:------:|--------------------|
//! | `index_block` | ✓ | ✓ | height above the indexer's last accepted height |
//! | `index_transaction` | ✓ | | block exists at height |
//! | `index_event` | ✓ | | |
//! | `index_token_transfer` | ✓ | | |
//! | `index_contract` | ✓ | | |
//! | `batch_index_transactions` | ✓ | | at most `max_batch_size` items, every height has a block |
//!
//! Every precondition is checked before the first mutation, so a failed call
//! leaves registry and store exactly as they were.

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    BlockSubmission, ContractSubmission, EventSubmission, IngestionConfig, IngestionError,
    TokenTransferSubmission, TransactionSubmission, DEFAULT_MAX_BATCH_SIZE,
};
pub use ports::IngestionApi;
pub use service::IngestionPipeline;
