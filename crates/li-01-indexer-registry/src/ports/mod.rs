//! # Ports Layer
//!
//! - **Inbound**: [`IndexerRegistryApi`], used by ingestion and admin control.
//! - **Outbound**: the ledger transfer port from `shared-types`.

pub mod inbound;

pub use inbound::IndexerRegistryApi;
