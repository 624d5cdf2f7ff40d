//! # Ports Layer
//!
//! - **Reader**: [`IndexStoreReader`], used by query metering.
//! - **Writer**: [`IndexStoreWriter`], used by the ingestion pipeline.

pub mod inbound;

pub use inbound::{IndexStoreReader, IndexStoreWriter};
