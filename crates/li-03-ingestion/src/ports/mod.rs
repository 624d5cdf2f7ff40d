//! # Ports Layer
//!
//! - **Inbound**: [`IngestionApi`], driven by the node's request router.
//! - **Outbound**: the registry API (LI-01) and the store writer (LI-02).

pub mod inbound;

pub use inbound::IngestionApi;
