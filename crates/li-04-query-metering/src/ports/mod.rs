//! # Ports Layer
//!
//! - **Inbound**: [`QueryMeteringApi`], driven by the node's request router.
//! - **Outbound**: the store reader (LI-02) and the ledger transfer port.

pub mod inbound;

pub use inbound::QueryMeteringApi;
