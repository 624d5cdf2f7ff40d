//! # Shared Types Crate
//!
//! Primitives used by every Ledger Index component.
//!
//! ## Design Principles
//!
//! - **Fixed-width fields stay fixed**: block, parent and transaction hashes are
//!   32 bytes, query cache keys are 20 bytes, and every bounded string or byte
//!   field is checked once, at construction.
//! - **Caller identity is injected**: every public operation receives a
//!   [`CallContext`] carrying the caller and the host clock value. Components
//!   never read a clock of their own.
//! - **Value transfer is external**: bonds and fees move through the
//!   [`LedgerTransfer`] port, which either fully succeeds or aborts the caller.

pub mod digest;
pub mod entities;
pub mod errors;
pub mod fields;
pub mod ledger;

pub use digest::{query_digest, QUERY_KEY_LEN};
pub use entities::*;
pub use errors::*;
pub use fields::*;
pub use ledger::{InMemoryLedger, LedgerTransfer, TransferError};
