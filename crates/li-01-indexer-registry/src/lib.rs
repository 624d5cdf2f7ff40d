//! # LI-01 Indexer Registry
//!
//! Identity, bond, activity flag, reputation and sequencing state for every
//! indexer permitted to submit derived ledger records.
//!
//! **Component:** 1 (leaf)
//! **Architecture:** Hexagonal (domain + ports + service)
//!
//! ## Lifecycle
//!
//! ```text
//! Unregistered ──register (bond debited)──→ Active ⇄ Inactive
//!                                              (admin toggle)
//! ```
//!
//! There is no deregistered state and the bond is never refunded.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement |
//! |-----------|-------------|
//! | One record per identity | `register` fails `AlreadyRegistered` |
//! | Bond debited before the record exists | transfer runs before insert |
//! | Reputation in `[0, max]` | saturating [`ReputationScore`] |
//! | Per-indexer heights strictly increase | `check_block_sequence` |

#![warn(clippy::all)]

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{
    IndexerRecord, IndexerType, RegistryConfig, RegistryError, ReputationOutcome,
    ReputationScore, MAX_REPUTATION,
};
pub use ports::IndexerRegistryApi;
pub use service::IndexerRegistry;
