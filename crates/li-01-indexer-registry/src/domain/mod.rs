//! # Domain Layer
//!
//! Indexer records, reputation arithmetic and registry errors. No I/O.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::*;
pub use value_objects::*;
