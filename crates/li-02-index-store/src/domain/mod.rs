//! # Domain Layer
//!
//! Record types, id sequences and store errors.

pub mod entities;
pub mod errors;
pub mod sequence;

pub use entities::*;
pub use errors::*;
pub use sequence::*;
