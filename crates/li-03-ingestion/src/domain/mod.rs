//! # Domain Layer

pub mod errors;
pub mod submissions;
pub mod value_objects;

pub use errors::*;
pub use submissions::*;
pub use value_objects::*;
