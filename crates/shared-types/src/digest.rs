//! # Query Digest
//!
//! 20-byte digest keying the query result cache.

use crate::entities::QueryKey;
use sha3::{Digest, Sha3_256};

/// Byte length of a query cache key.
pub const QUERY_KEY_LEN: usize = 20;

/// Digest of `(query_type, parameters)`.
///
/// SHA3-256 over the length-prefixed query type followed by the raw parameter
/// bytes, truncated to 20 bytes. The length prefix keeps `("ab", "c")` and
/// `("a", "bc")` apart.
pub fn query_digest(query_type: &str, params: &[u8]) -> QueryKey {
    let mut hasher = Sha3_256::new();
    hasher.update((query_type.len() as u32).to_be_bytes());
    hasher.update(query_type.as_bytes());
    hasher.update(params);
    let full = hasher.finalize();

    let mut key = [0u8; QUERY_KEY_LEN];
    key.copy_from_slice(&full[..QUERY_KEY_LEN]);
    key
}
