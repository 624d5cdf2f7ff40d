//! # Id Sequences

use serde::{Deserialize, Serialize};

/// Sequential record id. The first id handed out is 1.
pub type RecordId = u64;

/// Monotonic id allocator for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sequence {
    next: RecordId,
}

impl Default for Sequence {
    fn default() -> Self {
        Self { next: 1 }
    }
}

impl Sequence {
    pub fn new() -> Self {
        Self::default()
    }

    /// Id the next allocation will return.
    pub fn peek(&self) -> RecordId {
        self.next
    }

    /// Allocate an id. Never returns the same id twice.
    pub fn allocate(&mut self) -> RecordId {
        let id = self.next;
        self.next += 1;
        id
    }
}
