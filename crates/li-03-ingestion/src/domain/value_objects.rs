//! # Value Objects

use serde::{Deserialize, Serialize};

/// Largest accepted transaction batch.
pub const DEFAULT_MAX_BATCH_SIZE: usize = 50;

/// Ingestion configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IngestionConfig {
    pub max_batch_size: usize,
}

impl Default for IngestionConfig {
    fn default() -> Self {
        Self {
            max_batch_size: DEFAULT_MAX_BATCH_SIZE,
        }
    }
}
