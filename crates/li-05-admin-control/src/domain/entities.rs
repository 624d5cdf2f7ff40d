//! # Domain Entities

use serde::{Deserialize, Serialize};
use shared_types::{Identity, Timestamp};
use uuid::Uuid;

/// A requested analytics report. Generating the report happens elsewhere.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalyticsReportTicket {
    pub report_id: Uuid,
    pub requested_by: Identity,
    pub requested_at: Timestamp,
}

impl AnalyticsReportTicket {
    pub fn new(requested_by: Identity, requested_at: Timestamp) -> Self {
        Self {
            report_id: Uuid::new_v4(),
            requested_by,
            requested_at,
        }
    }
}
