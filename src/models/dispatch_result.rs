//! Delivery manifest entries.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::PayrollRecord;

/// One manifest entry: a paystub handed to the dispatch sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DispatchResult {
    /// Recipient email.
    pub email: String,
    /// Recipient display name.
    pub full_name: String,
    /// When the dispatch call for this record returned.
    pub sent_at: DateTime<Utc>,
}

impl DispatchResult {
    /// Creates a manifest entry for `record`, stamped with `sent_at`.
    pub fn for_record(record: &PayrollRecord, sent_at: DateTime<Utc>) -> Self {
        Self {
            email: record.email.clone(),
            full_name: record.full_name.clone(),
            sent_at,
        }
    }
}
