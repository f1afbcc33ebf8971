//! Reconciliation report types.

use serde::{Deserialize, Serialize};

/// One location where the two projections disagree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mismatch {
    pub location_code: String,
    /// Rolls whose latest transaction points here.
    pub log_count: u64,
    /// Rolls whose `current_location` field points here.
    pub field_count: u64,
}

impl Mismatch {
    /// Audit-log line, e.g. `FMA01: dashboard=8 vs api=7`.
    pub fn line(&self) -> String {
        format!(
            "{}: dashboard={} vs api={}",
            self.location_code, self.log_count, self.field_count
        )
    }
}

/// Outcome of one reconciliation pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub run_at_ms: u64,
    pub mismatches: Vec<Mismatch>,
}

impl ReconciliationReport {
    pub fn is_clean(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// One line per mismatch, in location-code order.
    pub fn lines(&self) -> String {
        self.mismatches
            .iter()
            .map(Mismatch::line)
            .collect::<Vec<_>>()
            .join("\n")
    }
}
