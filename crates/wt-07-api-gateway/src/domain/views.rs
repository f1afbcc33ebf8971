//! Read-model views assembled by the gateway.

use serde::{Deserialize, Serialize};
use shared_types::{ReconciliationRecord, RollId, TimestampMs};

/// A roll with its derived metadata, as shown on scan and search screens.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RollDetails {
    pub roll_id: RollId,
    pub material_number: String,
    pub description: String,
    pub batch_number: String,
    pub weight_kg: f64,
    pub current_location: Option<String>,
    /// Human-readable state derived from the last transaction, e.g.
    /// "In stock at FMA01" or "Dispatched to Acme".
    pub status: String,
    /// Timestamp of the last transaction, if any.
    pub posting_date_ms: Option<TimestampMs>,
    /// Customer of the most recent DISPATCH, if any.
    pub dispatch_customer: Option<String>,
    pub qr_link: String,
    pub qr_image_url: String,
}

/// Status shown while a roll has no usable history.
pub const STATUS_PENDING: &str = "Yet to store or dispatch";

/// Filters for the roll search screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchQuery {
    /// Matches material number, batch number, or description
    /// (case-insensitive substring).
    pub text: Option<String>,
    /// Department override; only honored within the caller's scope.
    pub department: Option<String>,
    /// Inclusive batch-creation range.
    pub date_from_ms: Option<TimestampMs>,
    pub date_to_ms: Option<TimestampMs>,
}

/// The manager dashboard's summary cards plus reconciliation state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardSummary {
    /// Department the numbers are scoped to; `None` means all.
    pub department: Option<String>,
    /// Rolls whose material was registered by the department.
    pub produced: u64,
    /// Distinct rolls ever put away into the department's racks.
    pub stored: u64,
    /// Distinct rolls dispatched by the department's users.
    pub dispatched: u64,
    pub pending_storage: i64,
    pub pending_dispatch: i64,
    pub last_reconciliation: Option<ReconciliationRecord>,
    /// Mismatch lines in the latest reconciliation, zero when clean.
    pub mismatch_count: u64,
}
