//! Request and outcome types for the record operation.

use shared_types::{RollId, Transaction, TxAction};

/// A request to record one movement against a roll.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordRequest {
    pub roll_id: RollId,
    pub action: TxAction,
    /// Required for PUTAWAY, TRANSFER, and TEMP_STORAGE.
    pub location_code: Option<String>,
    /// Username performing the scan.
    pub user: String,
    /// Free-text customer name; resolved-or-created on DISPATCH.
    pub customer: Option<String>,
}

impl RecordRequest {
    pub fn new(roll_id: RollId, action: TxAction, user: impl Into<String>) -> Self {
        Self {
            roll_id,
            action,
            location_code: None,
            user: user.into(),
            customer: None,
        }
    }

    pub fn at_location(mut self, code: impl Into<String>) -> Self {
        self.location_code = Some(code.into());
        self
    }

    pub fn for_customer(mut self, name: impl Into<String>) -> Self {
        self.customer = Some(name.into());
        self
    }
}

/// What the recorder did with the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordOutcome {
    /// A new transaction row was committed.
    Recorded(Transaction),
    /// Idempotent repeat (PUTAWAY at the same rack): the prior row is
    /// returned and nothing was written.
    AlreadyRecorded(Transaction),
}

impl RecordOutcome {
    pub fn transaction(&self) -> &Transaction {
        match self {
            RecordOutcome::Recorded(tx) | RecordOutcome::AlreadyRecorded(tx) => tx,
        }
    }

    pub fn is_noop(&self) -> bool {
        matches!(self, RecordOutcome::AlreadyRecorded(_))
    }
}
