//! Error types for the Reconciliation Subsystem.

use thiserror::Error;
use wt_01_entity_store::StoreError;

/// All errors that can occur during a reconciliation run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ReconcileError {
    /// Another run is still in progress; overlapping runs would read
    /// inconsistent snapshots and self-report false mismatches.
    #[error("Reconciliation already running")]
    AlreadyRunning,

    /// Projection or audit-record persistence failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Alert delivery failure. Never propagated out of a reconciliation run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AlertError {
    #[error("Alert delivery failed: {0}")]
    Delivery(String),
}
