//! Error types for the Intake Subsystem.

use shared_types::RollId;
use thiserror::Error;
use wt_01_entity_store::StoreError;
use wt_04_visibility::VisibilityError;

/// All errors that can occur during intake.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum IntakeError {
    /// A row names a department code the catalog does not know.
    #[error("Unknown department: {0}")]
    UnknownDepartment(String),

    /// No roll with this identity exists.
    #[error("Roll not found: {0}")]
    RollNotFound(RollId),

    /// The caller may not enter data for a row's department.
    #[error(transparent)]
    Denied(#[from] VisibilityError),

    /// Label printing failed at the gateway; reported, never retried here.
    #[error(transparent)]
    Print(#[from] PrintError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// QR image generation failure. Logged at the boundary; never blocks roll
/// creation.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QrError {
    #[error("QR generation failed: {0}")]
    Generation(String),
}

/// Printer gateway failure.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PrintError {
    #[error("Print failed: {0}")]
    Gateway(String),
}
