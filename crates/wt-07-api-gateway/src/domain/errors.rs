//! Error types for the API Gateway.

use shared_types::RollId;
use thiserror::Error;
use wt_01_entity_store::StoreError;
use wt_03_transaction_recorder::RecordError;
use wt_04_visibility::VisibilityError;
use wt_05_reconciliation::ReconcileError;
use wt_06_intake::IntakeError;

/// The gateway's surface error taxonomy.
///
/// `PermissionDenied` is distinct from the not-found variants: when a
/// resource exists but lies outside the caller's scope, existence is
/// admitted and access refused.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ApiError {
    #[error("Roll not found: {0}")]
    RollNotFound(RollId),

    #[error("Location not found: {0}")]
    LocationNotFound(String),

    #[error("Permission denied: {username} cannot access {resource}")]
    PermissionDenied { username: String, resource: String },

    /// QA scanning is switched off in the site configuration.
    #[error("QA scanning is disabled")]
    QaScanDisabled,

    #[error(transparent)]
    Record(#[from] RecordError),

    #[error(transparent)]
    Reconcile(#[from] ReconcileError),

    #[error(transparent)]
    Intake(#[from] IntakeError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl From<VisibilityError> for ApiError {
    fn from(err: VisibilityError) -> Self {
        match err {
            VisibilityError::PermissionDenied { username, resource } => {
                ApiError::PermissionDenied { username, resource }
            }
            VisibilityError::Store(e) => ApiError::Store(e),
        }
    }
}

impl ApiError {
    pub fn denied(username: impl Into<String>, resource: impl Into<String>) -> Self {
        ApiError::PermissionDenied {
            username: username.into(),
            resource: resource.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_visibility_error_maps_to_permission_denied() {
        let err: ApiError = VisibilityError::denied("op", "department LM").into();
        assert!(matches!(err, ApiError::PermissionDenied { .. }));
        assert_eq!(err.to_string(), "Permission denied: op cannot access department LM");
    }
}
