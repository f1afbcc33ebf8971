//! Error types for the Visibility Scoper.

use thiserror::Error;
use wt_01_entity_store::StoreError;

/// Errors raised while scoping access.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum VisibilityError {
    /// The resource exists but lies outside the caller's department scope.
    #[error("Permission denied: {username} cannot access {resource}")]
    PermissionDenied { username: String, resource: String },

    /// Profile or department lookups failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

impl VisibilityError {
    pub fn denied(username: impl Into<String>, resource: impl Into<String>) -> Self {
        VisibilityError::PermissionDenied {
            username: username.into(),
            resource: resource.into(),
        }
    }
}
