//! Error types for the Entity Store.

use thiserror::Error;

/// All errors that can occur in the entity store.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    /// Entity referenced by identity does not exist.
    #[error("{entity} not found: {key}")]
    NotFound { entity: &'static str, key: String },

    /// Uniqueness invariant violated.
    #[error("Duplicate {entity}: {key}")]
    Duplicate { entity: &'static str, key: String },

    /// Deletion blocked because other entities still reference this one.
    #[error("{entity} {key} is still referenced and cannot be deleted")]
    Referenced { entity: &'static str, key: String },

    /// A write violated a non-uniqueness constraint.
    #[error("Constraint violated: {0}")]
    Constraint(String),

    /// A lock was poisoned by a panicking writer.
    #[error("Store lock poisoned")]
    LockPoisoned,

    /// Snapshot persistence failed.
    #[error("I/O error: {0}")]
    Io(String),
}

impl StoreError {
    pub fn not_found(entity: &'static str, key: impl ToString) -> Self {
        StoreError::NotFound {
            entity,
            key: key.to_string(),
        }
    }

    pub fn duplicate(entity: &'static str, key: impl ToString) -> Self {
        StoreError::Duplicate {
            entity,
            key: key.to_string(),
        }
    }
}
