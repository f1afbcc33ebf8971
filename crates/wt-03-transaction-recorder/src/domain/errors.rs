//! Error types for the Transaction Recorder.

use shared_types::{RollId, TxAction};
use thiserror::Error;
use wt_01_entity_store::StoreError;
use wt_02_transition_validator::TransitionError;

/// All errors that can occur while recording a transaction.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RecordError {
    /// No roll with this identity exists.
    #[error("Roll not found: {0}")]
    RollNotFound(RollId),

    /// A location code was given but does not resolve.
    #[error("Location not found: {0}")]
    LocationNotFound(String),

    /// The action places a roll but no location code was supplied.
    #[error("Action {action} requires a location code")]
    MissingLocation { action: TxAction },

    /// The transition validator refused the action; nothing was written.
    #[error(transparent)]
    Transition(#[from] TransitionError),

    /// The store refused the commit.
    #[error(transparent)]
    Store(#[from] StoreError),
}
