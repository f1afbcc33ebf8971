//! The transition table and duplicate rule.

use crate::domain::errors::TransitionError;
use shared_types::TxAction;

/// The last recorded transition of a roll, as seen by the validator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LastTransition {
    pub action: TxAction,
    /// Location of the last transaction, if it had one.
    pub location_code: Option<String>,
}

impl LastTransition {
    pub fn new(action: TxAction, location_code: Option<&str>) -> Self {
        Self {
            action,
            location_code: location_code.map(str::to_owned),
        }
    }
}

/// Validator verdict for a proposed action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    /// Record the transaction.
    Allow,
    /// Repeat PUTAWAY at the same rack: succeed by returning the prior
    /// transaction instead of writing a duplicate row.
    Noop,
    /// Refuse with a structured reason; nothing is written.
    Reject(TransitionError),
}

/// Legal next actions after `last`.
///
/// TEMP_STORAGE has no row as a last action; until product intent is
/// clarified it permits no further transitions.
pub fn legal_next(last: Option<TxAction>) -> &'static [TxAction] {
    match last {
        None => &[TxAction::Putaway, TxAction::Dispatch, TxAction::Transfer],
        Some(TxAction::QaScan) => &[TxAction::Putaway, TxAction::Dispatch, TxAction::Transfer],
        Some(TxAction::Putaway) => &[TxAction::Dispatch, TxAction::Transfer],
        Some(TxAction::Transfer) => &[TxAction::Putaway, TxAction::Dispatch],
        Some(TxAction::Dispatch) => &[],
        Some(TxAction::TempStorage) => &[],
    }
}

/// Decide whether `proposed` may follow `last`.
///
/// The duplicate rule runs first: an exact repeat of the last action is a
/// no-op for PUTAWAY at the same location, a duplicate rejection for any
/// other repeat except a TRANSFER to a different rack — which falls through
/// to the table (and the table refuses TRANSFER after TRANSFER anyway).
pub fn validate(
    last: Option<&LastTransition>,
    proposed: TxAction,
    proposed_location: Option<&str>,
) -> Decision {
    if let Some(last) = last {
        if last.action == proposed {
            let same_location =
                last.location_code.is_some() && last.location_code.as_deref() == proposed_location;
            if proposed == TxAction::Putaway && same_location {
                return Decision::Noop;
            }
            if proposed != TxAction::Transfer || same_location {
                return Decision::Reject(TransitionError::Duplicate { action: proposed });
            }
        }
    }

    let last_action = last.map(|l| l.action);
    let legal = legal_next(last_action);
    if legal.contains(&proposed) {
        Decision::Allow
    } else {
        Decision::Reject(TransitionError::InvalidTransition {
            attempted: proposed,
            last: last_action,
            legal: legal.to_vec(),
        })
    }
}
