//! Rejection reasons for the Transition Validator.

use shared_types::TxAction;
use thiserror::Error;

/// Why a proposed action was refused.
///
/// Rejections carry the attempted action, the last action, and the legal
/// alternatives so the caller can surface an actionable message.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TransitionError {
    /// The proposed action is not legal after the roll's last action.
    #[error(
        "Invalid transition: cannot do '{attempted}' after '{}'. Allowed: {}.",
        fmt_last(.last),
        fmt_legal(.legal)
    )]
    InvalidTransition {
        attempted: TxAction,
        /// `None` means the roll has no history yet.
        last: Option<TxAction>,
        legal: Vec<TxAction>,
    },

    /// The proposed action exactly repeats the roll's last action.
    #[error("Roll already has action {action} at this location")]
    Duplicate { action: TxAction },
}

fn fmt_last(last: &Option<TxAction>) -> String {
    match last {
        Some(action) => action.to_string(),
        None => "none".to_owned(),
    }
}

fn fmt_legal(legal: &[TxAction]) -> String {
    if legal.is_empty() {
        return "none".to_owned();
    }
    legal
        .iter()
        .map(TxAction::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}
