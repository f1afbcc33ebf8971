//! # WT-02: Transition Validator Subsystem
//!
//! Pure decision function for the roll lifecycle state machine: given the
//! action of a roll's most recent transaction (or none) and a proposed next
//! action, returns allow, allow-as-noop, or a structured rejection.
//!
//! ## Architecture
//!
//! - **Domain**: `TransitionError` rejection reasons
//! - **Validator**: the transition table and the duplicate/idempotence rule
//!
//! No I/O and no clocks: callers supply the last transition, the validator
//! answers. Determinism and totality are test properties.

pub mod domain;
pub mod validator;

pub use domain::errors::TransitionError;
pub use validator::{legal_next, validate, Decision, LastTransition};
