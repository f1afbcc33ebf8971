//! Domain layer for the Visibility Scoper.

pub mod errors;
pub mod scope;
