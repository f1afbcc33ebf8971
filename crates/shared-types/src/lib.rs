//! # Shared Types Crate
//!
//! This crate contains all domain entities and the authenticated principal
//! contract shared across the warehouse subsystems.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: All cross-subsystem types are defined here.
//! - **Append-Only History**: `Transaction` rows are immutable once written;
//!   every "current state" field elsewhere is a projection of their tail.
//! - **No Hidden Identity**: Callers are identified by an `AuthPrincipal`
//!   supplied by the (out-of-scope) authentication provider on every call.

pub mod entities;
pub mod principal;

pub use entities::*;
pub use principal::AuthPrincipal;
