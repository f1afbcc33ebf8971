//! # WT-04: Visibility Scoper Subsystem
//!
//! Maps an authenticated principal to the set of department codes it may see
//! and act on, and applies that set as a filter over department-scoped
//! queries. Centralizing the mapping here keeps role checks out of every
//! individual query path.
//!
//! ## Scope rules
//!
//! - superuser, Factory Admin, Forklift Driver: unrestricted
//! - Plant Manager, Operator: exactly their home department
//! - Stock Keeper: home department plus extra-access codes
//! - any other role: no access
//!
//! Direct addressing of an existing but out-of-scope resource yields
//! `PermissionDenied`, never a misleading not-found.

pub mod domain;
pub mod scoper;

pub use domain::errors::VisibilityError;
pub use domain::scope::AccessScope;
pub use scoper::VisibilityScoper;
