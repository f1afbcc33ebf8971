//! # WT-07: API Gateway Subsystem
//!
//! The core-exposed surface consumed by UI/API layers: transaction creation,
//! roll and location queries, scoped search, the dashboard summary, and
//! reconciliation trigger/read. HTML rendering, sessions, and request
//! parsing live outside; this crate speaks domain types only.
//!
//! ## Architecture
//!
//! - **Domain**: `RollDetails`, `DashboardSummary`, `ApiError`
//! - **Service**: `GatewayService` wiring recorder, scoper, reconciliation,
//!   and intake behind one authenticated facade
//!
//! Every department-scoped query passes through the visibility scoper; a
//! directly addressed resource that exists but is out of scope yields
//! `PermissionDenied`, not a misleading not-found.

pub mod domain;
pub mod service;

pub use domain::errors::ApiError;
pub use domain::views::{DashboardSummary, RollDetails, SearchQuery};
pub use service::GatewayService;
