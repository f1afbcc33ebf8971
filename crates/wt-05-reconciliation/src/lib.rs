//! # WT-05: Reconciliation Subsystem
//!
//! Periodic cross-check of the two independently computed views of roll
//! location: the log-derived view (latest transaction per roll) and the
//! field-derived view (`Roll.current_location`). Drift means some write path
//! bypassed the recorder's atomic commit; the engine detects and reports it,
//! it never auto-heals.
//!
//! ## Architecture
//!
//! - **Domain**: `ReconciliationReport`, `Mismatch`, `ReconcileError`
//! - **Ports**: Outbound `AlertSink`
//! - **Engine**: dual projection + diff + audit record + alert
//! - **Scheduler**: single background task per process, watch-channel
//!   shutdown, overlap guard

pub mod config;
pub mod domain;
pub mod engine;
pub mod ports;
pub mod scheduler;

pub use config::ReconciliationConfig;
pub use domain::errors::{AlertError, ReconcileError};
pub use domain::report::{Mismatch, ReconciliationReport};
pub use engine::ReconciliationEngine;
pub use ports::outbound::{AlertSink, TracingAlertSink};
pub use scheduler::spawn_reconciliation_task;
