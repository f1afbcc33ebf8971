//! # WT-03: Transaction Recorder Subsystem
//!
//! The single write path for roll movements: validates the proposed action
//! against the roll's last transaction, then appends the new transaction and
//! updates the roll's denormalized location in one atomic store commit.
//!
//! ## Architecture
//!
//! - **Domain**: `RecordError` taxonomy, request/outcome types
//! - **Ports**: Inbound `TransactionRecorderApi`
//! - **Service**: `RecorderService` with per-roll serialization
//!
//! ## Concurrency
//!
//! Concurrent record calls for the *same* roll serialize on a per-roll async
//! mutex, so "read last, validate, commit" is one unit — two interleaved
//! requests can never both read the same last action and both be permitted.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::errors::RecordError;
pub use domain::requests::{RecordOutcome, RecordRequest};
pub use ports::inbound::TransactionRecorderApi;
pub use service::RecorderService;
