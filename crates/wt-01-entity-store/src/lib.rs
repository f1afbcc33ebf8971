//! # WT-01: Entity Store Subsystem
//!
//! Durable persistence for the warehouse entities, with uniqueness and
//! referential-integrity invariants enforced at write time.
//!
//! ## Architecture
//!
//! - **Domain**: `StoreError` taxonomy
//! - **Ports**: Outbound store traits (`CatalogStore`, `RollStore`,
//!   `TransactionLog`, `ProfileStore`, `SiteConfigStore`, `AuditStore`),
//!   aggregated as `WarehouseStore`, plus the `TimeSource` clock port
//! - **Adapters**: `InMemoryWarehouseDb` (optionally file-backed),
//!   `SystemTimeSource`, `ManualTimeSource`
//!
//! ## Invariants
//!
//! - The transaction log is append-only; `TransactionLog::commit` is the
//!   single code path that writes `Roll.current_location`.
//! - Commit order is total: every transaction gets a monotonic `seq` and a
//!   non-decreasing server timestamp under one write lock.

pub mod adapters;
pub mod domain;
pub mod ports;

pub use adapters::memory::InMemoryWarehouseDb;
pub use adapters::time::{ManualTimeSource, SystemTimeSource};
pub use domain::errors::StoreError;
pub use ports::outbound::{
    AuditStore, CatalogStore, NewTransaction, ProfileStore, RollStore, SiteConfigStore,
    TimeSource, TransactionLog, WarehouseStore,
};
