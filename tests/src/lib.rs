//! # Warehouse-Trace Test Suite
//!
//! Unified test crate for cross-subsystem flows.
//!
//! ## Structure
//!
//! ```text
//! tests/src/
//! ├── fixtures.rs       # Shared harness wiring every subsystem
//! └── integration/      # Cross-subsystem scenarios
//!     ├── lifecycle.rs      # Roll lifecycle end to end
//!     ├── reconciliation.rs # Drift detection across projections
//!     ├── visibility.rs     # Department scoping end to end
//!     └── intake.rs         # Bulk import flows
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! cargo test -p wt-tests
//! cargo test -p wt-tests integration::lifecycle::
//! ```

#![allow(dead_code)]

pub mod fixtures;
pub mod integration;
