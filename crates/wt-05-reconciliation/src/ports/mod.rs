//! Ports for the Reconciliation Subsystem.

pub mod outbound;
