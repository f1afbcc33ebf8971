//! Adapters for the Intake Subsystem.

pub mod printer;
pub mod qr;
