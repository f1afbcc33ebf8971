//! Ports for the Intake Subsystem.

pub mod outbound;
