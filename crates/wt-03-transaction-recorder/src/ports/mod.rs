//! Ports for the Transaction Recorder.

pub mod inbound;
