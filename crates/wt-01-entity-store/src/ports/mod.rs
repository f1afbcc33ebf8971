//! Ports for the Entity Store.

pub mod outbound;
