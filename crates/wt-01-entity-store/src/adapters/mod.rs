//! Adapters for the Entity Store.

pub mod memory;
pub mod time;
