//! Adapters: concrete implementations of the ports.

pub mod ai;
pub mod config_store;
pub mod feedback;
