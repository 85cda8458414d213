//! Domain layer: pure types and logic, no I/O.

pub mod analysis;
pub mod chat;
pub mod feedback;
pub mod foundation;
pub mod prompt;
