//! Prompt config store adapters.

mod file;
mod memory;

pub use file::FileConfigStore;
pub use memory::InMemoryConfigStore;
