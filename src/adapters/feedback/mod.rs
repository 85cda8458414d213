//! Feedback store adapters.

mod memory;

pub use memory::InMemoryFeedbackStore;
