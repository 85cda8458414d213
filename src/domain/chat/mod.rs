//! Conversational context management for report chat.

mod context;

pub use context::{ChatContextBuilder, ChatMessage, ChatRole, FALLBACK_REPLY};
