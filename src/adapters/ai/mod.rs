//! Generative model adapters.

mod gemini;
mod mock;

pub use gemini::{GeminiConfig, GeminiModel};
pub use mock::{MockFailure, MockModel};
