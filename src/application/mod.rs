//! Application services composing the domain over the ports.

mod error;
mod feedback_cache;
mod orchestrator;
mod persona_store;

pub use error::AnalysisError;
pub use feedback_cache::{Clock, FeedbackCache, SystemClock, FRESHNESS_WINDOW};
pub use orchestrator::AnalysisOrchestrator;
pub use persona_store::PersonaConfigurationStore;
