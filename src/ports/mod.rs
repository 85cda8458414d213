//! Ports: interfaces to external collaborators.

mod config_store;
mod feedback_store;
mod generative_model;

pub use config_store::{ConfigStoreError, PromptConfigStore};
pub use feedback_store::{FeedbackStore, FeedbackStoreError};
pub use generative_model::{
    ConversationRequest, FreeformRequest, GenerativeModel, MediaAsset, ModelError,
    StructuredRequest,
};
