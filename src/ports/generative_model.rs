//! Generative Model Port - Interface to the multimodal model service.
//!
//! The core consumes three call shapes: a structured-output call that
//! carries a declarative response schema and a binary media payload, a
//! free-text call, and a multi-turn conversational call. Implementations
//! translate between the provider's API and these domain types.

use async_trait::async_trait;

use crate::domain::analysis::SchemaNode;
use crate::domain::chat::ChatMessage;

/// Port for the multimodal generative model service.
///
/// Every method is an independent asynchronous unit of work; the core never
/// retries and never imposes a timeout of its own. The contract is
/// "eventually resolves or rejects".
#[async_trait]
pub trait GenerativeModel: Send + Sync {
    /// Structured-output call: prompt + media payload + response schema,
    /// returning text expected to parse against that schema.
    async fn structured(&self, request: StructuredRequest) -> Result<String, ModelError>;

    /// Free-text call: prompt plus optional safety-threshold configuration.
    async fn freeform(&self, request: FreeformRequest) -> Result<String, ModelError>;

    /// Multi-turn conversational call over ordered role-tagged turns.
    async fn converse(&self, request: ConversationRequest) -> Result<String, ModelError>;
}

/// A binary media payload (video or audio clip).
#[derive(Debug, Clone)]
pub struct MediaAsset {
    /// Raw bytes of the clip.
    pub bytes: Vec<u8>,
    /// MIME type, e.g. "video/mp4" or "audio/mpeg".
    pub mime_type: String,
}

impl MediaAsset {
    /// Creates a new media asset.
    pub fn new(bytes: Vec<u8>, mime_type: impl Into<String>) -> Self {
        Self {
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// Returns true if the asset carries no data.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Request for a structured-output model call.
#[derive(Debug, Clone)]
pub struct StructuredRequest {
    /// The full prompt text.
    pub prompt: String,
    /// The clip to analyze.
    pub media: MediaAsset,
    /// Declarative shape the response must follow.
    pub schema: SchemaNode,
}

/// Request for a free-text model call.
#[derive(Debug, Clone)]
pub struct FreeformRequest {
    /// The full prompt text.
    pub prompt: String,
    /// Optional safety threshold (1-10) mapped by the adapter onto the
    /// provider's safety settings.
    pub sensitivity: Option<u8>,
}

impl FreeformRequest {
    /// Creates a request with no safety-threshold override.
    pub fn new(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            sensitivity: None,
        }
    }

    /// Sets the safety threshold.
    pub fn with_sensitivity(mut self, sensitivity: u8) -> Self {
        self.sensitivity = Some(sensitivity);
        self
    }
}

/// Request for a conversational model call.
#[derive(Debug, Clone)]
pub struct ConversationRequest {
    /// Ordered role-tagged turns, ending with the new user message.
    pub turns: Vec<ChatMessage>,
}

impl ConversationRequest {
    /// Creates a request from an ordered turn sequence.
    pub fn new(turns: Vec<ChatMessage>) -> Self {
        Self { turns }
    }
}

/// Model service errors.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// Rate limited by the provider.
    #[error("rate limited: retry after {retry_after_secs}s")]
    RateLimited { retry_after_secs: u32 },

    /// Content was blocked by the provider's safety filter.
    #[error("content filtered: {reason}")]
    ContentFiltered { reason: String },

    /// Provider is unavailable.
    #[error("provider unavailable: {message}")]
    Unavailable { message: String },

    /// API key or authentication failed.
    #[error("authentication failed")]
    AuthenticationFailed,

    /// Network error during the request.
    #[error("network error: {0}")]
    Network(String),

    /// Failed to read the provider's response envelope.
    #[error("provider response error: {0}")]
    Parse(String),

    /// Invalid request configuration.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Request timed out at the transport layer.
    #[error("request timed out after {timeout_secs}s")]
    Timeout { timeout_secs: u32 },
}

impl ModelError {
    /// Creates a rate limited error.
    pub fn rate_limited(retry_after_secs: u32) -> Self {
        Self::RateLimited { retry_after_secs }
    }

    /// Creates a content filtered error.
    pub fn content_filtered(reason: impl Into<String>) -> Self {
        Self::ContentFiltered {
            reason: reason.into(),
        }
    }

    /// Creates an unavailable error.
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
        }
    }

    /// Creates a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if a caller-side retry could plausibly succeed.
    ///
    /// Informational only: the core itself never retries.
    pub fn is_retryable(&self) -> bool {
        matches!(
            self,
            ModelError::RateLimited { .. }
                | ModelError::Unavailable { .. }
                | ModelError::Network(_)
                | ModelError::Timeout { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn media_asset_reports_empty() {
        assert!(MediaAsset::new(Vec::new(), "video/mp4").is_empty());
        assert!(!MediaAsset::new(vec![0x42], "video/mp4").is_empty());
    }

    #[test]
    fn freeform_request_builder_works() {
        let request = FreeformRequest::new("analyze this").with_sensitivity(8);
        assert_eq!(request.prompt, "analyze this");
        assert_eq!(request.sensitivity, Some(8));
    }

    #[test]
    fn model_error_retryable_classification() {
        assert!(ModelError::rate_limited(30).is_retryable());
        assert!(ModelError::unavailable("down").is_retryable());
        assert!(ModelError::network("reset").is_retryable());
        assert!(ModelError::Timeout { timeout_secs: 60 }.is_retryable());

        assert!(!ModelError::AuthenticationFailed.is_retryable());
        assert!(!ModelError::content_filtered("blocked").is_retryable());
        assert!(!ModelError::parse("bad envelope").is_retryable());
    }

    #[test]
    fn model_error_displays_correctly() {
        assert_eq!(
            ModelError::rate_limited(30).to_string(),
            "rate limited: retry after 30s"
        );
        assert_eq!(
            ModelError::Timeout { timeout_secs: 60 }.to_string(),
            "request timed out after 60s"
        );
    }
}
