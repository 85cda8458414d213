//! Mock generative model for testing.
//!
//! Configurable to return queued responses or inject errors, and records
//! every call so tests can assert on what was (or was not) dispatched.
//!
//! # Example
//!
//! ```ignore
//! let model = MockModel::new()
//!     .with_structured_response("{\"executive_summary\": ...}")
//!     .with_freeform_error(MockFailure::Unavailable);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{
    ConversationRequest, FreeformRequest, GenerativeModel, ModelError, StructuredRequest,
};

/// Failure modes a mock call can be configured to produce.
#[derive(Debug, Clone)]
pub enum MockFailure {
    RateLimited { retry_after_secs: u32 },
    ContentFiltered { reason: String },
    Unavailable { message: String },
    AuthenticationFailed,
    Network { message: String },
    Timeout { timeout_secs: u32 },
}

impl From<MockFailure> for ModelError {
    fn from(failure: MockFailure) -> Self {
        match failure {
            MockFailure::RateLimited { retry_after_secs } => {
                ModelError::rate_limited(retry_after_secs)
            }
            MockFailure::ContentFiltered { reason } => ModelError::content_filtered(reason),
            MockFailure::Unavailable { message } => ModelError::unavailable(message),
            MockFailure::AuthenticationFailed => ModelError::AuthenticationFailed,
            MockFailure::Network { message } => ModelError::network(message),
            MockFailure::Timeout { timeout_secs } => ModelError::Timeout { timeout_secs },
        }
    }
}

type Outcome = Result<String, MockFailure>;

/// Mock implementation of the generative model port.
#[derive(Debug, Clone, Default)]
pub struct MockModel {
    structured_queue: Arc<Mutex<VecDeque<Outcome>>>,
    freeform_queue: Arc<Mutex<VecDeque<Outcome>>>,
    converse_queue: Arc<Mutex<VecDeque<Outcome>>>,
    structured_calls: Arc<Mutex<Vec<StructuredRequest>>>,
    freeform_calls: Arc<Mutex<Vec<FreeformRequest>>>,
    converse_calls: Arc<Mutex<Vec<ConversationRequest>>>,
}

impl MockModel {
    /// Creates a mock with empty queues.
    pub fn new() -> Self {
        Self::default()
    }

    /// Queues a successful structured response.
    pub fn with_structured_response(self, content: impl Into<String>) -> Self {
        self.structured_queue
            .lock()
            .unwrap()
            .push_back(Ok(content.into()));
        self
    }

    /// Queues a structured-call failure.
    pub fn with_structured_error(self, failure: MockFailure) -> Self {
        self.structured_queue
            .lock()
            .unwrap()
            .push_back(Err(failure));
        self
    }

    /// Queues a successful freeform response.
    pub fn with_freeform_response(self, content: impl Into<String>) -> Self {
        self.freeform_queue
            .lock()
            .unwrap()
            .push_back(Ok(content.into()));
        self
    }

    /// Queues a freeform-call failure.
    pub fn with_freeform_error(self, failure: MockFailure) -> Self {
        self.freeform_queue.lock().unwrap().push_back(Err(failure));
        self
    }

    /// Queues a successful conversational reply.
    pub fn with_converse_response(self, content: impl Into<String>) -> Self {
        self.converse_queue
            .lock()
            .unwrap()
            .push_back(Ok(content.into()));
        self
    }

    /// Queues a conversational-call failure.
    pub fn with_converse_error(self, failure: MockFailure) -> Self {
        self.converse_queue.lock().unwrap().push_back(Err(failure));
        self
    }

    /// Total number of calls across all three modes.
    pub fn call_count(&self) -> usize {
        self.structured_calls.lock().unwrap().len()
            + self.freeform_calls.lock().unwrap().len()
            + self.converse_calls.lock().unwrap().len()
    }

    /// All recorded structured calls.
    pub fn structured_calls(&self) -> Vec<StructuredRequest> {
        self.structured_calls.lock().unwrap().clone()
    }

    /// All recorded freeform calls.
    pub fn freeform_calls(&self) -> Vec<FreeformRequest> {
        self.freeform_calls.lock().unwrap().clone()
    }

    /// All recorded conversational calls.
    pub fn converse_calls(&self) -> Vec<ConversationRequest> {
        self.converse_calls.lock().unwrap().clone()
    }

    fn next(queue: &Mutex<VecDeque<Outcome>>) -> Result<String, ModelError> {
        queue
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock response".to_string()))
            .map_err(Into::into)
    }
}

#[async_trait]
impl GenerativeModel for MockModel {
    async fn structured(&self, request: StructuredRequest) -> Result<String, ModelError> {
        self.structured_calls.lock().unwrap().push(request);
        Self::next(&self.structured_queue)
    }

    async fn freeform(&self, request: FreeformRequest) -> Result<String, ModelError> {
        self.freeform_calls.lock().unwrap().push(request);
        Self::next(&self.freeform_queue)
    }

    async fn converse(&self, request: ConversationRequest) -> Result<String, ModelError> {
        self.converse_calls.lock().unwrap().push(request);
        Self::next(&self.converse_queue)
    }
}
