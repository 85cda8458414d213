//! Feedback Store Port - append-only document collection for feedback logs.

use async_trait::async_trait;

use crate::domain::feedback::FeedbackLog;

/// Errors that can occur during feedback store operations.
#[derive(Debug, thiserror::Error)]
pub enum FeedbackStoreError {
    #[error("Failed to serialize entry: {0}")]
    SerializationFailed(String),

    #[error("Store error: {0}")]
    StoreError(String),
}

/// Port for the feedback log collection.
///
/// The collection is append-only with server-assigned timestamps; entries
/// are never updated or deleted.
#[async_trait]
pub trait FeedbackStore: Send + Sync {
    /// Appends an entry, assigning the creation timestamp server-side.
    ///
    /// Any `created_at` the caller set is ignored.
    async fn append(&self, entry: FeedbackLog) -> Result<(), FeedbackStoreError>;

    /// Fetches the full collection, in no guaranteed order.
    async fn fetch_all(&self) -> Result<Vec<FeedbackLog>, FeedbackStoreError>;
}
