//! In-memory feedback store for tests and local runs.

use async_trait::async_trait;
use chrono::Utc;
use std::sync::Mutex;

use crate::domain::feedback::FeedbackLog;
use crate::ports::{FeedbackStore, FeedbackStoreError};

/// In-memory append-only feedback collection.
///
/// Assigns the creation timestamp on append, the way the real document
/// store assigns server timestamps. Entries are returned in insertion
/// order; callers that need a sort do it themselves.
#[derive(Debug, Default)]
pub struct InMemoryFeedbackStore {
    entries: Mutex<Vec<FeedbackLog>>,
    fetch_count: Mutex<usize>,
}

impl InMemoryFeedbackStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.lock().unwrap().len()
    }

    /// Returns true if nothing has been appended.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of `fetch_all` calls served, for cache tests.
    pub fn fetch_count(&self) -> usize {
        *self.fetch_count.lock().unwrap()
    }

    /// Seeds an entry as-is, without touching its timestamp.
    pub fn seed(&self, entry: FeedbackLog) {
        self.entries.lock().unwrap().push(entry);
    }
}

#[async_trait]
impl FeedbackStore for InMemoryFeedbackStore {
    async fn append(&self, mut entry: FeedbackLog) -> Result<(), FeedbackStoreError> {
        entry.created_at = Some(Utc::now());
        self.entries.lock().unwrap().push(entry);
        Ok(())
    }

    async fn fetch_all(&self) -> Result<Vec<FeedbackLog>, FeedbackStoreError> {
        *self.fetch_count.lock().unwrap() += 1;
        Ok(self.entries.lock().unwrap().clone())
    }
}
