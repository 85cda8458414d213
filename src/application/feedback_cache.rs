//! Read-through cache over the feedback collection.
//!
//! Feedback is written rarely and read in bursts (the review screen), so
//! the full collection is cached as one immutable snapshot with a short
//! freshness window. A write invalidates the snapshot immediately; a read
//! within the window hands back the same snapshot without touching the
//! store.

use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use crate::domain::feedback::FeedbackLog;
use crate::ports::{FeedbackStore, FeedbackStoreError};

/// How long a fetched snapshot stays servable without a re-fetch.
pub const FRESHNESS_WINDOW: Duration = Duration::from_secs(5 * 60);

/// Monotonic time source, swappable for tests.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;
}

/// Wall-clock-backed `Clock` used outside tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }
}

struct Snapshot {
    entries: Arc<Vec<FeedbackLog>>,
    captured_at: Instant,
}

impl Snapshot {
    fn is_fresh(&self, now: Instant) -> bool {
        now.duration_since(self.captured_at) < FRESHNESS_WINDOW
    }
}

/// Snapshot plus the invalidation generation, guarded by one mutex.
///
/// The generation counts invalidations. A refetch records the generation
/// before it hits the store and installs its result only if the generation
/// is unchanged, so a write that lands while the fetch is in flight can
/// never be masked by the fetch's pre-write result.
struct CacheState {
    snapshot: Option<Snapshot>,
    generation: u64,
}

/// Caching facade over the feedback store port.
pub struct FeedbackCache {
    store: Arc<dyn FeedbackStore>,
    clock: Arc<dyn Clock>,
    state: Mutex<CacheState>,
}

impl FeedbackCache {
    /// Creates a cache over a store, using the system clock.
    pub fn new(store: Arc<dyn FeedbackStore>) -> Self {
        Self::with_clock(store, Arc::new(SystemClock))
    }

    /// Creates a cache with an explicit clock.
    pub fn with_clock(store: Arc<dyn FeedbackStore>, clock: Arc<dyn Clock>) -> Self {
        Self {
            store,
            clock,
            state: Mutex::new(CacheState {
                snapshot: None,
                generation: 0,
            }),
        }
    }

    /// Appends a rating event and invalidates the cached snapshot, so the
    /// next read reflects the write.
    pub async fn record(&self, entry: FeedbackLog) -> Result<(), FeedbackStoreError> {
        self.store.append(entry).await?;
        self.invalidate();
        Ok(())
    }

    /// Returns the feedback collection, newest first.
    ///
    /// A fresh snapshot is returned as-is: repeated calls within the
    /// freshness window yield the identical list object. Pass
    /// `force_refresh` to bypass the window and re-fetch unconditionally.
    pub async fn list(
        &self,
        force_refresh: bool,
    ) -> Result<Arc<Vec<FeedbackLog>>, FeedbackStoreError> {
        // The lock is not held across the fetch; the generation check below
        // detects invalidations that land while the fetch is in flight.
        let observed_generation = {
            let state = self.state.lock().unwrap();
            if !force_refresh {
                if let Some(snapshot) = state.snapshot.as_ref() {
                    if snapshot.is_fresh(self.clock.now()) {
                        return Ok(Arc::clone(&snapshot.entries));
                    }
                }
            }
            state.generation
        };

        let mut entries = self.store.fetch_all().await?;
        // Entries without a timestamp sort as oldest.
        entries.sort_by(|a, b| {
            let a_time = a.created_at.unwrap_or(chrono::DateTime::UNIX_EPOCH);
            let b_time = b.created_at.unwrap_or(chrono::DateTime::UNIX_EPOCH);
            b_time.cmp(&a_time)
        });

        let entries = Arc::new(entries);
        let mut state = self.state.lock().unwrap();
        if state.generation == observed_generation {
            state.snapshot = Some(Snapshot {
                entries: Arc::clone(&entries),
                captured_at: self.clock.now(),
            });
            tracing::debug!(count = entries.len(), "feedback snapshot refreshed");
        }
        Ok(entries)
    }

    /// Drops the cached snapshot and marks concurrent refetches stale, so
    /// their pre-invalidation results are never installed.
    pub fn invalidate(&self) {
        let mut state = self.state.lock().unwrap();
        state.snapshot = None;
        state.generation += 1;
    }
}
