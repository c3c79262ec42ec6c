//! Search configuration for the itinerary planner.

use chrono::Duration;
use tracing::warn;

/// Tuning parameters shared by every search in a session.
#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Number of worker threads in the dispatcher pool.
    pub workers: usize,

    /// Number of entries kept by the search memo ring.
    pub memo_capacity: usize,

    /// Maximum number of A-side itineraries merged per pass.
    /// Bounds the size of the intermediate candidate buffer.
    pub merge_chunk: usize,

    /// Longest acceptable wait between landing and the next take-off (seconds).
    pub max_layover_secs: i64,
}

impl SearchConfig {
    /// Create a new configuration with the given parameters.
    pub fn new(
        workers: usize,
        memo_capacity: usize,
        merge_chunk: usize,
        max_layover_secs: i64,
    ) -> Self {
        Self {
            workers,
            memo_capacity,
            merge_chunk,
            max_layover_secs,
        }
    }

    /// Returns the maximum layover as a Duration.
    pub fn max_layover(&self) -> Duration {
        Duration::seconds(self.max_layover_secs)
    }

    /// Replace zero-valued sizes with 1.
    ///
    /// A zero worker count, memo capacity or merge chunk cannot make
    /// progress; each is forced up to 1 with a warning instead of failing.
    pub fn sanitized(mut self) -> Self {
        if self.workers == 0 {
            warn!("worker count was 0, forcing it to 1");
            self.workers = 1;
        }
        if self.memo_capacity == 0 {
            warn!("memo capacity was 0, forcing it to 1");
            self.memo_capacity = 1;
        }
        if self.merge_chunk == 0 {
            warn!("merge chunk was 0, forcing it to 1");
            self.merge_chunk = 1;
        }
        self
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            workers: 4,
            memo_capacity: 32,
            merge_chunk: 128 * 1024,
            max_layover_secs: 12 * 60 * 60, // 12 hours
        }
    }
}
