//! Fork-join dispatcher.
//!
//! Every parallel phase of the engine (seeding, expansion rounds, merge
//! passes, selection) splits an index range into contiguous shards, runs
//! one closure per shard on a long-lived worker pool and waits for all of
//! them before continuing.

use rayon::prelude::*;
use rayon::{ThreadPool, ThreadPoolBuildError, ThreadPoolBuilder};
use tracing::{trace, warn};

/// Error creating the worker pool.
#[derive(Debug, thiserror::Error)]
pub enum DispatchError {
    #[error("failed to start worker pool: {0}")]
    Pool(#[from] ThreadPoolBuildError),
}

/// A contiguous slice of a larger index range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Shard {
    /// Position of this shard; doubles as the worker index.
    pub index: usize,
    pub start: usize,
    pub end: usize,
}

impl Shard {
    pub fn range(&self) -> std::ops::Range<usize> {
        self.start..self.end
    }

    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }
}

/// Split `[0, total)` into at most `workers` contiguous shards.
///
/// Each shard holds `total / workers` items and the last one absorbs the
/// remainder. With fewer items than workers every shard holds one item.
/// An empty range produces no shards.
pub fn shards(total: usize, workers: usize) -> Vec<Shard> {
    let workers = workers.max(1);
    if total == 0 {
        return Vec::new();
    }

    let count = workers.min(total);
    let size = total / count;

    (0..count)
        .map(|index| {
            let start = index * size;
            let end = if index + 1 == count { total } else { start + size };
            Shard { index, start, end }
        })
        .collect()
}

/// Runs sharded phases on a fixed pool of worker threads.
pub struct Dispatcher {
    pool: ThreadPool,
    workers: usize,
}

impl Dispatcher {
    /// Start a pool with `workers` threads.
    ///
    /// A worker count of 0 is forced to 1 with a warning.
    pub fn new(workers: usize) -> Result<Self, DispatchError> {
        let workers = if workers == 0 {
            warn!("dispatcher invoked with 0 workers, forcing it to 1");
            1
        } else {
            workers
        };

        let pool = ThreadPoolBuilder::new()
            .num_threads(workers)
            .thread_name(|i| format!("planner-worker-{i}"))
            .build()?;

        Ok(Self { pool, workers })
    }

    /// Number of worker threads.
    pub fn workers(&self) -> usize {
        self.workers
    }

    /// Run `work` once per shard of `[0, total)` and collect the results in
    /// shard order.
    ///
    /// Blocks until every shard has finished. A panic in any shard aborts
    /// the whole phase and is re-raised on the calling thread.
    pub fn run<R, F>(&self, total: usize, work: F) -> Vec<R>
    where
        F: Fn(Shard) -> R + Sync,
        R: Send,
    {
        let shards = shards(total, self.workers);
        trace!(total, shards = shards.len(), "dispatching phase");

        if shards.len() <= 1 {
            return shards.into_iter().map(&work).collect();
        }

        self.pool
            .install(|| shards.into_par_iter().map(&work).collect())
    }
}

impl std::fmt::Debug for Dispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("workers", &self.workers)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn even_split() {
        let s = shards(12, 4);
        assert_eq!(s.len(), 4);
        assert_eq!(s[0].range(), 0..3);
        assert_eq!(s[3].range(), 9..12);
    }

    #[test]
    fn last_shard_absorbs_remainder() {
        let s = shards(10, 3);
        assert_eq!(s.len(), 3);
        assert_eq!(s[0].range(), 0..3);
        assert_eq!(s[1].range(), 3..6);
        assert_eq!(s[2].range(), 6..10);
    }

    #[test]
    fn fewer_items_than_workers() {
        let s = shards(2, 8);
        assert_eq!(s.len(), 2);
        assert_eq!(s[0].range(), 0..1);
        assert_eq!(s[1].range(), 1..2);
    }

    #[test]
    fn empty_range_has_no_shards() {
        assert!(shards(0, 4).is_empty());
    }

    #[test]
    fn zero_workers_behaves_like_one() {
        let s = shards(5, 0);
        assert_eq!(s.len(), 1);
        assert_eq!(s[0].range(), 0..5);
    }

    #[test]
    fn shard_index_is_position() {
        for (i, shard) in shards(100, 7).iter().enumerate() {
            assert_eq!(shard.index, i);
        }
    }

    #[test]
    fn run_collects_in_shard_order() {
        let dispatcher = Dispatcher::new(4).unwrap();
        let sums = dispatcher.run(100, |shard| shard.range().sum::<usize>());
        assert_eq!(sums.len(), 4);
        assert_eq!(sums.iter().sum::<usize>(), (0..100).sum::<usize>());
        assert_eq!(sums[0], (0..25).sum::<usize>());
    }

    #[test]
    fn run_with_zero_workers() {
        let dispatcher = Dispatcher::new(0).unwrap();
        assert_eq!(dispatcher.workers(), 1);
        let lens = dispatcher.run(9, |shard| shard.len());
        assert_eq!(lens, vec![9]);
    }

    #[test]
    fn run_on_empty_range() {
        let dispatcher = Dispatcher::new(3).unwrap();
        let out: Vec<usize> = dispatcher.run(0, |shard| shard.len());
        assert!(out.is_empty());
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Shards cover every item exactly once, in order
        #[test]
        fn shards_partition_range(total in 0usize..500, workers in 0usize..16) {
            let s = shards(total, workers);
            let mut next = 0;
            for shard in &s {
                prop_assert_eq!(shard.start, next);
                prop_assert!(shard.len() >= 1);
                next = shard.end;
            }
            prop_assert_eq!(next, total);
            prop_assert!(s.len() <= workers.max(1));
        }
    }
}
