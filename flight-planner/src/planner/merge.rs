//! Meet-in-the-middle path merging.
//!
//! Two independently expanded sets are combined by testing every pair
//! `(a, b)`: the pair is kept when the last leg of `a` lands strictly before
//! the first leg of `b` takes off. Workers only emit index pairs; turning a
//! pair into an itinerary (or a relation) happens afterwards on the calling
//! thread.
//!
//! A is processed in chunks of at most `chunk` itineraries so that the pair
//! buffer stays bounded for large inputs. B is shared read-only by every
//! worker.

use std::fmt;

use tracing::{debug, trace, warn};

use crate::domain::{BranchNode, Itinerary, Relation};

use super::session::SessionContext;

/// A compatible `(a, b)` pair, packed as `a << 32 | b`.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MergeCandidate(u64);

impl MergeCandidate {
    pub fn new(a: u32, b: u32) -> Self {
        Self(((a as u64) << 32) | b as u64)
    }

    /// Index into the A set.
    pub fn a(self) -> u32 {
        (self.0 >> 32) as u32
    }

    /// Index into the B set.
    pub fn b(self) -> u32 {
        self.0 as u32
    }
}

impl fmt::Debug for MergeCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "MergeCandidate({}, {})", self.a(), self.b())
    }
}

/// Find every compatible pair with `a` drawn from `a_set[a_start..a_end]`.
///
/// The range is sharded across the workers; pairs come back ordered by `a`
/// then `b`.
pub fn candidates(
    ctx: &SessionContext,
    a_set: &[Itinerary],
    b_set: &[Itinerary],
    a_start: usize,
    a_end: usize,
) -> Vec<MergeCandidate> {
    let flights = ctx.flights();

    let shards = ctx.dispatcher().run(a_end - a_start, |shard| {
        let mut out = Vec::new();
        for ai in (a_start + shard.start)..(a_start + shard.end) {
            let Some(last) = a_set[ai].last_flight(flights) else {
                continue;
            };
            for (bi, b) in b_set.iter().enumerate() {
                let Some(first) = b.first_flight(flights) else {
                    continue;
                };
                if last.land < first.take_off {
                    out.push(MergeCandidate::new(ai as u32, bi as u32));
                }
            }
        }
        out
    });

    shards.into_iter().flatten().collect()
}

/// Run the chunked merge, turning each compatible pair into a `T`.
fn merge_with<T>(
    ctx: &SessionContext,
    a_set: &[Itinerary],
    b_set: &[Itinerary],
    chunk: usize,
    realize: impl Fn(MergeCandidate) -> T,
) -> Vec<T> {
    if a_set.is_empty() || b_set.is_empty() {
        return Vec::new();
    }

    let chunk = if chunk == 0 {
        warn!("merge chunk was 0, forcing it to 1");
        1
    } else {
        chunk
    };

    let mut results = Vec::new();
    let mut head = 0;
    while head < a_set.len() {
        let end = (head + chunk).min(a_set.len());
        let pairs = candidates(ctx, a_set, b_set, head, end);
        trace!(head, end, pairs = pairs.len(), "merge chunk");
        results.extend(pairs.into_iter().map(&realize));
        head = end;
    }

    debug!(
        a = a_set.len(),
        b = b_set.len(),
        merged = results.len(),
        "merge finished"
    );
    results
}

/// Merge into owned itineraries `a ++ b`.
pub fn merge_direct(
    ctx: &SessionContext,
    a_set: &[Itinerary],
    b_set: &[Itinerary],
    chunk: usize,
) -> Vec<Itinerary> {
    merge_with(ctx, a_set, b_set, chunk, |pair| {
        Itinerary::concat(&a_set[pair.a() as usize], &b_set[pair.b() as usize])
    })
}

/// Merge into relations that point at `node`'s branch-set.
///
/// `a_set` and `b_set` must be the same lists linked at `node` in the
/// relation graph the results will be resolved against.
pub fn merge_composed(
    ctx: &SessionContext,
    a_set: &[Itinerary],
    b_set: &[Itinerary],
    node: BranchNode,
    chunk: usize,
) -> Vec<Relation> {
    merge_with(ctx, a_set, b_set, chunk, |pair| {
        Relation::new(node, pair.a(), pair.b())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::FlightIndex;
    use crate::planner::fixtures::{context, flight};

    fn legs(ids: &[u32]) -> Itinerary {
        Itinerary::new(ids.iter().map(|&i| FlightIndex(i)).collect())
    }

    #[test]
    fn packing() {
        let c = MergeCandidate::new(7, u32::MAX);
        assert_eq!(c.a(), 7);
        assert_eq!(c.b(), u32::MAX);
        assert_eq!(format!("{c:?}"), "MergeCandidate(7, 4294967295)");
    }

    #[test]
    fn overlapping_halves_do_not_merge() {
        // A lands at 500, B takes off at 400.
        let ctx = context(vec![flight(0, 1, 0, 500, 1.0, 0), flight(1, 0, 400, 600, 1.0, 0)], 2);
        assert!(candidates(&ctx, &[legs(&[0])], &[legs(&[1])], 0, 1).is_empty());
        assert!(merge_direct(&ctx, &[legs(&[0])], &[legs(&[1])], 8).is_empty());
    }

    #[test]
    fn equal_times_do_not_merge() {
        let ctx = context(vec![flight(0, 1, 0, 500, 1.0, 0), flight(1, 0, 500, 600, 1.0, 0)], 1);
        assert!(merge_direct(&ctx, &[legs(&[0])], &[legs(&[1])], 8).is_empty());
    }

    #[test]
    fn direct_merge_concatenates() {
        let ctx = context(
            vec![
                flight(0, 1, 0, 100, 1.0, 0),
                flight(0, 1, 0, 300, 1.0, 0),
                flight(1, 0, 200, 400, 1.0, 0),
                flight(1, 0, 500, 600, 1.0, 0),
            ],
            3,
        );
        let a = vec![legs(&[0]), legs(&[1])];
        let b = vec![legs(&[2]), legs(&[3])];
        let merged = merge_direct(&ctx, &a, &b, 8);

        assert_eq!(merged, vec![legs(&[0, 2]), legs(&[0, 3]), legs(&[1, 3])]);
    }

    #[test]
    fn composed_merge_emits_relations() {
        let ctx = context(vec![flight(0, 1, 0, 100, 1.0, 0), flight(1, 0, 200, 400, 1.0, 0)], 2);
        let merged = merge_composed(&ctx, &[legs(&[0])], &[legs(&[1])], BranchNode::One, 8);
        assert_eq!(merged, vec![Relation::new(BranchNode::One, 0, 0)]);
    }

    #[test]
    fn empty_sides_give_empty_result() {
        let ctx = context(vec![flight(0, 1, 0, 100, 1.0, 0)], 2);
        assert!(merge_direct(&ctx, &[], &[legs(&[0])], 8).is_empty());
        assert!(merge_direct(&ctx, &[legs(&[0])], &[], 8).is_empty());
    }

    #[test]
    fn empty_itineraries_are_skipped() {
        let ctx = context(vec![flight(0, 1, 0, 100, 1.0, 0), flight(1, 0, 200, 400, 1.0, 0)], 2);
        let a = vec![Itinerary::empty(), legs(&[0])];
        let b = vec![legs(&[1]), Itinerary::empty()];
        assert_eq!(candidates(&ctx, &a, &b, 0, 2), vec![MergeCandidate::new(1, 0)]);
    }

    #[test]
    fn chunk_size_does_not_change_results() {
        let ctx = context(
            vec![
                flight(0, 1, 0, 100, 1.0, 0),
                flight(0, 1, 0, 150, 1.0, 0),
                flight(0, 1, 0, 250, 1.0, 0),
                flight(1, 0, 200, 400, 1.0, 0),
                flight(1, 0, 300, 400, 1.0, 0),
            ],
            2,
        );
        let a = vec![legs(&[0]), legs(&[1]), legs(&[2])];
        let b = vec![legs(&[3]), legs(&[4])];

        let whole = merge_direct(&ctx, &a, &b, 1024);
        assert_eq!(whole.len(), 5);
        for chunk in [0, 1, 2] {
            assert_eq!(merge_direct(&ctx, &a, &b, chunk), whole, "chunk = {chunk}");
        }
    }
}
