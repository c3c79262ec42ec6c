//! Parallel cheapest-candidate selection.

use tracing::debug;

use crate::domain::{Candidate, Itinerary};

use super::cost::{self, Pricing, UNREACHABLE_COST};
use super::relation::RelationGraph;
use super::session::SessionContext;

/// Winning itinerary of a search, fully resolved and priced.
#[derive(Debug, Clone, PartialEq)]
pub struct Cheapest {
    pub itinerary: Itinerary,
    pub pricing: Pricing,
}

impl Cheapest {
    /// Result when nothing could be selected.
    pub fn unreachable() -> Self {
        Self {
            itinerary: Itinerary::empty(),
            pricing: Pricing::unreachable(),
        }
    }

    pub fn is_unreachable(&self) -> bool {
        self.itinerary.is_empty()
    }

    pub fn total(&self) -> f32 {
        self.pricing.total
    }
}

/// Pick the cheapest candidate.
///
/// Each worker resolves and prices its shard, keeping the first strictly
/// cheaper candidate it sees; shard winners are then compared in shard
/// order with the same rule. Ties therefore go to the lowest index.
pub fn select_cheapest(
    ctx: &SessionContext,
    candidates: &[Candidate],
    graph: &RelationGraph,
) -> Cheapest {
    let flights = ctx.flights();
    let alliances = ctx.alliances();

    let minima = ctx.dispatcher().run(candidates.len(), |shard| {
        let mut scratch = Vec::new();
        let mut best: Option<(usize, f32)> = None;

        for i in shard.range() {
            let itinerary = graph.join(&candidates[i]);
            let total = cost::total_cost(flights, alliances, itinerary.legs(), &mut scratch);
            if best.is_none_or(|(_, cheapest)| total < cheapest) {
                best = Some((i, total));
            }
        }

        best
    });

    let mut winner: Option<(usize, f32)> = None;
    for (i, total) in minima.into_iter().flatten() {
        if winner.is_none_or(|(_, cheapest)| total < cheapest) {
            winner = Some((i, total));
        }
    }

    let Some((index, total)) = winner else {
        return Cheapest::unreachable();
    };

    let itinerary = graph.join(&candidates[index]);
    let pricing = cost::evaluate(flights, alliances, itinerary.legs());
    debug!(
        candidates = candidates.len(),
        index,
        total,
        reachable = total < UNREACHABLE_COST,
        "selected cheapest"
    );

    Cheapest { itinerary, pricing }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{BranchNode, FlightIndex, Relation};
    use crate::planner::fixtures::{context, flight};

    fn legs(ids: &[u32]) -> Itinerary {
        Itinerary::new(ids.iter().map(|&i| FlightIndex(i)).collect())
    }

    fn priced_context(costs: &[f32], workers: usize) -> SessionContext {
        let records = costs
            .iter()
            .enumerate()
            .map(|(i, &c)| flight(0, 1, i as i64, i as i64 + 10, c, i as u32))
            .collect();
        context(records, workers)
    }

    #[test]
    fn picks_lowest_total() {
        let ctx = priced_context(&[30.0, 10.0, 20.0], 2);
        let candidates: Vec<Candidate> = (0..3).map(|i| Candidate::from(legs(&[i]))).collect();

        let best = select_cheapest(&ctx, &candidates, &RelationGraph::new());
        assert_eq!(best.itinerary, legs(&[1]));
        assert_eq!(best.total(), 10.0);
    }

    #[test]
    fn ties_go_to_lowest_index() {
        for workers in [1, 2, 3, 5] {
            let ctx = priced_context(&[20.0, 10.0, 30.0, 10.0, 10.0], workers);
            let candidates: Vec<Candidate> = (0..5).map(|i| Candidate::from(legs(&[i]))).collect();

            let best = select_cheapest(&ctx, &candidates, &RelationGraph::new());
            assert_eq!(best.itinerary, legs(&[1]), "workers = {workers}");
        }
    }

    #[test]
    fn empty_input_is_unreachable() {
        let ctx = priced_context(&[1.0], 2);
        let best = select_cheapest(&ctx, &[], &RelationGraph::new());
        assert!(best.is_unreachable());
        assert_eq!(best.total(), UNREACHABLE_COST);
    }

    #[test]
    fn empty_candidates_lose_to_any_path() {
        let ctx = priced_context(&[1000.0], 2);
        let candidates = vec![Candidate::from(Itinerary::empty()), Candidate::from(legs(&[0]))];
        let best = select_cheapest(&ctx, &candidates, &RelationGraph::new());
        assert_eq!(best.itinerary, legs(&[0]));
    }

    #[test]
    fn resolves_composed_candidates() {
        let ctx = priced_context(&[50.0, 40.0, 5.0], 2);
        let mut graph = RelationGraph::new();
        graph.link(BranchNode::One, vec![legs(&[0]), legs(&[1])], vec![legs(&[2])]);

        let candidates = vec![
            Candidate::from(Relation::new(BranchNode::One, 0, 0)),
            Candidate::from(Relation::new(BranchNode::One, 1, 0)),
        ];
        let best = select_cheapest(&ctx, &candidates, &graph);

        assert_eq!(best.itinerary, legs(&[1, 2]));
        assert_eq!(best.pricing.discounts, vec![1.0, 1.0]);
        assert_eq!(best.total(), 45.0);
    }
}
