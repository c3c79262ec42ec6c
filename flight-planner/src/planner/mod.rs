//! Concurrent itinerary search engine.
//!
//! This module answers: "what is the cheapest way to get from home to the
//! conference and back, optionally with a vacation on the way?"
//!
//! Itineraries are grown level by level from one-leg seeds, in parallel over
//! shards of the flight table. Outbound and return halves are searched
//! independently and then merged by a pairwise time test. Results of recent
//! expansions are kept in a small memo, and the cheapest merged itinerary is
//! picked after applying loyalty discounts.

mod config;
pub mod cost;
mod dispatch;
mod expand;
mod memo;
mod merge;
mod relation;
mod search;
mod select;
mod session;

#[cfg(test)]
mod fixtures;

pub use config::SearchConfig;
pub use cost::Pricing;
pub use dispatch::{DispatchError, Dispatcher, Shard, shards};
pub use expand::{Expansion, ExpansionLimits, expand, expand_round, seed};
pub use memo::SearchMemo;
pub use merge::{MergeCandidate, candidates, merge_composed, merge_direct};
pub use relation::{BranchSet, RelationGraph};
pub use search::{Planner, SearchError, TripRequest, VacationProposal};
pub use select::{Cheapest, select_cheapest};
pub use session::SessionContext;
