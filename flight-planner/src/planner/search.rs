//! Round-trip and vacation-trip search.
//!
//! Both products are built from the same steps: seed one-leg itineraries,
//! expand them towards a destination, merge the halves and pick the
//! cheapest result. Vacation trips additionally link their last merge into a
//! relation graph so that the full concatenations are only built for the
//! candidates the selector actually prices.

use chrono::Duration;
use tracing::{debug, info};

use crate::domain::{BranchNode, Candidate, Itinerary, Symbol, TimeWindow, Timestamp};

use super::config::SearchConfig;
use super::expand::{self, ExpansionLimits};
use super::memo::SearchMemo;
use super::merge;
use super::relation::RelationGraph;
use super::select::{self, Cheapest};
use super::session::SessionContext;

/// Error from itinerary search.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SearchError {
    /// Invalid search request
    #[error("invalid search request: {0}")]
    InvalidRequest(String),
}

/// What the traveller wants to do.
#[derive(Debug, Clone)]
pub struct TripRequest {
    /// Home city.
    pub origin: Symbol,

    /// Conference city.
    pub destination: Symbol,

    /// Window for flights from home to the conference.
    pub outbound: TimeWindow,

    /// Window for flights from the conference back home.
    pub inbound: TimeWindow,

    /// Shortest vacation, in seconds.
    pub vacation_min_secs: i64,

    /// Longest vacation, in seconds.
    pub vacation_max_secs: i64,

    /// Candidate vacation cities, in the order proposals are reported.
    pub vacation_cities: Vec<Symbol>,
}

impl TripRequest {
    /// Create a round-trip request with no vacation.
    pub fn new(
        origin: Symbol,
        destination: Symbol,
        outbound: TimeWindow,
        inbound: TimeWindow,
    ) -> Self {
        Self {
            origin,
            destination,
            outbound,
            inbound,
            vacation_min_secs: 0,
            vacation_max_secs: 0,
            vacation_cities: Vec::new(),
        }
    }

    /// Add vacation bounds and cities.
    pub fn with_vacation(mut self, min_secs: i64, max_secs: i64, cities: Vec<Symbol>) -> Self {
        self.vacation_min_secs = min_secs;
        self.vacation_max_secs = max_secs;
        self.vacation_cities = cities;
        self
    }

    pub fn vacation_min(&self) -> Duration {
        Duration::seconds(self.vacation_min_secs)
    }

    pub fn vacation_max(&self) -> Duration {
        Duration::seconds(self.vacation_max_secs)
    }

    /// Window for reaching a vacation city before the conference.
    ///
    /// The traveller leaves home between `vacation_max` and `vacation_min`
    /// before the outbound window opens.
    pub fn vacation_before_window(&self) -> TimeWindow {
        let start = self.outbound.earliest;
        TimeWindow::new(start - self.vacation_max(), start - self.vacation_min())
    }

    /// Window for flying home from a vacation after the conference.
    pub fn vacation_after_window(&self) -> TimeWindow {
        let end: Timestamp = self.inbound.latest;
        TimeWindow::new(end + self.vacation_min(), end + self.vacation_max())
    }

    /// Every window a useful flight could fall in.
    pub fn windows(&self) -> [TimeWindow; 4] {
        [
            self.outbound,
            self.inbound,
            self.vacation_after_window(),
            self.vacation_before_window(),
        ]
    }

    /// Validate the request.
    pub fn validate(&self) -> Result<(), SearchError> {
        if self.origin.is_empty() || self.destination.is_empty() {
            return Err(SearchError::InvalidRequest(
                "origin and destination must be named".to_string(),
            ));
        }

        if self.origin == self.destination {
            return Err(SearchError::InvalidRequest(
                "origin and destination are the same city".to_string(),
            ));
        }

        if self.outbound.is_inverted() {
            return Err(SearchError::InvalidRequest(
                "outbound window ends before it starts".to_string(),
            ));
        }

        if self.inbound.is_inverted() {
            return Err(SearchError::InvalidRequest(
                "inbound window ends before it starts".to_string(),
            ));
        }

        if self.vacation_min_secs < 0 || self.vacation_min_secs > self.vacation_max_secs {
            return Err(SearchError::InvalidRequest(format!(
                "vacation bounds {}..{} are not a valid range",
                self.vacation_min_secs, self.vacation_max_secs
            )));
        }

        Ok(())
    }
}

/// Cheapest vacation trip through one city.
#[derive(Debug, Clone, PartialEq)]
pub struct VacationProposal {
    pub city: Symbol,
    pub trip: Cheapest,
}

/// Itinerary planner for one session.
///
/// Holds the search memo, so repeated sub-searches within and across
/// products reuse earlier expansions.
pub struct Planner<'a> {
    ctx: &'a SessionContext,
    config: &'a SearchConfig,
    memo: SearchMemo,
}

impl<'a> Planner<'a> {
    /// Create a new planner.
    pub fn new(ctx: &'a SessionContext, config: &'a SearchConfig) -> Self {
        Self {
            ctx,
            config,
            memo: SearchMemo::new(config.memo_capacity),
        }
    }

    pub fn memo(&self) -> &SearchMemo {
        &self.memo
    }

    fn limits(&self, window: TimeWindow) -> ExpansionLimits {
        ExpansionLimits::new(window, self.config.max_layover())
    }

    /// Every itinerary from `from` to `to` that stays inside `window`.
    pub fn find_paths(&mut self, from: Symbol, to: Symbol, window: TimeWindow) -> Vec<Itinerary> {
        let start = expand::seed(self.ctx, from, window);

        if let Some(cached) = self.memo.lookup(to, window, &start) {
            debug!(from = %from, to = %to, paths = cached.len(), "reusing memoized paths");
            return cached.to_vec();
        }

        let found = expand::expand(self.ctx, start.clone(), to, &self.limits(window));
        self.memo.record(to, window, start, found.clone());
        found
    }

    /// Cheapest trip to the conference and back.
    pub fn round_trip(&mut self, request: &TripRequest) -> Result<Cheapest, SearchError> {
        request.validate()?;

        let outbound = self.find_paths(request.origin, request.destination, request.outbound);
        let inbound = self.find_paths(request.destination, request.origin, request.inbound);

        let merged = merge::merge_direct(self.ctx, &outbound, &inbound, self.config.merge_chunk);
        let candidates: Vec<Candidate> = merged.into_iter().map(Candidate::from).collect();
        let best = select::select_cheapest(self.ctx, &candidates, &RelationGraph::new());

        info!(
            outbound = outbound.len(),
            inbound = inbound.len(),
            candidates = candidates.len(),
            total = best.total(),
            "round trip search finished"
        );
        Ok(best)
    }

    /// Cheapest trip that adds a vacation in `city`, either before or after
    /// the conference.
    pub fn vacation_trip(
        &mut self,
        request: &TripRequest,
        city: Symbol,
    ) -> Result<Cheapest, SearchError> {
        request.validate()?;
        if city.is_empty() {
            return Err(SearchError::InvalidRequest(
                "vacation city must be named".to_string(),
            ));
        }

        let chunk = self.config.merge_chunk;
        let mut graph = RelationGraph::new();

        // Home -> vacation -> conference, then back home.
        let home_to_vacation =
            self.find_paths(request.origin, city, request.vacation_before_window());
        let vacation_to_conference = self.find_paths(city, request.destination, request.outbound);
        let conference_to_home =
            self.find_paths(request.destination, request.origin, request.inbound);

        let outward =
            merge::merge_direct(self.ctx, &home_to_vacation, &vacation_to_conference, chunk);
        graph.link(BranchNode::Zero, outward, conference_to_home);

        // Home -> conference -> vacation, then back home.
        let home_to_conference =
            self.find_paths(request.origin, request.destination, request.outbound);
        let conference_to_vacation = self.find_paths(request.destination, city, request.inbound);
        let vacation_to_home =
            self.find_paths(city, request.origin, request.vacation_after_window());

        let outward =
            merge::merge_direct(self.ctx, &home_to_conference, &conference_to_vacation, chunk);
        graph.link(BranchNode::One, outward, vacation_to_home);

        let mut candidates: Vec<Candidate> = Vec::new();
        for node in BranchNode::ALL {
            let branch = graph.branch(node);
            let composed = merge::merge_composed(self.ctx, &branch.a, &branch.b, node, chunk);
            debug!(?node, composed = composed.len(), "composed vacation branch");
            candidates.extend(composed.into_iter().map(Candidate::from));
        }

        let best = select::select_cheapest(self.ctx, &candidates, &graph);
        info!(
            city = %city,
            candidates = candidates.len(),
            total = best.total(),
            "vacation search finished"
        );
        Ok(best)
    }

    /// One proposal per vacation city, in request order.
    pub fn vacation_trips(
        &mut self,
        request: &TripRequest,
    ) -> Result<Vec<VacationProposal>, SearchError> {
        let mut proposals = Vec::with_capacity(request.vacation_cities.len());
        for &city in &request.vacation_cities {
            let trip = self.vacation_trip(request, city)?;
            proposals.push(VacationProposal { city, trip });
        }
        Ok(proposals)
    }
}

#[cfg(test)]
#[path = "search_tests.rs"]
mod search_tests;
