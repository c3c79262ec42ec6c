//! Round-by-round path expansion.
//!
//! Itineraries grow one leg per round. Each round shards the flight table
//! across the workers; every worker tries to extend every open itinerary
//! with the flights in its own shard. Results are concatenated in shard
//! order, so a round's output is deterministic for a given worker count.

use chrono::Duration;
use tracing::{debug, trace};

use crate::domain::{FlightRecord, FlightTable, Itinerary, Symbol, TimeWindow};

use super::session::SessionContext;

/// Constraints every leg added during a search must satisfy.
#[derive(Debug, Clone, Copy)]
pub struct ExpansionLimits {
    pub window: TimeWindow,
    pub max_layover: Duration,
}

impl ExpansionLimits {
    pub fn new(window: TimeWindow, max_layover: Duration) -> Self {
        Self {
            window,
            max_layover,
        }
    }
}

/// Output of one expansion round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Expansion {
    /// Itineraries that end at the destination.
    pub terminal: Vec<Itinerary>,
    /// Itineraries that still need more legs.
    pub continuing: Vec<Itinerary>,
}

impl Expansion {
    fn append(&mut self, mut other: Expansion) {
        self.terminal.append(&mut other.terminal);
        self.continuing.append(&mut other.continuing);
    }
}

/// One-leg itineraries for every flight leaving `origin` inside `window`.
pub fn seed(ctx: &SessionContext, origin: Symbol, window: TimeWindow) -> Vec<Itinerary> {
    let flights = ctx.flights();

    let shards = ctx.dispatcher().run(flights.len(), |shard| {
        flights.records()[shard.range()]
            .iter()
            .filter(|f| f.origin == origin && window.admits(f.take_off, f.land))
            .map(|f| Itinerary::single(f.index))
            .collect::<Vec<_>>()
    });

    let seeded: Vec<Itinerary> = shards.into_iter().flatten().collect();
    debug!(origin = %origin, seeded = seeded.len(), "seeded itineraries");
    seeded
}

/// Returns true if `flight` may follow the last leg of `path`.
fn extends(
    flights: &FlightTable,
    path: &Itinerary,
    last: &FlightRecord,
    flight: &FlightRecord,
    limits: &ExpansionLimits,
) -> bool {
    flight.origin == last.destination
        && limits.window.admits(flight.take_off, flight.land)
        && flight.take_off > last.land
        && flight.take_off.signed_duration_since(last.land) <= limits.max_layover
        && !path.visits(flights, flight.destination)
}

/// Extend every itinerary in `frontier` by one leg.
///
/// Itineraries that already end at `to` are passed straight to the terminal
/// output. Empty itineraries have no last city and are dropped.
pub fn expand_round(
    ctx: &SessionContext,
    frontier: &[Itinerary],
    to: Symbol,
    limits: &ExpansionLimits,
) -> Expansion {
    let flights = ctx.flights();

    let mut round = Expansion::default();
    let mut open: Vec<(&Itinerary, &FlightRecord)> = Vec::with_capacity(frontier.len());
    for path in frontier {
        match path.last_flight(flights) {
            Some(last) if last.destination == to => round.terminal.push(path.clone()),
            Some(last) => open.push((path, last)),
            None => {}
        }
    }

    if open.is_empty() {
        return round;
    }

    let shards = ctx.dispatcher().run(flights.len(), |shard| {
        let candidates = &flights.records()[shard.range()];
        let mut out = Expansion::default();

        for &(path, last) in &open {
            for flight in candidates {
                if !extends(flights, path, last, flight, limits) {
                    continue;
                }
                let next = path.extended(flight.index);
                if flight.destination == to {
                    out.terminal.push(next);
                } else {
                    out.continuing.push(next);
                }
            }
        }

        out
    });

    for shard in shards {
        round.append(shard);
    }

    trace!(
        open = open.len(),
        terminal = round.terminal.len(),
        continuing = round.continuing.len(),
        "expansion round"
    );
    round
}

/// Run rounds until no itinerary can be extended and return everything that
/// reached `to`.
pub fn expand(
    ctx: &SessionContext,
    start: Vec<Itinerary>,
    to: Symbol,
    limits: &ExpansionLimits,
) -> Vec<Itinerary> {
    let mut terminal = Vec::new();
    let mut frontier = start;
    let mut rounds = 0usize;

    while !frontier.is_empty() {
        let round = expand_round(ctx, &frontier, to, limits);
        terminal.extend(round.terminal);
        frontier = round.continuing;
        rounds += 1;
    }

    debug!(to = %to, rounds, found = terminal.len(), "expansion finished");
    terminal
}
