//! Serializable views of search results.

use serde::Serialize;

use crate::domain::{FlightTable, Interner};
use crate::planner::{Cheapest, VacationProposal};

/// One flight of a proposed trip.
#[derive(Debug, Serialize)]
pub struct LegResult {
    /// Operating company
    pub company: String,

    /// Flight code
    pub flight: String,

    pub from: String,
    pub to: String,

    /// Take-off time, `YYYY-MM-DD HH:MM:SS` UTC
    pub take_off: String,

    /// Landing time, `YYYY-MM-DD HH:MM:SS` UTC
    pub land: String,

    /// Undiscounted price
    pub cost: f32,

    /// Multiplier applied to `cost`
    pub discount: f32,
}

/// A priced trip; `price` is absent when no trip exists.
#[derive(Debug, Serialize)]
pub struct TripResult {
    pub price: Option<f32>,
    pub legs: Vec<LegResult>,
}

impl TripResult {
    pub fn new(trip: &Cheapest, flights: &FlightTable, names: &Interner) -> Self {
        if trip.is_unreachable() {
            return Self {
                price: None,
                legs: Vec::new(),
            };
        }

        let legs = trip
            .itinerary
            .legs()
            .iter()
            .zip(trip.pricing.discounts.iter())
            .map(|(&leg, &discount)| {
                let f = flights.get(leg);
                LegResult {
                    company: names.name(f.company).to_string(),
                    flight: names.name(f.flight_id).to_string(),
                    from: names.name(f.origin).to_string(),
                    to: names.name(f.destination).to_string(),
                    take_off: f.take_off.to_string(),
                    land: f.land.to_string(),
                    cost: f.cost,
                    discount,
                }
            })
            .collect();

        Self {
            price: Some(trip.total()),
            legs,
        }
    }
}

/// Vacation proposal for one city.
#[derive(Debug, Serialize)]
pub struct VacationResult {
    pub city: String,
    #[serde(flatten)]
    pub trip: TripResult,
}

/// Everything a run produces.
#[derive(Debug, Serialize)]
pub struct PlanResult {
    pub work_hard: TripResult,
    pub play_hard: Vec<VacationResult>,
}

impl PlanResult {
    pub fn new(
        round_trip: &Cheapest,
        proposals: &[VacationProposal],
        flights: &FlightTable,
        names: &Interner,
    ) -> Self {
        Self {
            work_hard: TripResult::new(round_trip, flights, names),
            play_hard: proposals
                .iter()
                .map(|p| VacationResult {
                    city: names.name(p.city).to_string(),
                    trip: TripResult::new(&p.trip, flights, names),
                })
                .collect(),
        }
    }
}
