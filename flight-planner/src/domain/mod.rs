//! Domain types for the flight planner.
//!
//! This module contains the core domain model: interned identifiers,
//! timestamps, flight records, alliances and itineraries. Types enforce
//! their invariants at construction time, so code that receives them can
//! trust their validity.

mod alliance;
mod error;
mod flight;
mod itinerary;
mod symbol;
mod time;

pub use alliance::AllianceTable;
pub use error::DomainError;
pub use flight::{FlightIndex, FlightRecord, FlightTable};
pub use itinerary::{BranchNode, Candidate, Itinerary, Relation};
pub use symbol::{Interner, Symbol};
pub use time::{TimeError, TimeWindow, Timestamp};
