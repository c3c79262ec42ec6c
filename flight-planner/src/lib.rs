//! Flight itinerary planner.
//!
//! Answers two questions for a traveller going to a conference: "what is
//! the cheapest way there and back?" and "what if I add a vacation in one
//! of these cities, before or after?"

pub mod data;
pub mod domain;
pub mod planner;
pub mod report;
pub mod spill;
