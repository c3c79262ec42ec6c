//! Output formats for search results.

pub mod dto;
mod text;

pub use dto::{LegResult, PlanResult, TripResult, VacationResult};
pub use text::{TextReport, general};
