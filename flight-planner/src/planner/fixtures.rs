//! Shared builders for planner unit tests.

use crate::domain::{AllianceTable, FlightIndex, FlightRecord, FlightTable, Symbol, Timestamp};

use super::session::SessionContext;

pub fn city(raw: u32) -> Symbol {
    Symbol::from_raw(raw)
}

/// Flight from `origin` to `destination` operated by `company`.
pub fn flight(
    origin: u32,
    destination: u32,
    take_off: i64,
    land: i64,
    cost: f32,
    company: u32,
) -> FlightRecord {
    FlightRecord {
        origin: city(origin),
        destination: city(destination),
        company: Symbol::from_raw(100 + company),
        flight_id: Symbol::from_raw(1000),
        take_off: Timestamp::from_secs(take_off),
        land: Timestamp::from_secs(land),
        cost,
        index: FlightIndex(0),
    }
}

pub fn company(raw: u32) -> Symbol {
    Symbol::from_raw(100 + raw)
}

pub fn table(records: Vec<FlightRecord>) -> FlightTable {
    FlightTable::new(records).unwrap()
}

pub fn context(records: Vec<FlightRecord>, workers: usize) -> SessionContext {
    SessionContext::new(table(records), AllianceTable::default(), workers).unwrap()
}

pub fn context_with_alliances(
    records: Vec<FlightRecord>,
    groups: Vec<Vec<Symbol>>,
    workers: usize,
) -> SessionContext {
    SessionContext::new(table(records), AllianceTable::new(groups), workers).unwrap()
}
