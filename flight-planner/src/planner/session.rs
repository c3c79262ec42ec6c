//! Per-session shared state.

use crate::domain::{AllianceTable, FlightTable};

use super::dispatch::{DispatchError, Dispatcher};

/// Everything the workers read during a search session.
///
/// The tables are immutable for the life of the session, so shard closures
/// borrow them freely from any worker thread.
#[derive(Debug)]
pub struct SessionContext {
    flights: FlightTable,
    alliances: AllianceTable,
    dispatcher: Dispatcher,
}

impl SessionContext {
    /// Start a session with its own worker pool.
    pub fn new(
        flights: FlightTable,
        alliances: AllianceTable,
        workers: usize,
    ) -> Result<Self, DispatchError> {
        Ok(Self {
            flights,
            alliances,
            dispatcher: Dispatcher::new(workers)?,
        })
    }

    pub fn flights(&self) -> &FlightTable {
        &self.flights
    }

    pub fn alliances(&self) -> &AllianceTable {
        &self.alliances
    }

    pub fn dispatcher(&self) -> &Dispatcher {
        &self.dispatcher
    }
}
