//! Flight records and the per-session flight table.

use std::fmt;

use super::{DomainError, Symbol, Timestamp};

/// Position of a flight in the [`FlightTable`].
///
/// Itineraries are sequences of these indices; 32 bits keeps them compact
/// and lets two of them pack into one merge candidate.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct FlightIndex(pub u32);

impl FlightIndex {
    /// Returns the index as a `usize` for slice access.
    pub fn as_usize(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Debug for FlightIndex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "F{}", self.0)
    }
}

/// One scheduled flight.
#[derive(Debug, Clone, PartialEq)]
pub struct FlightRecord {
    /// City where the flight takes off.
    pub origin: Symbol,
    /// City where the flight lands.
    pub destination: Symbol,
    /// Operating company.
    pub company: Symbol,
    /// Flight code, unique per company.
    pub flight_id: Symbol,
    pub take_off: Timestamp,
    pub land: Timestamp,
    /// Undiscounted price.
    pub cost: f32,
    /// Stable position in the owning table.
    pub index: FlightIndex,
}

/// Immutable array of flights for one search session.
///
/// The table is built once and shared read-only by every worker. Indices are
/// dense: the record at position `i` always carries `FlightIndex(i)`.
#[derive(Debug, Clone, Default)]
pub struct FlightTable {
    records: Vec<FlightRecord>,
}

impl FlightTable {
    /// Build a table, renumbering records to their positions.
    ///
    /// # Errors
    ///
    /// Returns `Err` if there are more records than a `FlightIndex` can
    /// address, or if any record lands before it takes off.
    pub fn new(mut records: Vec<FlightRecord>) -> Result<Self, DomainError> {
        if records.len() > u32::MAX as usize {
            return Err(DomainError::TooManyFlights(records.len()));
        }

        for (i, record) in records.iter_mut().enumerate() {
            if record.land < record.take_off {
                return Err(DomainError::NegativeDuration(i));
            }
            record.index = FlightIndex(i as u32);
        }

        Ok(Self { records })
    }

    /// Returns the record at `index`.
    ///
    /// # Panics
    ///
    /// Panics if `index` did not come from this table.
    pub fn get(&self, index: FlightIndex) -> &FlightRecord {
        &self.records[index.as_usize()]
    }

    /// All records in index order.
    pub fn records(&self) -> &[FlightRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
