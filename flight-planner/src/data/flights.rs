//! Flight file loading.
//!
//! Each line is `id;from;take_off;to;land;cost;company` with times in
//! `MMDDYYYYhhmmss` format. Lines with any other number of fields are
//! skipped. Flights that fit none of the request's search windows can never
//! appear in a result, so they are dropped before the table is built.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{info, trace};

use crate::domain::{
    FlightIndex, FlightRecord, FlightTable, Interner, TimeWindow, Timestamp,
};

use super::LoadError;

const FIELDS: usize = 7;

/// Load and prune a flight file.
pub fn load_flights(
    path: &Path,
    interner: &mut Interner,
    windows: &[TimeWindow],
) -> Result<FlightTable, LoadError> {
    let file = File::open(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_flights(BufReader::new(file), interner, windows)
}

/// Read flights from any reader.
pub fn read_flights<R: Read>(
    reader: R,
    interner: &mut Interner,
    windows: &[TimeWindow],
) -> Result<FlightTable, LoadError> {
    let mut rdr = ReaderBuilder::new()
        .delimiter(b';')
        .has_headers(false)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let mut records = Vec::new();
    let mut seen = 0usize;

    for result in rdr.records() {
        let row = result?;
        let line = row.position().map_or(0, |p| p.line());

        if row.len() != FIELDS {
            trace!(line, fields = row.len(), "skipping malformed flight line");
            continue;
        }
        seen += 1;

        if let Some(record) = parse_flight(&row, line, interner, windows)? {
            records.push(record);
        }
    }

    info!(read = seen, kept = records.len(), "loaded flights");
    Ok(FlightTable::new(records)?)
}

fn parse_flight(
    row: &StringRecord,
    line: u64,
    interner: &mut Interner,
    windows: &[TimeWindow],
) -> Result<Option<FlightRecord>, LoadError> {
    let time = |i: usize| {
        Timestamp::parse_compact(&row[i]).map_err(|source| LoadError::Time { line, source })
    };
    let take_off = time(2)?;
    let land = time(4)?;

    if !windows.iter().any(|w| w.admits(take_off, land)) {
        return Ok(None);
    }

    let cost: f32 = row[5].parse().map_err(|_| LoadError::Cost {
        line,
        value: row[5].to_string(),
    })?;

    Ok(Some(FlightRecord {
        flight_id: interner.intern(&row[0]),
        origin: interner.intern(&row[1]),
        destination: interner.intern(&row[3]),
        company: interner.intern(&row[6]),
        take_off,
        land,
        cost,
        index: FlightIndex(0),
    }))
}
