//! Plain-text proposals.
//!
//! ```text
//! “Work Hard” Proposition :
//! Price : 122
//! B-B1-HOME (3/15 8h0min)/HUB (3/15 9h0min)-30$-70%
//! ...
//! ```

use std::io::{self, Write};

use chrono::{Datelike, Timelike};

use crate::domain::{FlightRecord, FlightTable, Interner, Timestamp};
use crate::planner::{Cheapest, VacationProposal};

/// Format a float the way C's `%g` does: six significant digits, trailing
/// zeros removed, scientific notation for very large or small magnitudes.
pub fn general(value: f32) -> String {
    if !value.is_finite() {
        return value.to_string();
    }
    if value == 0.0 {
        return "0".to_string();
    }

    let exponent = f64::from(value.abs()).log10().floor() as i32;
    if !(-5..6).contains(&exponent) {
        let formatted = format!("{:.5e}", value);
        let (mantissa, exp) = formatted.split_once('e').unwrap_or((formatted.as_str(), "0"));
        let exp: i32 = exp.parse().unwrap_or(0);
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{}e{sign}{:02}", trim_zeros(mantissa), exp.abs());
    }

    let decimals = (5 - exponent).max(0) as usize;
    trim_zeros(&format!("{value:.decimals$}")).to_string()
}

fn trim_zeros(s: &str) -> &str {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.')
    } else {
        s
    }
}

/// `m/d HhMmin`, unpadded.
fn short_time(t: Timestamp) -> String {
    match t.to_datetime() {
        Some(dt) => format!(
            "{}/{} {}h{}min",
            dt.month(),
            dt.day(),
            dt.hour(),
            dt.minute()
        ),
        None => t.to_string(),
    }
}

/// Renders proposals with names resolved through an interner.
pub struct TextReport<'a> {
    flights: &'a FlightTable,
    names: &'a Interner,
}

impl<'a> TextReport<'a> {
    pub fn new(flights: &'a FlightTable, names: &'a Interner) -> Self {
        Self { flights, names }
    }

    /// One leg: `COMPANY-ID-FROM (time)/TO (time)-cost$-discount%`.
    pub fn flight_line(&self, flight: &FlightRecord, discount: f32) -> String {
        format!(
            "{}-{}-{} ({})/{} ({})-{}$-{}%",
            self.names.name(flight.company),
            self.names.name(flight.flight_id),
            self.names.name(flight.origin),
            short_time(flight.take_off),
            self.names.name(flight.destination),
            short_time(flight.land),
            general(flight.cost),
            general(discount * 100.0),
        )
    }

    /// Price line, then one line per leg, then a blank line.
    ///
    /// A trip that does not exist is priced at 0 with no legs.
    pub fn write_trip<W: Write>(&self, out: &mut W, trip: &Cheapest) -> io::Result<()> {
        let price = if trip.is_unreachable() { 0.0 } else { trip.total() };
        writeln!(out, "Price : {}", general(price))?;
        for (&leg, &discount) in trip
            .itinerary
            .legs()
            .iter()
            .zip(trip.pricing.discounts.iter())
        {
            writeln!(out, "{}", self.flight_line(self.flights.get(leg), discount))?;
        }
        writeln!(out)
    }

    pub fn write_round_trip<W: Write>(&self, out: &mut W, trip: &Cheapest) -> io::Result<()> {
        writeln!(out, "“Work Hard” Proposition :")?;
        self.write_trip(out, trip)
    }

    pub fn write_vacation_trips<W: Write>(
        &self,
        out: &mut W,
        proposals: &[VacationProposal],
    ) -> io::Result<()> {
        for (i, proposal) in proposals.iter().enumerate() {
            writeln!(
                out,
                "“Play Hard” Proposition {} : {}",
                i + 1,
                self.names.name(proposal.city)
            )?;
            self.write_trip(out, &proposal.trip)?;
            writeln!(out)?;
        }
        Ok(())
    }
}
