//! Timestamps and search windows.
//!
//! Flight data carries times as 14-digit `MMDDYYYYhhmmss` strings in UTC.
//! Internally every instant is a second-granularity Unix timestamp, which
//! keeps layover arithmetic to plain integer subtraction.

use chrono::{DateTime, Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};
use std::fmt;
use std::ops::{Add, Sub};

/// Error returned when parsing an invalid timestamp string.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid timestamp: {reason}")]
pub struct TimeError {
    reason: &'static str,
}

impl TimeError {
    fn new(reason: &'static str) -> Self {
        Self { reason }
    }
}

/// A UTC instant with one-second resolution.
///
/// # Examples
///
/// ```
/// use flight_planner::domain::Timestamp;
///
/// let t = Timestamp::parse_compact("03152024143000").unwrap();
/// assert_eq!(t.to_string(), "2024-03-15 14:30:00");
///
/// // Wrong length is rejected
/// assert!(Timestamp::parse_compact("0315202414300").is_err());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Timestamp(i64);

impl Timestamp {
    /// Create a timestamp from seconds since the Unix epoch.
    pub const fn from_secs(secs: i64) -> Self {
        Self(secs)
    }

    /// Returns seconds since the Unix epoch.
    pub const fn as_secs(self) -> i64 {
        self.0
    }

    /// Parse the `MMDDYYYYhhmmss` format used by flight files and the CLI.
    pub fn parse_compact(s: &str) -> Result<Self, TimeError> {
        let bytes = s.as_bytes();
        if bytes.len() != 14 {
            return Err(TimeError::new("expected 14 digits (MMDDYYYYhhmmss)"));
        }
        if !bytes.iter().all(u8::is_ascii_digit) {
            return Err(TimeError::new("must contain only digits"));
        }

        let field = |range: std::ops::Range<usize>| -> u32 {
            bytes[range]
                .iter()
                .fold(0, |acc, b| acc * 10 + u32::from(b - b'0'))
        };

        let month = field(0..2);
        let day = field(2..4);
        let year = field(4..8) as i32;
        let hour = field(8..10);
        let minute = field(10..12);
        let second = field(12..14);

        let date = NaiveDate::from_ymd_opt(year, month, day)
            .ok_or_else(|| TimeError::new("invalid calendar date"))?;
        let datetime = date
            .and_hms_opt(hour, minute, second)
            .ok_or_else(|| TimeError::new("invalid time of day"))?;

        Ok(Self(datetime.and_utc().timestamp()))
    }

    /// Converts to a naive UTC datetime.
    ///
    /// Returns `None` for instants outside chrono's representable range.
    pub fn to_datetime(self) -> Option<NaiveDateTime> {
        DateTime::from_timestamp(self.0, 0).map(|dt| dt.naive_utc())
    }

    /// Returns the duration between two instants.
    ///
    /// Negative if `other` is after `self`.
    pub fn signed_duration_since(self, other: Self) -> Duration {
        Duration::seconds(self.0 - other.0)
    }
}

impl Add<Duration> for Timestamp {
    type Output = Self;

    fn add(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_add(rhs.num_seconds()))
    }
}

impl Sub<Duration> for Timestamp {
    type Output = Self;

    fn sub(self, rhs: Duration) -> Self::Output {
        Self(self.0.saturating_sub(rhs.num_seconds()))
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0)
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.to_datetime() {
            Some(dt) => write!(
                f,
                "{:04}-{:02}-{:02} {:02}:{:02}:{:02}",
                dt.year(),
                dt.month(),
                dt.day(),
                dt.hour(),
                dt.minute(),
                dt.second()
            ),
            None => write!(f, "@{}", self.0),
        }
    }
}

/// An inclusive window that flights must fit inside.
///
/// A flight is admitted when it takes off no earlier than `earliest` and
/// lands no later than `latest`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub earliest: Timestamp,
    pub latest: Timestamp,
}

impl TimeWindow {
    /// Create a new window.
    pub fn new(earliest: Timestamp, latest: Timestamp) -> Self {
        Self { earliest, latest }
    }

    /// Returns true if a flight with these times fits the window.
    pub fn admits(&self, take_off: Timestamp, land: Timestamp) -> bool {
        take_off >= self.earliest && land <= self.latest
    }

    /// Returns true if `earliest` is after `latest`.
    pub fn is_inverted(&self) -> bool {
        self.earliest > self.latest
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Display of a parsed timestamp reproduces the same calendar fields
        #[test]
        fn parse_matches_fields(
            month in 1u32..=12,
            day in 1u32..=28,
            year in 1970i32..2100,
            hour in 0u32..24,
            minute in 0u32..60,
            second in 0u32..60,
        ) {
            let s = format!("{month:02}{day:02}{year:04}{hour:02}{minute:02}{second:02}");
            let t = Timestamp::parse_compact(&s).unwrap();
            let expected = format!("{year:04}-{month:02}-{day:02} {hour:02}:{minute:02}:{second:02}");
            prop_assert_eq!(t.to_string(), expected);
        }
    }
}
