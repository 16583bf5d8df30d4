use std::{fmt, str::FromStr};

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Error returned when a string is not a valid "HH:MM" clock time.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("invalid clock time '{input}': expected HH:MM")]
pub struct ClockTimeError {
    input: String,
}

impl ClockTimeError {
    pub fn input(&self) -> &str {
        &self.input
    }
}

/// A local wall-clock time of day with minute precision.
///
/// Parsed from and displayed as `"HH:MM"`; seconds are always zero.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct ClockTime(NaiveTime);

impl ClockTime {
    /// Builds a clock time, returning `None` for out-of-range components.
    pub fn new(
        hour: u32,
        minute: u32,
    ) -> Option<Self> {
        NaiveTime::from_hms_opt(hour, minute, 0).map(Self)
    }

    /// Parses a `"HH:MM"` string. Surrounding whitespace is ignored.
    pub fn parse(s: &str) -> Result<Self, ClockTimeError> {
        NaiveTime::parse_from_str(s.trim(), "%H:%M")
            .map(Self)
            .map_err(|_| ClockTimeError {
                input: s.to_string(),
            })
    }

    pub fn hour(&self) -> u32 {
        self.0.hour()
    }

    pub fn minute(&self) -> u32 {
        self.0.minute()
    }

    pub fn minutes_since_midnight(&self) -> i64 {
        i64::from(self.hour() * 60 + self.minute())
    }

    /// The instant this clock time falls on for the given calendar date.
    pub fn on(
        &self,
        date: NaiveDate,
    ) -> NaiveDateTime {
        date.and_time(self.0)
    }
}

impl fmt::Display for ClockTime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{:02}:{:02}", self.hour(), self.minute())
    }
}

impl FromStr for ClockTime {
    type Err = ClockTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for ClockTime {
    type Error = ClockTimeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ClockTime> for String {
    fn from(value: ClockTime) -> Self {
        value.to_string()
    }
}
