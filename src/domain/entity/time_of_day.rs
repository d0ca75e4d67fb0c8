use std::fmt::{Display, Formatter, Result as FmtResult};
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Timelike};
use serde::{Deserialize, Serialize};
use snafu::prelude::*;

/// Number of minutes in one calendar day.
pub const MINUTES_PER_DAY: u16 = 24 * 60;

/// A wall-clock time of day with minute precision, stored as minutes since
/// midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    /// Midnight, the first minute of a day.
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    /// Try to create a [`TimeOfDay`] from minutes since midnight.
    ///
    /// # Errors
    ///
    /// This function will return an error if `minutes` is not within a day.
    pub fn try_new(minutes: u16) -> Result<Self, ParseTimeOfDayError> {
        ensure!(minutes < MINUTES_PER_DAY, OutOfRangeSnafu { minutes });
        Ok(Self(minutes))
    }

    /// Try to create a [`TimeOfDay`] from an hour and a minute.
    ///
    /// # Errors
    ///
    /// This function will return an error if either component is out of
    /// range.
    pub fn from_hm(hour: u16, minute: u16) -> Result<Self, ParseTimeOfDayError> {
        ensure!(
            hour < 24 && minute < 60,
            OutOfRangeSnafu {
                minutes: hour.saturating_mul(60).saturating_add(minute),
            }
        );
        Self::try_new(hour * 60 + minute)
    }

    /// The time of day of `datetime`, truncated to the minute.
    pub fn of(datetime: NaiveDateTime) -> Self {
        Self((datetime.hour() * 60 + datetime.minute()) as u16)
    }

    /// Minutes since midnight.
    pub fn minutes(self) -> u16 {
        self.0
    }

    /// Resolve this time of day against a concrete date.
    pub fn on(self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(NaiveTime::MIN) + TimeDelta::minutes(i64::from(self.0))
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        write!(f, "{:02}:{:02}", self.0 / 60, self.0 % 60)
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeOfDayError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let input = s.trim();
        let (hour, minute) = input
            .split_once(':')
            .context(MalformedSnafu { input })?;
        let hour = hour.parse::<u16>().ok().context(MalformedSnafu { input })?;
        let minute = minute.parse::<u16>().ok().context(MalformedSnafu { input })?;
        Self::from_hm(hour, minute)
    }
}

impl TryFrom<String> for TimeOfDay {
    type Error = ParseTimeOfDayError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<TimeOfDay> for String {
    fn from(value: TimeOfDay) -> Self {
        value.to_string()
    }
}

/// An error type of creating a [`TimeOfDay`].
#[derive(Debug, Clone, Snafu, PartialEq, Eq)]
#[non_exhaustive]
pub enum ParseTimeOfDayError {
    #[snafu(display("Could not parse {input:?} as HH:MM"))]
    #[non_exhaustive]
    Malformed { input: String },
    #[snafu(display("{minutes} minutes is not a time within one day"))]
    #[non_exhaustive]
    OutOfRange { minutes: u16 },
}
