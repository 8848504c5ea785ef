//! Calendar-day key used to address individual occurrences of a series.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::constants::DAY_KEY_FORMAT;
use crate::{CadenceError, Result};

/// An occurrence's un-exception'd start date at day granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DayKey(NaiveDate);

impl DayKey {
    /// Key for `date`.
    pub const fn new(date: NaiveDate) -> Self {
        Self(date)
    }

    /// Truncate a timestamp to its calendar day.
    pub fn of(timestamp: DateTime<Utc>) -> Self {
        Self(timestamp.date_naive())
    }

    /// The underlying calendar date.
    pub const fn date(self) -> NaiveDate {
        self.0
    }
}

impl From<NaiveDate> for DayKey {
    fn from(date: NaiveDate) -> Self {
        Self(date)
    }
}

impl fmt::Display for DayKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format(DAY_KEY_FORMAT))
    }
}

impl FromStr for DayKey {
    type Err = CadenceError;

    /// Parses `YYYY-MM-DD`; rejects anything else, including days that do not
    /// exist such as `2023-02-29`.
    fn from_str(s: &str) -> Result<Self> {
        let trimmed = s.trim();
        if trimmed.len() != 10 {
            return Err(invalid_key(s));
        }
        NaiveDate::parse_from_str(trimmed, DAY_KEY_FORMAT).map(Self).map_err(|_| invalid_key(s))
    }
}

fn invalid_key(raw: &str) -> CadenceError {
    CadenceError::InvalidInput(format!("Invalid day key '{raw}', expected YYYY-MM-DD"))
}

impl Serialize for DayKey {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for DayKey {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}
