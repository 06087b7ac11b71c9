//! CQL `timestamp`: milliseconds since the Unix epoch

use crate::error::{Error, Result};
use chrono::{DateTime, TimeZone, Utc};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Timestamp(i64);

impl Timestamp {
    pub fn from_millis(millis: i64) -> Self {
        Self(millis)
    }

    /// Build from whole seconds plus a microsecond component
    pub fn from_parts(seconds: i64, microseconds: i64) -> Result<Self> {
        seconds
            .checked_mul(1000)
            .and_then(|millis| millis.checked_add(microseconds / 1000))
            .map(Self)
            .ok_or_else(|| Error::range("timestamp out of range"))
    }

    pub fn now() -> Self {
        Self(Utc::now().timestamp_millis())
    }

    pub fn millis(self) -> i64 {
        self.0
    }

    /// Whole seconds since the epoch
    pub fn time(self) -> i64 {
        self.0.div_euclid(1000)
    }

    pub fn to_datetime(self) -> Result<DateTime<Utc>> {
        Utc.timestamp_millis_opt(self.0)
            .single()
            .ok_or_else(|| Error::range(format!("timestamp {} is not representable", self.0)))
    }
}

impl From<DateTime<Utc>> for Timestamp {
    fn from(value: DateTime<Utc>) -> Self {
        Self(value.timestamp_millis())
    }
}

impl FromStr for Timestamp {
    type Err = Error;

    /// Accepts integral milliseconds or an RFC 3339 date-time
    fn from_str(s: &str) -> Result<Self> {
        if let Ok(millis) = s.parse::<i64>() {
            return Ok(Self(millis));
        }
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.timestamp_millis()))
            .map_err(|_| Error::expecting("a timestamp string", format!("{:?}", s)))
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
