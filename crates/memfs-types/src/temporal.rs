use std::fmt;

use chrono::{DateTime, Local, TimeZone, Utc};
use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// Calendar date layout used by listings (`DD-MM-YYYY`).
const DATE_FORMAT: &str = "%d-%m-%Y";

/// Wall-clock instant attached to file records.
///
/// Stored in UTC and rendered in the local timezone. Ordering follows the
/// underlying instant, so "not earlier than" comparisons are meaningful
/// across records.
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timestamp(DateTime<Utc>);

impl Timestamp {
    /// The current wall-clock time.
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Build a timestamp from whole seconds since the UNIX epoch.
    pub fn from_unix_secs(secs: i64) -> Result<Self, TypeError> {
        DateTime::<Utc>::from_timestamp(secs, 0)
            .map(Self)
            .ok_or(TypeError::TimestampOutOfRange(secs))
    }

    /// Seconds since the UNIX epoch.
    pub fn unix_secs(&self) -> i64 {
        self.0.timestamp()
    }

    /// The later of two timestamps.
    pub fn latest(self, other: Self) -> Self {
        self.max(other)
    }

    /// Render the calendar date (`DD-MM-YYYY`) in the given timezone.
    pub fn date_in<Tz: TimeZone>(&self, tz: &Tz) -> String
    where
        Tz::Offset: fmt::Display,
    {
        self.0.with_timezone(tz).format(DATE_FORMAT).to_string()
    }
}

impl fmt::Debug for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Timestamp({})", self.0.to_rfc3339())
    }
}

impl fmt::Display for Timestamp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.date_in(&Local))
    }
}
