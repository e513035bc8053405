//! Monday-aligned calendar weeks in a fixed IANA timezone.
//!
//! Only the local calendar date matters, so DST shifts never move an
//! instant into a neighbouring week.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Days, NaiveDate, Utc};
use chrono_tz::Tz;
use serde::Serialize;

use crate::CoreError;

/// Identifies a Monday–Sunday week by its Monday.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct WeekKey(NaiveDate);

impl WeekKey {
    /// The week containing `date`.
    pub fn containing(date: NaiveDate) -> Self {
        let back = u64::from(date.weekday().num_days_from_monday());
        // Only fails below NaiveDate::MIN; stay put rather than panic.
        WeekKey(date.checked_sub_days(Days::new(back)).unwrap_or(date))
    }

    /// Monday.
    pub fn start(&self) -> NaiveDate {
        self.0
    }

    /// Sunday.
    pub fn end(&self) -> NaiveDate {
        self.0.checked_add_days(Days::new(6)).unwrap_or(self.0)
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        WeekKey::containing(date) == *self
    }

    pub fn previous(&self) -> Self {
        WeekKey(self.0.checked_sub_days(Days::new(7)).unwrap_or(self.0))
    }
}

impl fmt::Display for WeekKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

/// Bucket `ts` into the local week of `tz`.
pub fn week_key(ts: DateTime<Utc>, tz: Tz) -> WeekKey {
    WeekKey::containing(local_date(ts, tz))
}

/// Calendar date of `ts` as seen in `tz`.
pub fn local_date(ts: DateTime<Utc>, tz: Tz) -> NaiveDate {
    ts.with_timezone(&tz).date_naive()
}

/// Resolve an IANA zone name such as `America/New_York`.
pub fn parse_timezone(name: &str) -> Result<Tz, CoreError> {
    Tz::from_str(name.trim()).map_err(|_| CoreError::UnknownTimezone(name.to_string()))
}
