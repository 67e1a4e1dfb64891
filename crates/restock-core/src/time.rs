//! Timestamp normalisation.
//!
//! All dates crossing the external boundary are reduced to timezone-naive
//! calendar time before storage or comparison: an explicit offset is
//! stripped by keeping the wall-clock reading, so day differences come out
//! the same regardless of the caller's timezone.

use chrono::{DateTime, Local, NaiveDate, NaiveDateTime, NaiveTime};

use crate::{Error, Result};

/// The current moment as a naive local timestamp.
pub fn now_naive() -> NaiveDateTime { Local::now().naive_local() }

/// Parse an ISO 8601 date or date/time string into a naive timestamp.
///
/// Accepts a bare date (`2024-01-05`, taken as midnight), a naive date/time
/// (`2024-01-05T09:30:00`), or an RFC 3339 timestamp whose offset is
/// discarded in favour of the wall-clock reading.
pub fn normalize_timestamp(s: &str) -> Result<NaiveDateTime> {
  if let Ok(dt) = s.parse::<NaiveDateTime>() {
    return Ok(dt);
  }
  if let Ok(d) = s.parse::<NaiveDate>() {
    return Ok(d.and_time(NaiveTime::MIN));
  }
  if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
    return Ok(dt.naive_local());
  }
  Err(Error::DateParse(s.to_owned()))
}
