//! Human-readable date formatting.
//!
//! Dates render as `"<Month> <Day>, <Year>"` with English month names and an
//! unpadded day, e.g. `November 14, 2023`. The timezone is fixed to UTC so
//! the same input produces the same string on every machine.
//!
//! Accepted inputs:
//!
//! | Input | Interpretation |
//! |-------|----------------|
//! | `i64` | Milliseconds since the Unix epoch |
//! | `2023-11-14` | Midnight UTC |
//! | `2023-11-14T09:30:00` / `2023-11-14 09:30:00` | UTC wall-clock time |
//! | RFC 3339 (`2023-11-14T09:30:00+02:00`) | Converted to UTC |
//! | RFC 2822 (`Tue, 14 Nov 2023 09:30:00 GMT`) | Converted to UTC |
//!
//! Anything else is invalid. [`format_date`] never fails: invalid input
//! renders as [`INVALID_DATE`]. Use [`try_format_date`] to get the error.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use thiserror::Error;

/// Sentinel rendered by [`format_date`] for input that is not a valid date.
pub const INVALID_DATE: &str = "Invalid Date";

const DISPLAY_FORMAT: &str = "%B %-d, %Y";

#[derive(Error, Debug, PartialEq)]
pub enum DateError {
    #[error("timestamp {0} ms is outside the representable range")]
    OutOfRange(i64),
    #[error("unrecognised date {0:?}")]
    Unparseable(String),
}

/// A timestamp in one of the accepted input forms.
#[derive(Debug, Clone, PartialEq)]
pub enum DateInput {
    /// Milliseconds since the Unix epoch.
    Millis(i64),
    /// A textual date.
    Text(String),
}

impl From<i64> for DateInput {
    fn from(ms: i64) -> Self {
        Self::Millis(ms)
    }
}

impl From<&str> for DateInput {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DateInput {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl DateInput {
    /// Resolve to an instant in UTC.
    pub fn to_utc(&self) -> Result<DateTime<Utc>, DateError> {
        match self {
            Self::Millis(ms) => {
                DateTime::from_timestamp_millis(*ms).ok_or(DateError::OutOfRange(*ms))
            }
            Self::Text(text) => parse_text(text.trim()),
        }
    }
}

fn parse_text(text: &str) -> Result<DateTime<Utc>, DateError> {
    if let Ok(dt) = DateTime::parse_from_rfc3339(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(dt) = DateTime::parse_from_rfc2822(text) {
        return Ok(dt.with_timezone(&Utc));
    }
    if let Ok(date) = NaiveDate::parse_from_str(text, "%Y-%m-%d") {
        if let Some(naive) = date.and_hms_opt(0, 0, 0) {
            return Ok(naive.and_utc());
        }
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(text, fmt) {
            return Ok(naive.and_utc());
        }
    }
    Err(DateError::Unparseable(text.to_string()))
}

/// Format a date, or return the error for invalid input.
pub fn try_format_date(input: impl Into<DateInput>) -> Result<String, DateError> {
    let instant = input.into().to_utc()?;
    Ok(instant.format(DISPLAY_FORMAT).to_string())
}

/// Format a date as `"<Month> <Day>, <Year>"` in UTC.
///
/// Invalid input yields [`INVALID_DATE`].
pub fn format_date(input: impl Into<DateInput>) -> String {
    try_format_date(input).unwrap_or_else(|_| INVALID_DATE.to_string())
}
