//! Timestamp helpers for mission timeline documents.
//!
//! All timestamps in the input documents use the fixed UTC layout
//! `YYYY-MM-DDTHH:MM:SSZ`. Edits operate on the time-of-day portion only,
//! so this module also provides the split/recombine helpers.

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, TimeDelta, Utc};

/// Layout of every timestamp in the input documents.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%dT%H:%M:%SZ";

/// Layout of an edited time of day.
pub const TIME_OF_DAY_FORMAT: &str = "%H:%M:%S";

/// Layout of the calendar date portion of a timestamp.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a document timestamp into a UTC instant.
pub fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, TimeError> {
    NaiveDateTime::parse_from_str(value, TIMESTAMP_FORMAT)
        .map(|naive| naive.and_utc())
        .map_err(|source| TimeError::Timestamp {
            value: value.to_string(),
            source,
        })
}

/// Format a UTC instant in the document layout.
pub fn format_timestamp(instant: &DateTime<Utc>) -> String {
    instant.format(TIMESTAMP_FORMAT).to_string()
}

/// The `HH:MM:SS` portion of an instant.
pub fn time_of_day(instant: &DateTime<Utc>) -> String {
    instant.format(TIME_OF_DAY_FORMAT).to_string()
}

/// The `YYYY-MM-DD` portion of an instant.
pub fn calendar_date(instant: &DateTime<Utc>) -> String {
    instant.format(DATE_FORMAT).to_string()
}

/// Parse a user-entered `HH:MM:SS` time of day.
pub fn parse_time_of_day(value: &str) -> Result<NaiveTime, TimeError> {
    NaiveTime::parse_from_str(value.trim(), TIME_OF_DAY_FORMAT).map_err(|source| {
        TimeError::TimeOfDay {
            value: value.to_string(),
            source,
        }
    })
}

/// Recombine a calendar date with a new time of day.
pub fn combine(date: NaiveDate, time: NaiveTime) -> DateTime<Utc> {
    date.and_time(time).and_utc()
}

/// Format an elapsed second count as `HH:MM:SS`.
///
/// Hours are not wrapped at 24, so long timelines read as e.g. `30:00:00`.
pub fn format_elapsed(seconds: u64) -> String {
    let hours = seconds / 3600;
    let minutes = (seconds % 3600) / 60;
    let secs = seconds % 60;
    format!("{hours:02}:{minutes:02}:{secs:02}")
}

/// Format a remaining duration as `H:MM:SS`, with a day prefix when needed.
///
/// Negative durations are treated as zero.
pub fn format_countdown(remaining: TimeDelta) -> String {
    let total = remaining.num_seconds().max(0);
    let days = total / 86_400;
    let rest = total % 86_400;
    let clock = format!("{}:{:02}:{:02}", rest / 3600, (rest % 3600) / 60, rest % 60);
    match days {
        0 => clock,
        1 => format!("1 day, {clock}"),
        n => format!("{n} days, {clock}"),
    }
}

/// Errors from parsing timestamps and times of day.
#[derive(Debug, thiserror::Error)]
pub enum TimeError {
    /// A document timestamp did not match `YYYY-MM-DDTHH:MM:SSZ`.
    #[error("Invalid timestamp '{value}': {source}")]
    Timestamp {
        value: String,
        #[source]
        source: chrono::ParseError,
    },

    /// An edited time of day did not match `HH:MM:SS`.
    #[error("Invalid time '{value}' (expected HH:MM:SS): {source}")]
    TimeOfDay {
        value: String,
        #[source]
        source: chrono::ParseError,
    },
}
