//! The scheduling request as it arrives on the wire, and its validated form.
//!
//! All validation happens here, once, before any free/busy data is fetched.
//! Everything downstream works with [`ValidatedRequest`] and may assume its
//! invariants hold.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};
use crate::local;
use crate::preferences::SchedulingPreferences;
use crate::provider::TimeRange;

pub const MIN_DURATION_MINUTES: u32 = 15;
pub const MAX_DURATION_MINUTES: u32 = 480;
pub const MAX_SUGGESTIONS: u32 = 20;
pub const DEFAULT_MAX_SUGGESTIONS: u32 = 5;
pub const DEFAULT_GRANULARITY_MINUTES: u32 = 15;
pub const MAX_GRANULARITY_MINUTES: u32 = 240;
/// Longest search or report window, in days.
pub const MAX_RANGE_DAYS: i64 = 366;

/// How much of the date range the enumerator walks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchStrategy {
    /// Stop as soon as `max_suggestions` slots have passed the filter.
    #[default]
    FirstFit,
    /// Walk the whole range and keep the best `max_suggestions` slots.
    Exhaustive,
}

/// A meeting-time search as submitted by a caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchedulingRequest {
    pub attendees: Vec<String>,
    pub duration_minutes: u32,
    /// ISO 8601 / RFC 3339 timestamp. Naive timestamps are read in `timezone`.
    pub date_range_start: String,
    pub date_range_end: String,
    #[serde(default = "default_max_suggestions")]
    pub max_suggestions: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferences: Option<SchedulingPreferences>,
    /// IANA timezone used for working hours and output. Defaults to UTC.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default = "default_granularity")]
    pub granularity_minutes: u32,
    #[serde(default)]
    pub search_strategy: SearchStrategy,
}

fn default_max_suggestions() -> u32 {
    DEFAULT_MAX_SUGGESTIONS
}

fn default_granularity() -> u32 {
    DEFAULT_GRANULARITY_MINUTES
}

/// A request whose fields have all been checked and parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedRequest {
    /// Trimmed, de-duplicated, in first-seen order. Never empty.
    pub attendees: Vec<String>,
    pub duration: Duration,
    pub range: TimeRange,
    pub max_suggestions: usize,
    pub preferences: SchedulingPreferences,
    pub timezone: Tz,
    pub granularity: Duration,
    pub strategy: SearchStrategy,
}

impl SchedulingRequest {
    pub fn new(
        attendees: Vec<String>,
        duration_minutes: u32,
        date_range_start: impl Into<String>,
        date_range_end: impl Into<String>,
    ) -> Self {
        Self {
            attendees,
            duration_minutes,
            date_range_start: date_range_start.into(),
            date_range_end: date_range_end.into(),
            max_suggestions: DEFAULT_MAX_SUGGESTIONS,
            preferences: None,
            timezone: None,
            granularity_minutes: DEFAULT_GRANULARITY_MINUTES,
            search_strategy: SearchStrategy::default(),
        }
    }

    /// Validate every field and parse timestamps.
    ///
    /// # Errors
    /// Returns the first violated constraint: no attendees, a blank attendee,
    /// duration outside 15..=480, an unknown timezone, an unparseable
    /// timestamp, `end <= start`, a range longer than
    /// [`MAX_RANGE_DAYS`], `max_suggestions` outside 1..=20, a bad
    /// granularity, or invalid preferences.
    pub fn validate(&self) -> Result<ValidatedRequest> {
        let attendees = normalize_attendees(&self.attendees)?;

        if !(MIN_DURATION_MINUTES..=MAX_DURATION_MINUTES).contains(&self.duration_minutes) {
            return Err(SchedulingError::InvalidDuration(self.duration_minutes));
        }

        let timezone = parse_timezone(self.timezone.as_deref())?;
        let range = parse_range(&self.date_range_start, &self.date_range_end, timezone)?;

        if !(1..=MAX_SUGGESTIONS).contains(&self.max_suggestions) {
            return Err(SchedulingError::InvalidMaxSuggestions(self.max_suggestions));
        }

        let granularity = validate_granularity(self.granularity_minutes, MAX_GRANULARITY_MINUTES)?;

        let preferences = self.preferences.unwrap_or_default();
        preferences.validate()?;

        Ok(ValidatedRequest {
            attendees,
            duration: Duration::minutes(i64::from(self.duration_minutes)),
            range,
            max_suggestions: self.max_suggestions as usize,
            preferences,
            timezone,
            granularity,
            strategy: self.search_strategy,
        })
    }
}

/// Parse both ends of a window and check `start < end` and the span limit.
pub(crate) fn parse_range(start: &str, end: &str, tz: Tz) -> Result<TimeRange> {
    let range = TimeRange {
        start: parse_datetime(start, tz)?,
        end: parse_datetime(end, tz)?,
    };
    if range.end <= range.start {
        return Err(SchedulingError::InvalidDateRange {
            start: start.to_string(),
            end: end.to_string(),
        });
    }
    if range.duration() > Duration::days(MAX_RANGE_DAYS) {
        return Err(SchedulingError::DateRangeTooLong {
            days: range.duration().num_days(),
            max: MAX_RANGE_DAYS,
        });
    }
    Ok(range)
}

/// Trim identifiers, reject blanks, and drop repeats.
pub(crate) fn normalize_attendees(raw: &[String]) -> Result<Vec<String>> {
    if raw.is_empty() {
        return Err(SchedulingError::NoAttendees);
    }
    let mut attendees: Vec<String> = Vec::with_capacity(raw.len());
    for attendee in raw {
        let trimmed = attendee.trim();
        if trimmed.is_empty() {
            return Err(SchedulingError::EmptyAttendee);
        }
        if !attendees.iter().any(|a| a == trimmed) {
            attendees.push(trimmed.to_string());
        }
    }
    Ok(attendees)
}

pub(crate) fn validate_granularity(minutes: u32, max: u32) -> Result<Duration> {
    if minutes == 0 || minutes > max {
        return Err(SchedulingError::InvalidGranularity { got: minutes, max });
    }
    Ok(Duration::minutes(i64::from(minutes)))
}

/// Parse an IANA timezone name, defaulting to UTC.
///
/// # Errors
/// Returns `SchedulingError::InvalidTimezone` for unknown names.
pub fn parse_timezone(name: Option<&str>) -> Result<Tz> {
    match name {
        None => Ok(Tz::UTC),
        Some(name) => name
            .parse()
            .map_err(|_| SchedulingError::InvalidTimezone(name.to_string())),
    }
}

/// Parse an ISO 8601 timestamp into `DateTime<Utc>`.
///
/// Accepts RFC 3339 with an offset or `Z`, naive `YYYY-MM-DDTHH:MM[:SS[.fff]]`
/// read as wall-clock time in `tz`, and a bare `YYYY-MM-DD` meaning local
/// midnight.
///
/// # Errors
/// Returns `SchedulingError::InvalidDatetime` if no format matches.
pub fn parse_datetime(s: &str, tz: Tz) -> Result<DateTime<Utc>> {
    let s = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Ok(dt.with_timezone(&Utc));
    }
    for format in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%dT%H:%M"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, format) {
            return Ok(local::resolve_local(tz, naive));
        }
    }
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .map(|date| local::at_hour(tz, date, 0))
        .map_err(|e| SchedulingError::InvalidDatetime(format!("'{}': {}", s, e)))
}
