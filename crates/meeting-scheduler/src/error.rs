//! Error types for meeting-scheduler operations.

use thiserror::Error;

use crate::provider::ProviderError;

#[derive(Error, Debug)]
pub enum SchedulingError {
    #[error("at least one attendee is required")]
    NoAttendees,

    #[error("attendee identifiers must not be blank")]
    EmptyAttendee,

    #[error("duration_minutes must be between 15 and 480, got {0}")]
    InvalidDuration(u32),

    #[error("end must be after start (start: {start}, end: {end})")]
    InvalidDateRange { start: String, end: String },

    #[error("date range must span at most {max} days, got {days}")]
    DateRangeTooLong { days: i64, max: i64 },

    #[error("max_suggestions must be between 1 and 20, got {0}")]
    InvalidMaxSuggestions(u32),

    #[error("working hours must satisfy 0 <= earliest_hour < latest_hour <= 23, got {earliest}..{latest}")]
    InvalidWorkingHours { earliest: u32, latest: u32 },

    #[error("min_break_minutes must be at most 240, got {0}")]
    InvalidBreak(u32),

    #[error("granularity must be between 1 and {max} minutes, got {got}")]
    InvalidGranularity { got: u32, max: u32 },

    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid datetime: {0}")]
    InvalidDatetime(String),

    #[error("availability unavailable: {0}")]
    AvailabilityUnavailable(#[from] ProviderError),
}

impl SchedulingError {
    /// True for errors caused by the caller's request rather than the backend.
    pub fn is_validation(&self) -> bool {
        !matches!(self, SchedulingError::AvailabilityUnavailable(_))
    }
}

pub type Result<T> = std::result::Result<T, SchedulingError>;
