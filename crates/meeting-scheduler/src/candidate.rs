//! Scored meeting slots and their wire representation.

use chrono::{DateTime, Datelike, Timelike, Utc, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

use crate::local;

/// Coarse part of the day a slot starts in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TimeOfDay {
    /// Before 12:00.
    Morning,
    /// 12:00 to 16:59.
    Afternoon,
    /// 17:00 onwards.
    Evening,
}

impl TimeOfDay {
    pub fn from_hour(hour: u32) -> Self {
        match hour {
            0..=11 => TimeOfDay::Morning,
            12..=16 => TimeOfDay::Afternoon,
            _ => TimeOfDay::Evening,
        }
    }
}

/// A slot that passed the constraint filter, with its heuristic score.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeSlotCandidate {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    /// Day of week of `start` in the request timezone.
    pub day_of_week: Weekday,
    pub time_of_day: TimeOfDay,
    pub score: i32,
    pub attendee_count: usize,
}

impl TimeSlotCandidate {
    pub fn new(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        timezone: Tz,
        score: i32,
        attendee_count: usize,
    ) -> Self {
        let local_start = start.with_timezone(&timezone);
        Self {
            start,
            end,
            day_of_week: local_start.weekday(),
            time_of_day: TimeOfDay::from_hour(local_start.hour()),
            score,
            attendee_count,
        }
    }

    pub fn duration_minutes(&self) -> i64 {
        (self.end - self.start).num_minutes()
    }
}

/// One entry of the suggestion list returned to callers.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MeetingSuggestion {
    pub start_time: String,
    pub end_time: String,
    pub duration_minutes: i64,
    pub score: i32,
    pub day_of_week: String,
    pub time_of_day: TimeOfDay,
}

impl MeetingSuggestion {
    pub fn from_candidate(candidate: &TimeSlotCandidate, timezone: Tz) -> Self {
        Self {
            start_time: local::format_local(timezone, candidate.start),
            end_time: local::format_local(timezone, candidate.end),
            duration_minutes: candidate.duration_minutes(),
            score: candidate.score,
            day_of_week: day_name(candidate.day_of_week).to_string(),
            time_of_day: candidate.time_of_day,
        }
    }
}

fn day_name(day: Weekday) -> &'static str {
    match day {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
