//! Per-attendee availability report over a window.
//!
//! Shares decoding with the meeting search: the same provider strings go
//! through [`decode_free_busy`](crate::freebusy::decode_free_busy), so the
//! report and the search never disagree about what a code means.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::freebusy::FreeBusyStatus;
use crate::provider::AvailabilityProvider;
use crate::request::{normalize_attendees, parse_range, parse_timezone, validate_granularity};
use crate::scheduler::build_indices;

pub const DEFAULT_INTERVAL_MINUTES: u32 = 30;
pub const MAX_INTERVAL_MINUTES: u32 = 1440;

/// Which attendees to report on, over which window, at what resolution.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AvailabilityQuery {
    pub attendees: Vec<String>,
    pub start: String,
    pub end: String,
    #[serde(default = "default_interval")]
    pub interval_minutes: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL_MINUTES
}

/// A maximal run of one non-Free status, clipped to the query window.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusBlock {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
    pub status: FreeBusyStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttendeeAvailability {
    pub attendee: String,
    /// Canonical code string, exactly one character per interval of the window.
    pub merged_free_busy: String,
    /// Minutes in the window that do not block a meeting.
    pub available_minutes: i64,
    pub blocks: Vec<StatusBlock>,
}

/// Report each attendee's availability over the query window.
///
/// # Errors
/// Returns a validation variant of `SchedulingError` for an empty attendee
/// list, unparseable timestamps, `end <= start`, an over-long window, or a bad interval, and
/// `SchedulingError::AvailabilityUnavailable` if the provider fails.
pub fn check_availability<P>(provider: &P, query: &AvailabilityQuery) -> Result<Vec<AttendeeAvailability>>
where
    P: AvailabilityProvider + ?Sized,
{
    let attendees = normalize_attendees(&query.attendees)?;
    let tz = parse_timezone(query.timezone.as_deref())?;
    let window = parse_range(&query.start, &query.end, tz)?;
    let granularity = validate_granularity(query.interval_minutes, MAX_INTERVAL_MINUTES)?;

    let raw = provider.get_free_busy(&attendees, &window, granularity)?;
    let indices = build_indices(&attendees, raw, &window, granularity);

    Ok(indices
        .iter()
        .map(|index| {
            let map = index.map();
            let count = map.expected_len(window.end);
            let mut codes = String::with_capacity(count);
            let mut available_minutes = 0;
            let mut blocks: Vec<StatusBlock> = Vec::new();

            for i in 0..count {
                let status = map.status_at(i as i64);
                codes.push(status.code());

                let slot_start = window.start + granularity * i as i32;
                let slot_end = (slot_start + granularity).min(window.end);

                if !status.is_blocking() {
                    available_minutes += (slot_end - slot_start).num_minutes();
                }
                if status == FreeBusyStatus::Free {
                    continue;
                }
                match blocks.last_mut() {
                    Some(last) if last.status == status && last.end == slot_start => {
                        last.end = slot_end;
                    }
                    _ => blocks.push(StatusBlock {
                        start: slot_start,
                        end: slot_end,
                        status,
                    }),
                }
            }

            AttendeeAvailability {
                attendee: index.attendee().to_string(),
                merged_free_busy: codes,
                available_minutes,
                blocks,
            }
        })
        .collect())
}
