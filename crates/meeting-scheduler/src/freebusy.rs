//! Decode per-attendee free/busy code strings into typed status sequences.
//!
//! Availability backends report one character per fixed-length interval,
//! starting at the queried window start: `'0'` Free, `'1'` Tentative,
//! `'2'` Busy, `'3'` OutOfOffice, `'4'` NoData. Decoding never fails.
//! Unknown characters become [`FreeBusyStatus::NoData`], and any index past
//! the end of the decoded sequence also reads as NoData.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

/// Availability of one attendee during one interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FreeBusyStatus {
    Free,
    Tentative,
    Busy,
    OutOfOffice,
    NoData,
}

impl FreeBusyStatus {
    /// Map a wire character to a status. Anything outside `'0'..='4'` is NoData.
    pub fn from_code(code: char) -> Self {
        match code {
            '0' => FreeBusyStatus::Free,
            '1' => FreeBusyStatus::Tentative,
            '2' => FreeBusyStatus::Busy,
            '3' => FreeBusyStatus::OutOfOffice,
            _ => FreeBusyStatus::NoData,
        }
    }

    pub fn code(self) -> char {
        match self {
            FreeBusyStatus::Free => '0',
            FreeBusyStatus::Tentative => '1',
            FreeBusyStatus::Busy => '2',
            FreeBusyStatus::OutOfOffice => '3',
            FreeBusyStatus::NoData => '4',
        }
    }

    /// Only Busy and OutOfOffice prevent a meeting from being placed.
    ///
    /// Tentative and NoData are treated as available.
    pub fn is_blocking(self) -> bool {
        matches!(self, FreeBusyStatus::Busy | FreeBusyStatus::OutOfOffice)
    }
}

/// One attendee's decoded availability over a window.
#[derive(Debug, Clone, PartialEq)]
pub struct FreeBusyMap {
    pub attendee: String,
    pub window_start: DateTime<Utc>,
    pub granularity: Duration,
    pub statuses: Vec<FreeBusyStatus>,
}

impl FreeBusyMap {
    /// Status of the interval at `index`, counted from `window_start`.
    ///
    /// Negative indices and indices past the decoded sequence are NoData.
    pub fn status_at(&self, index: i64) -> FreeBusyStatus {
        usize::try_from(index)
            .ok()
            .and_then(|i| self.statuses.get(i).copied())
            .unwrap_or(FreeBusyStatus::NoData)
    }

    /// Number of intervals the window `[window_start, window_end)` spans.
    pub fn expected_len(&self, window_end: DateTime<Utc>) -> usize {
        interval_count(window_end - self.window_start, self.granularity)
    }

    /// Re-encode the sequence using the canonical wire characters.
    pub fn to_code_string(&self) -> String {
        self.statuses.iter().map(|s| s.code()).collect()
    }
}

/// Decode a raw free/busy string for `attendee`.
///
/// Every character occupies exactly one interval. Characters outside
/// `'0'..='4'`, whitespace included, decode to NoData in place.
pub fn decode_free_busy(
    attendee: &str,
    raw: &str,
    window_start: DateTime<Utc>,
    granularity: Duration,
) -> FreeBusyMap {
    let statuses = raw
        .chars()
        .map(FreeBusyStatus::from_code)
        .collect();

    FreeBusyMap {
        attendee: attendee.to_string(),
        window_start,
        granularity,
        statuses,
    }
}

/// `ceil(span / granularity)`, zero for empty or negative spans.
pub(crate) fn interval_count(span: Duration, granularity: Duration) -> usize {
    let span = span.num_seconds();
    let step = granularity.num_seconds().max(1);
    if span <= 0 {
        return 0;
    }
    ((span + step - 1) / step) as usize
}
