//! Constant-time "is this attendee free?" queries over a decoded free/busy map.
//!
//! The index keeps a prefix count of blocking intervals, so a range query is
//! two lookups regardless of meeting length.

use chrono::{DateTime, Utc};

use crate::freebusy::{FreeBusyMap, FreeBusyStatus};

/// Range-query wrapper around one attendee's [`FreeBusyMap`].
#[derive(Debug, Clone)]
pub struct AvailabilityIndex {
    map: FreeBusyMap,
    /// `blocking_prefix[i]` = number of Busy/OutOfOffice intervals in `statuses[..i]`.
    blocking_prefix: Vec<u32>,
}

impl AvailabilityIndex {
    pub fn new(map: FreeBusyMap) -> Self {
        let mut blocking_prefix = Vec::with_capacity(map.statuses.len() + 1);
        let mut running = 0u32;
        blocking_prefix.push(running);
        for status in &map.statuses {
            if status.is_blocking() {
                running += 1;
            }
            blocking_prefix.push(running);
        }
        Self {
            map,
            blocking_prefix,
        }
    }

    pub fn attendee(&self) -> &str {
        &self.map.attendee
    }

    pub fn map(&self) -> &FreeBusyMap {
        &self.map
    }

    /// Status of the interval containing `at`.
    pub fn status_at(&self, at: DateTime<Utc>) -> FreeBusyStatus {
        self.map.status_at(self.floor_index(at))
    }

    /// True when no interval overlapping `[start, end)` is Busy or OutOfOffice.
    ///
    /// Free, Tentative and NoData intervals all count as available, as do
    /// intervals outside the decoded sequence. An empty range is always free.
    pub fn all_free(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if end <= start {
            return true;
        }
        let len = self.map.statuses.len() as i64;
        let first = self.floor_index(start).clamp(0, len) as usize;
        let last = self.ceil_index(end).clamp(0, len) as usize;
        if first >= last {
            return true;
        }
        self.blocking_prefix[last] == self.blocking_prefix[first]
    }

    fn step_seconds(&self) -> i64 {
        self.map.granularity.num_seconds().max(1)
    }

    fn floor_index(&self, at: DateTime<Utc>) -> i64 {
        (at - self.map.window_start)
            .num_seconds()
            .div_euclid(self.step_seconds())
    }

    // Index one past the last interval that `at` reaches into.
    fn ceil_index(&self, at: DateTime<Utc>) -> i64 {
        let offset = (at - self.map.window_start).num_seconds();
        -(-offset).div_euclid(self.step_seconds())
    }
}
