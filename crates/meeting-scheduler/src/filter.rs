//! Accept or reject candidate slots against every attendee's availability.

use chrono::{DateTime, Utc};

use crate::availability::AvailabilityIndex;
use crate::request::{MAX_DURATION_MINUTES, MIN_DURATION_MINUTES};

/// All-attendee availability check, plus duration and range bounds.
#[derive(Debug, Clone, Copy)]
pub struct ConstraintFilter<'a> {
    range_end: DateTime<Utc>,
    indices: &'a [AvailabilityIndex],
}

impl<'a> ConstraintFilter<'a> {
    pub fn new(range_end: DateTime<Utc>, indices: &'a [AvailabilityIndex]) -> Self {
        Self { range_end, indices }
    }

    /// True when `[start, end)` has a permitted length, lies inside the range,
    /// and no attendee is Busy or OutOfOffice at any point in it.
    ///
    /// Stops at the first unavailable attendee.
    pub fn accepts(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        let minutes = (end - start).num_minutes();
        if minutes < i64::from(MIN_DURATION_MINUTES) || minutes > i64::from(MAX_DURATION_MINUTES) {
            return false;
        }
        if end > self.range_end {
            return false;
        }
        self.indices.iter().all(|index| index.all_free(start, end))
    }
}
