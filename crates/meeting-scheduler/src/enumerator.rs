//! Walk a date range at fixed tick granularity, yielding candidate slots.
//!
//! With working hours enabled, the walk jumps over nights: a cursor before
//! `earliest_hour` moves to `earliest_hour:00` the same day, and a cursor at
//! or past `latest_hour` (or a slot that would end past it) moves to
//! `earliest_hour:00` the next day. Otherwise the cursor moves one tick per
//! step. Every step moves the cursor strictly forward and enumeration stops
//! at the first slot that would end past the range, so the walk is bounded
//! by the number of ticks in the range plus two jumps per calendar day.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::local;
use crate::request::ValidatedRequest;

/// Iterator over `(start, end)` candidate slots, in chronological order.
#[derive(Debug, Clone)]
pub struct SlotEnumerator {
    current: DateTime<Utc>,
    range_end: DateTime<Utc>,
    duration: Duration,
    tick: Duration,
    timezone: Tz,
    /// `(earliest_hour, latest_hour)` when restricted to working hours.
    working_hours: Option<(u32, u32)>,
    exhausted: bool,
}

impl SlotEnumerator {
    pub fn new(
        range_start: DateTime<Utc>,
        range_end: DateTime<Utc>,
        duration: Duration,
        tick: Duration,
        timezone: Tz,
        working_hours: Option<(u32, u32)>,
    ) -> Self {
        Self {
            current: range_start,
            range_end,
            duration,
            tick: tick.max(Duration::minutes(1)),
            timezone,
            working_hours,
            exhausted: false,
        }
    }

    pub fn for_request(request: &ValidatedRequest) -> Self {
        let prefs = &request.preferences;
        let working_hours = prefs
            .working_hours_only
            .then_some((prefs.earliest_hour, prefs.latest_hour));
        Self::new(
            request.range.start,
            request.range.end,
            request.duration,
            request.granularity,
            request.timezone,
            working_hours,
        )
    }

    fn jump_to(&mut self, next: DateTime<Utc>) {
        self.current = if next > self.current {
            next
        } else {
            self.current + self.tick
        };
    }

    fn jump_to_next_morning(&mut self, earliest: u32) {
        let today = local::local_date(self.timezone, self.current);
        match today.succ_opt() {
            Some(tomorrow) => {
                let next = local::at_hour(self.timezone, tomorrow, earliest);
                self.jump_to(next);
            }
            None => self.exhausted = true,
        }
    }

    // A slot overflows when it ends after `latest` o'clock or on a later day.
    fn overflows_day(&self, start: DateTime<Utc>, end: DateTime<Utc>, latest: u32) -> bool {
        local::local_hour(self.timezone, end) > latest
            || local::local_date(self.timezone, end) != local::local_date(self.timezone, start)
    }
}

impl Iterator for SlotEnumerator {
    type Item = (DateTime<Utc>, DateTime<Utc>);

    fn next(&mut self) -> Option<Self::Item> {
        while !self.exhausted && self.current < self.range_end {
            if let Some((earliest, latest)) = self.working_hours {
                let hour = local::local_hour(self.timezone, self.current);
                if hour < earliest {
                    let date = local::local_date(self.timezone, self.current);
                    let next = local::at_hour(self.timezone, date, earliest);
                    self.jump_to(next);
                    continue;
                }
                if hour >= latest {
                    self.jump_to_next_morning(earliest);
                    continue;
                }
            }

            let slot_end = self.current + self.duration;
            if slot_end > self.range_end {
                self.exhausted = true;
                break;
            }

            if let Some((earliest, latest)) = self.working_hours {
                if self.overflows_day(self.current, slot_end, latest) {
                    self.jump_to_next_morning(earliest);
                    continue;
                }
            }

            let slot_start = self.current;
            self.current += self.tick;
            return Some((slot_start, slot_end));
        }
        None
    }
}
