//! Heuristic scoring of accepted slots against stated preferences.
//!
//! Every slot starts at [`BASE_SCORE`]; each rule below adds or subtracts
//! independently of the others:
//!
//! | Rule                                                         | Points |
//! |--------------------------------------------------------------|--------|
//! | `prefer_morning` and start hour < 12                         | +20    |
//! | `prefer_afternoon` and start hour >= 13                      | +20    |
//! | start hour < 9 or > 16                                       | -10    |
//! | `avoid_back_to_back` and a free break on both sides          | +10    |
//!
//! Hours are read in the request timezone.

use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

use crate::availability::AvailabilityIndex;
use crate::local;
use crate::preferences::SchedulingPreferences;

pub const BASE_SCORE: i32 = 100;
pub const PREFERENCE_BONUS: i32 = 20;
pub const OFF_HOURS_PENALTY: i32 = 10;
pub const BREAK_BONUS: i32 = 10;

#[derive(Debug, Clone, Copy)]
pub struct Scorer<'a> {
    preferences: &'a SchedulingPreferences,
    timezone: Tz,
    indices: &'a [AvailabilityIndex],
}

impl<'a> Scorer<'a> {
    pub fn new(
        preferences: &'a SchedulingPreferences,
        timezone: Tz,
        indices: &'a [AvailabilityIndex],
    ) -> Self {
        Self {
            preferences,
            timezone,
            indices,
        }
    }

    pub fn score(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> i32 {
        let hour = local::local_hour(self.timezone, start);
        let mut score = BASE_SCORE;

        if self.preferences.prefer_morning && hour < 12 {
            score += PREFERENCE_BONUS;
        }
        if self.preferences.prefer_afternoon && hour >= 13 {
            score += PREFERENCE_BONUS;
        }
        if !(9..=16).contains(&hour) {
            score -= OFF_HOURS_PENALTY;
        }
        if self.preferences.avoid_back_to_back && self.has_breaks_around(start, end) {
            score += BREAK_BONUS;
        }

        score
    }

    /// Every attendee is available for `min_break_minutes` before `start`
    /// and after `end`. Always true for a zero-length break.
    pub fn has_breaks_around(&self, start: DateTime<Utc>, end: DateTime<Utc>) -> bool {
        if self.preferences.min_break_minutes == 0 {
            return true;
        }
        let gap = Duration::minutes(i64::from(self.preferences.min_break_minutes));
        self.indices
            .iter()
            .all(|index| index.all_free(start - gap, start) && index.all_free(end, end + gap))
    }
}
