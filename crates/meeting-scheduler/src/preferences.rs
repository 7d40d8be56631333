//! Caller-stated scheduling preferences.

use serde::{Deserialize, Serialize};

use crate::error::{Result, SchedulingError};

/// Longest break the adjacency probe will look for around a slot.
pub const MAX_BREAK_MINUTES: u32 = 240;

/// Preferences that shape which slots are enumerated and how they are scored.
///
/// Every field is optional on the wire and falls back to [`Default`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulingPreferences {
    pub prefer_morning: bool,
    pub prefer_afternoon: bool,
    /// Reward slots with at least `min_break_minutes` of free time on both sides.
    pub avoid_back_to_back: bool,
    /// Only enumerate slots inside `[earliest_hour, latest_hour]`.
    pub working_hours_only: bool,
    pub min_break_minutes: u32,
    pub earliest_hour: u32,
    pub latest_hour: u32,
}

impl Default for SchedulingPreferences {
    fn default() -> Self {
        Self {
            prefer_morning: false,
            prefer_afternoon: false,
            avoid_back_to_back: true,
            working_hours_only: true,
            min_break_minutes: 15,
            earliest_hour: 9,
            latest_hour: 17,
        }
    }
}

impl SchedulingPreferences {
    /// Check the working-hours window and break length.
    ///
    /// # Errors
    /// Returns `SchedulingError::InvalidWorkingHours` unless
    /// `earliest_hour < latest_hour <= 23`, and `SchedulingError::InvalidBreak`
    /// if `min_break_minutes` exceeds [`MAX_BREAK_MINUTES`].
    pub fn validate(&self) -> Result<()> {
        if self.earliest_hour >= self.latest_hour || self.latest_hour > 23 {
            return Err(SchedulingError::InvalidWorkingHours {
                earliest: self.earliest_hour,
                latest: self.latest_hour,
            });
        }
        if self.min_break_minutes > MAX_BREAK_MINUTES {
            return Err(SchedulingError::InvalidBreak(self.min_break_minutes));
        }
        Ok(())
    }
}
