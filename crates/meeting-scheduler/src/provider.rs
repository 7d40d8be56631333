//! The seam to the groupware backend that supplies raw free/busy strings.
//!
//! Fetching availability is the only I/O in a scheduling request and lives
//! entirely behind [`AvailabilityProvider`]. Retries, timeouts and
//! cancellation belong to implementations of this trait, not to the engine.

use std::collections::HashMap;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure reported by an [`AvailabilityProvider`].
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ProviderError {
    #[error("provider unavailable: {0}")]
    Unavailable(String),

    #[error("provider timed out")]
    Timeout,
}

/// A half-open `[start, end)` time range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeRange {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeRange {
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Supplies one raw free/busy code string per attendee for a window.
///
/// Each string starts at `window.start` and holds one character per
/// `granularity` interval. Attendees missing from the returned map are
/// treated as having no data.
pub trait AvailabilityProvider {
    fn get_free_busy(
        &self,
        attendees: &[String],
        window: &TimeRange,
        granularity: Duration,
    ) -> std::result::Result<HashMap<String, String>, ProviderError>;
}

/// In-memory provider backed by a fixed attendee → code string table.
///
/// Used by the CLI (loaded from a JSON file) and by tests.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StaticAvailability {
    entries: HashMap<String, String>,
}

impl StaticAvailability {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, attendee: impl Into<String>, raw: impl Into<String>) -> Self {
        self.entries.insert(attendee.into(), raw.into());
        self
    }

    pub fn insert(&mut self, attendee: impl Into<String>, raw: impl Into<String>) {
        self.entries.insert(attendee.into(), raw.into());
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl From<HashMap<String, String>> for StaticAvailability {
    fn from(entries: HashMap<String, String>) -> Self {
        Self { entries }
    }
}

impl AvailabilityProvider for StaticAvailability {
    fn get_free_busy(
        &self,
        attendees: &[String],
        _window: &TimeRange,
        _granularity: Duration,
    ) -> std::result::Result<HashMap<String, String>, ProviderError> {
        Ok(attendees
            .iter()
            .filter_map(|a| self.entries.get(a).map(|raw| (a.clone(), raw.clone())))
            .collect())
    }
}
