//! # meeting-scheduler
//!
//! Deterministic multi-attendee meeting slot search for AI calendar agents.
//!
//! Given one free/busy code string per attendee, the engine enumerates
//! candidate slots over a date range, keeps the ones every attendee can make,
//! scores them against the caller's preferences, and returns a ranked
//! shortlist. Fetching the free/busy strings is delegated to an
//! [`AvailabilityProvider`]; everything else is pure, synchronous and
//! allocation-bounded by the size of the range.
//!
//! ## Quick start
//!
//! ```rust
//! use meeting_scheduler::{find_meeting_times, SchedulingRequest, StaticAvailability};
//!
//! // 09:00-17:00 at 15-minute resolution, busy 12:00-13:00.
//! let codes = format!("{}{}{}", "0".repeat(12), "2".repeat(4), "0".repeat(16));
//! let provider = StaticAvailability::new().with("alice@example.com", codes);
//!
//! let request = SchedulingRequest::new(
//!     vec!["alice@example.com".to_string()],
//!     60,
//!     "2026-03-16T09:00:00Z",
//!     "2026-03-16T17:00:00Z",
//! );
//!
//! let result = find_meeting_times(&provider, &request).unwrap();
//! assert_eq!(result.suggestions[0].start_time, "2026-03-16T09:00:00+00:00");
//! assert_eq!(result.suggestions[0].score, 110);
//! ```
//!
//! ## Modules
//!
//! - [`freebusy`] — raw status-code string → typed [`FreeBusyMap`]
//! - [`availability`] — constant-time "all free in `[start, end)`?" per attendee
//! - [`enumerator`] — working-hours-aware walk over the range at tick granularity
//! - [`filter`] — all-attendee availability and bounds check per slot
//! - [`scorer`] — preference-based heuristic score
//! - [`ranker`] — deterministic ordering and truncation
//! - [`scheduler`] — the end-to-end pipeline
//! - [`report`] — per-attendee availability summary over a window
//! - [`provider`] — the [`AvailabilityProvider`] seam
//! - [`request`] / [`preferences`] — request shape and validation
//! - [`error`] — Error types

pub mod availability;
pub mod candidate;
pub mod enumerator;
pub mod error;
pub mod filter;
pub mod freebusy;
pub mod local;
pub mod preferences;
pub mod provider;
pub mod ranker;
pub mod report;
pub mod request;
pub mod scheduler;
pub mod scorer;

pub use availability::AvailabilityIndex;
pub use candidate::{MeetingSuggestion, TimeOfDay, TimeSlotCandidate};
pub use enumerator::SlotEnumerator;
pub use error::SchedulingError;
pub use filter::ConstraintFilter;
pub use freebusy::{decode_free_busy, FreeBusyMap, FreeBusyStatus};
pub use preferences::SchedulingPreferences;
pub use provider::{AvailabilityProvider, ProviderError, StaticAvailability, TimeRange};
pub use ranker::rank;
pub use report::{check_availability, AttendeeAvailability, AvailabilityQuery, StatusBlock};
pub use request::{SchedulingRequest, SearchStrategy, ValidatedRequest};
pub use scheduler::{find_meeting_times, schedule, search, MeetingSuggestions, SearchOutcome};
pub use scorer::Scorer;
