//! End-to-end meeting-time search.
//!
//! Pipeline: validate request → fetch raw free/busy from the provider →
//! decode and index one map per attendee → enumerate slots → filter →
//! score → rank. Only the provider call can fail after validation; finding
//! no slot at all is a successful, empty result.

use std::collections::HashMap;

use chrono::Duration;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::availability::AvailabilityIndex;
use crate::candidate::{MeetingSuggestion, TimeSlotCandidate};
use crate::enumerator::SlotEnumerator;
use crate::error::{Result, SchedulingError};
use crate::filter::ConstraintFilter;
use crate::freebusy::decode_free_busy;
use crate::local;
use crate::preferences::SchedulingPreferences;
use crate::provider::{AvailabilityProvider, TimeRange};
use crate::ranker::rank;
use crate::request::{SchedulingRequest, SearchStrategy, ValidatedRequest};
use crate::scorer::Scorer;

/// Ranked candidates plus how many slots passed the filter.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchOutcome {
    pub candidates: Vec<TimeSlotCandidate>,
    /// Slots accepted by the filter before ranking truncated the list.
    pub considered: usize,
}

/// Result envelope of [`find_meeting_times`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeetingSuggestions {
    pub suggestions: Vec<MeetingSuggestion>,
    pub suggestion_count: usize,
    pub attendee_count: usize,
    pub duration_minutes: i64,
    pub date_range_start: String,
    pub date_range_end: String,
    pub timezone: String,
    pub candidates_considered: usize,
    pub preferences: SchedulingPreferences,
}

/// Validate `request`, fetch availability from `provider`, and return the
/// best meeting slots.
///
/// # Errors
/// Returns a validation variant of `SchedulingError` before touching the
/// provider if the request is malformed, and
/// `SchedulingError::AvailabilityUnavailable` if the provider fails.
pub fn find_meeting_times<P>(provider: &P, request: &SchedulingRequest) -> Result<MeetingSuggestions>
where
    P: AvailabilityProvider + ?Sized,
{
    let validated = request.validate()?;

    let raw = provider
        .get_free_busy(&validated.attendees, &validated.range, validated.granularity)
        .map_err(|e| {
            warn!(error = %e, attendees = validated.attendees.len(), "availability provider failed");
            SchedulingError::from(e)
        })?;

    let indices = build_indices(&validated.attendees, raw, &validated.range, validated.granularity);
    Ok(schedule(&validated, &indices))
}

/// Run the search over already-decoded availability and wrap the result.
pub fn schedule(request: &ValidatedRequest, indices: &[AvailabilityIndex]) -> MeetingSuggestions {
    let outcome = search(request, indices);
    let tz = request.timezone;

    info!(
        attendees = indices.len(),
        considered = outcome.considered,
        returned = outcome.candidates.len(),
        "meeting time search complete"
    );

    let suggestions: Vec<MeetingSuggestion> = outcome
        .candidates
        .iter()
        .map(|c| MeetingSuggestion::from_candidate(c, tz))
        .collect();

    MeetingSuggestions {
        suggestion_count: suggestions.len(),
        suggestions,
        attendee_count: indices.len(),
        duration_minutes: request.duration.num_minutes(),
        date_range_start: local::format_local(tz, request.range.start),
        date_range_end: local::format_local(tz, request.range.end),
        timezone: tz.name().to_string(),
        candidates_considered: outcome.considered,
        preferences: request.preferences,
    }
}

/// Enumerate, filter, score and rank slots for `request`.
///
/// Under [`SearchStrategy::FirstFit`] enumeration stops once
/// `max_suggestions` slots have been accepted. Under
/// [`SearchStrategy::Exhaustive`] the whole range is walked, holding at most
/// `2 * max_suggestions` candidates at a time.
pub fn search(request: &ValidatedRequest, indices: &[AvailabilityIndex]) -> SearchOutcome {
    let filter = ConstraintFilter::new(request.range.end, indices);
    let scorer = Scorer::new(&request.preferences, request.timezone, indices);
    let limit = match request.strategy {
        SearchStrategy::FirstFit => Some(request.max_suggestions),
        SearchStrategy::Exhaustive => None,
    };

    let mut accepted = Vec::new();
    let mut considered = 0usize;
    let mut enumerated = 0usize;
    for (start, end) in SlotEnumerator::for_request(request) {
        enumerated += 1;
        if !filter.accepts(start, end) {
            continue;
        }
        let score = scorer.score(start, end);
        accepted.push(TimeSlotCandidate::new(
            start,
            end,
            request.timezone,
            score,
            indices.len(),
        ));
        considered += 1;
        match limit {
            Some(l) if accepted.len() >= l => break,
            // Ranking is a total order: the running top `max_suggestions`
            // always contains the final result.
            None if accepted.len() >= request.max_suggestions * 2 => {
                accepted = rank(accepted, request.max_suggestions);
            }
            _ => {}
        }
    }

    debug!(enumerated, accepted = considered, "slot enumeration finished");

    SearchOutcome {
        candidates: rank(accepted, request.max_suggestions),
        considered,
    }
}

/// Decode the provider's strings into one index per attendee, in attendee order.
///
/// Missing attendees and short strings are logged and padded with NoData.
pub fn build_indices(
    attendees: &[String],
    mut raw: HashMap<String, String>,
    window: &TimeRange,
    granularity: Duration,
) -> Vec<AvailabilityIndex> {
    attendees
        .iter()
        .map(|attendee| {
            let map = match raw.remove(attendee) {
                Some(codes) => {
                    let map = decode_free_busy(attendee, &codes, window.start, granularity);
                    let expected = map.expected_len(window.end);
                    if map.statuses.len() < expected {
                        warn!(
                            attendee = %attendee,
                            decoded = map.statuses.len(),
                            expected,
                            "free/busy string shorter than window, treating the rest as no data"
                        );
                    }
                    map
                }
                None => {
                    warn!(attendee = %attendee, "no free/busy data returned, treating as no data");
                    decode_free_busy(attendee, "", window.start, granularity)
                }
            };
            AvailabilityIndex::new(map)
        })
        .collect()
}
