//! Order scored candidates and keep the best few.

use crate::candidate::TimeSlotCandidate;

/// Sort by score (highest first), breaking ties by earliest start, then
/// keep at most `max_suggestions` entries.
///
/// The sort is stable and fully determined by `(score, start)`, so equal
/// inputs always produce the same output order.
pub fn rank(mut candidates: Vec<TimeSlotCandidate>, max_suggestions: usize) -> Vec<TimeSlotCandidate> {
    candidates.sort_by(|a, b| b.score.cmp(&a.score).then_with(|| a.start.cmp(&b.start)));
    candidates.truncate(max_suggestions);
    candidates
}
