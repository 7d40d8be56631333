//! Tests for candidate slot enumeration.

use chrono::{DateTime, Duration, TimeZone, Timelike, Utc};
use chrono_tz::Tz;
use meeting_scheduler::enumerator::SlotEnumerator;

// ── Helpers ─────────────────────────────────────────────────────────────────

fn utc(day: u32, hour: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, day, hour, min, 0).unwrap()
}

fn slots(
    start: DateTime<Utc>,
    end: DateTime<Utc>,
    duration_minutes: i64,
    tz: Tz,
    working_hours: Option<(u32, u32)>,
) -> Vec<(DateTime<Utc>, DateTime<Utc>)> {
    SlotEnumerator::new(
        start,
        end,
        Duration::minutes(duration_minutes),
        Duration::minutes(15),
        tz,
        working_hours,
    )
    .collect()
}

// ── Working hours ───────────────────────────────────────────────────────────

#[test]
fn starts_at_earliest_hour_when_range_begins_before_it() {
    let result = slots(utc(16, 8, 0), utc(16, 17, 0), 60, Tz::UTC, Some((9, 17)));

    assert_eq!(result[0], (utc(16, 9, 0), utc(16, 10, 0)));
}

#[test]
fn steps_one_tick_at_a_time_and_stops_at_range_end() {
    let result = slots(utc(16, 8, 0), utc(16, 17, 0), 60, Tz::UTC, Some((9, 17)));

    // 09:00, 09:15, ..., 16:00
    assert_eq!(result.len(), 29);
    assert_eq!(result.last().unwrap().0, utc(16, 16, 0));
    for pair in result.windows(2) {
        assert_eq!(pair[1].0 - pair[0].0, Duration::minutes(15));
    }
}

#[test]
fn every_slot_has_the_requested_duration() {
    let result = slots(utc(16, 9, 0), utc(16, 17, 0), 45, Tz::UTC, Some((9, 17)));

    assert!(!result.is_empty());
    for (start, end) in &result {
        assert_eq!(*end - *start, Duration::minutes(45));
    }
}

#[test]
fn skips_nights_across_a_multi_day_range() {
    let result = slots(utc(16, 9, 0), utc(18, 9, 0), 60, Tz::UTC, Some((9, 17)));

    // 09:00..16:45 on each of two days
    assert_eq!(result.len(), 64);
    assert_eq!(result[31].0, utc(16, 16, 45));
    assert_eq!(result[32].0, utc(17, 9, 0));
    for (start, end) in &result {
        assert!(start.hour() >= 9);
        assert!(end.hour() <= 17);
    }
}

#[test]
fn slot_ending_past_latest_hour_jumps_to_next_morning() {
    let result = slots(utc(16, 9, 0), utc(17, 0, 0), 120, Tz::UTC, Some((9, 17)));

    // 15:45 + 2h = 17:45 is still in the 17:00 hour; 16:00 + 2h is not.
    assert_eq!(result.len(), 28);
    assert_eq!(result.last().unwrap(), &(utc(16, 15, 45), utc(16, 17, 45)));
}

#[test]
fn unaligned_range_start_keeps_its_offset() {
    let result = slots(utc(16, 10, 7), utc(16, 12, 0), 60, Tz::UTC, Some((9, 17)));

    let starts: Vec<_> = result.iter().map(|(s, _)| *s).collect();
    assert_eq!(
        starts,
        vec![utc(16, 10, 7), utc(16, 10, 22), utc(16, 10, 37), utc(16, 10, 52)]
    );
}

#[test]
fn range_shorter_than_duration_yields_nothing() {
    assert!(slots(utc(16, 9, 0), utc(16, 9, 30), 60, Tz::UTC, Some((9, 17))).is_empty());
}

#[test]
fn range_entirely_outside_working_hours_yields_nothing() {
    assert!(slots(utc(16, 18, 0), utc(16, 23, 0), 30, Tz::UTC, Some((9, 17))).is_empty());
}

// ── Without working hours ───────────────────────────────────────────────────

#[test]
fn without_working_hours_slots_cross_midnight() {
    let result = slots(utc(16, 22, 0), utc(17, 2, 0), 60, Tz::UTC, None);

    // 22:00, 22:15, ..., 01:00
    assert_eq!(result.len(), 13);
    assert_eq!(result[0].0, utc(16, 22, 0));
    assert_eq!(result.last().unwrap().1, utc(17, 2, 0));
}

// ── Timezones ───────────────────────────────────────────────────────────────

#[test]
fn working_hours_follow_the_request_timezone() {
    let tz: Tz = "America/New_York".parse().unwrap();
    // 08:00-18:00 EDT
    let result = slots(utc(16, 12, 0), utc(16, 22, 0), 60, tz, Some((9, 17)));

    assert_eq!(result[0].0, utc(16, 13, 0), "09:00 EDT is 13:00 UTC");
    assert_eq!(result.last().unwrap().0, utc(16, 20, 45), "16:45 EDT");
}

#[test]
fn earliest_hour_inside_dst_gap_resolves_after_the_gap() {
    let tz: Tz = "America/New_York".parse().unwrap();
    // 2026-03-08: clocks jump from 02:00 EST to 03:00 EDT.
    let result = slots(utc(8, 5, 0), utc(8, 12, 0), 15, tz, Some((2, 5)));

    assert_eq!(result[0].0, utc(8, 7, 0), "03:00 EDT is 07:00 UTC");
}
