//! Wall-clock helpers for evaluating working hours in a caller timezone.

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, TimeZone, Timelike, Utc};
use chrono_tz::Tz;

// Longest DST gap we will walk across when resolving a local time.
const MAX_GAP_MINUTES: i64 = 180;

/// Resolve a wall-clock time in `tz` to an instant.
///
/// Ambiguous times (DST fall-back) take the earlier instant. Times inside a
/// DST gap resolve to the first valid minute after the gap.
pub fn resolve_local(tz: Tz, naive: NaiveDateTime) -> DateTime<Utc> {
    for minute in 0..=MAX_GAP_MINUTES {
        let candidate = naive + Duration::minutes(minute);
        if let Some(dt) = tz.from_local_datetime(&candidate).earliest() {
            return dt.with_timezone(&Utc);
        }
    }
    naive.and_utc()
}

/// `date` at `hour:00` local time.
pub fn at_hour(tz: Tz, date: NaiveDate, hour: u32) -> DateTime<Utc> {
    let naive = date
        .and_hms_opt(hour, 0, 0)
        .unwrap_or_else(|| date.and_time(chrono::NaiveTime::MIN));
    resolve_local(tz, naive)
}

pub fn local_hour(tz: Tz, at: DateTime<Utc>) -> u32 {
    at.with_timezone(&tz).hour()
}

pub fn local_date(tz: Tz, at: DateTime<Utc>) -> NaiveDate {
    at.with_timezone(&tz).date_naive()
}

/// RFC 3339 rendering of `at` with the UTC offset `tz` has at that instant.
pub fn format_local(tz: Tz, at: DateTime<Utc>) -> String {
    at.with_timezone(&tz)
        .fixed_offset()
        .to_rfc3339_opts(chrono::SecondsFormat::Secs, false)
}
