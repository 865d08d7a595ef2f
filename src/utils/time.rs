//! Time utilities: wall-clock parsing, timestamp parsing, timezone
//! localization and presentation rounding.

use crate::errors::{AppError, AppResult};
use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, NaiveTime, Offset, TimeZone, Utc};
use chrono_tz::Tz;

/// Parse a local wall-clock time (`HH:MM:SS`, `HH:MM:SS.f` or `HH:MM`).
pub fn parse_wall_clock(t: &str) -> AppResult<NaiveTime> {
    let t = t.trim();
    NaiveTime::parse_from_str(t, "%H:%M:%S%.f")
        .or_else(|_| NaiveTime::parse_from_str(t, "%H:%M"))
        .map_err(|_| AppError::InvalidTime(t.to_string()))
}

/// Parse a UTC timestamp as found in status feeds:
/// `2023-01-22 12:09:39.388884 UTC`, the same without suffix, or RFC 3339.
pub fn parse_timestamp(s: &str) -> AppResult<DateTime<Utc>> {
    let raw = s.trim();
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Ok(dt.with_timezone(&Utc));
    }

    let naive = raw.strip_suffix("UTC").unwrap_or(raw).trim();
    NaiveDateTime::parse_from_str(naive, "%Y-%m-%d %H:%M:%S%.f")
        .map(|n| n.and_utc())
        .map_err(|_| AppError::InvalidTimestamp(s.to_string()))
}

/// Storage form of a timestamp; sorts lexicographically.
pub fn format_timestamp(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S%.6f UTC").to_string()
}

pub fn format_display(t: &DateTime<Utc>) -> String {
    t.format("%Y-%m-%d %H:%M:%S UTC").to_string()
}

pub fn parse_timezone(name: &str) -> AppResult<Tz> {
    name.trim()
        .parse::<Tz>()
        .map_err(|_| AppError::InvalidTimezone(name.to_string()))
}

/// Resolve a local wall-clock instant in `tz` to UTC.
///
/// Ambiguous local times (backward transition) resolve to the earlier
/// instant. Local times skipped by a forward transition keep the offset in
/// force before the gap, so they land just after it.
pub fn localize(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    match tz.from_local_datetime(&local) {
        LocalResult::Single(dt) => dt.with_timezone(&Utc),
        LocalResult::Ambiguous(earliest, _) => earliest.with_timezone(&Utc),
        LocalResult::None => {
            // transitions are never a day apart
            let before = tz
                .offset_from_utc_datetime(&(local - Duration::days(1)))
                .fix();
            (local - Duration::seconds(before.local_minus_utc() as i64)).and_utc()
        }
    }
}

/// Round for presentation only.
pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

/// Fractional seconds of a duration, keeping sub-second precision.
pub fn duration_secs(d: Duration) -> f64 {
    match d.num_nanoseconds() {
        Some(ns) => ns as f64 / 1_000_000_000.0,
        None => d.num_milliseconds() as f64 / 1_000.0,
    }
}
