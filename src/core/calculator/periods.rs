//! Expansion of a weekly local schedule into absolute UTC business periods.

use crate::models::business_hours::OpeningHours;
use crate::models::period::BusinessPeriod;
use crate::utils::time::localize;
use chrono::{DateTime, Datelike, Duration, Utc};
use chrono_tz::Tz;

/// Business periods of one store inside `[query_start, query_end]`.
///
/// The cursor walks the range in steps of 24 UTC hours; each step looks at
/// the local calendar date and weekday of the cursor and materializes every
/// schedule entry of that weekday on that date. Intervals touching the range
/// are clipped to it. A full-day store yields the whole range at once.
pub fn business_periods(
    query_start: DateTime<Utc>,
    query_end: DateTime<Utc>,
    tz: &Tz,
    hours: OpeningHours<'_>,
) -> Vec<BusinessPeriod> {
    let mut periods = Vec::new();
    let mut cursor = query_start;

    while cursor <= query_end {
        let local = cursor.with_timezone(tz);

        let entries = match hours {
            OpeningHours::FullDay => {
                periods.push(BusinessPeriod::new(cursor, query_end));
                break;
            }
            OpeningHours::Weekly(entries) => entries,
        };

        let weekday = local.weekday();
        let date = local.date_naive();

        for h in entries.iter().filter(|h| h.weekday == weekday) {
            if h.end < h.start {
                tracing::warn!(
                    store_id = %h.store_id,
                    start = %h.start,
                    end = %h.end,
                    "schedule entry crosses midnight, skipped"
                );
                continue;
            }

            let start_utc = localize(tz, date.and_time(h.start));
            let end_utc = localize(tz, date.and_time(h.end));

            // a start inside a DST gap moves past the gap and can overtake the end
            if end_utc < start_utc {
                tracing::warn!(
                    store_id = %h.store_id,
                    start = %h.start,
                    end = %h.end,
                    date = %date,
                    "schedule entry collapses in a DST gap, skipped"
                );
                continue;
            }

            if end_utc >= query_start && start_utc <= query_end {
                periods.push(BusinessPeriod::new(
                    start_utc.max(query_start),
                    end_utc.min(query_end),
                ));
            }
        }

        cursor += Duration::days(1);
    }

    periods
}
