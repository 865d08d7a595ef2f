//! Up/down inference from sparse status samples.

use crate::models::metrics::Uptime;
use crate::models::period::{BusinessPeriod, total_duration};
use crate::models::sample::StatusSample;
use chrono::Duration;
use std::borrow::Cow;

/// Split the business periods into up and down time.
///
/// Inside each period the state of a sample holds until the next sample
/// (last observation carried forward), and the last sample's state holds
/// until the period ends. The stretch before the first sample of a period,
/// and any period without samples, count as downtime. So
/// `up + down == total_duration(periods)` always.
pub fn interpolate(samples: &[StatusSample], periods: &[BusinessPeriod]) -> Uptime {
    if samples.is_empty() {
        return Uptime {
            up: Duration::zero(),
            down: total_duration(periods),
        };
    }

    let samples: Cow<'_, [StatusSample]> = if samples.is_sorted_by_key(|s| s.timestamp) {
        Cow::Borrowed(samples)
    } else {
        let mut sorted = samples.to_vec();
        sorted.sort_by_key(|s| s.timestamp);
        Cow::Owned(sorted)
    };

    let mut acc = Uptime::default();
    for period in periods {
        let within: Vec<&StatusSample> = samples
            .iter()
            .filter(|s| period.contains(s.timestamp))
            .collect();

        let (Some(first), Some(last)) = (within.first(), within.last()) else {
            acc.down += period.duration();
            continue;
        };

        acc.down += first.timestamp - period.start;

        for pair in within.windows(2) {
            let elapsed = pair[1].timestamp - pair[0].timestamp;
            credit(&mut acc, pair[0], elapsed);
        }

        credit(&mut acc, last, period.end - last.timestamp);
    }

    acc
}

fn credit(acc: &mut Uptime, sample: &StatusSample, elapsed: Duration) {
    if sample.is_active() {
        acc.up += elapsed;
    } else {
        acc.down += elapsed;
    }
}
