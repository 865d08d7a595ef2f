use crate::core::calculator::windows::ReportWindow;
use crate::core::calculator::{business_periods, interpolate};
use crate::db::source::StoreSource;
use crate::errors::AppResult;
use crate::models::business_hours::{BusinessHours, OpeningHours};
use crate::models::metrics::{StoreMetrics, WindowMetrics};
use crate::models::report::SkippedStore;
use crate::models::sample::StatusSample;
use crate::utils::formatting::weekday_name;
use crate::utils::time::parse_timezone;
use chrono::{DateTime, Duration, Utc};
use chrono_tz::Tz;

/// Metrics aggregation over the store source.
pub struct Core;

impl Core {
    /// The processing clock: newest observation in the store, so that
    /// reports over historical data are reproducible. Falls back to the
    /// wall clock when nothing was ever observed.
    pub fn processing_now(source: &dyn StoreSource) -> AppResult<DateTime<Utc>> {
        match source.latest_timestamp()? {
            Some(t) => Ok(t),
            None => {
                tracing::warn!("no status samples at all, using wall clock as processing time");
                Ok(Utc::now())
            }
        }
    }

    /// Timezone name of a store, or the configured default.
    pub fn resolve_timezone(source: &dyn StoreSource, store_id: &str, default_tz: &str) -> AppResult<String> {
        Ok(source
            .timezone(store_id)?
            .unwrap_or_else(|| default_tz.to_string()))
    }

    /// Uptime of one window ending at `now`.
    pub fn window_metrics(
        samples: &[StatusSample],
        tz: &Tz,
        hours: OpeningHours<'_>,
        now: DateTime<Utc>,
        window: ReportWindow,
    ) -> WindowMetrics {
        let start = now - window.lookback();

        let in_window: Vec<StatusSample> = samples
            .iter()
            .filter(|s| start <= s.timestamp && s.timestamp <= now)
            .cloned()
            .collect();

        let periods = business_periods(start, now, tz, hours);
        let uptime = interpolate(&in_window, &periods);

        WindowMetrics {
            window,
            uptime,
            samples: in_window.len(),
            periods: periods.len(),
        }
    }

    /// Metrics of a single store for every window in `windows`.
    pub fn store_metrics(
        source: &dyn StoreSource,
        store_id: &str,
        now: DateTime<Utc>,
        windows: &[ReportWindow],
        default_tz: &str,
    ) -> AppResult<StoreMetrics> {
        let zone = Self::resolve_timezone(source, store_id, default_tz)?;
        let tz = parse_timezone(&zone)?;

        let entries = source.business_hours(store_id)?;
        let hours = OpeningHours::from_entries(&entries);

        let widest = windows
            .iter()
            .map(|w| w.lookback())
            .max()
            .unwrap_or_else(Duration::zero);
        let samples = source.status_samples(store_id, Some((now - widest, now)))?;

        let windows = windows
            .iter()
            .map(|&w| Self::window_metrics(&samples, &tz, hours, now, w))
            .collect();

        Ok(StoreMetrics {
            store_id: store_id.to_string(),
            timezone: zone,
            windows,
        })
    }

    /// Metrics of every store. A store that fails is left out and listed in
    /// the returned skip list; it never stops the others. Bad store
    /// configuration is expected and logged at `warn`, anything else at
    /// `error`.
    pub fn all_store_metrics(
        source: &dyn StoreSource,
        now: DateTime<Utc>,
        windows: &[ReportWindow],
        default_tz: &str,
    ) -> AppResult<(Vec<StoreMetrics>, Vec<SkippedStore>)> {
        let mut metrics = Vec::new();
        let mut skipped = Vec::new();

        for store_id in source.list_store_ids()? {
            match Self::store_metrics(source, &store_id, now, windows, default_tz) {
                Ok(m) => metrics.push(m),
                Err(e) => {
                    let configuration = e.is_configuration();
                    if configuration {
                        tracing::warn!(store_id = %store_id, error = %e, "store skipped, bad configuration");
                    } else {
                        tracing::error!(store_id = %store_id, error = %e, "store skipped, data unreadable");
                    }
                    skipped.push(SkippedStore {
                        store_id,
                        reason: e.to_string(),
                        configuration,
                    });
                }
            }
        }

        Ok((metrics, skipped))
    }

    /// Human-readable weekly schedule, Monday first, entries in start order.
    pub fn describe_schedule(entries: &[BusinessHours]) -> String {
        if entries.is_empty() {
            return "24/7 (No specific hours defined)".to_string();
        }

        let mut sorted: Vec<&BusinessHours> = entries.iter().collect();
        sorted.sort_by_key(|h| (h.day_index(), h.start, h.end));

        let mut days: Vec<(u32, Vec<String>)> = Vec::new();
        for h in sorted {
            let span = format!("{} - {}", h.start.format("%H:%M:%S"), h.end.format("%H:%M:%S"));
            if let Some((day, spans)) = days.last_mut()
                && *day == h.day_index()
            {
                spans.push(span);
                continue;
            }
            days.push((h.day_index(), vec![span]));
        }

        days.iter()
            .map(|(day, spans)| format!("{}: {}", weekday_name(*day), spans.join(", ")))
            .collect::<Vec<_>>()
            .join("; ")
    }
}
