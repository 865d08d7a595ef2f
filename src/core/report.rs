//! Report assembly: turns aggregated metrics into presentation rows.

use crate::core::calculator::windows::{DETAIL_REPORT_WINDOWS, STORE_REPORT_WINDOWS};
use crate::core::logic::Core;
use crate::db::source::StoreSource;
use crate::errors::{AppError, AppResult};
use crate::models::metrics::{MetricsRow, StoreDetailRow, StoreSummary};
use crate::models::report::SkippedStore;
use crate::utils::time::format_display;

pub struct ReportLogic;

impl ReportLogic {
    /// All-stores report: hour (minutes), day and week (hours).
    pub fn store_report(
        source: &dyn StoreSource,
        default_tz: &str,
    ) -> AppResult<(Vec<MetricsRow>, Vec<SkippedStore>)> {
        let now = Core::processing_now(source)?;
        tracing::info!(now = %now, "generating store report");

        let (metrics, skipped) = Core::all_store_metrics(source, now, &STORE_REPORT_WINDOWS, default_tz)?;
        let rows = metrics.iter().map(MetricsRow::from_metrics).collect();

        Ok((rows, skipped))
    }

    /// Detail report for one store: day, week and month in hours.
    pub fn single_store_report(
        source: &dyn StoreSource,
        store_id: &str,
        default_tz: &str,
    ) -> AppResult<StoreDetailRow> {
        if source.status_samples(store_id, None)?.is_empty() {
            return Err(AppError::StoreNotFound(store_id.to_string()));
        }

        let now = Core::processing_now(source)?;
        let metrics = Core::store_metrics(source, store_id, now, &DETAIL_REPORT_WINDOWS, default_tz)?;

        for w in &metrics.windows {
            tracing::info!(
                store_id,
                window = w.window.label(),
                samples = w.samples,
                periods = w.periods,
                up = w.uptime_in_unit(),
                down = w.downtime_in_unit(),
                unit = w.window.unit().suffix(),
                "window aggregated"
            );
        }

        let schedule = Core::describe_schedule(&source.business_hours(store_id)?);

        Ok(StoreDetailRow::from_metrics(&metrics, format_display(&now), schedule))
    }

    /// Data availability overview; no aggregation involved.
    pub fn store_summary(
        source: &dyn StoreSource,
        store_id: &str,
        default_tz: &str,
    ) -> AppResult<StoreSummary> {
        let samples = source.status_samples(store_id, None)?;
        if samples.is_empty() {
            return Err(AppError::StoreNotFound(store_id.to_string()));
        }

        let hours = source.business_hours(store_id)?;

        Ok(StoreSummary {
            store_id: store_id.to_string(),
            total_status_records: samples.len(),
            data_available_from: samples.first().map(|s| format_display(&s.timestamp)),
            data_available_until: samples.last().map(|s| format_display(&s.timestamp)),
            timezone: Core::resolve_timezone(source, store_id, default_tz)?,
            has_business_hours: !hours.is_empty(),
            business_days_defined: hours.len(),
        })
    }
}
