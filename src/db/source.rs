//! Read interface of the external store the engine reports on.

use crate::errors::AppResult;
use crate::models::business_hours::BusinessHours;
use crate::models::sample::StatusSample;
use chrono::{DateTime, Utc};

/// Inclusive UTC range `[start, end]`.
pub type TimeRange = (DateTime<Utc>, DateTime<Utc>);

/// Everything the aggregation engine reads. Implementations must return a
/// consistent view per call even while ingestion appends new samples.
pub trait StoreSource: Send + Sync {
    /// Stores that reported at least one status sample.
    fn list_store_ids(&self) -> AppResult<Vec<String>>;

    /// Samples of one store, ascending by timestamp, optionally limited to `range`.
    fn status_samples(&self, store_id: &str, range: Option<TimeRange>) -> AppResult<Vec<StatusSample>>;

    /// Weekly schedule; empty means open around the clock.
    fn business_hours(&self, store_id: &str) -> AppResult<Vec<BusinessHours>>;

    /// IANA zone name, when known.
    fn timezone(&self, store_id: &str) -> AppResult<Option<String>>;

    /// Most recent observation across all stores.
    fn latest_timestamp(&self) -> AppResult<Option<DateTime<Utc>>>;
}

pub(crate) fn in_range(t: &DateTime<Utc>, range: &Option<TimeRange>) -> bool {
    match range {
        Some((start, end)) => start <= t && t <= end,
        None => true,
    }
}
