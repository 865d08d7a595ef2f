//! In-process store, used by tests and by embedders that already hold the data.

use crate::db::source::{StoreSource, TimeRange, in_range};
use crate::errors::AppResult;
use crate::models::business_hours::BusinessHours;
use crate::models::sample::StatusSample;
use crate::models::status::StoreStatus;
use chrono::{DateTime, Utc};
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap};

#[derive(Default)]
struct MemoryData {
    samples: BTreeMap<String, Vec<StatusSample>>,
    hours: HashMap<String, Vec<BusinessHours>>,
    timezones: HashMap<String, String>,
}

#[derive(Default)]
pub struct MemoryStore {
    data: RwLock<MemoryData>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_sample(&self, store_id: &str, timestamp: DateTime<Utc>, status: StoreStatus) {
        self.data
            .write()
            .samples
            .entry(store_id.to_string())
            .or_default()
            .push(StatusSample::new(store_id, timestamp, status));
    }

    pub fn add_business_hours(&self, entry: BusinessHours) {
        self.data
            .write()
            .hours
            .entry(entry.store_id.clone())
            .or_default()
            .push(entry);
    }

    pub fn set_timezone(&self, store_id: &str, zone: &str) {
        self.data
            .write()
            .timezones
            .insert(store_id.to_string(), zone.to_string());
    }
}

impl StoreSource for MemoryStore {
    fn list_store_ids(&self) -> AppResult<Vec<String>> {
        Ok(self.data.read().samples.keys().cloned().collect())
    }

    fn status_samples(&self, store_id: &str, range: Option<TimeRange>) -> AppResult<Vec<StatusSample>> {
        let data = self.data.read();
        let mut out: Vec<StatusSample> = data
            .samples
            .get(store_id)
            .map(|v| {
                v.iter()
                    .filter(|s| in_range(&s.timestamp, &range))
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        out.sort_by_key(|s| s.timestamp);
        Ok(out)
    }

    fn business_hours(&self, store_id: &str) -> AppResult<Vec<BusinessHours>> {
        Ok(self.data.read().hours.get(store_id).cloned().unwrap_or_default())
    }

    fn timezone(&self, store_id: &str) -> AppResult<Option<String>> {
        Ok(self.data.read().timezones.get(store_id).cloned())
    }

    fn latest_timestamp(&self) -> AppResult<Option<DateTime<Utc>>> {
        Ok(self
            .data
            .read()
            .samples
            .values()
            .flatten()
            .map(|s| s.timestamp)
            .max())
    }
}
