use super::status::StoreStatus;
use chrono::{DateTime, Utc};
use serde::Serialize;

/// One point-in-time status observation for a store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StatusSample {
    pub store_id: String,
    pub timestamp: DateTime<Utc>,
    pub status: StoreStatus,
}

impl StatusSample {
    pub fn new(store_id: impl Into<String>, timestamp: DateTime<Utc>, status: StoreStatus) -> Self {
        Self {
            store_id: store_id.into(),
            timestamp,
            status,
        }
    }

    pub fn is_active(&self) -> bool {
        self.status.is_active()
    }
}
