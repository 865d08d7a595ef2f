use chrono::{DateTime, Duration, Utc};
use serde::Serialize;

/// Contiguous span during which a store is nominally open, already clipped
/// to the query range. `start <= end` always holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BusinessPeriod {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl BusinessPeriod {
    pub fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Inclusive on both ends.
    pub fn contains(&self, t: DateTime<Utc>) -> bool {
        self.start <= t && t <= self.end
    }
}

pub fn total_duration(periods: &[BusinessPeriod]) -> Duration {
    periods
        .iter()
        .fold(Duration::zero(), |acc, p| acc + p.duration())
}
