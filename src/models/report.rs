use super::metrics::{MetricsRow, StoreDetailRow};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::path::PathBuf;

pub type ReportId = String;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportKind {
    AllStores,
    SingleStore(String),
}

/// Lifecycle of a report job: `Running` → `Complete` | `Failed`, once.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "lowercase")]
pub enum ReportState {
    Running,
    Complete,
    Failed(String),
}

impl ReportState {
    pub fn is_terminal(&self) -> bool {
        !matches!(self, ReportState::Running)
    }

    pub fn label(&self) -> &str {
        match self {
            ReportState::Running => "Running",
            ReportState::Complete => "Complete",
            ReportState::Failed(_) => "Failed",
        }
    }
}

/// A store left out of a report, with the reason.
/// `configuration` is set when the store's own timezone or schedule is
/// unusable, and cleared for data or read failures scoped to the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedStore {
    pub store_id: String,
    pub reason: String,
    pub configuration: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum ReportRows {
    Stores(Vec<MetricsRow>),
    Detail(StoreDetailRow),
}

impl ReportRows {
    pub fn len(&self) -> usize {
        match self {
            ReportRows::Stores(rows) => rows.len(),
            ReportRows::Detail(_) => 1,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Materialized result of a completed report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportOutput {
    pub path: PathBuf,
    pub rows: ReportRows,
    pub skipped: Vec<SkippedStore>,
}

/// What `poll` hands back.
#[derive(Debug, Clone, PartialEq)]
pub enum ReportPoll {
    Running,
    Failed(String),
    Complete(ReportOutput),
}

/// Snapshot entry returned by `list`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ReportJobInfo {
    pub report_id: ReportId,
    pub kind: ReportKind,
    pub state: ReportState,
    pub created_at: DateTime<Utc>,
    pub completed_at: Option<DateTime<Utc>>,
}
