//! Report service: binds the job registry to a store and an output location.

use crate::core::jobs::ReportJobs;
use crate::core::report::ReportLogic;
use crate::db::source::StoreSource;
use crate::errors::AppResult;
use crate::export::{ExportFormat, ExportLogic};
use crate::models::report::{
    ReportId, ReportJobInfo, ReportKind, ReportOutput, ReportPoll, ReportRows,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::runtime::Handle;

/// Where and how report artifacts are produced.
#[derive(Debug, Clone)]
pub struct ReportSettings {
    pub output_dir: PathBuf,
    pub format: ExportFormat,
    pub default_timezone: String,
}

#[derive(Clone)]
pub struct ReportService {
    source: Arc<dyn StoreSource>,
    jobs: ReportJobs,
    settings: ReportSettings,
}

impl ReportService {
    pub fn new(source: Arc<dyn StoreSource>, runtime: Handle, settings: ReportSettings) -> Self {
        Self {
            source,
            jobs: ReportJobs::new(runtime),
            settings,
        }
    }

    /// Start the all-stores report.
    pub fn trigger_report(&self) -> ReportId {
        let source = Arc::clone(&self.source);
        let settings = self.settings.clone();

        self.jobs.trigger(ReportKind::AllStores, move |report_id| {
            let (rows, skipped) = ReportLogic::store_report(source.as_ref(), &settings.default_timezone)?;
            let rows = ReportRows::Stores(rows);
            let path = ExportLogic::write_report(&settings.output_dir, report_id, settings.format, &rows)?;
            Ok(ReportOutput {
                path,
                rows,
                skipped,
            })
        })
    }

    /// Start the detail report of one store.
    pub fn trigger_single_store_report(&self, store_id: &str) -> ReportId {
        let source = Arc::clone(&self.source);
        let settings = self.settings.clone();
        let store = store_id.to_string();

        self.jobs
            .trigger(ReportKind::SingleStore(store.clone()), move |report_id| {
                let row = ReportLogic::single_store_report(source.as_ref(), &store, &settings.default_timezone)?;
                let rows = ReportRows::Detail(row);
                let path = ExportLogic::write_report(&settings.output_dir, report_id, settings.format, &rows)?;
                Ok(ReportOutput {
                    path,
                    rows,
                    skipped: Vec::new(),
                })
            })
    }

    pub fn poll(&self, report_id: &str) -> AppResult<ReportPoll> {
        self.jobs.poll(report_id)
    }

    pub fn list(&self) -> Vec<ReportJobInfo> {
        self.jobs.list()
    }

    pub async fn wait(&self, report_id: &str) -> AppResult<ReportPoll> {
        self.jobs.wait(report_id).await
    }
}
