//! Asynchronous report jobs.
//!
//! Every triggered report gets an opaque id, is registered as `Running`
//! before any work starts, and runs on the tokio blocking pool. The worker
//! flips the job to `Complete` or `Failed` exactly once. Registries are
//! per-instance; two `ReportJobs` never see each other's jobs.

use crate::errors::{AppError, AppResult};
use crate::models::report::{
    ReportId, ReportJobInfo, ReportKind, ReportOutput, ReportPoll, ReportState,
};
use chrono::{DateTime, Utc};
use parking_lot::{Mutex, RwLock};
use std::collections::HashMap;
use std::panic::{self, AssertUnwindSafe};
use std::sync::Arc;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;
use uuid::Uuid;

#[derive(Debug, Clone)]
struct ReportJob {
    kind: ReportKind,
    state: ReportState,
    output: Option<ReportOutput>,
    created_at: DateTime<Utc>,
    completed_at: Option<DateTime<Utc>>,
}

impl ReportJob {
    fn running(kind: ReportKind) -> Self {
        Self {
            kind,
            state: ReportState::Running,
            output: None,
            created_at: Utc::now(),
            completed_at: None,
        }
    }
}

type Registry = Arc<RwLock<HashMap<ReportId, ReportJob>>>;

/// Job registry plus the task handles of its workers.
#[derive(Clone)]
pub struct ReportJobs {
    runtime: Handle,
    jobs: Registry,
    tasks: Arc<Mutex<HashMap<ReportId, JoinHandle<()>>>>,
}

impl ReportJobs {
    /// Workers are spawned on `runtime`'s blocking pool.
    pub fn new(runtime: Handle) -> Self {
        Self {
            runtime,
            jobs: Arc::new(RwLock::new(HashMap::new())),
            tasks: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn new_report_id(kind: &ReportKind) -> ReportId {
        let uuid = Uuid::new_v4().to_string();
        match kind {
            ReportKind::AllStores => uuid,
            ReportKind::SingleStore(store_id) => format!("single_store_{}_{}", store_id, &uuid[..8]),
        }
    }

    /// Register a new `Running` job and start `work` in the background.
    /// Returns immediately; `work` receives the report id.
    pub fn trigger<F>(&self, kind: ReportKind, work: F) -> ReportId
    where
        F: FnOnce(&str) -> AppResult<ReportOutput> + Send + 'static,
    {
        let report_id = Self::new_report_id(&kind);
        self.jobs
            .write()
            .insert(report_id.clone(), ReportJob::running(kind));
        tracing::info!(report_id = %report_id, "report triggered");

        let jobs = Arc::clone(&self.jobs);
        let id = report_id.clone();
        let handle = self.runtime.spawn_blocking(move || {
            let result = panic::catch_unwind(AssertUnwindSafe(|| work(&id)))
                .unwrap_or_else(|_| Err(AppError::Job("report worker panicked".to_string())));
            finish(&jobs, &id, result);
        });

        let mut tasks = self.tasks.lock();
        tasks.retain(|_, h| !h.is_finished());
        tasks.insert(report_id.clone(), handle);
        report_id
    }

    /// Current state of a job, or its output once complete.
    /// Once a job is terminal its task handle is released.
    pub fn poll(&self, report_id: &str) -> AppResult<ReportPoll> {
        let poll = {
            let jobs = self.jobs.read();
            let job = jobs
                .get(report_id)
                .ok_or_else(|| AppError::ReportNotFound(report_id.to_string()))?;

            match (&job.state, &job.output) {
                (ReportState::Running, _) => ReportPoll::Running,
                (ReportState::Failed(reason), _) => ReportPoll::Failed(reason.clone()),
                (ReportState::Complete, Some(output)) => ReportPoll::Complete(output.clone()),
                (ReportState::Complete, None) => ReportPoll::Failed("report output missing".to_string()),
            }
        };

        if poll != ReportPoll::Running {
            self.tasks.lock().remove(report_id);
        }
        Ok(poll)
    }

    /// Task handles still held, i.e. workers nobody has reaped yet.
    pub fn live_workers(&self) -> usize {
        self.tasks.lock().len()
    }

    /// Snapshot of every known job, oldest first.
    pub fn list(&self) -> Vec<ReportJobInfo> {
        self.tasks.lock().retain(|_, h| !h.is_finished());

        let mut out: Vec<ReportJobInfo> = self
            .jobs
            .read()
            .iter()
            .map(|(id, job)| ReportJobInfo {
                report_id: id.clone(),
                kind: job.kind.clone(),
                state: job.state.clone(),
                created_at: job.created_at,
                completed_at: job.completed_at,
            })
            .collect();
        out.sort_by(|a, b| {
            a.created_at
                .cmp(&b.created_at)
                .then_with(|| a.report_id.cmp(&b.report_id))
        });
        out
    }

    /// Wait until the job's worker has finished, then poll it.
    pub async fn wait(&self, report_id: &str) -> AppResult<ReportPoll> {
        let handle = self.tasks.lock().remove(report_id);
        if let Some(handle) = handle
            && let Err(e) = handle.await
        {
            tracing::error!(report_id, error = %e, "report worker did not finish cleanly");
        }
        self.poll(report_id)
    }
}

/// Terminal transition. A job that already left `Running` is never touched.
fn finish(jobs: &RwLock<HashMap<ReportId, ReportJob>>, report_id: &str, result: AppResult<ReportOutput>) {
    let mut jobs = jobs.write();
    let Some(job) = jobs.get_mut(report_id) else {
        return;
    };
    if job.state.is_terminal() {
        return;
    }

    match result {
        Ok(output) => {
            tracing::info!(report_id, rows = output.rows.len(), "report complete");
            job.state = ReportState::Complete;
            job.output = Some(output);
        }
        Err(e) => {
            tracing::warn!(report_id, error = %e, "report failed");
            job.state = ReportState::Failed(e.to_string());
        }
    }
    job.completed_at = Some(Utc::now());
}
