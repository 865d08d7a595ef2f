mod common;

use chrono::Weekday;
use common::{hm, temp_dir, utc};
use rstoremon::core::{ReportJobs, ReportService, ReportSettings};
use rstoremon::db::MemoryStore;
use rstoremon::errors::AppError;
use rstoremon::export::ExportFormat;
use rstoremon::models::business_hours::BusinessHours;
use rstoremon::models::report::{ReportKind, ReportOutput, ReportPoll, ReportRows, ReportState};
use rstoremon::models::status::StoreStatus;
use std::fs;
use std::path::PathBuf;
use std::sync::Arc;
use std::sync::mpsc;
use std::time::Duration;
use tokio::runtime::Handle;

fn empty_output() -> ReportOutput {
    ReportOutput {
        path: PathBuf::from("unused.csv"),
        rows: ReportRows::Stores(Vec::new()),
        skipped: Vec::new(),
    }
}

fn service(name: &str, store: MemoryStore, format: ExportFormat) -> (ReportService, PathBuf) {
    let dir = temp_dir(name);
    let settings = ReportSettings {
        output_dir: dir.clone(),
        format,
        default_timezone: "America/Chicago".to_string(),
    };
    (ReportService::new(Arc::new(store), Handle::current(), settings), dir)
}

fn two_stores() -> MemoryStore {
    let store = MemoryStore::new();
    store.set_timezone("valid", "UTC");
    store.add_business_hours(BusinessHours::new("valid", Weekday::Mon, hm(9, 0), hm(17, 0)));
    store.add_sample("valid", utc(2023, 1, 23, 9, 0), StoreStatus::Active);
    store.add_sample("valid", utc(2023, 1, 23, 17, 0), StoreStatus::Active);

    store.set_timezone("broken", "Not/AZone");
    store.add_sample("broken", utc(2023, 1, 23, 12, 0), StoreStatus::Active);
    store
}

#[tokio::test(flavor = "multi_thread")]
async fn test_first_poll_is_running_then_complete() {
    let jobs = ReportJobs::new(Handle::current());
    let (tx, rx) = mpsc::channel::<()>();

    let id = jobs.trigger(ReportKind::AllStores, move |_| {
        rx.recv().ok();
        Ok(empty_output())
    });

    assert_eq!(jobs.poll(&id).unwrap(), ReportPoll::Running);

    tx.send(()).unwrap();
    match jobs.wait(&id).await.unwrap() {
        ReportPoll::Complete(output) => assert!(output.rows.is_empty()),
        other => panic!("unexpected {:?}", other),
    }

    // terminal state is stable
    assert!(matches!(jobs.poll(&id).unwrap(), ReportPoll::Complete(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_polling_alone_releases_worker_handles() {
    let jobs = ReportJobs::new(Handle::current());
    let (tx, rx) = mpsc::channel::<()>();

    let id = jobs.trigger(ReportKind::AllStores, move |_| {
        rx.recv().ok();
        Ok(empty_output())
    });
    assert_eq!(jobs.live_workers(), 1);

    tx.send(()).unwrap();
    while jobs.poll(&id).unwrap() == ReportPoll::Running {
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    assert_eq!(jobs.live_workers(), 0);

    // the result is still there after the handle is gone
    assert!(matches!(jobs.poll(&id).unwrap(), ReportPoll::Complete(_)));
    assert!(matches!(jobs.wait(&id).await.unwrap(), ReportPoll::Complete(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_unknown_report_is_not_found() {
    let jobs = ReportJobs::new(Handle::current());
    let err = jobs.poll("no-such-report").unwrap_err();
    assert!(matches!(err, AppError::ReportNotFound(_)));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_failing_work_marks_job_failed() {
    let jobs = ReportJobs::new(Handle::current());

    let id = jobs.trigger(ReportKind::AllStores, |_| Err(AppError::Other("disk full".to_string())));
    match jobs.wait(&id).await.unwrap() {
        ReportPoll::Failed(reason) => assert!(reason.contains("disk full")),
        other => panic!("unexpected {:?}", other),
    }

    let panicking = jobs.trigger(ReportKind::AllStores, |_| panic!("worker blew up"));
    assert!(matches!(jobs.wait(&panicking).await.unwrap(), ReportPoll::Failed(_)));

    let states: Vec<ReportState> = jobs.list().into_iter().map(|j| j.state).collect();
    assert_eq!(states.len(), 2);
    assert!(states.iter().all(|s| s.is_terminal() && s.label() == "Failed"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_registries_are_isolated() {
    let a = ReportJobs::new(Handle::current());
    let b = ReportJobs::new(Handle::current());

    let id1 = a.trigger(ReportKind::AllStores, |_| Ok(empty_output()));
    let id2 = a.trigger(ReportKind::AllStores, |_| Ok(empty_output()));
    assert_ne!(id1, id2);

    assert!(b.poll(&id1).is_err());
    assert!(b.list().is_empty());
    assert_eq!(a.list().len(), 2);

    a.wait(&id1).await.unwrap();
    a.wait(&id2).await.unwrap();
}

#[tokio::test(flavor = "multi_thread")]
async fn test_report_with_unresolvable_timezone_completes() {
    let (service, dir) = service("job_bad_tz", two_stores(), ExportFormat::Csv);

    let id = service.trigger_report();
    let output = match service.wait(&id).await.unwrap() {
        ReportPoll::Complete(output) => output,
        other => panic!("unexpected {:?}", other),
    };

    match &output.rows {
        ReportRows::Stores(rows) => {
            assert_eq!(rows.len(), 1);
            assert_eq!(rows[0].store_id, "valid");
        }
        other => panic!("unexpected rows {:?}", other),
    }
    assert_eq!(output.skipped.len(), 1);
    assert_eq!(output.skipped[0].store_id, "broken");

    assert_eq!(output.path, dir.join(format!("{id}.csv")));
    let content = fs::read_to_string(&output.path).unwrap();
    assert!(content.starts_with("store_id,uptime_last_hour"));
    assert!(content.contains("valid"));
    assert!(!content.contains("broken"));
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_store_report_writes_json() {
    let (service, dir) = service("job_single", two_stores(), ExportFormat::Json);

    let id = service.trigger_single_store_report("valid");
    assert!(id.starts_with("single_store_valid_"));

    let output = match service.wait(&id).await.unwrap() {
        ReportPoll::Complete(output) => output,
        other => panic!("unexpected {:?}", other),
    };
    assert_eq!(output.path, dir.join(format!("{id}.json")));

    let json: serde_json::Value = serde_json::from_str(&fs::read_to_string(&output.path).unwrap()).unwrap();
    assert_eq!(json["store_id"], "valid");
    assert_eq!(json["timezone"], "UTC");
    assert_eq!(json["uptime_last_day_hours"], 8.0);
}

#[tokio::test(flavor = "multi_thread")]
async fn test_single_store_report_for_unknown_store_fails() {
    let (service, _dir) = service("job_unknown", two_stores(), ExportFormat::Csv);

    let id = service.trigger_single_store_report("ghost");
    match service.wait(&id).await.unwrap() {
        ReportPoll::Failed(reason) => assert!(reason.contains("ghost")),
        other => panic!("unexpected {:?}", other),
    }

    let listed = service.list();
    assert_eq!(listed.len(), 1);
    assert_eq!(listed[0].kind, ReportKind::SingleStore("ghost".to_string()));
    assert!(listed[0].completed_at.is_some());
}
