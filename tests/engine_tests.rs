mod common;

use chrono::{Duration, Weekday};
use chrono_tz::Tz;
use common::{hm, utc};
use rstoremon::core::calculator::windows::{DETAIL_REPORT_WINDOWS, ReportWindow, STORE_REPORT_WINDOWS};
use rstoremon::core::calculator::{business_periods, interpolate};
use rstoremon::core::logic::Core;
use rstoremon::core::report::ReportLogic;
use rstoremon::db::MemoryStore;
use rstoremon::errors::AppError;
use rstoremon::models::business_hours::{BusinessHours, OpeningHours};
use rstoremon::models::period::{BusinessPeriod, total_duration};
use rstoremon::models::sample::StatusSample;
use rstoremon::models::status::StoreStatus;
use rstoremon::utils::time::localize;

fn sample(t: chrono::DateTime<chrono::Utc>, status: StoreStatus) -> StatusSample {
    StatusSample::new("s1", t, status)
}

fn monday_9_to_5() -> Vec<BusinessHours> {
    vec![BusinessHours::new("s1", Weekday::Mon, hm(9, 0), hm(17, 0))]
}

// 2023-01-23 is a Monday
#[test]
fn test_monday_schedule_scenario() {
    let hours = monday_9_to_5();
    let periods = business_periods(
        utc(2023, 1, 23, 0, 0),
        utc(2023, 1, 23, 23, 59),
        &Tz::UTC,
        OpeningHours::from_entries(&hours),
    );

    assert_eq!(
        periods,
        vec![BusinessPeriod::new(utc(2023, 1, 23, 9, 0), utc(2023, 1, 23, 17, 0))]
    );

    let samples = vec![
        sample(utc(2023, 1, 23, 8, 0), StoreStatus::Inactive),
        sample(utc(2023, 1, 23, 9, 30), StoreStatus::Active),
        sample(utc(2023, 1, 23, 16, 0), StoreStatus::Inactive),
    ];
    let uptime = interpolate(&samples, &periods);

    assert_eq!(uptime.up, Duration::minutes(390));
    assert_eq!(uptime.down, Duration::minutes(90));
}

#[test]
fn test_periods_stay_inside_query_range() {
    let tz: Tz = "America/New_York".parse().unwrap();
    let hours = vec![
        BusinessHours::new("s1", Weekday::Mon, hm(0, 0), hm(23, 59)),
        BusinessHours::new("s1", Weekday::Tue, hm(6, 0), hm(22, 0)),
        BusinessHours::new("s1", Weekday::Wed, hm(10, 0), hm(11, 30)),
        BusinessHours::new("s1", Weekday::Sat, hm(12, 0), hm(14, 0)),
    ];

    let ranges = [
        (utc(2023, 1, 23, 13, 17), utc(2023, 1, 24, 13, 17)),
        (utc(2023, 1, 20, 0, 0), utc(2023, 1, 27, 0, 0)),
        (utc(2023, 1, 24, 15, 0), utc(2023, 1, 24, 16, 0)),
        (utc(2023, 1, 1, 0, 0), utc(2023, 1, 31, 0, 0)),
    ];

    for (start, end) in ranges {
        let periods = business_periods(start, end, &tz, OpeningHours::from_entries(&hours));
        assert!(!periods.is_empty());
        for p in &periods {
            assert!(p.start <= p.end, "inverted period {:?}", p);
            assert!(p.start >= start && p.end <= end, "period {:?} leaks", p);
        }
    }
}

#[test]
fn test_periods_are_clipped_to_range() {
    let hours = monday_9_to_5();
    let periods = business_periods(
        utc(2023, 1, 23, 12, 0),
        utc(2023, 1, 23, 23, 59),
        &Tz::UTC,
        OpeningHours::from_entries(&hours),
    );
    assert_eq!(
        periods,
        vec![BusinessPeriod::new(utc(2023, 1, 23, 12, 0), utc(2023, 1, 23, 17, 0))]
    );
}

#[test]
fn test_closed_day_has_no_periods() {
    let hours = monday_9_to_5();
    // Tuesday
    let periods = business_periods(
        utc(2023, 1, 24, 0, 0),
        utc(2023, 1, 24, 23, 0),
        &Tz::UTC,
        OpeningHours::from_entries(&hours),
    );
    assert!(periods.is_empty());
}

#[test]
fn test_local_schedule_is_shifted_to_utc() {
    let tz: Tz = "America/Chicago".parse().unwrap();
    let hours = monday_9_to_5();
    let periods = business_periods(
        utc(2023, 1, 23, 0, 0),
        utc(2023, 1, 24, 12, 0),
        &tz,
        OpeningHours::from_entries(&hours),
    );
    // CST is UTC-6
    assert_eq!(
        periods,
        vec![BusinessPeriod::new(utc(2023, 1, 23, 15, 0), utc(2023, 1, 23, 23, 0))]
    );
}

#[test]
fn test_midnight_crossing_entry_is_skipped() {
    let hours = vec![
        BusinessHours::new("s1", Weekday::Mon, hm(22, 0), hm(2, 0)),
        BusinessHours::new("s1", Weekday::Mon, hm(9, 0), hm(10, 0)),
    ];
    let periods = business_periods(
        utc(2023, 1, 23, 0, 0),
        utc(2023, 1, 24, 0, 0),
        &Tz::UTC,
        OpeningHours::from_entries(&hours),
    );
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].duration(), Duration::hours(1));
}

#[test]
fn test_spring_forward_gap_lands_after_transition() {
    let tz: Tz = "America/New_York".parse().unwrap();

    // 02:30 does not exist on 2023-03-12; it resolves to 03:30 EDT
    let gap = localize(&tz, chrono::NaiveDate::from_ymd_opt(2023, 3, 12).unwrap().and_time(hm(2, 30)));
    assert_eq!(gap, utc(2023, 3, 12, 7, 30));

    let hours = vec![BusinessHours::new("s1", Weekday::Sun, hm(2, 30), hm(4, 0))];
    let periods = business_periods(
        utc(2023, 3, 12, 0, 0),
        utc(2023, 3, 13, 0, 0),
        &tz,
        OpeningHours::from_entries(&hours),
    );
    assert_eq!(
        periods,
        vec![BusinessPeriod::new(utc(2023, 3, 12, 7, 30), utc(2023, 3, 12, 8, 0))]
    );
}

#[test]
fn test_entry_swallowed_by_spring_forward_gap_is_skipped() {
    let tz: Tz = "America/New_York".parse().unwrap();

    // 02:30 moves to 07:30Z while 03:15 EDT is 07:15Z
    let hours = vec![
        BusinessHours::new("s1", Weekday::Sun, hm(2, 30), hm(3, 15)),
        BusinessHours::new("s1", Weekday::Sun, hm(9, 0), hm(10, 0)),
    ];
    let periods = business_periods(
        utc(2023, 3, 12, 0, 0),
        utc(2023, 3, 13, 0, 0),
        &tz,
        OpeningHours::from_entries(&hours),
    );
    assert_eq!(
        periods,
        vec![BusinessPeriod::new(utc(2023, 3, 12, 13, 0), utc(2023, 3, 12, 14, 0))]
    );

    let samples = vec![sample(utc(2023, 3, 12, 13, 0), StoreStatus::Inactive)];
    let uptime = interpolate(&samples, &periods);
    assert_eq!(uptime.up, Duration::zero());
    assert_eq!(uptime.down, Duration::hours(1));
    assert!(uptime.down >= Duration::zero());
}

#[test]
fn test_fall_back_ambiguity_takes_earliest_instant() {
    let tz: Tz = "America/New_York".parse().unwrap();

    let ambiguous = localize(&tz, chrono::NaiveDate::from_ymd_opt(2023, 11, 5).unwrap().and_time(hm(1, 30)));
    assert_eq!(ambiguous, utc(2023, 11, 5, 5, 30));

    let hours = vec![BusinessHours::new("s1", Weekday::Sun, hm(1, 30), hm(3, 0))];
    let periods = business_periods(
        utc(2023, 11, 5, 0, 0),
        utc(2023, 11, 6, 0, 0),
        &tz,
        OpeningHours::from_entries(&hours),
    );
    assert_eq!(periods.len(), 1);
    assert_eq!(periods[0].duration(), Duration::minutes(150));
}

#[test]
fn test_conservation_law() {
    let tz: Tz = "Asia/Kolkata".parse().unwrap();
    let hours = vec![
        BusinessHours::new("s1", Weekday::Mon, hm(9, 0), hm(13, 0)),
        BusinessHours::new("s1", Weekday::Mon, hm(14, 0), hm(21, 0)),
        BusinessHours::new("s1", Weekday::Tue, hm(9, 0), hm(21, 0)),
    ];
    let start = utc(2023, 1, 22, 0, 0);
    let end = utc(2023, 1, 25, 0, 0);
    let periods = business_periods(start, end, &tz, OpeningHours::from_entries(&hours));

    let sample_sets = [
        vec![],
        vec![sample(utc(2023, 1, 23, 5, 0), StoreStatus::Active)],
        (0..72)
            .map(|h| {
                let status = if h % 3 == 0 { StoreStatus::Inactive } else { StoreStatus::Active };
                sample(start + Duration::minutes(h * 61), status)
            })
            .collect(),
    ];

    for samples in sample_sets {
        let uptime = interpolate(&samples, &periods);
        assert_eq!(uptime.up + uptime.down, total_duration(&periods));
        assert_eq!(uptime.total(), total_duration(&periods));
    }
}

#[test]
fn test_interpolation_is_idempotent() {
    let hours = monday_9_to_5();
    let run = || {
        let periods = business_periods(
            utc(2023, 1, 23, 0, 0),
            utc(2023, 1, 24, 0, 0),
            &Tz::UTC,
            OpeningHours::from_entries(&hours),
        );
        let samples = vec![
            sample(utc(2023, 1, 23, 9, 7), StoreStatus::Active),
            sample(utc(2023, 1, 23, 13, 41), StoreStatus::Inactive),
        ];
        interpolate(&samples, &periods)
    };

    assert_eq!(run(), run());
}

#[test]
fn test_full_day_store_with_one_active_sample() {
    let start = utc(2023, 1, 23, 0, 0);
    let end = start + Duration::hours(24);
    let periods = business_periods(start, end, &Tz::UTC, OpeningHours::FullDay);

    assert_eq!(periods, vec![BusinessPeriod::new(start, end)]);

    let uptime = interpolate(&[sample(start, StoreStatus::Active)], &periods);
    assert_eq!(uptime.up, Duration::hours(24));
    assert_eq!(uptime.down, Duration::zero());
}

#[test]
fn test_no_samples_is_all_downtime() {
    let hours = monday_9_to_5();
    let periods = business_periods(
        utc(2023, 1, 16, 0, 0),
        utc(2023, 1, 30, 0, 0),
        &Tz::UTC,
        OpeningHours::from_entries(&hours),
    );
    assert_eq!(periods.len(), 2);

    let uptime = interpolate(&[], &periods);
    assert_eq!(uptime.up, Duration::zero());
    assert_eq!(uptime.down, Duration::hours(16));
}

#[test]
fn test_unsorted_samples_match_sorted() {
    let hours = monday_9_to_5();
    let periods = business_periods(
        utc(2023, 1, 23, 0, 0),
        utc(2023, 1, 24, 0, 0),
        &Tz::UTC,
        OpeningHours::from_entries(&hours),
    );
    let sorted = vec![
        sample(utc(2023, 1, 23, 9, 0), StoreStatus::Active),
        sample(utc(2023, 1, 23, 11, 0), StoreStatus::Inactive),
        sample(utc(2023, 1, 23, 15, 0), StoreStatus::Active),
    ];
    let mut shuffled = sorted.clone();
    shuffled.swap(0, 2);

    let a = interpolate(&sorted, &periods);
    let b = interpolate(&shuffled, &periods);
    assert_eq!(a, b);
    assert_eq!(a.up, Duration::hours(4));
    assert_eq!(a.down, Duration::hours(4));
}

#[test]
fn test_period_without_samples_counts_as_down() {
    let hours = vec![
        BusinessHours::new("s1", Weekday::Mon, hm(9, 0), hm(12, 0)),
        BusinessHours::new("s1", Weekday::Mon, hm(13, 0), hm(17, 0)),
    ];
    let periods = business_periods(
        utc(2023, 1, 23, 0, 0),
        utc(2023, 1, 24, 0, 0),
        &Tz::UTC,
        OpeningHours::from_entries(&hours),
    );
    let samples = vec![sample(utc(2023, 1, 23, 9, 0), StoreStatus::Active)];
    let uptime = interpolate(&samples, &periods);

    assert_eq!(uptime.up, Duration::hours(3));
    assert_eq!(uptime.down, Duration::hours(4));
}

fn memory_store() -> MemoryStore {
    let store = MemoryStore::new();
    store.set_timezone("good", "UTC");
    store.add_business_hours(BusinessHours::new("good", Weekday::Mon, hm(9, 0), hm(17, 0)));
    store.add_sample("good", utc(2023, 1, 23, 16, 30), StoreStatus::Active);
    store.add_sample("good", utc(2023, 1, 23, 9, 0), StoreStatus::Active);
    store.add_sample("good", utc(2023, 1, 23, 15, 30), StoreStatus::Active);

    store.set_timezone("bad", "Mars/Olympus_Mons");
    store.add_sample("bad", utc(2023, 1, 23, 10, 0), StoreStatus::Active);
    store
}

#[test]
fn test_store_metrics_uses_processing_clock() {
    let store = memory_store();
    let now = Core::processing_now(&store).unwrap();
    assert_eq!(now, utc(2023, 1, 23, 16, 30));

    let m = Core::store_metrics(&store, "good", now, &STORE_REPORT_WINDOWS, "America/Chicago").unwrap();
    assert_eq!(m.timezone, "UTC");

    let hour = m.window(ReportWindow::Hour).unwrap();
    assert_eq!(hour.uptime.up, Duration::hours(1));
    assert_eq!(hour.uptime_in_unit(), 60.0);

    let day = m.window(ReportWindow::Day).unwrap();
    assert_eq!(day.uptime.up, Duration::minutes(450));
    assert_eq!(day.uptime.down, Duration::zero());
    assert_eq!(day.samples, 3);
}

#[test]
fn test_invalid_timezone_is_isolated() {
    let store = memory_store();
    let now = Core::processing_now(&store).unwrap();

    let err = Core::store_metrics(&store, "bad", now, &STORE_REPORT_WINDOWS, "UTC").unwrap_err();
    assert!(matches!(err, AppError::InvalidTimezone(_)));
    assert!(err.is_configuration());

    let (metrics, skipped) = Core::all_store_metrics(&store, now, &STORE_REPORT_WINDOWS, "UTC").unwrap();
    assert_eq!(metrics.len(), 1);
    assert_eq!(metrics[0].store_id, "good");
    assert_eq!(skipped.len(), 1);
    assert_eq!(skipped[0].store_id, "bad");
    assert!(skipped[0].configuration);
}

#[test]
fn test_missing_timezone_uses_default() {
    let store = MemoryStore::new();
    store.add_sample("plain", utc(2023, 1, 23, 10, 0), StoreStatus::Active);

    let zone = Core::resolve_timezone(&store, "plain", "America/Chicago").unwrap();
    assert_eq!(zone, "America/Chicago");
}

#[test]
fn test_describe_schedule() {
    assert_eq!(Core::describe_schedule(&[]), "24/7 (No specific hours defined)");

    let entries = vec![
        BusinessHours::new("s1", Weekday::Tue, hm(9, 0), hm(17, 0)),
        BusinessHours::new("s1", Weekday::Mon, hm(14, 0), hm(18, 0)),
        BusinessHours::new("s1", Weekday::Mon, hm(8, 0), hm(12, 0)),
    ];
    assert_eq!(
        Core::describe_schedule(&entries),
        "Monday: 08:00:00 - 12:00:00, 14:00:00 - 18:00:00; Tuesday: 09:00:00 - 17:00:00"
    );
}

#[test]
fn test_single_store_report_rows() {
    let store = memory_store();

    let row = ReportLogic::single_store_report(&store, "good", "UTC").unwrap();
    assert_eq!(row.store_id, "good");
    assert_eq!(row.uptime_last_day_hours, 7.5);
    assert_eq!(row.downtime_last_day_hours, 0.0);
    assert_eq!(row.uptime_percentage_last_day, 100.0);
    assert_eq!(row.business_hours, "Monday: 09:00:00 - 17:00:00");
    assert_eq!(DETAIL_REPORT_WINDOWS.len(), 3);

    let err = ReportLogic::single_store_report(&store, "nobody", "UTC").unwrap_err();
    assert!(matches!(err, AppError::StoreNotFound(_)));
}

#[test]
fn test_store_summary() {
    let store = memory_store();
    let summary = ReportLogic::store_summary(&store, "good", "UTC").unwrap();

    assert_eq!(summary.total_status_records, 3);
    assert_eq!(summary.data_available_from.as_deref(), Some("2023-01-23 09:00:00 UTC"));
    assert_eq!(summary.data_available_until.as_deref(), Some("2023-01-23 16:30:00 UTC"));
    assert!(summary.has_business_hours);
    assert_eq!(summary.business_days_defined, 1);
}
