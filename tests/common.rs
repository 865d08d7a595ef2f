#![allow(dead_code)]
use assert_cmd::{Command, cargo_bin_cmd};
use chrono::{DateTime, NaiveTime, TimeZone, Utc};
use rstoremon::db::initialize::init_db;
use rstoremon::db::queries::{insert_business_hours, insert_status, insert_timezone};
use rstoremon::models::status::StoreStatus;
use std::env;
use std::fs;
use std::path::PathBuf;

pub fn rsm() -> Command {
    cargo_bin_cmd!("rstoremon")
}

/// Create a unique test DB path inside the system temp dir and remove any existing file
pub fn setup_test_db(name: &str) -> String {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rstoremon.sqlite", name));
    let db_path = path.to_string_lossy().to_string();
    fs::remove_file(&db_path).ok();
    db_path
}

/// Fresh, empty directory inside the system temp dir
pub fn temp_dir(name: &str) -> PathBuf {
    let mut path: PathBuf = env::temp_dir();
    path.push(format!("{}_rstoremon_out", name));
    fs::remove_dir_all(&path).ok();
    fs::create_dir_all(&path).expect("create temp dir");
    path
}

pub fn utc(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
}

pub fn hm(h: u32, m: u32) -> NaiveTime {
    NaiveTime::from_hms_opt(h, m, 0).unwrap()
}

/// Seed two stores:
///  - `store-a`: UTC, open Monday 09:00-17:00, polled every 30 minutes on
///    Monday 2023-01-23, active except 12:00-13:00
///  - `store-b`: America/New_York, no schedule (24/7), always active
pub fn seed_two_stores(db_path: &str) {
    let conn = rusqlite::Connection::open(db_path).expect("open db");
    init_db(&conn).expect("init db");

    insert_timezone(&conn, "store-a", "UTC").expect("tz a");
    insert_business_hours(&conn, "store-a", 0, &hm(9, 0), &hm(17, 0)).expect("hours a");

    for half_hours in 0..48 {
        let t = utc(2023, 1, 23, 0, 0) + chrono::Duration::minutes(30 * half_hours);
        let status = if (24..26).contains(&half_hours) {
            StoreStatus::Inactive
        } else {
            StoreStatus::Active
        };
        insert_status(&conn, "store-a", &t, status).expect("status a");
    }

    insert_timezone(&conn, "store-b", "America/New_York").expect("tz b");
    for hour in 0..24 {
        let t = utc(2023, 1, 23, hour, 0);
        insert_status(&conn, "store-b", &t, StoreStatus::Active).expect("status b");
    }
}

/// Initialize an empty DB through the CLI
pub fn init_db_cli(db_path: &str) {
    rsm()
        .args(["--db", db_path, "--test", "init"])
        .assert()
        .success();
}
