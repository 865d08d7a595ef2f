//! SQL access to the store tables, and the SQLite-backed `StoreSource`.

use crate::db::pool::DbPool;
use crate::db::source::{StoreSource, TimeRange, in_range};
use crate::errors::{AppError, AppResult};
use crate::models::business_hours::BusinessHours;
use crate::models::sample::StatusSample;
use crate::models::status::StoreStatus;
use crate::utils::time::{format_timestamp, parse_timestamp};
use chrono::{DateTime, NaiveTime, Utc};
use parking_lot::Mutex;
use rusqlite::{Connection, OptionalExtension, Row, params};

fn conversion_error(e: AppError) -> rusqlite::Error {
    rusqlite::Error::FromSqlConversionFailure(0, rusqlite::types::Type::Text, Box::new(e))
}

pub fn map_status_row(row: &Row) -> rusqlite::Result<StatusSample> {
    let store_id: String = row.get("store_id")?;
    let ts_str: String = row.get("timestamp_utc")?;
    let status_str: String = row.get("status")?;

    let timestamp = parse_timestamp(&ts_str).map_err(conversion_error)?;
    let status = StoreStatus::from_db_str(&status_str)
        .ok_or_else(|| conversion_error(AppError::InvalidStatus(status_str.clone())))?;

    Ok(StatusSample {
        store_id,
        timestamp,
        status,
    })
}

pub fn load_store_ids(conn: &Connection) -> AppResult<Vec<String>> {
    let mut stmt = conn.prepare("SELECT DISTINCT store_id FROM store_status ORDER BY store_id ASC")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut out = Vec::new();
    for r in rows {
        out.push(r?);
    }
    Ok(out)
}

/// Samples of one store, ascending. Range filtering happens after parsing so
/// that mixed timestamp spellings compare correctly.
pub fn load_status_samples(
    conn: &Connection,
    store_id: &str,
    range: Option<TimeRange>,
) -> AppResult<Vec<StatusSample>> {
    let mut stmt = conn.prepare(
        "SELECT store_id, timestamp_utc, status FROM store_status
         WHERE store_id = ?1",
    )?;

    let rows = stmt.query_map([store_id], map_status_row)?;

    let mut out = Vec::new();
    for r in rows {
        let sample = r?;
        if in_range(&sample.timestamp, &range) {
            out.push(sample);
        }
    }
    out.sort_by_key(|s| s.timestamp);
    Ok(out)
}

pub fn count_status_samples(conn: &Connection, store_id: &str) -> AppResult<usize> {
    let count: i64 = conn.query_row(
        "SELECT COUNT(*) FROM store_status WHERE store_id = ?1",
        [store_id],
        |row| row.get(0),
    )?;
    Ok(count as usize)
}

/// Schedule rows of one store. A malformed row fails the whole schedule:
/// a partial schedule would silently under-report opening hours.
pub fn load_business_hours(conn: &Connection, store_id: &str) -> AppResult<Vec<BusinessHours>> {
    let mut stmt = conn.prepare(
        "SELECT day_of_week, start_time_local, end_time_local FROM business_hours
         WHERE store_id = ?1
         ORDER BY day_of_week ASC, start_time_local ASC",
    )?;

    let rows = stmt.query_map([store_id], |row| {
        Ok((
            row.get::<_, i64>(0)?,
            row.get::<_, String>(1)?,
            row.get::<_, String>(2)?,
        ))
    })?;

    let mut out = Vec::new();
    for r in rows {
        let (day, start, end) = r?;
        out.push(BusinessHours::parse(store_id, day, &start, &end)?);
    }
    Ok(out)
}

pub fn load_timezone(conn: &Connection, store_id: &str) -> AppResult<Option<String>> {
    let tz = conn
        .query_row(
            "SELECT timezone_str FROM store_timezones WHERE store_id = ?1 ORDER BY id ASC LIMIT 1",
            [store_id],
            |row| row.get::<_, String>(0),
        )
        .optional()?;
    Ok(tz)
}

pub fn load_latest_timestamp(conn: &Connection) -> AppResult<Option<DateTime<Utc>>> {
    let mut stmt = conn.prepare("SELECT timestamp_utc FROM store_status")?;
    let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;

    let mut latest: Option<DateTime<Utc>> = None;
    for r in rows {
        let raw = r?;
        // a bad row only fails its own store, when that store is read
        let ts = match parse_timestamp(&raw) {
            Ok(ts) => ts,
            Err(e) => {
                tracing::warn!(timestamp = %raw, error = %e, "unparseable status timestamp ignored for processing clock");
                continue;
            }
        };
        latest = Some(latest.map_or(ts, |l| l.max(ts)));
    }
    Ok(latest)
}

pub fn insert_status(
    conn: &Connection,
    store_id: &str,
    timestamp: &DateTime<Utc>,
    status: StoreStatus,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO store_status (store_id, timestamp_utc, status) VALUES (?1, ?2, ?3)",
        params![store_id, format_timestamp(timestamp), status.to_db_str()],
    )?;
    Ok(())
}

pub fn insert_business_hours(
    conn: &Connection,
    store_id: &str,
    day_of_week: i64,
    start: &NaiveTime,
    end: &NaiveTime,
) -> AppResult<()> {
    conn.execute(
        "INSERT INTO business_hours (store_id, day_of_week, start_time_local, end_time_local)
         VALUES (?1, ?2, ?3, ?4)",
        params![
            store_id,
            day_of_week,
            start.format("%H:%M:%S").to_string(),
            end.format("%H:%M:%S").to_string(),
        ],
    )?;
    Ok(())
}

pub fn insert_timezone(conn: &Connection, store_id: &str, zone: &str) -> AppResult<()> {
    conn.execute(
        "INSERT INTO store_timezones (store_id, timezone_str) VALUES (?1, ?2)",
        params![store_id, zone],
    )?;
    Ok(())
}

/// `StoreSource` over the SQLite database. Each call runs on the shared
/// connection under a lock; a report worker opens its own store.
pub struct SqliteStore {
    pool: Mutex<DbPool>,
}

impl SqliteStore {
    pub fn open(path: &str) -> AppResult<Self> {
        let pool = DbPool::new(path)?;
        Ok(Self {
            pool: Mutex::new(pool),
        })
    }

    /// Run `f` on the underlying connection.
    pub fn with_conn<T>(&self, f: impl FnOnce(&Connection) -> AppResult<T>) -> AppResult<T> {
        let pool = self.pool.lock();
        f(&pool.conn)
    }
}

impl StoreSource for SqliteStore {
    fn list_store_ids(&self) -> AppResult<Vec<String>> {
        self.with_conn(load_store_ids)
    }

    fn status_samples(&self, store_id: &str, range: Option<TimeRange>) -> AppResult<Vec<StatusSample>> {
        self.with_conn(|c| load_status_samples(c, store_id, range))
    }

    fn business_hours(&self, store_id: &str) -> AppResult<Vec<BusinessHours>> {
        self.with_conn(|c| load_business_hours(c, store_id))
    }

    fn timezone(&self, store_id: &str) -> AppResult<Option<String>> {
        self.with_conn(|c| load_timezone(c, store_id))
    }

    fn latest_timestamp(&self) -> AppResult<Option<DateTime<Utc>>> {
        self.with_conn(load_latest_timestamp)
    }
}
