use rusqlite::{Connection, OptionalExtension, Result};

/// Ensure that the `log` table exists; it also records applied migrations.
fn ensure_log_table(conn: &Connection) -> Result<()> {
    conn.execute_batch(
        r#"
        CREATE TABLE IF NOT EXISTS log (
            id        INTEGER PRIMARY KEY AUTOINCREMENT,
            date      TEXT NOT NULL,
            operation TEXT NOT NULL,
            target    TEXT DEFAULT '',
            message   TEXT NOT NULL
        );
        "#,
    )?;
    Ok(())
}

struct Migration {
    version: &'static str,
    description: &'static str,
    sql: &'static str,
}

const MIGRATIONS: &[Migration] = &[
    Migration {
        version: "20250301_0001_create_store_status",
        description: "Created store_status table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS store_status (
            id            INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id      TEXT NOT NULL,
            timestamp_utc TEXT NOT NULL,
            status        TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_store_status_store ON store_status(store_id);
        "#,
    },
    Migration {
        version: "20250301_0002_create_business_hours",
        description: "Created business_hours table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS business_hours (
            id               INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id         TEXT NOT NULL,
            day_of_week      INTEGER NOT NULL,
            start_time_local TEXT NOT NULL,
            end_time_local   TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_business_hours_store ON business_hours(store_id);
        "#,
    },
    Migration {
        version: "20250301_0003_create_store_timezones",
        description: "Created store_timezones table",
        sql: r#"
        CREATE TABLE IF NOT EXISTS store_timezones (
            id           INTEGER PRIMARY KEY AUTOINCREMENT,
            store_id     TEXT NOT NULL,
            timezone_str TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_store_timezones_store ON store_timezones(store_id);
        "#,
    },
];

fn is_applied(conn: &Connection, version: &str) -> Result<bool> {
    let mut chk = conn.prepare(
        "SELECT 1 FROM log
         WHERE operation = 'migration_applied' AND target = ?1
         LIMIT 1",
    )?;
    Ok(chk.query_row([version], |_| Ok(())).optional()?.is_some())
}

/// Public entry point: run all pending migrations.
///
/// Invoked by db::init_db(). Returns the versions applied in this call.
pub fn run_pending_migrations(conn: &Connection) -> Result<Vec<&'static str>> {
    ensure_log_table(conn)?;

    let mut applied = Vec::new();
    for m in MIGRATIONS {
        if is_applied(conn, m.version)? {
            continue;
        }

        conn.execute_batch(m.sql)?;
        conn.execute(
            "INSERT INTO log (date, operation, target, message)
             VALUES (datetime('now'), 'migration_applied', ?1, ?2)",
            [m.version, m.description],
        )?;

        tracing::info!(version = m.version, "migration applied");
        applied.push(m.version);
    }

    Ok(applied)
}
