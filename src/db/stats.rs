use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, GREY, RESET, YELLOW};
use crate::utils::time::format_display;
use std::fs;

use super::queries::load_latest_timestamp;

pub fn print_db_info(pool: &DbPool, db_path: &str) -> AppResult<()> {
    println!();

    //
    // 1) FILE SIZE
    //
    let file_size = fs::metadata(db_path).map(|m| m.len()).unwrap_or(0);
    let file_mb = (file_size as f64) / (1024.0 * 1024.0);

    println!("{}• File:{} {}{}{}", CYAN, RESET, YELLOW, db_path, RESET);
    println!("{}• Size:{} {:.2} MB", CYAN, RESET, file_mb);

    //
    // 2) COUNTS
    //
    let count = |sql: &str| -> rusqlite::Result<i64> { pool.conn.query_row(sql, [], |row| row.get(0)) };

    let samples = count("SELECT COUNT(*) FROM store_status")?;
    let stores = count("SELECT COUNT(DISTINCT store_id) FROM store_status")?;
    let with_hours = count("SELECT COUNT(DISTINCT store_id) FROM business_hours")?;
    let with_tz = count("SELECT COUNT(DISTINCT store_id) FROM store_timezones")?;

    println!("{}• Status samples:{} {}{}{}", CYAN, RESET, GREEN, samples, RESET);
    println!("{}• Stores:{} {}{}{}", CYAN, RESET, GREEN, stores, RESET);
    println!("    with business hours: {}", with_hours);
    println!("    with timezone:       {}", with_tz);

    //
    // 3) PROCESSING CLOCK
    //
    let latest = load_latest_timestamp(&pool.conn)?
        .map(|t| format_display(&t))
        .unwrap_or_else(|| format!("{GREY}--{RESET}"));
    println!("{}• Latest observation:{} {}", CYAN, RESET, latest);

    println!();
    Ok(())
}
