// src/export/json_csv.rs

use crate::errors::AppResult;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Export JSON pretty-printed.
pub(crate) fn export_json<T: Serialize + ?Sized>(data: &T, path: &Path) -> AppResult<()> {
    let json_data = serde_json::to_string_pretty(data)?;

    let mut file = File::create(path)?;
    file.write_all(json_data.as_bytes())?;
    Ok(())
}

/// Export CSV (header taken from the serde field names).
/// `empty_headers` is written when there is no record to derive it from.
pub(crate) fn export_csv<T: Serialize>(records: &[T], empty_headers: &[&str], path: &Path) -> AppResult<()> {
    let mut wtr = csv::Writer::from_path(path)?;

    if records.is_empty() {
        wtr.write_record(empty_headers)?;
    }

    for item in records {
        wtr.serialize(item)?;
    }

    wtr.flush()?;
    Ok(())
}
