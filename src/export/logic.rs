// src/export/logic.rs

use crate::errors::AppResult;
use crate::export::ExportFormat;
use crate::export::json_csv::{export_csv, export_json};
use crate::export::model::store_report_headers;
use crate::models::report::ReportRows;
use std::fs;
use std::path::{Path, PathBuf};

/// Persistence of report artifacts.
pub struct ExportLogic;

impl ExportLogic {
    /// Write `rows` to `<dir>/<report_id>.<ext>` and return the path.
    /// The directory is created if needed.
    pub fn write_report(
        dir: &Path,
        report_id: &str,
        format: ExportFormat,
        rows: &ReportRows,
    ) -> AppResult<PathBuf> {
        fs::create_dir_all(dir)?;
        let path = dir.join(format!("{report_id}.{}", format.extension()));

        match (format, rows) {
            (ExportFormat::Csv, ReportRows::Stores(r)) => {
                export_csv(r, &store_report_headers(), &path)?
            }
            (ExportFormat::Csv, ReportRows::Detail(d)) => {
                export_csv(std::slice::from_ref(d), &[], &path)?
            }
            (ExportFormat::Json, rows) => export_json(rows, &path)?,
        }

        tracing::info!(report_id, path = %path.display(), "report written");
        Ok(path)
    }
}
