//! Unified application error type.
//! All modules (db, core, cli, export) return AppError so that per-store and
//! per-report failures can be classified and isolated at one place.

use std::io;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    // ---------------------------
    // IO
    // ---------------------------
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    // ---------------------------
    // Database-related
    // ---------------------------
    #[error("Database error: {0}")]
    Db(#[from] rusqlite::Error),

    #[error("Database migration error: {0}")]
    Migration(String),

    // ---------------------------
    // Store configuration (scoped to one store)
    // ---------------------------
    #[error("Invalid time format: {0}")]
    InvalidTime(String),

    #[error("Invalid weekday: {0}")]
    InvalidWeekday(i64),

    #[error("Unknown timezone: {0}")]
    InvalidTimezone(String),

    #[error("Invalid timestamp: {0}")]
    InvalidTimestamp(String),

    #[error("Invalid status value: {0}")]
    InvalidStatus(String),

    // ---------------------------
    // Lookups
    // ---------------------------
    #[error("Store not found: {0}")]
    StoreNotFound(String),

    #[error("Report not found: {0}")]
    ReportNotFound(String),

    // ---------------------------
    // Report jobs
    // ---------------------------
    #[error("Report job failed: {0}")]
    Job(String),

    // ---------------------------
    // Config errors
    // ---------------------------
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to load configuration")]
    ConfigLoad,

    #[error("Failed to save configuration")]
    ConfigSave,

    // ---------------------------
    // Export errors
    // ---------------------------
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ---------------------------
    // Generic fallback
    // ---------------------------
    #[error("Internal error: {0}")]
    Other(String),
}

impl AppError {
    /// True for errors caused by one store's own configuration
    /// (timezone name, schedule rows). These never abort a whole report.
    pub fn is_configuration(&self) -> bool {
        matches!(
            self,
            AppError::InvalidTime(_) | AppError::InvalidWeekday(_) | AppError::InvalidTimezone(_)
        )
    }
}

pub type AppResult<T> = Result<T, AppError>;
