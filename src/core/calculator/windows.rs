//! Named look-back windows and the unit each one is reported in.

use crate::utils::time::duration_secs;
use chrono::Duration;
use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportWindow {
    Hour,
    Day,
    Week,
    Month,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportUnit {
    Minutes,
    Hours,
}

impl ReportUnit {
    pub fn convert(&self, d: Duration) -> f64 {
        match self {
            ReportUnit::Minutes => duration_secs(d) / 60.0,
            ReportUnit::Hours => duration_secs(d) / 3600.0,
        }
    }

    pub fn suffix(&self) -> &'static str {
        match self {
            ReportUnit::Minutes => "min",
            ReportUnit::Hours => "h",
        }
    }
}

/// Windows of the all-stores report.
pub const STORE_REPORT_WINDOWS: [ReportWindow; 3] =
    [ReportWindow::Hour, ReportWindow::Day, ReportWindow::Week];

/// Windows of the single-store detail report.
pub const DETAIL_REPORT_WINDOWS: [ReportWindow; 3] =
    [ReportWindow::Day, ReportWindow::Week, ReportWindow::Month];

impl ReportWindow {
    pub fn label(&self) -> &'static str {
        match self {
            ReportWindow::Hour => "hour",
            ReportWindow::Day => "day",
            ReportWindow::Week => "week",
            ReportWindow::Month => "month",
        }
    }

    pub fn lookback(&self) -> Duration {
        match self {
            ReportWindow::Hour => Duration::hours(1),
            ReportWindow::Day => Duration::days(1),
            ReportWindow::Week => Duration::days(7),
            ReportWindow::Month => Duration::days(30),
        }
    }

    /// The hour window is small enough to read better in minutes.
    pub fn unit(&self) -> ReportUnit {
        match self {
            ReportWindow::Hour => ReportUnit::Minutes,
            _ => ReportUnit::Hours,
        }
    }
}
