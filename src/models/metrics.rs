use crate::core::calculator::windows::ReportWindow;
use crate::utils::time::round2;
use chrono::Duration;
use serde::Serialize;

/// Up/down split of a set of business periods.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Uptime {
    pub up: Duration,
    pub down: Duration,
}

impl Default for Uptime {
    fn default() -> Self {
        Self {
            up: Duration::zero(),
            down: Duration::zero(),
        }
    }
}

impl Uptime {
    pub fn total(&self) -> Duration {
        self.up + self.down
    }
}

/// Exact (unrounded) figures for one store over one window.
#[derive(Debug, Clone)]
pub struct WindowMetrics {
    pub window: ReportWindow,
    pub uptime: Uptime,
    pub samples: usize,
    pub periods: usize,
}

impl WindowMetrics {
    pub fn uptime_in_unit(&self) -> f64 {
        round2(self.window.unit().convert(self.uptime.up))
    }

    pub fn downtime_in_unit(&self) -> f64 {
        round2(self.window.unit().convert(self.uptime.down))
    }

    /// Percentage of open time the store was up; 0 when it never opened.
    pub fn uptime_percentage(&self) -> f64 {
        let total = self.uptime.total().num_milliseconds();
        if total <= 0 {
            return 0.0;
        }
        round2(self.uptime.up.num_milliseconds() as f64 / total as f64 * 100.0)
    }
}

#[derive(Debug, Clone)]
pub struct StoreMetrics {
    pub store_id: String,
    pub timezone: String,
    pub windows: Vec<WindowMetrics>,
}

impl StoreMetrics {
    pub fn window(&self, window: ReportWindow) -> Option<&WindowMetrics> {
        self.windows.iter().find(|w| w.window == window)
    }
}

/// One line of the full report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsRow {
    pub store_id: String,
    pub uptime_last_hour: f64,
    pub downtime_last_hour: f64,
    pub uptime_last_day: f64,
    pub downtime_last_day: f64,
    pub uptime_last_week: f64,
    pub downtime_last_week: f64,
}

impl MetricsRow {
    pub fn from_metrics(m: &StoreMetrics) -> Self {
        let up = |w| m.window(w).map(|x| x.uptime_in_unit()).unwrap_or(0.0);
        let down = |w| m.window(w).map(|x| x.downtime_in_unit()).unwrap_or(0.0);

        Self {
            store_id: m.store_id.clone(),
            uptime_last_hour: up(ReportWindow::Hour),
            downtime_last_hour: down(ReportWindow::Hour),
            uptime_last_day: up(ReportWindow::Day),
            downtime_last_day: down(ReportWindow::Day),
            uptime_last_week: up(ReportWindow::Week),
            downtime_last_week: down(ReportWindow::Week),
        }
    }
}

/// Single-store detail line: day, week and month, all in hours.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreDetailRow {
    pub store_id: String,
    pub timezone: String,
    pub report_generated_at: String,

    pub uptime_last_day_hours: f64,
    pub downtime_last_day_hours: f64,
    pub total_business_hours_last_day: f64,
    pub uptime_percentage_last_day: f64,
    pub status_records_last_day: usize,
    pub business_periods_last_day: usize,

    pub uptime_last_week_hours: f64,
    pub downtime_last_week_hours: f64,
    pub total_business_hours_last_week: f64,
    pub uptime_percentage_last_week: f64,
    pub status_records_last_week: usize,
    pub business_periods_last_week: usize,

    pub uptime_last_month_hours: f64,
    pub downtime_last_month_hours: f64,
    pub total_business_hours_last_month: f64,
    pub uptime_percentage_last_month: f64,
    pub status_records_last_month: usize,
    pub business_periods_last_month: usize,

    pub business_hours: String,
}

/// Columns of one detail window, in the window's unit (hours).
struct DetailCells {
    up: f64,
    down: f64,
    total: f64,
    pct: f64,
    samples: usize,
    periods: usize,
}

fn detail_cells(m: &StoreMetrics, window: ReportWindow) -> DetailCells {
    match m.window(window) {
        Some(w) => DetailCells {
            up: w.uptime_in_unit(),
            down: w.downtime_in_unit(),
            total: round2(window.unit().convert(w.uptime.total())),
            pct: w.uptime_percentage(),
            samples: w.samples,
            periods: w.periods,
        },
        None => DetailCells {
            up: 0.0,
            down: 0.0,
            total: 0.0,
            pct: 0.0,
            samples: 0,
            periods: 0,
        },
    }
}

impl StoreDetailRow {
    pub fn from_metrics(m: &StoreMetrics, generated_at: String, business_hours: String) -> Self {
        let day = detail_cells(m, ReportWindow::Day);
        let week = detail_cells(m, ReportWindow::Week);
        let month = detail_cells(m, ReportWindow::Month);

        Self {
            store_id: m.store_id.clone(),
            timezone: m.timezone.clone(),
            report_generated_at: generated_at,

            uptime_last_day_hours: day.up,
            downtime_last_day_hours: day.down,
            total_business_hours_last_day: day.total,
            uptime_percentage_last_day: day.pct,
            status_records_last_day: day.samples,
            business_periods_last_day: day.periods,

            uptime_last_week_hours: week.up,
            downtime_last_week_hours: week.down,
            total_business_hours_last_week: week.total,
            uptime_percentage_last_week: week.pct,
            status_records_last_week: week.samples,
            business_periods_last_week: week.periods,

            uptime_last_month_hours: month.up,
            downtime_last_month_hours: month.down,
            total_business_hours_last_month: month.total,
            uptime_percentage_last_month: month.pct,
            status_records_last_month: month.samples,
            business_periods_last_month: month.periods,

            business_hours,
        }
    }
}

/// Data availability overview for one store.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StoreSummary {
    pub store_id: String,
    pub total_status_records: usize,
    pub data_available_from: Option<String>,
    pub data_available_until: Option<String>,
    pub timezone: String,
    pub has_business_hours: bool,
    pub business_days_defined: usize,
}
