// src/export/model.rs

/// Header of the all-stores report, written even when there are no rows.
pub(crate) fn store_report_headers() -> Vec<&'static str> {
    vec![
        "store_id",
        "uptime_last_hour",
        "downtime_last_hour",
        "uptime_last_day",
        "downtime_last_day",
        "uptime_last_week",
        "downtime_last_week",
    ]
}
