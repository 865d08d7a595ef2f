use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::service::{ReportService, ReportSettings};
use crate::db::initialize::init_db;
use crate::db::log::ttlog;
use crate::db::queries::SqliteStore;
use crate::errors::{AppError, AppResult};
use crate::models::metrics::{MetricsRow, StoreDetailRow};
use crate::models::report::{ReportOutput, ReportPoll, ReportRows};
use crate::ui::messages::{field, header, info, success, warning};
use crate::utils::colors::{GREY, RESET, color_for_uptime};
use crate::utils::formatting::{bold, pad_right};
use std::sync::Arc;

/// Handle the `report` command: trigger a report job, wait for it and
/// print where the artifact landed.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Report { store, format } = &cli.command else {
        return Ok(());
    };

    let store_db = SqliteStore::open(&cfg.database)?;
    store_db.with_conn(init_db)?;
    let source = Arc::new(store_db);

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let settings = ReportSettings {
        output_dir: cfg.output_path(),
        format: format.unwrap_or(cfg.export_format),
        default_timezone: cfg.default_timezone.clone(),
    };
    let service = ReportService::new(source.clone(), runtime.handle().clone(), settings);

    let report_id = match store {
        Some(store_id) => service.trigger_single_store_report(store_id),
        None => service.trigger_report(),
    };
    info(format!("Report triggered: {}", report_id));

    let outcome = runtime.block_on(service.wait(&report_id))?;

    match outcome {
        ReportPoll::Complete(output) => {
            print_output(&output);
            success(format!("Report written to {}", output.path.display()));

            let _ = source.with_conn(|c| {
                ttlog(
                    c,
                    "report",
                    &report_id,
                    &format!("{} rows written to {}", output.rows.len(), output.path.display()),
                )
            });
            Ok(())
        }
        ReportPoll::Failed(reason) => {
            let _ = source.with_conn(|c| ttlog(c, "report_failed", &report_id, &reason));
            Err(AppError::Job(reason))
        }
        ReportPoll::Running => Err(AppError::Job(format!("report {} did not finish", report_id))),
    }
}

fn print_output(output: &ReportOutput) {
    match &output.rows {
        ReportRows::Stores(rows) => print_store_rows(rows),
        ReportRows::Detail(row) => print_detail(row),
    }

    for s in &output.skipped {
        let kind = if s.configuration { "configuration" } else { "data" };
        warning(format!("Store {} skipped ({}): {}", s.store_id, kind, s.reason));
    }
}

fn print_store_rows(rows: &[MetricsRow]) {
    if rows.is_empty() {
        info("No stores found.");
        return;
    }

    println!(
        "{} {:>10} {:>10} {:>10} {:>10} {:>10} {:>10}",
        bold(&pad_right("STORE", 38)),
        "UP 1h(m)",
        "DOWN 1h(m)",
        "UP 1d(h)",
        "DOWN 1d(h)",
        "UP 1w(h)",
        "DOWN 1w(h)"
    );
    println!("{}{}{}", GREY, "-".repeat(104), RESET);

    for r in rows {
        println!(
            "{} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2} {:>10.2}",
            pad_right(&r.store_id, 38),
            r.uptime_last_hour,
            r.downtime_last_hour,
            r.uptime_last_day,
            r.downtime_last_day,
            r.uptime_last_week,
            r.downtime_last_week
        );
    }
    println!();
}

fn print_detail(row: &StoreDetailRow) {
    header(format!("Store {}", row.store_id));
    field("Timezone", &row.timezone);
    field("Generated at", &row.report_generated_at);
    field("Business hours", &row.business_hours);
    println!();

    let windows = [
        (
            "Last day",
            row.uptime_last_day_hours,
            row.downtime_last_day_hours,
            row.uptime_percentage_last_day,
            row.status_records_last_day,
        ),
        (
            "Last week",
            row.uptime_last_week_hours,
            row.downtime_last_week_hours,
            row.uptime_percentage_last_week,
            row.status_records_last_week,
        ),
        (
            "Last month",
            row.uptime_last_month_hours,
            row.downtime_last_month_hours,
            row.uptime_percentage_last_month,
            row.status_records_last_month,
        ),
    ];

    for (label, up, down, pct, records) in windows {
        println!(
            "{} up {:>8.2}h  down {:>8.2}h  {}{:>6.2}%{}  {}({} records){}",
            pad_right(label, 11),
            up,
            down,
            color_for_uptime(pct),
            pct,
            RESET,
            GREY,
            records,
            RESET
        );
    }
    println!();
}
