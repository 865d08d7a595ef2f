use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::report::ReportLogic;
use crate::db::initialize::init_db;
use crate::db::queries::SqliteStore;
use crate::errors::AppResult;
use crate::ui::messages::{field, header, warning};

/// Print data availability for a single store. Runs synchronously; no
/// report job is created.
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Summary { store_id } = cmd {
        let source = SqliteStore::open(&cfg.database)?;
        source.with_conn(init_db)?;

        let summary = ReportLogic::store_summary(&source, store_id, &cfg.default_timezone)?;

        header(format!("Store {}", summary.store_id));
        field("Status records", summary.total_status_records);
        field(
            "Data from",
            summary.data_available_from.as_deref().unwrap_or("-"),
        );
        field(
            "Data until",
            summary.data_available_until.as_deref().unwrap_or("-"),
        );
        field("Timezone", &summary.timezone);
        field("Business day entries", summary.business_days_defined);

        if !summary.has_business_hours {
            warning("No business hours defined, store is treated as open 24/7");
        }
    }
    Ok(())
}
