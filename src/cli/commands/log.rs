use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::log::load_log;
use crate::db::pool::DbPool;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { limit } = cmd {
        let pool = DbPool::new(&cfg.database)?;
        let rows = load_log(&pool.conn, *limit)?;

        if rows.is_empty() {
            info("Internal log is empty.");
            return Ok(());
        }

        for (date, operation, target, message) in rows {
            println!("{date} | {operation:<18} | {target} | {message}");
        }
    }
    Ok(())
}
