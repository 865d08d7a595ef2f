use crate::export::ExportFormat;
use clap::{Parser, Subcommand};

/// Command-line interface definition for rStoreMon
/// Store uptime/downtime reports over business hours, backed by SQLite
#[derive(Parser)]
#[command(
    name = "rstoremon",
    version = env!("CARGO_PKG_VERSION"),
    about = "Estimate store uptime and downtime during business hours from sparse status polls",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Override the directory where report files are written
    #[arg(global = true, long = "output", value_name = "DIR")]
    pub output: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Show the configuration file
    Config {
        #[arg(long = "print", help = "Print the current configuration")]
        print_config: bool,
    },

    /// Manage the database (migrations, integrity checks, etc.)
    Db {
        #[arg(long = "migrate", help = "Run pending database migrations")]
        migrate: bool,

        #[arg(long = "check", help = "Check database integrity")]
        check: bool,

        #[arg(long = "vacuum", help = "Optimize the database using VACUUM")]
        vacuum: bool,

        #[arg(long = "info", help = "Show database information")]
        info: bool,
    },

    /// Print the internal log table
    Log {
        #[arg(long = "limit", default_value_t = 20, help = "Number of rows to show")]
        limit: usize,
    },

    /// Generate an uptime/downtime report
    Report {
        /// Detail report (day/week/month) for a single store
        #[arg(long = "store", value_name = "STORE_ID")]
        store: Option<String>,

        #[arg(long, value_enum)]
        format: Option<ExportFormat>,
    },

    /// Show data availability for a store
    Summary {
        /// Store identifier
        store_id: String,
    },
}
