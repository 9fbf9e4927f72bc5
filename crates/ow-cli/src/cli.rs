//! CLI argument definitions for the `ow` binary.

use std::path::PathBuf;
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{InfoLevel, Verbosity};
use colorchoice_clap::Color;
use ow_ingest::RawSources;
use ow_load::{DEFAULT_SCHEMA, PgConfig};
use ow_model::RawTable;

#[derive(Parser)]
#[command(
    name = "ow",
    version,
    about = "Order warehouse pipeline - clean raw extracts and load the analytics schema",
    long_about = "Clean the customers, orders and order items extracts into a customer\n\
                  dimension and two fact tables, write them as CSV, and load them into\n\
                  Postgres as a full refresh."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for debug, -vv for trace, -q for warnings only).
    #[command(flatten)]
    pub verbosity: Verbosity<InfoLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow row-level values (emails, names, ids) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,

    /// Print the run summary as JSON instead of tables.
    #[arg(long = "json", global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Clean the raw extracts into the processed tables.
    Transform(TransformArgs),

    /// Load the processed tables into Postgres.
    Load(LoadArgs),

    /// Transform, then load the result.
    Run(RunArgs),
}

/// Where the raw extracts live.
#[derive(Args, Clone)]
pub struct RawArgs {
    /// Directory holding the raw extracts.
    #[arg(long = "raw-dir", value_name = "DIR", default_value = "data/raw")]
    pub raw_dir: PathBuf,

    /// Customers extract (default: <RAW_DIR>/customers.csv).
    #[arg(long = "customers-file", value_name = "PATH")]
    pub customers_file: Option<PathBuf>,

    /// Orders extract (default: <RAW_DIR>/orders.csv).
    #[arg(long = "orders-file", value_name = "PATH")]
    pub orders_file: Option<PathBuf>,

    /// Order items extract (default: <RAW_DIR>/order_items.csv).
    #[arg(long = "order-items-file", value_name = "PATH")]
    pub order_items_file: Option<PathBuf>,
}

impl RawArgs {
    pub fn sources(&self) -> RawSources {
        let overrides = [
            (RawTable::Customers, &self.customers_file),
            (RawTable::Orders, &self.orders_file),
            (RawTable::OrderItems, &self.order_items_file),
        ];
        overrides
            .into_iter()
            .fold(RawSources::in_dir(&self.raw_dir), |sources, (table, path)| {
                match path {
                    Some(path) => sources.with_file(table, path.clone()),
                    None => sources,
                }
            })
    }
}

/// Postgres connection settings. Each falls back to the matching
/// `POSTGRES_*` environment variable.
#[derive(Args, Clone)]
pub struct PgArgs {
    #[arg(long = "pg-host", env = "POSTGRES_HOST")]
    pub host: String,

    #[arg(long = "pg-port", env = "POSTGRES_PORT", default_value_t = 5432)]
    pub port: u16,

    #[arg(long = "pg-database", env = "POSTGRES_DB")]
    pub database: String,

    #[arg(long = "pg-user", env = "POSTGRES_USER")]
    pub user: String,

    #[arg(long = "pg-password", env = "POSTGRES_PASSWORD", hide_env_values = true)]
    pub password: String,

    /// Destination schema, created if missing.
    #[arg(long = "pg-schema", default_value = DEFAULT_SCHEMA)]
    pub schema: String,

    /// Connection pool size.
    #[arg(long = "max-connections", default_value_t = 2)]
    pub max_connections: u32,

    /// Extra connection attempts after the first failure.
    #[arg(long = "connect-retries", default_value_t = 3)]
    pub connect_retries: u32,

    /// Base delay between connection attempts, in milliseconds.
    #[arg(long = "retry-backoff-ms", default_value_t = 1000)]
    pub retry_backoff_ms: u64,
}

impl PgArgs {
    pub fn config(&self) -> PgConfig {
        let mut config = PgConfig::new(
            self.host.clone(),
            self.port,
            self.database.clone(),
            self.user.clone(),
            self.password.clone(),
        );
        config.schema = self.schema.clone();
        config.max_connections = self.max_connections;
        config.connect_retries = self.connect_retries;
        config.retry_backoff = Duration::from_millis(self.retry_backoff_ms);
        config
    }
}

#[derive(Args)]
pub struct TransformArgs {
    #[command(flatten)]
    pub raw: RawArgs,

    /// Directory the processed tables are written to.
    #[arg(long = "processed-dir", value_name = "DIR", default_value = "data/processed")]
    pub processed_dir: PathBuf,

    /// Compute and report without writing any file.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Args)]
pub struct LoadArgs {
    /// Directory holding the processed tables.
    #[arg(long = "processed-dir", value_name = "DIR", default_value = "data/processed")]
    pub processed_dir: PathBuf,

    #[command(flatten)]
    pub pg: PgArgs,
}

#[derive(Args)]
pub struct RunArgs {
    #[command(flatten)]
    pub raw: RawArgs,

    /// Directory the processed tables are written to.
    #[arg(long = "processed-dir", value_name = "DIR", default_value = "data/processed")]
    pub processed_dir: PathBuf,

    /// Load straight from memory without writing the processed CSVs.
    #[arg(long = "no-write")]
    pub no_write: bool,

    /// Compute and report without writing or loading.
    #[arg(long = "dry-run")]
    pub dry_run: bool,

    #[command(flatten)]
    pub pg: PgArgs,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
