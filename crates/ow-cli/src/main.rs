//! Order warehouse CLI.

use std::io::{self, IsTerminal};

use clap::{ColorChoice, Parser};
use ow_cli::commands::{TransformRequest, run_all, run_load, run_transform};
use ow_cli::logging::{LogConfig, LogFormat, init_logging};
use ow_cli::summary::{print_report, print_report_json};
use ow_cli::types::CommandReport;
use tracing::level_filters::LevelFilter;

mod cli;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }

    let result = match &cli.command {
        Command::Transform(args) => run_transform(&TransformRequest {
            sources: args.raw.sources(),
            processed_dir: args.processed_dir.clone(),
            dry_run: args.dry_run,
        })
        .map(|outcome| outcome.report),
        Command::Load(args) => run_load(&args.processed_dir, &args.pg.config()),
        Command::Run(args) => run_all(
            &TransformRequest {
                sources: args.raw.sources(),
                processed_dir: args.processed_dir.clone(),
                dry_run: args.dry_run,
            },
            args.no_write,
            &args.pg.config(),
        ),
    };

    let exit_code = match result {
        Ok(report) => report_outcome(&report, cli.json),
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn report_outcome(report: &CommandReport, json: bool) -> i32 {
    if !json {
        print_report(report);
        return 0;
    }
    match print_report_json(report) {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: failed to render summary: {error}");
            1
        }
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.log_data = cli.log_data;
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}
