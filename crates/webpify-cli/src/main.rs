mod commands;
mod logging;
mod progress;

use std::process::ExitCode;

use anyhow::Context;
use clap::{CommandFactory, Parser};
use colored::*;
use commands::{Cli, Commands, ConvertArgs};
use dotenv::dotenv;
use progress::CliReporter;
use tracing::{error, info};
use webpify_core::{AppConfig, ConversionJob, ConvertEngine};

fn main() -> ExitCode {
    dotenv().ok();

    let _guard = logging::init_logger();

    let args = Cli::parse();

    match args.command {
        Some(Commands::Convert(convert_args)) => {
            match run_convert(args.config.as_deref(), &convert_args) {
                Ok(clean) if clean || !convert_args.strict => ExitCode::SUCCESS,
                Ok(_) => ExitCode::FAILURE,
                Err(err) => {
                    error!("Error: {:#}", err);
                    ExitCode::FAILURE
                }
            }
        }
        Some(Commands::PrintConfig(convert_args)) => {
            match resolve_config(args.config.as_deref(), &convert_args) {
                Ok(config) => {
                    println!("Configuration: {:#?}", config);
                    ExitCode::SUCCESS
                }
                Err(err) => {
                    error!("Error: {:#}", err);
                    ExitCode::FAILURE
                }
            }
        }
        None => {
            let _ = Cli::command().print_long_help();
            ExitCode::SUCCESS
        }
    }
}

fn resolve_config(
    path: Option<&std::path::Path>,
    convert_args: &ConvertArgs,
) -> anyhow::Result<AppConfig> {
    let mut config = webpify_core::config::load_configuration(path)
        .context("Error loading configuration")?;
    convert_args.apply(&mut config);
    Ok(config)
}

/// Returns whether every file converted (and deleted, when asked) cleanly.
fn run_convert(
    path: Option<&std::path::Path>,
    convert_args: &ConvertArgs,
) -> anyhow::Result<bool> {
    let config = resolve_config(path, convert_args)?;
    let job = ConversionJob::from_config(&config)?;

    let engine = ConvertEngine::new(job);
    let reporter = CliReporter::new();
    let summary = engine
        .run(&reporter)
        .with_context(|| format!("Unable to convert images under {}", config.source_root))?;

    info!(
        "{} converted, {} failed, {} skipped in {}",
        format!("{}", summary.converted).green(),
        format!("{}", summary.failed).red(),
        format!("{}", summary.skipped).yellow(),
        format!("{:.2}s", summary.duration.as_secs_f64()).cyan(),
    );
    if summary.deleted > 0 || summary.delete_failed > 0 {
        info!(
            "{} originals deleted, {} could not be deleted",
            format!("{}", summary.deleted).green(),
            format!("{}", summary.delete_failed).red(),
        );
    }
    if summary.collisions > 0 {
        info!(
            "{} outputs were overwritten by files with the same name",
            format!("{}", summary.collisions).yellow(),
        );
    }

    Ok(summary.is_clean())
}
