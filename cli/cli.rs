mod cli_args;
mod commands;
mod output;

use anyhow::{Context, Result};
use clap::Parser;
use colored::*;
use log;
use std::process;

use cli_args::Cli;
use srcpack_core::{AppError, BundleFormat, Config};

fn main() {
    let cli_args = Cli::parse();

    setup_logging(cli_args.quiet, cli_args.verbose);

    let quiet = cli_args.quiet;

    log::debug!("CLI args parsed: {:?}", cli_args);

    let exit_code = match run_app(cli_args, quiet) {
        Ok(_) => {
            log::info!("Application finished successfully.");
            0
        }
        Err(e) => {
            let core_err = e.downcast_ref::<AppError>();
            let exit_code = match core_err {
                Some(AppError::InvalidRoot(_)) => 1,
                Some(AppError::InvalidArgument(_)) => 1,
                Some(AppError::Io(_)) => 2,
                Some(AppError::FileWrite { .. }) => 2,
                Some(AppError::JsonSerialize(_)) => 6,
                Some(AppError::TomlSerialize(_)) => 6,
                Some(_) => 1,
                None => 1,
            };

            // Errors print even with --quiet.
            eprintln!("{} {:#}", "Error:".red().bold(), e);
            exit_code
        }
    };
    log::debug!("Exiting with code {}", exit_code);
    process::exit(exit_code);
}

fn setup_logging(quiet: bool, verbose: u8) {
    let log_level = if quiet {
        log::LevelFilter::Off
    } else {
        match verbose {
            0 => log::LevelFilter::Warn,
            1 => log::LevelFilter::Info,
            2 => log::LevelFilter::Debug,
            _ => log::LevelFilter::Trace,
        }
    };
    env_logger::Builder::new()
        .filter_level(log_level)
        .format_timestamp(None)
        .init();
    log::trace!("Logger initialized with level: {:?}", log_level);
}

fn run_app(cli: Cli, quiet: bool) -> Result<()> {
    if let Some(shell) = cli.completions {
        log::debug!("Executing completion output...");
        return commands::completion::handle_completion_command(shell);
    }

    let config = load_config_for_command(&cli).context("Failed to build configuration")?;

    if cli.print_config {
        log::debug!("Printing effective configuration...");
        return commands::config::handle_print_config(&config);
    }

    log::debug!("Executing pack...");
    commands::pack::handle_pack_command(&cli, &config, quiet)
}

/// Built-in defaults for the chosen format, then CLI overrides on top.
fn load_config_for_command(cli: &Cli) -> Result<Config> {
    let format: BundleFormat = cli.format.parse()?;
    let config = merge_config_with_cli_overrides(Config::for_format(format), cli);
    log::trace!("Effective config: {:?}", config);
    Ok(config)
}

fn merge_config_with_cli_overrides(mut config: Config, cli: &Cli) -> Config {
    log::trace!("Applying CLI overrides to config...");

    if !cli.extensions.is_empty() {
        config = config.with_extensions(&cli.extensions);
    }

    let output_token = commands::pack::resolve_output_path(cli, &config)
        .to_string_lossy()
        .into_owned();
    config = config
        .with_extra_ignores(&cli.ignore)
        .with_extra_ignores([output_token]);

    if cli.no_stats {
        config = config.with_stats(false);
    }
    if cli.skip_hidden {
        config = config.with_skip_hidden(true);
    }
    config
}
