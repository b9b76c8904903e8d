use crate::cli_args::Cli;
use crate::output::{self, OutputTarget};
use anyhow::{Context, Result};
use log;
use std::path::{Path, PathBuf};
use srcpack_core::{self as core, Config};

pub fn handle_pack_command(args: &Cli, config: &Config, quiet: bool) -> Result<()> {
    let project_root = Config::determine_project_root(Some(&args.root))
        .context("Failed to resolve project root")?;
    log::info!("Project root determined: {}", project_root.display());

    let output_path = resolve_output_path(args, config);
    let target = if args.stdout {
        log::debug!("Output target set to stdout; {} is not written.", output_path.display());
        OutputTarget::Stdout
    } else {
        log::debug!("Output target set to file: {}", output_path.display());
        OutputTarget::File(&output_path)
    };

    trigger_pack(&project_root, config, &target, quiet)
}

pub fn resolve_output_path(args: &Cli, config: &Config) -> PathBuf {
    args.output
        .clone()
        .unwrap_or_else(|| PathBuf::from(config.default_output()))
}

pub fn trigger_pack(
    project_root: &Path,
    config: &Config,
    target: &OutputTarget,
    quiet: bool,
) -> Result<()> {
    log::debug!("Collecting files and rendering tree...");
    let bundle = core::pack_project(project_root, config)
        .context("Failed to collect project files")?;
    log::debug!("Bundle holds {} files.", bundle.files.len());

    if bundle.is_empty() && !quiet {
        output::print_empty_warning();
    }

    let content = core::formatter_for(config.format)
        .format(&bundle)
        .with_context(|| format!("Failed to format bundle as {}", config.format))?;

    output::emit_bundle(&content, target)?;

    if !quiet {
        output::print_confirmation(bundle.files.len(), &content, target);
    }
    Ok(())
}
