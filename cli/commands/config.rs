use crate::output;
use anyhow::{Context, Result};
use srcpack_core::Config;

/// Prints the merged configuration as TOML; nothing is scanned or written.
pub fn handle_print_config(config: &Config) -> Result<()> {
    let rendered = config
        .to_toml_string()
        .context("Failed to render effective configuration")?;
    output::write_to_stdout(&rendered)
}
