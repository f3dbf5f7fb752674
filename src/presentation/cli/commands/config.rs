use std::path::Path;

use anyhow::Context;
use colored::Colorize;

use crate::application::config::AppConfig;

/// Print the effective configuration as TOML.
///
/// # Errors
///
/// Returns an error if the configuration cannot be serialized.
pub fn run_config(config: &AppConfig, source: &Path) -> anyhow::Result<()> {
    println!("{}", format!("# {}", source.display()).dimmed());
    println!("{}", render_config(config)?);
    Ok(())
}

fn render_config(config: &AppConfig) -> anyhow::Result<String> {
    toml::to_string_pretty(config).context("Failed to serialize config")
}
