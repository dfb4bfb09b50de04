//! Sets command implementation
//!
//! Lists the part sets found under the sets directory.

use anyhow::{Context, Result};
use colored::Colorize;
use robohash_backend_image::DirectoryCatalogProvider;
use robohash_core::CatalogProvider;
use std::path::Path;
use std::process::ExitCode;

use super::json_output::{CommandOutput, SetsResult};
use crate::settings::Settings;

/// Run the sets command
pub fn run(settings: &Settings, sets_dir: Option<&Path>, json_output: bool) -> Result<ExitCode> {
    let dir = settings.sets_dir(sets_dir);
    let provider = DirectoryCatalogProvider::new(&dir, settings.config().catalog_limits());
    let sets = provider
        .set_names()
        .with_context(|| format!("Failed to list sets in {}", dir.display()))?;

    if json_output {
        CommandOutput::success(SetsResult {
            sets_dir: dir.display().to_string(),
            sets,
        })
        .print()?;
        return Ok(ExitCode::SUCCESS);
    }

    println!("{} {}", "Sets in:".cyan().bold(), dir.display());
    if sets.is_empty() {
        println!("  {}", "(none)".dimmed());
    }
    for set in &sets {
        let marker = if *set == settings.config().default_set {
            " (default)".dimmed().to_string()
        } else {
            String::new()
        };
        println!("  {}{}", set, marker);
    }
    Ok(ExitCode::SUCCESS)
}
