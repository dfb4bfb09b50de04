//! Select command implementation
//!
//! Resolves an identifier to its part tokens and decision tag without
//! touching any image data.

use anyhow::{Context, Result};
use colored::Colorize;
use robohash_core::{select, PartSelection};
use std::process::ExitCode;

use super::json_output::{CommandOutput, JsonError, SelectResult};
use crate::settings::{Settings, SourceArgs};

/// Run the select command
///
/// # Arguments
/// * `settings` - Resolved configuration
/// * `identifier` - The identifier to select parts for
/// * `key` - `--key` override, if any
/// * `source` - Set and catalog source flags
/// * `json_output` - Whether to output machine-readable JSON
///
/// # Returns
/// Exit code: 0 on success, 1 on failure (JSON mode)
pub fn run(
    settings: &Settings,
    identifier: &str,
    key: Option<&str>,
    source: &SourceArgs<'_>,
    json_output: bool,
) -> Result<ExitCode> {
    let set = settings.set_name(source.set);
    let result = select_for(settings, identifier, key, source);

    if json_output {
        return match result {
            Ok(selection) => {
                CommandOutput::success(SelectResult {
                    identifier: identifier.to_string(),
                    set: set.to_string(),
                    color: selection.color.clone(),
                    tag: selection.tag(),
                    tokens: selection.tokens(),
                    parts: selection.parts,
                })
                .print()?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                let error = JsonError::from_anyhow(&e).with_set(set);
                CommandOutput::<SelectResult>::failure(vec![error]).print()?;
                Ok(ExitCode::from(1))
            }
        };
    }

    let selection = result?;
    println!("{} {}", "Identifier:".cyan().bold(), identifier);
    println!("{} {}", "Set:".dimmed(), set);
    println!("{} {}", "Color:".dimmed(), selection.color);
    println!("{} {}", "Tag:".dimmed(), selection.tag());
    for token in selection.tokens() {
        println!("  {}", token);
    }
    Ok(ExitCode::SUCCESS)
}

/// Loads the catalog for the requested set and selects parts.
pub fn select_for(
    settings: &Settings,
    identifier: &str,
    key: Option<&str>,
    source: &SourceArgs<'_>,
) -> Result<PartSelection> {
    let set = settings.set_name(source.set);
    let provider = settings.provider(source)?;
    let catalog = provider
        .catalog(set)
        .with_context(|| format!("Failed to load part set '{}'", set))?;
    Ok(select(&catalog, identifier, settings.key(key))?)
}
