//! Render command implementation
//!
//! Selects parts for an identifier, composites them and writes a PNG.

use anyhow::{Context, Result};
use colored::Colorize;
use rand::RngCore;
use robohash_backend_image::{write_rgba, PngConfig, Renderer};
use std::path::Path;
use std::process::ExitCode;
use std::time::Instant;
use tracing::info;

use super::json_output::{CommandOutput, JsonError, RenderSummary};
use super::select::select_for;
use crate::settings::{InvalidArgument, Settings, SourceArgs};

/// Options for one render.
#[derive(Debug, Clone, Copy)]
pub struct RenderArgs<'a> {
    /// Identifier; ignored when `random` is set
    pub identifier: Option<&'a str>,
    /// Use a fresh random identifier
    pub random: bool,
    /// `--key` override
    pub key: Option<&'a str>,
    /// `--size WxH` override
    pub size: Option<&'a str>,
    /// Output PNG path
    pub out: &'a Path,
}

/// Run the render command
///
/// # Returns
/// Exit code: 0 on success, 1 on failure (JSON mode)
pub fn run(
    settings: &Settings,
    args: &RenderArgs<'_>,
    source: &SourceArgs<'_>,
    json_output: bool,
) -> Result<ExitCode> {
    let start = Instant::now();
    let set = settings.set_name(source.set);
    let result = render_to_file(settings, args, source);

    if json_output {
        return match result {
            Ok(summary) => {
                CommandOutput::success(summary).print()?;
                Ok(ExitCode::SUCCESS)
            }
            Err(e) => {
                let error = JsonError::from_anyhow(&e).with_set(set);
                CommandOutput::<RenderSummary>::failure(vec![error]).print()?;
                Ok(ExitCode::from(1))
            }
        };
    }

    let summary = result?;
    println!("{} {}", "Identifier:".cyan().bold(), summary.identifier);
    println!("{} {}", "Set:".dimmed(), summary.set);
    println!("{} {}", "Tag:".dimmed(), summary.tag);
    println!(
        "\n{} Wrote {} ({}x{}, {}) in {}ms",
        "SUCCESS".green().bold(),
        summary.output,
        summary.width,
        summary.height,
        &summary.blake3[..16],
        start.elapsed().as_millis()
    );
    Ok(ExitCode::SUCCESS)
}

/// Renders and writes the PNG, returning what was written.
pub fn render_to_file(
    settings: &Settings,
    args: &RenderArgs<'_>,
    source: &SourceArgs<'_>,
) -> Result<RenderSummary> {
    let identifier = match (args.random, args.identifier) {
        (true, _) => random_identifier(),
        (false, Some(id)) => id.to_string(),
        (false, None) => {
            return Err(InvalidArgument::new("--id", "either --id or --random is required").into())
        }
    };
    let set = settings.set_name(source.set);
    let size = settings.size(args.size)?;

    let selection = select_for(settings, &identifier, args.key, source)?;
    let assets = settings.asset_source(source.sets_dir, set)?;
    let renderer =
        Renderer::new(Box::new(assets)).with_parallel(settings.config().parallel_fetch);
    let rendered = renderer
        .render(&selection)
        .with_context(|| format!("Failed to render '{}' from set '{}'", identifier, set))?;

    let image = rendered.resized(size)?;
    let hash = write_rgba(&image, args.out, &PngConfig::default())
        .with_context(|| format!("Failed to write {}", args.out.display()))?;
    info!(output = %args.out.display(), tag = %rendered.tag, "rendered");

    Ok(RenderSummary {
        identifier,
        set: set.to_string(),
        tag: rendered.tag,
        tokens: rendered.tokens,
        width: image.width,
        height: image.height,
        output: args.out.display().to_string(),
        blake3: hash,
    })
}

/// Eight random bytes as lowercase hex.
pub fn random_identifier() -> String {
    let mut bytes = [0u8; 8];
    rand::thread_rng().fill_bytes(&mut bytes);
    bytes.iter().map(|b| format!("{:02x}", b)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_random_identifier_shape() {
        let id = random_identifier();
        assert_eq!(id.len(), 16);
        assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
        assert_ne!(random_identifier(), random_identifier());
    }

    #[test]
    fn test_missing_identifier_is_error() {
        let settings = Settings::from_config(Default::default());
        let args = RenderArgs {
            identifier: None,
            random: false,
            key: None,
            size: None,
            out: Path::new("out.png"),
        };
        let err = render_to_file(&settings, &args, &SourceArgs::default()).unwrap_err();
        assert!(err.to_string().contains("--id"));
        assert_eq!(
            super::super::json_output::error_code(&err),
            super::super::json_output::error_codes::INVALID_ARGUMENT
        );
    }

    #[test]
    fn test_bad_size_is_argument_error() {
        let settings = Settings::from_config(Default::default());
        let args = RenderArgs {
            identifier: Some("alice"),
            random: false,
            key: None,
            size: Some("5000x5000"),
            out: Path::new("out.png"),
        };
        let err = render_to_file(&settings, &args, &SourceArgs::default()).unwrap_err();
        assert_eq!(super::super::json_output::error_code(&err), "CLI_002");
    }
}
