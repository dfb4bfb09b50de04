//! RoboHash CLI - Command-line interface for deterministic identicons
//!
//! This binary resolves identifiers to part selections and renders them
//! into PNG images.

use clap::{ArgGroup, Args, Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;

use robohash_cli::commands;
use robohash_cli::commands::json_output::error_code;
use robohash_cli::commands::render::RenderArgs;
use robohash_cli::logging;
use robohash_cli::settings::{Settings, SourceArgs};

/// RoboHash - deterministic robot avatars from any text
#[derive(Parser)]
#[command(name = "robohash")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Path to a JSON config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging (RUST_LOG overrides)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Where part sets come from.
#[derive(Args, Debug, Clone, Default)]
struct SourceOpts {
    /// Part set name (default from config, usually set1)
    #[arg(long)]
    set: Option<String>,

    /// Directory holding one subdirectory per part set
    #[arg(long, conflicts_with = "catalog")]
    sets_dir: Option<PathBuf>,

    /// JSON catalog file to use instead of directory discovery
    #[arg(long)]
    catalog: Option<PathBuf>,
}

impl SourceOpts {
    fn as_args(&self) -> SourceArgs<'_> {
        SourceArgs {
            set: self.set.as_deref(),
            sets_dir: self.sets_dir.as_deref(),
            catalog: self.catalog.as_deref(),
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Print the seeded HMAC-SHA512 digest of an identifier
    Digest {
        /// Identifier to hash
        #[arg(long)]
        id: String,

        /// Secret key (overrides config and ROBOHASH_KEY)
        #[arg(long)]
        key: Option<String>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Print the part tokens and tag selected for an identifier
    Select {
        /// Identifier to select parts for
        #[arg(long)]
        id: String,

        /// Secret key (overrides config and ROBOHASH_KEY)
        #[arg(long)]
        key: Option<String>,

        #[command(flatten)]
        source: SourceOpts,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Render an identifier to a PNG file
    #[command(group(ArgGroup::new("input").required(true).args(["id", "random"])))]
    Render {
        /// Identifier to render
        #[arg(long)]
        id: Option<String>,

        /// Render a random 16-hex-digit identifier
        #[arg(long)]
        random: bool,

        /// Secret key (overrides config and ROBOHASH_KEY)
        #[arg(long)]
        key: Option<String>,

        /// Part set name (default from config, usually set1)
        #[arg(long)]
        set: Option<String>,

        /// Directory holding one subdirectory per part set
        #[arg(long)]
        sets_dir: Option<PathBuf>,

        /// Output size as WxH, each side 2-3 digits
        #[arg(long)]
        size: Option<String>,

        /// Output PNG path
        #[arg(short, long)]
        out: PathBuf,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// Validate part set catalogs
    Validate {
        #[command(flatten)]
        source: SourceOpts,

        /// Validate every discovered set
        #[arg(long, conflicts_with = "set")]
        all: bool,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },

    /// List available part sets
    Sets {
        /// Directory holding one subdirectory per part set
        #[arg(long)]
        sets_dir: Option<PathBuf>,

        /// Output machine-readable JSON (no colored output)
        #[arg(long)]
        json: bool,
    },
}

fn dispatch(cli: Cli) -> anyhow::Result<ExitCode> {
    let settings = Settings::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Digest { id, key, json } => {
            commands::digest::run(&id, settings.key(key.as_deref()), json)
        }
        Commands::Select {
            id,
            key,
            source,
            json,
        } => commands::select::run(&settings, &id, key.as_deref(), &source.as_args(), json),
        Commands::Render {
            id,
            random,
            key,
            set,
            sets_dir,
            size,
            out,
            json,
        } => {
            let source = SourceArgs {
                set: set.as_deref(),
                sets_dir: sets_dir.as_deref(),
                catalog: None,
            };
            let args = RenderArgs {
                identifier: id.as_deref(),
                random,
                key: key.as_deref(),
                size: size.as_deref(),
                out: &out,
            };
            commands::render::run(&settings, &args, &source, json)
        }
        Commands::Validate { source, all, json } => {
            commands::validate::run(&settings, &source.as_args(), all, json)
        }
        Commands::Sets { sets_dir, json } => {
            commands::sets::run(&settings, sets_dir.as_deref(), json)
        }
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    match dispatch(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!(
                "{}[{}]: {:#}",
                colored::Colorize::red("error"),
                error_code(&e),
                e
            );
            ExitCode::from(1)
        }
    }
}
