//! Log output for the CLI.
//!
//! Library crates emit `tracing` events; this installs the subscriber that
//! prints them. `RUST_LOG` wins over the verbosity flag.

use tracing_subscriber::EnvFilter;

/// Installs a stderr `fmt` subscriber.
///
/// Defaults to `warn`, or `debug` for the robohash crates when `verbose` is
/// set. Calling it twice is harmless.
pub fn init(verbose: bool) {
    let default = if verbose {
        "warn,robohash_core=debug,robohash_backend_image=debug,robohash_cli=debug"
    } else {
        "warn"
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| default.into()))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
