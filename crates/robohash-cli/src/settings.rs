//! Effective settings for one CLI invocation.
//!
//! Precedence, highest first: command-line flags, the `ROBOHASH_KEY`
//! environment variable (key only), the `--config` file, built-in defaults.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use robohash_backend_image::{DirectoryAssetSource, DirectoryCatalogProvider, Size};
use robohash_core::{CatalogProvider, JsonCatalogProvider, RobohashConfig};
use tracing::debug;

/// A command-line value that could not be used.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidArgument {
    /// Flag the value was given for, e.g. `--size`
    pub flag: &'static str,
    pub reason: String,
}

impl InvalidArgument {
    pub fn new(flag: &'static str, reason: impl Into<String>) -> Self {
        Self {
            flag,
            reason: reason.into(),
        }
    }
}

impl std::fmt::Display for InvalidArgument {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "invalid {}: {}", self.flag, self.reason)
    }
}

impl std::error::Error for InvalidArgument {}

/// Where catalogs come from, as given on the command line.
#[derive(Debug, Clone, Copy, Default)]
pub struct SourceArgs<'a> {
    /// `--set`
    pub set: Option<&'a str>,
    /// `--sets-dir`
    pub sets_dir: Option<&'a Path>,
    /// `--catalog`, a JSON catalog file used instead of directory discovery
    pub catalog: Option<&'a Path>,
}

/// Configuration after file and environment have been applied.
#[derive(Debug, Clone)]
pub struct Settings {
    config: RobohashConfig,
}

impl Settings {
    /// Loads `--config` (or defaults) and applies the environment.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let config = match config_path {
            Some(path) => RobohashConfig::load(path)
                .with_context(|| format!("Failed to load config file: {}", path.display()))?,
            None => RobohashConfig::default(),
        };
        debug!(config = ?config_path, "configuration loaded");
        Ok(Self::from_config(config.with_env_key()))
    }

    /// Wraps an already resolved config.
    pub fn from_config(config: RobohashConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RobohashConfig {
        &self.config
    }

    /// `--key` if given, otherwise the configured key.
    pub fn key<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.unwrap_or(&self.config.key)
    }

    /// `--set` if given, otherwise the default set.
    pub fn set_name<'a>(&'a self, flag: Option<&'a str>) -> &'a str {
        flag.unwrap_or(&self.config.default_set)
    }

    /// `--sets-dir` if given, otherwise the configured directory.
    pub fn sets_dir(&self, flag: Option<&Path>) -> PathBuf {
        flag.map(Path::to_path_buf)
            .unwrap_or_else(|| self.config.sets_dir.clone())
    }

    /// `--size` if given, otherwise the configured size.
    pub fn size(&self, flag: Option<&str>) -> Result<Size> {
        match flag {
            Some(s) => Size::parse(s)
                .map_err(|e| InvalidArgument::new("--size", format!("'{}': {}", s, e)).into()),
            None => {
                let [width, height] = self.config.size;
                Ok(Size::checked(width, height)?)
            }
        }
    }

    /// Catalog provider for the given source flags.
    ///
    /// With `--catalog` the file is exposed under the requested set name.
    pub fn provider(&self, args: &SourceArgs<'_>) -> Result<Box<dyn CatalogProvider>> {
        let limits = self.config.catalog_limits();
        match args.catalog {
            Some(path) => {
                let set = self.set_name(args.set);
                let provider = JsonCatalogProvider::single_file(path, set, &limits)
                    .with_context(|| format!("Failed to load catalog file: {}", path.display()))?;
                Ok(Box::new(provider))
            }
            None => Ok(Box::new(DirectoryCatalogProvider::new(
                self.sets_dir(args.sets_dir),
                limits,
            ))),
        }
    }

    /// Asset source for one set under the effective sets directory.
    pub fn asset_source(&self, sets_dir: Option<&Path>, set: &str) -> Result<DirectoryAssetSource> {
        let provider = DirectoryCatalogProvider::new(
            self.sets_dir(sets_dir),
            self.config.catalog_limits(),
        );
        Ok(DirectoryAssetSource::new(provider.set_dir(set)?))
    }
}
